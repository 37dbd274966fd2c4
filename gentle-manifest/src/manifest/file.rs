use std::path::{Path, PathBuf};

use super::{Language, Manifest, ParseContext, parse_manifest};
use crate::{
    Error, Result,
    lower::{GeneratedFile, lower_manifest},
};

/// A gentle.toml file with both its raw content and the parsed manifest.
///
/// The raw content is kept so that lowering errors can point back into the
/// source.
#[derive(Debug, Clone)]
pub struct GentleToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl GentleToml {
    /// Open and parse a gentle.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let manifest = parse_manifest(&content, &path.display().to_string())?;
        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Parse content that did not come from disk; `path` is used for
    /// reporting and as the base for a relative output directory.
    pub fn from_content(path: impl Into<PathBuf>, content: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let content = content.into();
        let manifest = parse_manifest(&content, &path.display().to_string())?;
        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// `[output] dir`, relative to the manifest's directory.
    pub fn output_dir(&self) -> Option<PathBuf> {
        let dir = self.manifest.output.dir.as_ref()?;
        let base = self.path.parent().unwrap_or(Path::new(""));
        Some(base.join(dir))
    }

    /// Build the code model for every file. `language` overrides the
    /// manifest's `[output] language`.
    pub fn lower(&self, language: Option<Language>) -> Result<Vec<GeneratedFile>> {
        let filename = self.path.display().to_string();
        let ctx = ParseContext::new(&self.content, &filename);
        let language = language.unwrap_or(self.manifest.output.language);
        lower_manifest(&self.manifest, language, &ctx)
    }
}

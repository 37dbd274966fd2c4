//! Render operation - writing lowered files to disk.

use std::{fs, path::Path};

use codegentle_manifest::GeneratedFile;
use eyre::{Context, Result};
use tracing::debug;

use crate::reports::{PreviewFile, RenderReport, RenderResult, WrittenFile};

/// Options for the render operation.
pub struct RenderOptions<'a> {
    /// Root directory; package directories are created below it.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Render every file and either write it under the output directory or
/// collect it for preview.
pub fn render(files: &[GeneratedFile], opts: RenderOptions) -> Result<RenderReport> {
    let mut written = Vec::with_capacity(files.len());
    let mut previews = Vec::new();

    for file in files {
        let relative = file.relative_path();
        let content = file
            .render()
            .wrap_err_with(|| format!("Failed to render {}", relative.display()))?;

        if opts.dry_run {
            previews.push(PreviewFile {
                path: relative.display().to_string(),
                content,
            });
            continue;
        }

        let path = opts.output_dir.join(&relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        let unchanged = fs::read_to_string(&path).is_ok_and(|existing| existing == content);
        if !unchanged {
            fs::write(&path, &content)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        }
        debug!(path = %path.display(), unchanged, "wrote file");
        written.push(WrittenFile {
            path: relative,
            unchanged,
        });
    }

    let result = if opts.dry_run {
        RenderResult::Preview(previews)
    } else {
        RenderResult::Written {
            output_dir: opts.output_dir.to_path_buf(),
            files: written,
        }
    };
    Ok(RenderReport { result })
}

#[cfg(test)]
mod tests {
    use codegentle_manifest::GentleToml;

    use super::*;

    const MANIFEST: &str = r#"
[[file]]
package = "com.example"

[file.type]
name = "Greeter"
modifiers = ["public"]
"#;

    fn lowered() -> Vec<GeneratedFile> {
        GentleToml::from_content("gentle.toml", MANIFEST)
            .unwrap()
            .lower(None)
            .unwrap()
    }

    #[test]
    fn test_render_writes_package_directories() {
        let dir = tempfile::tempdir().unwrap();
        let report = render(
            &lowered(),
            RenderOptions {
                output_dir: dir.path(),
                dry_run: false,
            },
        )
        .unwrap();

        let path = dir.path().join("com/example/Greeter.java");
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "package com.example;\n\npublic class Greeter {\n}\n");
        let RenderResult::Written { files, .. } = report.result else {
            panic!("expected written files");
        };
        assert_eq!(files.len(), 1);
        assert!(!files[0].unchanged);
    }

    #[test]
    fn test_render_twice_leaves_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let files = lowered();
        let opts = || RenderOptions {
            output_dir: dir.path(),
            dry_run: false,
        };
        render(&files, opts()).unwrap();
        let report = render(&files, opts()).unwrap();
        let RenderResult::Written { files, .. } = report.result else {
            panic!("expected written files");
        };
        assert!(files[0].unchanged);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let report = render(
            &lowered(),
            RenderOptions {
                output_dir: dir.path(),
                dry_run: true,
            },
        )
        .unwrap();

        assert!(!dir.path().join("com").exists());
        let RenderResult::Preview(previews) = report.result else {
            panic!("expected a preview");
        };
        assert_eq!(previews[0].path, "com/example/Greeter.java");
        assert!(previews[0].content.contains("public class Greeter"));
    }
}

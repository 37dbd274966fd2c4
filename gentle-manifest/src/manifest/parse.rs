//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use tracing::debug;

use super::{
    Manifest,
    validate::{ParseContext, validate_manifest},
};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "gentle.toml")
    }
}

impl Manifest {
    /// Parse a gentle.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a gentle.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    let ctx = ParseContext::new(content, filename);
    validate_manifest(&manifest, &ctx)?;
    debug!(
        filename,
        files = manifest.files.len(),
        language = %manifest.output.language,
        "parsed manifest"
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_points_into_source() {
        let err = parse_manifest("[output]\nlanguage = \"cobol\"\n", "gentle.toml").unwrap_err();
        let Error::Parse { span: Some(span), .. } = *err else {
            panic!("expected a parse error with a span");
        };
        assert!(span.offset() >= 9);
    }

    #[test]
    fn test_duplicate_types_are_rejected() {
        let src = r#"
[[file]]
package = "com.example"
type = { name = "User" }

[[file]]
package = "com.example"
type = { name = "User" }
"#;
        let err = Manifest::from_str(src).unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
        assert_eq!(err.to_string(), "type 'com.example.User' is declared more than once");
    }

    #[test]
    fn test_keyword_field_is_rejected() {
        let src = r#"
[[file]]
package = "com.example"

[file.type]
name = "User"
fields = [{ name = "class", type = "String" }]
"#;
        let err = Manifest::from_str(src).unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Manifest::from_file("/definitely/not/here/gentle.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}

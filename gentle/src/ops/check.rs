//! Check operation - manifest validation.

use std::path::Path;

use codegentle_manifest::{GeneratedFile, Manifest};

use crate::reports::{CheckReport, FileSummary};

/// Execute the check operation.
///
/// Loading and lowering have already validated declarations; this renders
/// every file in memory so that problems only the writer detects, such as
/// names it refuses to emit, are reported as well.
pub fn check(manifest: &Manifest, files: &[GeneratedFile], config_path: &Path) -> CheckReport {
    let mut errors = Vec::new();
    let mut summaries = Vec::with_capacity(files.len());

    for file in files {
        let path = file.relative_path().display().to_string();
        if let Err(e) = file.render() {
            errors.push(format!("{path}: {e}"));
        }
        summaries.push(FileSummary {
            path,
            package: file.package().to_string(),
            name: file.name().to_string(),
            language: file.language().to_string(),
        });
    }

    CheckReport {
        config_path: config_path.to_path_buf(),
        type_count: manifest.type_count(),
        files: summaries,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use codegentle_manifest::GentleToml;

    use super::*;

    fn check_content(content: &str) -> CheckReport {
        let toml = GentleToml::from_content("gentle.toml", content).unwrap();
        let files = toml.lower(None).unwrap();
        check(toml.manifest(), &files, toml.path())
    }

    #[test]
    fn test_check_summarizes_files() {
        let report = check_content(
            r#"
[[file]]
package = "com.example"

[file.type]
name = "Outer"

[[file.type.types]]
name = "Inner"

[[file]]
package = "com.example.model"

[file.type]
kind = "interface"
name = "Shape"
"#,
        );
        assert!(report.is_valid());
        assert_eq!(report.type_count, 3);
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.files[1].path, "com/example/model/Shape.java");
        assert_eq!(report.files[1].package, "com.example.model");
        assert_eq!(report.files[1].language, "java");
    }

    #[test]
    fn test_check_reports_rejected_names() {
        let report = check_content(
            r#"
[[file]]
package = "com.example"

[file.type]
name = "Holder"
fields = [{ name = "value", type = "Outer.enum" }]
"#,
        );
        assert!(!report.is_valid());
        assert!(report.errors[0].starts_with("com/example/Holder.java: "));
    }
}

//! Check command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Declared types, nested ones included.
    pub type_count: usize,
    pub files: Vec<FileSummary>,
    /// Render failures, one per file.
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub package: String,
    pub name: String,
    pub language: String,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.section(&format!(
            "{} file{}, {} type{}",
            self.files.len(),
            if self.files.len() == 1 { "" } else { "s" },
            self.type_count,
            if self.type_count == 1 { "" } else { "s" }
        ));
        for file in &self.files {
            out.list_item(&file.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    fn report(errors: Vec<String>) -> CheckReport {
        CheckReport {
            config_path: PathBuf::from("gentle.toml"),
            type_count: 2,
            files: vec![FileSummary {
                path: "com/example/User.java".to_string(),
                package: "com.example".to_string(),
                name: "User".to_string(),
                language: "java".to_string(),
            }],
            errors,
        }
    }

    #[test]
    fn test_valid_report() {
        let mut out = BufferOutput::default();
        report(Vec::new()).render(&mut out);
        assert_eq!(
            out.text,
            "✓ gentle.toml is valid\n\n1 file, 2 types:\n  - com/example/User.java\n"
        );
    }

    #[test]
    fn test_errors_suppress_summary() {
        let mut out = BufferOutput::default();
        report(vec!["com/example/User.java: bad name".to_string()]).render(&mut out);
        assert_eq!(out.text, "error: com/example/User.java: bad name\n");
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&report(Vec::new()).to_json().unwrap()).unwrap();
        assert_eq!(json["type_count"], 2);
        assert_eq!(json["files"][0]["name"], "User");
        assert_eq!(json["errors"].as_array().map(Vec::len), Some(0));
    }
}

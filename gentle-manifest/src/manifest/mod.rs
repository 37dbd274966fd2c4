//! Manifest types and parsing for gentle.toml files.

mod file;
mod language;
mod parse;
mod validate;

use std::path::PathBuf;

use codegentle_common::{Indent, WriterConfig};
pub use file::GentleToml;
pub use language::Language;
pub use parse::parse_manifest;
use serde::{Deserialize, Serialize};
pub use validate::ParseContext;

use crate::{
    Error, Result,
    definition::{FileDef, MethodDef, TypeDef},
};

/// Root manifest for gentle.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,

    /// `[[file]]` entries, rendered in order.
    #[serde(default, rename = "file", skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileDef>,
}

/// The `[output]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub language: Language,

    /// Directory files are written under; `gentle render -o` overrides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    #[serde(default)]
    pub indent: Indent,

    /// Wrap long lines at this column; unlimited when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_limit: Option<usize>,

    /// Write `java.lang` (or Kotlin default-import) classes by simple name
    /// without an import.
    #[serde(default = "default_true")]
    pub skip_implicit_imports: bool,

    /// Simple names that are never shortened by an import.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub always_qualify: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            dir: None,
            indent: Indent::default(),
            column_limit: None,
            skip_implicit_imports: true,
            always_qualify: Vec::new(),
        }
    }
}

impl OutputConfig {
    pub fn writer_config(&self) -> WriterConfig {
        WriterConfig::default()
            .with_indent(self.indent)
            .with_column_limit(self.column_limit.unwrap_or(WriterConfig::UNLIMITED))
    }
}

impl Manifest {
    /// A small manifest with one class, used by `gentle init`.
    pub fn starter(language: Language, package: &str, type_name: &str) -> Self {
        let greet = MethodDef {
            name: "greet".to_string(),
            modifiers: vec!["public".to_string()],
            returns: Some("String".to_string()),
            body: vec![crate::Snippet::Format {
                format: "return %V".to_string(),
                args: vec![crate::SnippetArg::String("Hello, World!".to_string())],
            }],
            ..MethodDef::default()
        };
        Self {
            output: OutputConfig {
                language,
                ..OutputConfig::default()
            },
            files: vec![FileDef {
                package: package.to_string(),
                name: None,
                comment: Some("Generated by gentle. Do not edit.".to_string()),
                static_imports: Vec::new(),
                type_def: TypeDef {
                    name: type_name.to_string(),
                    modifiers: vec!["public".to_string()],
                    methods: vec![greet],
                    ..TypeDef::default()
                },
            }],
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Box::new(Error::from(e)))
    }

    /// Number of declared types, nested ones included.
    pub fn type_count(&self) -> usize {
        fn count(def: &TypeDef) -> usize {
            1 + def.types.iter().map(count).sum::<usize>()
        }
        self.files.iter().map(|file| count(&file.type_def)).sum()
    }
}

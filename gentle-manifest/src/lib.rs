// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! The `gentle.toml` manifest: declarative Java and Kotlin files.
//!
//! A manifest lists `[[file]]` entries, each holding one top-level type with
//! its members. Type references are written as source expressions
//! (`Map<String, List<User>>`, `String?`) and resolved against the file's
//! package and the target language. Loading validates names and packages;
//! [`GentleToml::lower`] turns the declarations into [`codegentle_java`] or
//! [`codegentle_kotlin`] files ready to render.
//!
//! # Module Organization
//!
//! - [`manifest`]: the root [`Manifest`], `[output]` settings, parsing and validation
//! - [`definition`]: declarations of files, types, members and code snippets
//! - [`type_expr`]: parsing type expressions into type references
//! - [`lower`]: building code-model files from declarations
//! - [`error`]: diagnostics with source spans

pub mod definition;
pub mod error;
pub mod lower;
pub mod manifest;
pub mod type_expr;

pub use definition::{
    ConstantDef, FieldDef, FileDef, MethodDef, ParamDef, PropertyKind, Snippet, SnippetArg,
    TypeDef, TypeKind,
};
pub use error::{Error, Result, SourceContext};
pub use lower::GeneratedFile;
pub use manifest::{GentleToml, Language, Manifest, OutputConfig, ParseContext, parse_manifest};
pub use type_expr::TypeResolver;

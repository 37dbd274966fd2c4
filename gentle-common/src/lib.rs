// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Shared model and writer core for codegentle.
//!
//! This crate holds everything the Java and Kotlin dialects have in common:
//! the naming model, type and annotation references, format-driven code
//! values and the emission engine that renders them.
//!
//! # Module Organization
//!
//! - [`naming`]: package names, class names and structural type names
//! - [`refs`]: type references with annotations/nullability, applied annotations
//! - [`code`]: code parts, code values and their builder
//! - [`strategy`]: the naming policy a dialect supplies
//! - [`writer`]: line wrapper, import collector and the generic code writer
//! - [`config`]: indentation and column limit
//! - [`error`]: error type shared by builders and writers

pub mod code;
pub mod config;
pub mod error;
pub mod naming;
pub mod refs;
pub mod strategy;
pub mod writer;

pub use code::{CodePart, CodeValue, CodeValueBuilder};
pub use config::{Indent, WriterConfig};
pub use error::{Error, Result};
pub use naming::{
    ArrayTypeName, ClassName, PackageName, ParameterizedTypeName, PrimitiveTypeName, TypeName,
    TypeVariableName, WildcardTypeName,
};
pub use refs::{AnnotationRef, TypeRef, TypeRefStatus};
pub use strategy::WriteStrategy;

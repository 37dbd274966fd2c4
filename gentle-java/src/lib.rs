//! Java source generation for codegentle.
//!
//! Build a [`JavaTypeSpec`] with its builders, wrap it in a [`JavaFile`] and
//! render it. Imports are resolved by the writer: every referenced class is
//! collected up front and written by its shortest unambiguous name.
//!
//! ```
//! use codegentle_common::{CodePart, CodeValue};
//! use codegentle_java::{JavaFile, JavaMethodSpec, JavaModifier, JavaTypeSpec, naming};
//!
//! let main = JavaMethodSpec::builder("main")
//!     .add_modifiers([JavaModifier::Public, JavaModifier::Static])
//!     .add_statement_format(
//!         "%V.out.println(%V)",
//!         [CodePart::type_name(naming::SYSTEM.clone()), CodePart::string("Hi")],
//!     )?
//!     .build()?;
//! let type_spec = JavaTypeSpec::class_builder("Hello").add_method(main).build()?;
//! let file = JavaFile::builder("com.example", type_spec).build()?;
//! assert!(file.render()?.contains("System.out.println(\"Hi\");"));
//! # Ok::<(), Box<codegentle_common::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`spec`]: type, field, method and parameter declarations
//! - [`modifier`]: Java modifiers in declaration order
//! - [`naming`]: well-known `java.lang` class names
//! - [`strategy`]: keyword-aware and permissive naming policies
//! - [`writer`]: the Java dialect of the code writer
//! - [`file`]: compilation units and the two-pass render
//! - [`ext`]: rendering single values for display

pub mod ext;
pub mod file;
pub mod modifier;
pub mod naming;
pub mod spec;
pub mod strategy;
pub mod writer;

pub use ext::ToJavaString;
pub use file::{JavaFile, JavaFileBuilder};
pub use modifier::JavaModifier;
pub use spec::{
    JavaFieldSpec, JavaMethodSpec, JavaParameterSpec, JavaTypeKind, JavaTypeSpec,
};
pub use strategy::{JavaWriteStrategy, ToStringJavaWriteStrategy};
pub use writer::{JavaCodeWriter, JavaDialect};

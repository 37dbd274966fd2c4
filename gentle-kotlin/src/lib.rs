//! Kotlin source generation for codegentle.
//!
//! A [`KotlinFile`] holds top-level properties, functions and types. The
//! writer shares its import resolution with the Java dialect; classes from
//! the packages Kotlin imports by default are written by simple name.
//!
//! ```
//! use codegentle_common::{CodePart, CodeValue};
//! use codegentle_kotlin::{KotlinFile, KotlinFunctionSpec, KotlinPropertySpec, naming};
//!
//! let greeting = KotlinPropertySpec::builder("greeting", naming::STRING.clone())
//!     .initializer(CodeValue::format("%V", [CodePart::string("Hi")])?)
//!     .build()?;
//! let say_hello = KotlinFunctionSpec::builder("sayHello")
//!     .add_statement("println(greeting)")
//!     .build()?;
//! let file = KotlinFile::builder("com.example", "Greeting")
//!     .add_property(greeting)
//!     .add_function(say_hello)
//!     .build()?;
//! assert!(file.render()?.contains("val greeting: String = \"Hi\""));
//! # Ok::<(), Box<codegentle_common::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`spec`]: type, function, property, constructor and parameter declarations
//! - [`modifier`]: Kotlin modifiers in conventional order
//! - [`naming`]: well-known `kotlin.*` class names and primitive mapping
//! - [`strategy`]: keyword-aware and permissive naming policies
//! - [`writer`]: the Kotlin dialect of the code writer
//! - [`file`]: source files and the two-pass render
//! - [`ext`]: rendering single values for display

pub mod ext;
pub mod file;
pub mod modifier;
pub mod naming;
pub mod spec;
pub mod strategy;
pub mod writer;

pub use ext::ToKotlinString;
pub use file::{KotlinFile, KotlinFileBuilder};
pub use modifier::KotlinModifier;
pub use spec::{
    ContextParameter, KotlinConstructorSpec, KotlinFunctionSpec, KotlinPropertySpec,
    KotlinTypeKind, KotlinTypeSpec, KotlinValueParameterSpec, Mutability,
};
pub use strategy::{KotlinWriteStrategy, ToStringKotlinWriteStrategy};
pub use writer::{KotlinCodeWriter, KotlinDialect};

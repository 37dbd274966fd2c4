//! The dialect policy consulted by writers.

use crate::naming::{TypeName, is_identifier};

/// Answers naming questions for a target dialect.
///
/// Writers call into the strategy for every declared or referenced name, so
/// a permissive implementation turns every check off (useful when rendering a
/// single value for display).
pub trait WriteStrategy {
    /// Short name of the dialect for diagnostics, e.g. `"java"`.
    fn dialect(&self) -> &str;

    /// Whether `name` has the shape of an identifier in this dialect.
    fn is_identifier(&self, name: &str) -> bool {
        is_identifier(name)
    }

    /// Whether `name` may be used as a declared or referenced source name
    /// (an identifier that is not a reserved keyword).
    fn is_valid_source_name(&self, name: &str) -> bool;

    fn is_valid_type_name(&self, type_name: &TypeName) -> bool {
        match type_name {
            TypeName::Class(class_name) => class_name
                .simple_names()
                .into_iter()
                .all(|name| self.is_valid_source_name(name)),
            TypeName::Parameterized(parameterized) => parameterized
                .raw_type()
                .simple_names()
                .into_iter()
                .all(|name| self.is_valid_source_name(name)),
            TypeName::TypeVariable(variable) => self.is_valid_source_name(variable.name()),
            _ => true,
        }
    }

    /// Whether classes in the dialect's implicit package are written by
    /// simple name without an import.
    fn omit_implicit_package(&self) -> bool {
        true
    }

    fn newline(&self) -> &str {
        "\n"
    }
}

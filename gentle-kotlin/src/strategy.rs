//! Kotlin naming policies.

use codegentle_common::WriteStrategy;

/// Hard keywords; these can never be used as plain identifiers.
const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

pub fn is_kotlin_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Letters, digits and `_`, not starting with a digit. Unlike Java, `$` is
/// not part of a Kotlin identifier.
pub fn is_kotlin_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

pub fn is_valid_kotlin_name(name: &str) -> bool {
    is_kotlin_identifier(name) && !is_kotlin_keyword(name)
}

/// Validating strategy used when writing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KotlinWriteStrategy {
    omit_kotlin_package: bool,
}

impl KotlinWriteStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether classes of the default-imported packages are written by
    /// simple name.
    pub fn omit_kotlin_package(mut self, omit: bool) -> Self {
        self.omit_kotlin_package = omit;
        self
    }
}

impl Default for KotlinWriteStrategy {
    fn default() -> Self {
        Self {
            omit_kotlin_package: true,
        }
    }
}

impl WriteStrategy for KotlinWriteStrategy {
    fn dialect(&self) -> &str {
        "kotlin"
    }

    fn is_identifier(&self, name: &str) -> bool {
        is_kotlin_identifier(name)
    }

    fn is_valid_source_name(&self, name: &str) -> bool {
        is_valid_kotlin_name(name)
    }

    fn omit_implicit_package(&self) -> bool {
        self.omit_kotlin_package
    }
}

/// Permissive strategy for rendering a single value for display. Default
/// imports are still shortened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToStringKotlinWriteStrategy;

impl WriteStrategy for ToStringKotlinWriteStrategy {
    fn dialect(&self) -> &str {
        "kotlin"
    }

    fn is_identifier(&self, _name: &str) -> bool {
        true
    }

    fn is_valid_source_name(&self, _name: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_rejected() {
        let strategy = KotlinWriteStrategy::default();
        assert!(strategy.is_valid_source_name("greeting"));
        assert!(strategy.is_valid_source_name("data"));
        assert!(!strategy.is_valid_source_name("fun"));
        assert!(!strategy.is_valid_source_name("val"));
        assert!(!strategy.is_valid_source_name("a$b"));
        assert!(ToStringKotlinWriteStrategy.is_valid_source_name("object"));
    }
}

//! Java naming policies.

use codegentle_common::{WriteStrategy, naming::is_identifier};

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null", "_",
];

pub fn is_java_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// An identifier that is not a reserved word.
pub fn is_valid_java_name(name: &str) -> bool {
    is_identifier(name) && !is_java_keyword(name)
}

/// Validating strategy used when writing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaWriteStrategy {
    omit_java_lang: bool,
}

impl JavaWriteStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `java.lang` classes are written by simple name.
    pub fn omit_java_lang(mut self, omit: bool) -> Self {
        self.omit_java_lang = omit;
        self
    }
}

impl Default for JavaWriteStrategy {
    fn default() -> Self {
        Self {
            omit_java_lang: true,
        }
    }
}

impl WriteStrategy for JavaWriteStrategy {
    fn dialect(&self) -> &str {
        "java"
    }

    fn is_valid_source_name(&self, name: &str) -> bool {
        is_valid_java_name(name)
    }

    fn omit_implicit_package(&self) -> bool {
        self.omit_java_lang
    }
}

/// Permissive strategy for rendering a single value for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToStringJavaWriteStrategy;

impl WriteStrategy for ToStringJavaWriteStrategy {
    fn dialect(&self) -> &str {
        "java"
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
        let strategy = JavaWriteStrategy::default();
        assert!(strategy.is_valid_source_name("value"));
        assert!(!strategy.is_valid_source_name("class"));
        assert!(!strategy.is_valid_source_name("null"));
        assert!(!strategy.is_valid_source_name("1st"));
        assert!(ToStringJavaWriteStrategy.is_valid_source_name("class"));
    }

    #[test]
    fn test_omit_java_lang() {
        assert!(JavaWriteStrategy::default().omit_implicit_package());
        assert!(!JavaWriteStrategy::new().omit_java_lang(false).omit_implicit_package());
    }
}

//! Target languages for rendering.

use std::{fmt, str::FromStr};

use codegentle_common::{ClassName, naming::is_identifier};
use codegentle_java::strategy::is_java_keyword;
use codegentle_kotlin::strategy::{is_kotlin_identifier, is_kotlin_keyword};
use serde::{Deserialize, Serialize};

/// Classes of `java.lang` a manifest may name without a package.
const JAVA_LANG_CLASSES: &[&str] = &[
    "AutoCloseable", "Boolean", "Byte", "CharSequence", "Character", "Class", "Comparable",
    "Deprecated", "Double", "Enum", "Error", "Exception", "Float", "FunctionalInterface",
    "Integer", "Iterable", "Long", "Math", "Number", "Object", "Override", "Record", "Runnable",
    "RuntimeException", "SafeVarargs", "Short", "String", "StringBuilder", "SuppressWarnings",
    "System", "Thread", "Throwable", "Void",
];

const KOTLIN_CLASSES: &[&str] = &[
    "Any", "Array", "Boolean", "BooleanArray", "Byte", "ByteArray", "Char", "CharArray",
    "CharSequence", "Comparable", "Deprecated", "Double", "DoubleArray", "Enum", "Float",
    "FloatArray", "Int", "IntArray", "Long", "LongArray", "Nothing", "Number", "Pair", "Short",
    "ShortArray", "String", "Suppress", "Throwable", "Unit",
];

const KOTLIN_COLLECTION_CLASSES: &[&str] = &[
    "Collection", "Iterable", "List", "Map", "MutableCollection", "MutableIterable",
    "MutableList", "MutableMap", "MutableSet", "Set",
];

/// Supported target languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Java,
    Kotlin,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Kotlin => "kotlin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::Kotlin => "Kotlin",
        }
    }

    pub fn is_keyword(&self, name: &str) -> bool {
        match self {
            Language::Java => is_java_keyword(name),
            Language::Kotlin => is_kotlin_keyword(name),
        }
    }

    pub fn is_identifier(&self, name: &str) -> bool {
        match self {
            Language::Java => is_identifier(name),
            Language::Kotlin => is_kotlin_identifier(name),
        }
    }

    /// The class a bare simple name refers to without an import.
    pub fn builtin_class(&self, simple_name: &str) -> Option<ClassName> {
        match self {
            Language::Java => JAVA_LANG_CLASSES
                .contains(&simple_name)
                .then(|| ClassName::new("java.lang", simple_name)),
            Language::Kotlin => {
                if KOTLIN_CLASSES.contains(&simple_name) {
                    Some(ClassName::new("kotlin", simple_name))
                } else if KOTLIN_COLLECTION_CLASSES.contains(&simple_name) {
                    Some(ClassName::new("kotlin.collections", simple_name))
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "java" => Ok(Language::Java),
            "kotlin" | "kt" => Ok(Language::Kotlin),
            _ => Err(format!(
                "unknown language '{}', expected 'java' or 'kotlin'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Language::from_str("java").unwrap(), Language::Java);
        assert_eq!(Language::from_str("Kotlin").unwrap(), Language::Kotlin);
        assert_eq!(Language::from_str("kt").unwrap(), Language::Kotlin);
        assert!(Language::from_str("scala").is_err());
    }

    #[test]
    fn test_deserialize() {
        let kotlin: Language = serde_json::from_str(r#""kotlin""#).unwrap();
        assert_eq!(kotlin, Language::Kotlin);
    }

    #[test]
    fn test_builtin_classes() {
        assert_eq!(
            Language::Java.builtin_class("Integer").unwrap().canonical_name(),
            "java.lang.Integer"
        );
        assert_eq!(
            Language::Kotlin.builtin_class("List").unwrap().canonical_name(),
            "kotlin.collections.List"
        );
        assert!(Language::Kotlin.builtin_class("Integer").is_none());
    }

    #[test]
    fn test_keywords_differ() {
        assert!(Language::Java.is_keyword("int"));
        assert!(!Language::Kotlin.is_keyword("int"));
        assert!(Language::Kotlin.is_keyword("fun"));
        assert!(Language::Java.is_identifier("a$b"));
        assert!(!Language::Kotlin.is_identifier("a$b"));
    }
}

//! Naming model: packages, classes and the structural type names built on
//! top of them.

mod class;
mod package;
mod type_name;

pub use class::ClassName;
pub use package::PackageName;
pub use type_name::{
    ArrayTypeName, ParameterizedTypeName, PrimitiveTypeName, TypeName, TypeVariableName,
    WildcardBound, WildcardTypeName,
};

/// Whether `name` has identifier shape: a letter, `_` or `$` followed by
/// letters, digits, `_` or `$`. Keywords are a dialect concern and are not
/// checked here.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("value"));
        assert!(is_identifier("_x1"));
        assert!(is_identifier("$proxy"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("a.b"));
    }
}

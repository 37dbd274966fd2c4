//! Well-known Kotlin class names and the mapping from Java primitives.

use std::sync::LazyLock;

use codegentle_common::{ClassName, PackageName, PrimitiveTypeName};

pub const KOTLIN: &str = "kotlin";

/// Packages every Kotlin file imports implicitly.
pub const DEFAULT_IMPORTS: &[&str] = &[
    KOTLIN,
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
];

pub static DEFAULT_IMPORT_PACKAGES: LazyLock<Vec<PackageName>> =
    LazyLock::new(|| DEFAULT_IMPORTS.iter().map(|p| PackageName::parse(p)).collect());

macro_rules! kotlin_class {
    ($package:expr; $($name:ident => $simple:literal),* $(,)?) => {
        $(
            pub static $name: LazyLock<ClassName> =
                LazyLock::new(|| ClassName::new($package, $simple));
        )*
    };
}

kotlin_class!(KOTLIN;
    ANY => "Any",
    UNIT => "Unit",
    NOTHING => "Nothing",
    STRING => "String",
    BOOLEAN => "Boolean",
    BYTE => "Byte",
    SHORT => "Short",
    INT => "Int",
    LONG => "Long",
    CHAR => "Char",
    FLOAT => "Float",
    DOUBLE => "Double",
    ARRAY => "Array",
    BOOLEAN_ARRAY => "BooleanArray",
    BYTE_ARRAY => "ByteArray",
    SHORT_ARRAY => "ShortArray",
    INT_ARRAY => "IntArray",
    LONG_ARRAY => "LongArray",
    CHAR_ARRAY => "CharArray",
    FLOAT_ARRAY => "FloatArray",
    DOUBLE_ARRAY => "DoubleArray",
    DEPRECATED => "Deprecated",
    SUPPRESS => "Suppress",
    THROWABLE => "Throwable",
);

kotlin_class!("kotlin.collections";
    LIST => "List",
    MUTABLE_LIST => "MutableList",
    SET => "Set",
    MUTABLE_SET => "MutableSet",
    MAP => "Map",
    MUTABLE_MAP => "MutableMap",
);

kotlin_class!("kotlin.jvm";
    JVM_STATIC => "JvmStatic",
    JVM_INLINE => "JvmInline",
);

/// The Kotlin class a Java primitive is written as; `void` is `Unit`.
pub fn primitive_class(primitive: PrimitiveTypeName) -> &'static ClassName {
    match primitive {
        PrimitiveTypeName::Void => &UNIT,
        PrimitiveTypeName::Boolean => &BOOLEAN,
        PrimitiveTypeName::Byte => &BYTE,
        PrimitiveTypeName::Short => &SHORT,
        PrimitiveTypeName::Int => &INT,
        PrimitiveTypeName::Long => &LONG,
        PrimitiveTypeName::Char => &CHAR,
        PrimitiveTypeName::Float => &FLOAT,
        PrimitiveTypeName::Double => &DOUBLE,
    }
}

/// The specialized array class for a primitive component, e.g. `IntArray`.
pub fn primitive_array_class(primitive: PrimitiveTypeName) -> Option<&'static ClassName> {
    let class_name = match primitive {
        PrimitiveTypeName::Void => return None,
        PrimitiveTypeName::Boolean => &BOOLEAN_ARRAY,
        PrimitiveTypeName::Byte => &BYTE_ARRAY,
        PrimitiveTypeName::Short => &SHORT_ARRAY,
        PrimitiveTypeName::Int => &INT_ARRAY,
        PrimitiveTypeName::Long => &LONG_ARRAY,
        PrimitiveTypeName::Char => &CHAR_ARRAY,
        PrimitiveTypeName::Float => &FLOAT_ARRAY,
        PrimitiveTypeName::Double => &DOUBLE_ARRAY,
    };
    Some(class_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_mapping() {
        assert_eq!(primitive_class(PrimitiveTypeName::Int).canonical_name(), "kotlin.Int");
        assert_eq!(*primitive_class(PrimitiveTypeName::Void), *UNIT);
        assert_eq!(
            primitive_array_class(PrimitiveTypeName::Char).map(ClassName::simple_name),
            Some("CharArray")
        );
        assert!(primitive_array_class(PrimitiveTypeName::Void).is_none());
    }

    #[test]
    fn test_default_imports() {
        assert!(DEFAULT_IMPORT_PACKAGES.contains(LIST.package_name()));
        assert!(!DEFAULT_IMPORT_PACKAGES.contains(JVM_STATIC.package_name()));
    }
}

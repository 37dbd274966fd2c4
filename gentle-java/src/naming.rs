//! Well-known Java class names.

use std::sync::LazyLock;

use codegentle_common::{ClassName, PackageName};

pub const JAVA_LANG: &str = "java.lang";

pub static JAVA_LANG_PACKAGE: LazyLock<PackageName> = LazyLock::new(|| PackageName::parse(JAVA_LANG));

macro_rules! java_lang {
    ($($name:ident => $simple:literal),* $(,)?) => {
        $(
            pub static $name: LazyLock<ClassName> =
                LazyLock::new(|| ClassName::new(JAVA_LANG, $simple));
        )*
    };
}

java_lang!(
    OBJECT => "Object",
    STRING => "String",
    BOXED_VOID => "Void",
    BOXED_BOOLEAN => "Boolean",
    BOXED_BYTE => "Byte",
    BOXED_SHORT => "Short",
    BOXED_INT => "Integer",
    BOXED_LONG => "Long",
    BOXED_CHAR => "Character",
    BOXED_FLOAT => "Float",
    BOXED_DOUBLE => "Double",
    OVERRIDE => "Override",
    DEPRECATED => "Deprecated",
    FUNCTIONAL_INTERFACE => "FunctionalInterface",
    SUPPRESS_WARNINGS => "SuppressWarnings",
    SAFE_VARARGS => "SafeVarargs",
    RUNNABLE => "Runnable",
    EXCEPTION => "Exception",
    RUNTIME_EXCEPTION => "RuntimeException",
    SYSTEM => "System",
);

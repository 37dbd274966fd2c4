//! Declarations of the files, types and members a manifest describes.
//!
//! Types are written as type expressions (see [`crate::type_expr`]) and code
//! as [`Snippet`]s. Every list is optional and keeps its TOML order.

use serde::{Deserialize, Serialize};

/// One `[[file]]` entry: a package and the type declared in it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FileDef {
    pub package: String,

    /// File name for Kotlin files; defaults to the type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Comment written above the package line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Static imports (Java) or member imports (Kotlin), e.g.
    /// `java.util.Objects.requireNonNull`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_imports: Vec<String>,

    #[serde(rename = "type")]
    pub type_def: TypeDef,
}

/// Kind of a declared type. `record` is Java-only, `object` Kotlin-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
    Object,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Annotation => "annotation",
            TypeKind::Record => "record",
            TypeKind::Object => "object",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TypeDef {
    #[serde(default)]
    pub kind: TypeKind,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,

    /// Annotation classes applied to the type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,

    /// `T`, `T extends Number & Comparable<T>` or `T : Any`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,

    /// Record components (Java) or primary constructor parameters (Kotlin).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParamDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<ConstantDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructors: Vec<MethodDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodDef>,

    /// Nested types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeDef>,
}

/// An enum constant, optionally with constructor arguments.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConstantDef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Snippet>,
}

/// A field (Java) or property (Kotlin).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldDef {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,

    /// Kotlin `var`; ignored for Java.
    #[serde(default, skip_serializing_if = "is_false")]
    pub mutable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Snippet>,
}

/// A method, Kotlin function or constructor. Constructors leave `name`
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MethodDef {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,

    /// Kotlin extension receiver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDef>,

    /// Omitted for `void`/`Unit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,

    /// Java `throws` clause.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<String>,

    /// Arguments of a Kotlin secondary constructor's `this(...)` call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate: Option<Vec<Snippet>>,

    /// Statements, one per entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<Snippet>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ParamDef {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,

    /// `val` or `var` on a Kotlin primary constructor parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyKind>,

    /// Kotlin default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Snippet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Val,
    Var,
}

/// A piece of code: plain text, or a format string with typed arguments.
///
/// ```toml
/// body = [
///     "int total = 0",
///     { format = "return %V.of(%V)", args = [{ type = "java.util.List" }, { name = "total" }] },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Snippet {
    Plain(String),
    Format {
        format: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<SnippetArg>,
    },
}

impl Snippet {
    pub fn format_str(&self) -> &str {
        match self {
            Snippet::Plain(text) => text,
            Snippet::Format { format, .. } => format,
        }
    }
}

/// A typed `%V` argument.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnippetArg {
    /// A type expression; imported when rendered.
    Type(String),
    /// A string literal, escaped for the target language.
    String(String),
    /// Written verbatim: numbers, booleans or raw text.
    Literal(toml::Value),
    /// An identifier.
    Name(String),
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_forms() {
        #[derive(Deserialize)]
        struct Body {
            body: Vec<Snippet>,
        }
        let body: Body = toml::from_str(
            r#"
body = [
    "int x = 0",
    { format = "return %V", args = [{ literal = 1 }] },
]
"#,
        )
        .unwrap();
        assert_eq!(body.body[0], Snippet::Plain("int x = 0".to_string()));
        assert_eq!(
            body.body[1],
            Snippet::Format {
                format: "return %V".to_string(),
                args: vec![SnippetArg::Literal(toml::Value::Integer(1))],
            }
        );
    }

    #[test]
    fn test_type_defaults_to_class() {
        let def: TypeDef = toml::from_str("name = \"Foo\"").unwrap();
        assert_eq!(def.kind, TypeKind::Class);
        assert!(def.fields.is_empty());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = toml::from_str::<TypeDef>("kind = \"struct\"\nname = \"Foo\"").unwrap_err();
        assert!(err.message().contains("unknown variant"));
    }
}

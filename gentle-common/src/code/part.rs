use std::{
    any::Any,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use super::CodeValue;
use crate::refs::{AnnotationRef, TypeRef};

/// The placeholder token consumed by [`CodeValue::format`].
pub const PLACEHOLDER: &str = "%V";

/// One element of a [`CodeValue`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodePart {
    /// Raw text between placeholders.
    Simple(String),
    /// Writes the placeholder token itself.
    Skip,
    /// A value rendered through its `Display` form.
    Literal(String),
    /// An identifier.
    Name(String),
    /// A string literal; `None` renders `null`.
    Str(Option<String>),
    /// A type, written with import resolution.
    Type(TypeRef),
    /// An annotation written inline.
    Annotation(AnnotationRef),
    /// A dialect spec node such as an anonymous class.
    Embedded(EmbeddedSpec),
    /// A nested value, flattened on emission.
    Code(CodeValue),
    Indent(usize),
    Unindent(usize),
    StatementBegin,
    StatementEnd,
    /// A space that becomes a newline when the line would overflow.
    WrappingSpace,
    /// Nothing, or a newline when the line would overflow.
    ZeroWidthSpace,
}

impl CodePart {
    pub fn simple(text: impl Into<String>) -> Self {
        Self::Simple(text.into())
    }

    pub fn skip() -> Self {
        Self::Skip
    }

    pub fn literal(value: impl fmt::Display) -> Self {
        Self::Literal(value.to_string())
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(Some(value.into()))
    }

    pub fn null_string() -> Self {
        Self::Str(None)
    }

    pub fn type_name(type_ref: impl Into<TypeRef>) -> Self {
        Self::Type(type_ref.into())
    }

    pub fn annotation(annotation: AnnotationRef) -> Self {
        Self::Annotation(annotation)
    }

    pub fn embedded<T>(spec: T) -> Self
    where
        T: Any + Send + Sync + fmt::Debug + Eq,
    {
        Self::Embedded(EmbeddedSpec::new(spec))
    }

    pub fn code(value: CodeValue) -> Self {
        Self::Code(value)
    }

    pub fn indent() -> Self {
        Self::Indent(1)
    }

    pub fn unindent() -> Self {
        Self::Unindent(1)
    }
}

impl From<CodeValue> for CodePart {
    fn from(value: CodeValue) -> Self {
        Self::Code(value)
    }
}

impl From<AnnotationRef> for CodePart {
    fn from(value: AnnotationRef) -> Self {
        Self::Annotation(value)
    }
}

impl From<TypeRef> for CodePart {
    fn from(value: TypeRef) -> Self {
        Self::Type(value)
    }
}

/// A spec node from a dialect crate carried inside a code value.
///
/// Dialects recover the concrete node with [`downcast_ref`](Self::downcast_ref).
/// Two embedded specs are equal when they hold equal nodes of the same type.
/// Hashing goes through the node's `Debug` form.
#[derive(Clone)]
pub struct EmbeddedSpec {
    inner: Arc<dyn Any + Send + Sync>,
    debug: Arc<str>,
    eq: fn(&(dyn Any + Send + Sync), &(dyn Any + Send + Sync)) -> bool,
}

impl EmbeddedSpec {
    pub fn new<T>(spec: T) -> Self
    where
        T: Any + Send + Sync + fmt::Debug + Eq,
    {
        let debug: Arc<str> = Arc::from(format!("{spec:?}"));
        Self {
            inner: Arc::new(spec),
            debug,
            eq: |a, b| match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for EmbeddedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EmbeddedSpec").field(&&*self.debug).finish()
    }
}

impl PartialEq for EmbeddedSpec {
    fn eq(&self, other: &Self) -> bool {
        (self.eq)(&*self.inner, &*other.inner)
    }
}

impl Eq for EmbeddedSpec {}

impl Hash for EmbeddedSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.debug.hash(state);
    }
}

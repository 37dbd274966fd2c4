use super::AnnotationRef;
use crate::naming::{
    ArrayTypeName, ClassName, ParameterizedTypeName, PrimitiveTypeName, TypeName,
    TypeVariableName, WildcardTypeName,
};

/// Dialect-specific metadata carried by a [`TypeRef`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRefStatus {
    /// Type-use annotations.
    Java { annotations: Vec<AnnotationRef> },
    /// Type-use annotations plus nullability.
    Kotlin {
        annotations: Vec<AnnotationRef>,
        nullable: bool,
    },
}

impl Default for TypeRefStatus {
    fn default() -> Self {
        Self::Java {
            annotations: Vec::new(),
        }
    }
}

impl TypeRefStatus {
    pub fn annotations(&self) -> &[AnnotationRef] {
        match self {
            Self::Java { annotations } | Self::Kotlin { annotations, .. } => annotations,
        }
    }

    fn annotations_mut(&mut self) -> &mut Vec<AnnotationRef> {
        match self {
            Self::Java { annotations } | Self::Kotlin { annotations, .. } => annotations,
        }
    }
}

/// A [`TypeName`] as used at a particular site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    type_name: TypeName,
    status: TypeRefStatus,
}

impl TypeRef {
    pub fn new(type_name: impl Into<TypeName>) -> Self {
        Self {
            type_name: type_name.into(),
            status: TypeRefStatus::default(),
        }
    }

    pub fn with_status(type_name: impl Into<TypeName>, status: TypeRefStatus) -> Self {
        Self {
            type_name: type_name.into(),
            status,
        }
    }

    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    pub fn status(&self) -> &TypeRefStatus {
        &self.status
    }

    pub fn annotations(&self) -> &[AnnotationRef] {
        self.status.annotations()
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self.status, TypeRefStatus::Kotlin { nullable: true, .. })
    }

    /// Append a type-use annotation.
    pub fn annotated(mut self, annotation: AnnotationRef) -> Self {
        self.status.annotations_mut().push(annotation);
        self
    }

    /// Mark as nullable, switching to the Kotlin status and keeping annotations.
    pub fn nullable(self) -> Self {
        self.with_nullability(true)
    }

    pub fn with_nullability(mut self, nullable: bool) -> Self {
        let annotations = std::mem::take(self.status.annotations_mut());
        self.status = TypeRefStatus::Kotlin {
            annotations,
            nullable,
        };
        self
    }
}

macro_rules! type_ref_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for TypeRef {
                fn from(value: $ty) -> Self {
                    TypeRef::new(value)
                }
            }
        )*
    };
}

type_ref_from!(
    TypeName,
    ClassName,
    PrimitiveTypeName,
    ArrayTypeName,
    ParameterizedTypeName,
    TypeVariableName,
    WildcardTypeName,
);

impl From<&ClassName> for TypeRef {
    fn from(value: &ClassName) -> Self {
        TypeRef::new(value.clone())
    }
}

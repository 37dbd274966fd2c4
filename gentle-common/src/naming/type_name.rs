//! The closed set of type names: primitive, class, array, parameterized,
//! type variable and wildcard.

use std::fmt;

use super::ClassName;
use crate::{Error, Result, refs::TypeRef};

/// A structural description of a type.
///
/// Every variant compares by content, so rebuilt names are equal to the
/// originals they were derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Primitive(PrimitiveTypeName),
    Class(ClassName),
    Array(ArrayTypeName),
    Parameterized(ParameterizedTypeName),
    TypeVariable(TypeVariableName),
    Wildcard(WildcardTypeName),
}

impl TypeName {
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeName::Primitive(p) if *p != PrimitiveTypeName::Void)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeName::Primitive(PrimitiveTypeName::Void))
    }

    /// Whether the type can appear as a type argument or bound.
    pub fn is_reference(&self) -> bool {
        !matches!(self, TypeName::Primitive(_))
    }

    /// The class name behind a class or parameterized type.
    pub fn as_class_name(&self) -> Option<&ClassName> {
        match self {
            TypeName::Class(class_name) => Some(class_name),
            TypeName::Parameterized(parameterized) => Some(&parameterized.raw_type),
            _ => None,
        }
    }

    /// Wrap with an empty status.
    pub fn into_ref(self) -> TypeRef {
        TypeRef::new(self)
    }

    fn require_reference(&self, context: &str) -> Result<()> {
        if self.is_reference() {
            Ok(())
        } else {
            Err(Error::invalid_type(
                self,
                format!("{context} must be a reference type"),
            ))
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Primitive(p) => f.write_str(p.keyword()),
            TypeName::Class(c) => write!(f, "{c}"),
            TypeName::Array(a) => write!(f, "{}[]", a.component.type_name()),
            TypeName::Parameterized(p) => write!(f, "{p}"),
            TypeName::TypeVariable(v) => f.write_str(&v.name),
            TypeName::Wildcard(w) => write!(f, "{w}"),
        }
    }
}

impl From<ClassName> for TypeName {
    fn from(value: ClassName) -> Self {
        TypeName::Class(value)
    }
}

impl From<PrimitiveTypeName> for TypeName {
    fn from(value: PrimitiveTypeName) -> Self {
        TypeName::Primitive(value)
    }
}

impl From<ArrayTypeName> for TypeName {
    fn from(value: ArrayTypeName) -> Self {
        TypeName::Array(value)
    }
}

impl From<ParameterizedTypeName> for TypeName {
    fn from(value: ParameterizedTypeName) -> Self {
        TypeName::Parameterized(value)
    }
}

impl From<TypeVariableName> for TypeName {
    fn from(value: TypeVariableName) -> Self {
        TypeName::TypeVariable(value)
    }
}

impl From<WildcardTypeName> for TypeName {
    fn from(value: WildcardTypeName) -> Self {
        TypeName::Wildcard(value)
    }
}

/// The primitive types, plus `void`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveTypeName {
    Void,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveTypeName {
    pub const ALL: [PrimitiveTypeName; 9] = [
        Self::Void,
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Char,
        Self::Float,
        Self::Double,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    /// Simple name of the `java.lang` wrapper class.
    pub fn boxed_simple_name(&self) -> &'static str {
        match self {
            Self::Void => "Void",
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Char => "Character",
            Self::Float => "Float",
            Self::Double => "Double",
        }
    }

    /// The `java.lang` wrapper class, e.g. `java.lang.Integer` for `int`.
    pub fn boxed(&self) -> ClassName {
        ClassName::new("java.lang", self.boxed_simple_name())
    }

    /// Reverse of [`boxed`](Self::boxed).
    pub fn unbox(class_name: &ClassName) -> Option<Self> {
        if class_name.package_name().to_string() != "java.lang" || !class_name.is_top_level() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|p| p.boxed_simple_name() == class_name.simple_name())
    }
}

/// `component[]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayTypeName {
    component: Box<TypeRef>,
}

impl ArrayTypeName {
    pub fn of(component: impl Into<TypeRef>) -> Result<Self> {
        let component = component.into();
        if component.type_name().is_void() {
            return Err(Error::invalid_type(
                component.type_name(),
                "array component cannot be void",
            ));
        }
        Ok(Self {
            component: Box::new(component),
        })
    }

    pub fn component(&self) -> &TypeRef {
        &self.component
    }
}

/// `raw<arg, ...>`, optionally nested inside another parameterized type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterizedTypeName {
    enclosing: Option<Box<ParameterizedTypeName>>,
    raw_type: ClassName,
    type_arguments: Vec<TypeRef>,
}

impl ParameterizedTypeName {
    pub fn new<I, T>(raw_type: ClassName, type_arguments: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeRef>,
    {
        let type_arguments: Vec<TypeRef> = type_arguments.into_iter().map(Into::into).collect();
        for argument in &type_arguments {
            argument.type_name().require_reference("type argument")?;
        }
        Ok(Self {
            enclosing: None,
            raw_type,
            type_arguments,
        })
    }

    /// `Outer<A>.Inner<B>`
    pub fn nested_class<I, T>(&self, name: &str, type_arguments: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeRef>,
    {
        let mut nested = Self::new(self.raw_type.nested_class(name), type_arguments)?;
        nested.enclosing = Some(Box::new(self.clone()));
        Ok(nested)
    }

    pub fn enclosing(&self) -> Option<&ParameterizedTypeName> {
        self.enclosing.as_deref()
    }

    pub fn raw_type(&self) -> &ClassName {
        &self.raw_type
    }

    pub fn type_arguments(&self) -> &[TypeRef] {
        &self.type_arguments
    }
}

impl fmt::Display for ParameterizedTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.enclosing {
            Some(enclosing) => write!(f, "{enclosing}.{}", self.raw_type.simple_name())?,
            None => write!(f, "{}", self.raw_type)?,
        }
        if !self.type_arguments.is_empty() {
            f.write_str("<")?;
            for (i, argument) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", argument.type_name())?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// A declared or referenced type variable such as `T extends Comparable<T>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVariableName {
    name: String,
    bounds: Vec<TypeRef>,
}

impl TypeVariableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn with_bounds<I, T>(name: impl Into<String>, bounds: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeRef>,
    {
        let bounds: Vec<TypeRef> = bounds.into_iter().map(Into::into).collect();
        for bound in &bounds {
            bound.type_name().require_reference("type variable bound")?;
        }
        Ok(Self {
            name: name.into(),
            bounds,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> &[TypeRef] {
        &self.bounds
    }
}

/// Direction of a wildcard bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    /// `? extends T`
    Upper,
    /// `? super T`
    Lower,
}

/// `?`, `? extends T` or `? super T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WildcardTypeName {
    bound: WildcardBound,
    bounds: Vec<TypeRef>,
}

impl WildcardTypeName {
    /// The unbounded wildcard `?`.
    pub fn unbounded() -> Self {
        Self {
            bound: WildcardBound::Upper,
            bounds: Vec::new(),
        }
    }

    pub fn subtype_of(upper: impl Into<TypeRef>) -> Result<Self> {
        Self::bounded(WildcardBound::Upper, upper.into())
    }

    pub fn supertype_of(lower: impl Into<TypeRef>) -> Result<Self> {
        Self::bounded(WildcardBound::Lower, lower.into())
    }

    fn bounded(bound: WildcardBound, type_ref: TypeRef) -> Result<Self> {
        type_ref.type_name().require_reference("wildcard bound")?;
        Ok(Self {
            bound,
            bounds: vec![type_ref],
        })
    }

    pub fn bound(&self) -> WildcardBound {
        self.bound
    }

    pub fn bounds(&self) -> &[TypeRef] {
        &self.bounds
    }
}

impl fmt::Display for WildcardTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("?")?;
        let keyword = match self.bound {
            WildcardBound::Upper => " extends ",
            WildcardBound::Lower => " super ",
        };
        for (i, bound) in self.bounds.iter().enumerate() {
            f.write_str(if i == 0 { keyword } else { " & " })?;
            write!(f, "{}", bound.type_name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string() -> ClassName {
        ClassName::new("java.lang", "String")
    }

    #[test]
    fn test_primitive_boxing() {
        assert_eq!(
            PrimitiveTypeName::Int.boxed(),
            ClassName::new("java.lang", "Integer")
        );
        assert_eq!(
            PrimitiveTypeName::unbox(&ClassName::new("java.lang", "Character")),
            Some(PrimitiveTypeName::Char)
        );
        assert_eq!(PrimitiveTypeName::unbox(&string()), None);
        assert_eq!(
            PrimitiveTypeName::from_keyword("double"),
            Some(PrimitiveTypeName::Double)
        );
    }

    #[test]
    fn test_structural_equality_across_rebuilds() {
        let a = ArrayTypeName::of(TypeName::from(string())).unwrap();
        let b = ArrayTypeName::of(TypeName::from(ClassName::best_guess("java.lang.String").unwrap()))
            .unwrap();
        assert_eq!(TypeName::from(a), TypeName::from(b));

        let list = ClassName::new("java.util", "List");
        let p1 = ParameterizedTypeName::new(list.clone(), [TypeName::from(string())]).unwrap();
        let p2 = ParameterizedTypeName::new(list, [TypeName::from(string())]).unwrap();
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_reference_type_validation() {
        let list = ClassName::new("java.util", "List");
        assert!(ParameterizedTypeName::new(list, [TypeName::from(PrimitiveTypeName::Int)]).is_err());
        assert!(ArrayTypeName::of(TypeName::from(PrimitiveTypeName::Void)).is_err());
        assert!(ArrayTypeName::of(TypeName::from(PrimitiveTypeName::Int)).is_ok());
        assert!(WildcardTypeName::subtype_of(TypeName::from(PrimitiveTypeName::Long)).is_err());
        assert!(
            TypeVariableName::with_bounds("T", [TypeName::from(PrimitiveTypeName::Boolean)])
                .is_err()
        );
    }

    #[test]
    fn test_display() {
        let map = ParameterizedTypeName::new(
            ClassName::new("java.util", "Map"),
            [
                TypeName::from(string()),
                TypeName::from(WildcardTypeName::subtype_of(TypeName::from(ClassName::new("java.lang", "Number"))).unwrap()),
            ],
        )
        .unwrap();
        assert_eq!(
            map.to_string(),
            "java.util.Map<java.lang.String, ? extends java.lang.Number>"
        );
        assert_eq!(WildcardTypeName::unbounded().to_string(), "?");
    }
}

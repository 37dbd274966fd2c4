use std::collections::BTreeSet;

use codegentle_common::{AnnotationRef, CodePart, CodeValue, Error, Result, TypeRef};

use crate::{modifier::KotlinModifier, strategy::is_valid_kotlin_name};

/// `val` or `var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutability {
    Val,
    Var,
}

impl Mutability {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Val => "val",
            Self::Var => "var",
        }
    }
}

/// A function or constructor parameter. A primary constructor parameter
/// marked `val`/`var` also declares a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KotlinValueParameterSpec {
    pub(crate) name: String,
    pub(crate) type_ref: TypeRef,
    pub(crate) doc: CodeValue,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<KotlinModifier>,
    pub(crate) property: Option<Mutability>,
    pub(crate) default_value: CodeValue,
}

impl KotlinValueParameterSpec {
    pub fn builder(
        name: impl Into<String>,
        type_ref: impl Into<TypeRef>,
    ) -> KotlinValueParameterSpecBuilder {
        KotlinValueParameterSpecBuilder {
            name: name.into(),
            type_ref: type_ref.into(),
            doc: CodeValue::empty(),
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            property: None,
            default_value: CodeValue::empty(),
        }
    }

    pub fn of(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> Result<Self> {
        Self::builder(name, type_ref).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn doc(&self) -> &CodeValue {
        &self.doc
    }

    pub fn annotations(&self) -> &[AnnotationRef] {
        &self.annotations
    }

    pub fn modifiers(&self) -> &BTreeSet<KotlinModifier> {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: KotlinModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn property(&self) -> Option<Mutability> {
        self.property
    }

    pub fn default_value(&self) -> &CodeValue {
        &self.default_value
    }
}

#[derive(Debug, Clone)]
pub struct KotlinValueParameterSpecBuilder {
    name: String,
    type_ref: TypeRef,
    doc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<KotlinModifier>,
    property: Option<Mutability>,
    default_value: CodeValue,
}

impl KotlinValueParameterSpecBuilder {
    /// Text for the `@param` tag of the enclosing function.
    pub fn doc(mut self, doc: impl Into<CodeValue>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn add_annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn add_modifier(mut self, modifier: KotlinModifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn add_modifiers<I>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = KotlinModifier>,
    {
        self.modifiers.extend(modifiers);
        self
    }

    /// Declare a property from a primary constructor parameter.
    pub fn property(mut self, mutability: Mutability) -> Self {
        self.property = Some(mutability);
        self
    }

    pub fn default_value(mut self, value: impl Into<CodeValue>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn default_value_format<I>(self, format: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = CodePart>,
    {
        Ok(self.default_value(CodeValue::format(format, args)?))
    }

    pub fn build(self) -> Result<KotlinValueParameterSpec> {
        if !is_valid_kotlin_name(&self.name) {
            return Err(Error::invalid_name("parameter", self.name));
        }
        if self.type_ref.type_name().is_void() {
            return Err(Error::invalid_type(
                self.type_ref.type_name(),
                "parameters cannot be Unit",
            ));
        }
        if self.property.is_none()
            && let Some(modifier) = self.modifiers.iter().find(|m| {
                !matches!(
                    m,
                    KotlinModifier::Vararg | KotlinModifier::Noinline | KotlinModifier::Crossinline
                )
            })
        {
            return Err(Error::illegal_state(format!(
                "modifier '{modifier}' on parameter '{}' requires val or var",
                self.name
            )));
        }
        Ok(KotlinValueParameterSpec {
            name: self.name,
            type_ref: self.type_ref,
            doc: self.doc,
            annotations: self.annotations,
            modifiers: self.modifiers,
            property: self.property,
            default_value: self.default_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use codegentle_common::PrimitiveTypeName;

    use super::*;

    #[test]
    fn test_property_modifiers_need_val_or_var() {
        let err = KotlinValueParameterSpec::builder("id", PrimitiveTypeName::Long)
            .add_modifier(KotlinModifier::Private)
            .build()
            .unwrap_err();
        assert!(matches!(*err, Error::IllegalState { .. }));

        let parameter = KotlinValueParameterSpec::builder("id", PrimitiveTypeName::Long)
            .add_modifier(KotlinModifier::Private)
            .property(Mutability::Val)
            .build()
            .unwrap();
        assert_eq!(parameter.property(), Some(Mutability::Val));
    }

    #[test]
    fn test_rejects_keyword_and_unit() {
        assert!(KotlinValueParameterSpec::of("in", PrimitiveTypeName::Int).is_err());
        assert!(KotlinValueParameterSpec::of("u", PrimitiveTypeName::Void).is_err());
        assert!(
            KotlinValueParameterSpec::builder("items", PrimitiveTypeName::Int)
                .add_modifier(KotlinModifier::Vararg)
                .build()
                .is_ok()
        );
    }
}

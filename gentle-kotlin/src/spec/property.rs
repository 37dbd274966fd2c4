use std::collections::BTreeSet;

use codegentle_common::{AnnotationRef, CodePart, CodeValue, Error, Result, TypeRef};

use super::Mutability;
use crate::{modifier::KotlinModifier, strategy::is_valid_kotlin_name};

/// A property declaration, top-level or in a type body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KotlinPropertySpec {
    pub(crate) name: String,
    pub(crate) type_ref: TypeRef,
    pub(crate) mutability: Mutability,
    pub(crate) doc: CodeValue,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<KotlinModifier>,
    pub(crate) initializer: CodeValue,
    pub(crate) delegate: CodeValue,
    pub(crate) getter: CodeValue,
    pub(crate) setter: CodeValue,
}

impl KotlinPropertySpec {
    /// A read-only `val`.
    pub fn builder(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> KotlinPropertySpecBuilder {
        KotlinPropertySpecBuilder {
            name: name.into(),
            type_ref: type_ref.into(),
            mutability: Mutability::Val,
            doc: CodeValue::empty(),
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            initializer: CodeValue::empty(),
            delegate: CodeValue::empty(),
            getter: CodeValue::empty(),
            setter: CodeValue::empty(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn mutability(&self) -> Mutability {
        self.mutability
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

    pub fn initializer(&self) -> &CodeValue {
        &self.initializer
    }

    pub fn delegate(&self) -> &CodeValue {
        &self.delegate
    }

    pub fn getter(&self) -> &CodeValue {
        &self.getter
    }

    pub fn setter(&self) -> &CodeValue {
        &self.setter
    }
}

#[derive(Debug, Clone)]
pub struct KotlinPropertySpecBuilder {
    name: String,
    type_ref: TypeRef,
    mutability: Mutability,
    doc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<KotlinModifier>,
    initializer: CodeValue,
    delegate: CodeValue,
    getter: CodeValue,
    setter: CodeValue,
}

impl KotlinPropertySpecBuilder {
    pub fn mutable(mut self, mutable: bool) -> Self {
        self.mutability = if mutable { Mutability::Var } else { Mutability::Val };
        self
    }

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

    pub fn initializer(mut self, initializer: impl Into<CodeValue>) -> Self {
        self.initializer = initializer.into();
        self
    }

    pub fn initializer_format<I>(self, format: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = CodePart>,
    {
        Ok(self.initializer(CodeValue::format(format, args)?))
    }

    /// `by lazy { ... }`
    pub fn delegate(mut self, delegate: impl Into<CodeValue>) -> Self {
        self.delegate = delegate.into();
        self
    }

    /// Body of `get()`.
    pub fn getter(mut self, code: impl Into<CodeValue>) -> Self {
        self.getter = code.into();
        self
    }

    /// Body of `set(value)`.
    pub fn setter(mut self, code: impl Into<CodeValue>) -> Self {
        self.setter = code.into();
        self
    }

    pub fn build(self) -> Result<KotlinPropertySpec> {
        if !is_valid_kotlin_name(&self.name) {
            return Err(Error::invalid_name("property", self.name));
        }
        if self.type_ref.type_name().is_void() {
            return Err(Error::invalid_type(self.type_ref.type_name(), "properties cannot be Unit"));
        }
        if !self.initializer.is_empty() && !self.delegate.is_empty() {
            return Err(Error::illegal_state(format!(
                "property '{}' cannot have both an initializer and a delegate",
                self.name
            )));
        }
        if !self.setter.is_empty() && self.mutability == Mutability::Val {
            return Err(Error::illegal_state(format!(
                "read-only property '{}' cannot have a setter",
                self.name
            )));
        }
        if self.modifiers.contains(&KotlinModifier::Const) && self.mutability == Mutability::Var {
            return Err(Error::illegal_state(format!(
                "const property '{}' must be a val",
                self.name
            )));
        }
        if self.modifiers.contains(&KotlinModifier::Lateinit)
            && (self.mutability == Mutability::Val || !self.initializer.is_empty())
        {
            return Err(Error::illegal_state(format!(
                "lateinit property '{}' must be an uninitialized var",
                self.name
            )));
        }
        Ok(KotlinPropertySpec {
            name: self.name,
            type_ref: self.type_ref,
            mutability: self.mutability,
            doc: self.doc,
            annotations: self.annotations,
            modifiers: self.modifiers,
            initializer: self.initializer,
            delegate: self.delegate,
            getter: self.getter,
            setter: self.setter,
        })
    }
}

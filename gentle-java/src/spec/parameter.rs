use std::collections::BTreeSet;

use codegentle_common::{AnnotationRef, CodeValue, Error, Result, TypeRef};

use crate::{modifier::JavaModifier, strategy::is_valid_java_name};

/// A method, constructor or record component parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JavaParameterSpec {
    pub(crate) name: String,
    pub(crate) type_ref: TypeRef,
    pub(crate) doc: CodeValue,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<JavaModifier>,
}

impl JavaParameterSpec {
    pub fn builder(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> JavaParameterSpecBuilder {
        JavaParameterSpecBuilder {
            name: name.into(),
            type_ref: type_ref.into(),
            doc: CodeValue::empty(),
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
        }
    }

    /// Shorthand for a parameter without annotations or modifiers.
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

    pub fn modifiers(&self) -> &BTreeSet<JavaModifier> {
        &self.modifiers
    }
}

#[derive(Debug, Clone)]
pub struct JavaParameterSpecBuilder {
    name: String,
    type_ref: TypeRef,
    doc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<JavaModifier>,
}

impl JavaParameterSpecBuilder {
    /// Text for the `@param` tag of the enclosing method.
    pub fn doc(mut self, doc: impl Into<CodeValue>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn add_annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn add_modifier(mut self, modifier: JavaModifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn build(self) -> Result<JavaParameterSpec> {
        if !is_valid_java_name(&self.name) {
            return Err(Error::invalid_name("parameter", self.name));
        }
        if let Some(modifier) = self.modifiers.iter().find(|m| **m != JavaModifier::Final) {
            return Err(Error::illegal_state(format!(
                "parameter '{}' may only be final, found '{modifier}'",
                self.name
            )));
        }
        if self.type_ref.type_name().is_void() {
            return Err(Error::invalid_type(self.type_ref.type_name(), "parameters cannot be void"));
        }
        Ok(JavaParameterSpec {
            name: self.name,
            type_ref: self.type_ref,
            doc: self.doc,
            annotations: self.annotations,
            modifiers: self.modifiers,
        })
    }
}

use std::collections::BTreeSet;

use codegentle_common::{AnnotationRef, CodePart, CodeValue, Error, Result, TypeRef};

use crate::{modifier::JavaModifier, strategy::is_valid_java_name};

/// A field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JavaFieldSpec {
    pub(crate) name: String,
    pub(crate) type_ref: TypeRef,
    pub(crate) doc: CodeValue,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<JavaModifier>,
    pub(crate) initializer: CodeValue,
}

impl JavaFieldSpec {
    pub fn builder(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> JavaFieldSpecBuilder {
        JavaFieldSpecBuilder {
            name: name.into(),
            type_ref: type_ref.into(),
            doc: CodeValue::empty(),
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            initializer: CodeValue::empty(),
        }
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

    pub fn initializer(&self) -> &CodeValue {
        &self.initializer
    }

    pub fn has_modifier(&self, modifier: JavaModifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

#[derive(Debug, Clone)]
pub struct JavaFieldSpecBuilder {
    name: String,
    type_ref: TypeRef,
    doc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<JavaModifier>,
    initializer: CodeValue,
}

impl JavaFieldSpecBuilder {
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

    pub fn add_modifiers<I>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = JavaModifier>,
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

    pub fn build(self) -> Result<JavaFieldSpec> {
        if !is_valid_java_name(&self.name) {
            return Err(Error::invalid_name("field", self.name));
        }
        if self.type_ref.type_name().is_void() {
            return Err(Error::invalid_type(self.type_ref.type_name(), "fields cannot be void"));
        }
        Ok(JavaFieldSpec {
            name: self.name,
            type_ref: self.type_ref,
            doc: self.doc,
            annotations: self.annotations,
            modifiers: self.modifiers,
            initializer: self.initializer,
        })
    }
}

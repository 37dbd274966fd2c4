use std::{collections::BTreeSet, fmt};

use codegentle_common::{
    AnnotationRef, CodePart, CodeValue, Error, Result, TypeName, TypeRef, TypeVariableName,
};
use indexmap::IndexMap;

use super::{JavaFieldSpec, JavaMethodSpec, JavaParameterSpec};
use crate::{
    modifier::JavaModifier::{self, Abstract, Final, Public, Static},
    naming::OBJECT,
    strategy::is_valid_java_name,
};

/// The declaration keyword of a type and the modifiers it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaTypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
}

impl JavaTypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "@interface",
            Self::Record => "record",
        }
    }

    fn is_interface_like(&self) -> bool {
        matches!(self, Self::Interface | Self::Annotation)
    }

    pub(crate) fn implicit_field_modifiers(&self) -> &'static [JavaModifier] {
        if self.is_interface_like() {
            &[Public, Static, Final]
        } else {
            &[]
        }
    }

    pub(crate) fn implicit_method_modifiers(&self) -> &'static [JavaModifier] {
        if self.is_interface_like() {
            &[Public, Abstract]
        } else {
            &[]
        }
    }

    pub(crate) fn implicit_type_modifiers(&self) -> &'static [JavaModifier] {
        if self.is_interface_like() {
            &[Public, Static]
        } else {
            &[]
        }
    }

    /// Modifiers implied when a type of this kind is nested in another.
    pub(crate) fn as_member_modifiers(&self) -> &'static [JavaModifier] {
        match self {
            Self::Class => &[],
            _ => &[Static],
        }
    }
}

impl fmt::Display for JavaTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A class, interface, enum, annotation type or record. Anonymous classes
/// and enum constants with arguments or bodies are type specs without a
/// name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaTypeSpec {
    pub(crate) kind: JavaTypeKind,
    pub(crate) name: Option<String>,
    /// Constructor arguments of an anonymous class or enum constant.
    pub(crate) anonymous_args: Option<CodeValue>,
    pub(crate) doc: CodeValue,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<JavaModifier>,
    pub(crate) type_variables: Vec<TypeVariableName>,
    pub(crate) superclass: Option<TypeRef>,
    pub(crate) superinterfaces: Vec<TypeRef>,
    pub(crate) permits: Vec<TypeRef>,
    pub(crate) enum_constants: IndexMap<String, JavaTypeSpec>,
    pub(crate) record_components: Vec<JavaParameterSpec>,
    pub(crate) fields: Vec<JavaFieldSpec>,
    pub(crate) static_block: CodeValue,
    pub(crate) initializer_block: CodeValue,
    pub(crate) methods: Vec<JavaMethodSpec>,
    pub(crate) subtypes: Vec<JavaTypeSpec>,
}

impl JavaTypeSpec {
    pub fn class_builder(name: impl Into<String>) -> JavaTypeSpecBuilder {
        JavaTypeSpecBuilder::new(JavaTypeKind::Class, Some(name.into()), None)
    }

    pub fn interface_builder(name: impl Into<String>) -> JavaTypeSpecBuilder {
        JavaTypeSpecBuilder::new(JavaTypeKind::Interface, Some(name.into()), None)
    }

    pub fn enum_builder(name: impl Into<String>) -> JavaTypeSpecBuilder {
        JavaTypeSpecBuilder::new(JavaTypeKind::Enum, Some(name.into()), None)
    }

    pub fn annotation_builder(name: impl Into<String>) -> JavaTypeSpecBuilder {
        JavaTypeSpecBuilder::new(JavaTypeKind::Annotation, Some(name.into()), None)
    }

    pub fn record_builder(name: impl Into<String>) -> JavaTypeSpecBuilder {
        JavaTypeSpecBuilder::new(JavaTypeKind::Record, Some(name.into()), None)
    }

    /// `new Super(args) { ... }`; the supertype is the first superinterface,
    /// or the superclass when there is none.
    pub fn anonymous_class_builder(args: impl Into<CodeValue>) -> JavaTypeSpecBuilder {
        JavaTypeSpecBuilder::new(JavaTypeKind::Class, None, Some(args.into()))
    }

    pub fn kind(&self) -> JavaTypeKind {
        self.kind
    }

    /// `None` for anonymous classes.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    pub fn anonymous_args(&self) -> Option<&CodeValue> {
        self.anonymous_args.as_ref()
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

    pub fn has_modifier(&self, modifier: JavaModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn type_variables(&self) -> &[TypeVariableName] {
        &self.type_variables
    }

    pub fn superclass(&self) -> Option<&TypeRef> {
        self.superclass.as_ref()
    }

    pub fn superinterfaces(&self) -> &[TypeRef] {
        &self.superinterfaces
    }

    pub fn permits(&self) -> &[TypeRef] {
        &self.permits
    }

    pub fn enum_constants(&self) -> &IndexMap<String, JavaTypeSpec> {
        &self.enum_constants
    }

    pub fn record_components(&self) -> &[JavaParameterSpec] {
        &self.record_components
    }

    pub fn fields(&self) -> &[JavaFieldSpec] {
        &self.fields
    }

    pub fn static_block(&self) -> &CodeValue {
        &self.static_block
    }

    pub fn initializer_block(&self) -> &CodeValue {
        &self.initializer_block
    }

    pub fn methods(&self) -> &[JavaMethodSpec] {
        &self.methods
    }

    pub fn subtypes(&self) -> &[JavaTypeSpec] {
        &self.subtypes
    }

    /// Simple names of the directly nested types.
    pub(crate) fn subtype_names(&self) -> Vec<&str> {
        self.subtypes.iter().filter_map(|t| t.name()).collect()
    }

    pub(crate) fn has_members(&self) -> bool {
        !self.fields.is_empty()
            || !self.methods.is_empty()
            || !self.subtypes.is_empty()
            || !self.static_block.is_empty()
            || !self.initializer_block.is_empty()
    }

    /// Whether `method` is written without a body in this type.
    pub(crate) fn is_abstract_method(&self, method: &JavaMethodSpec) -> bool {
        if method.has_modifier(Abstract) {
            return true;
        }
        self.kind.is_interface_like()
            && method.code.is_empty()
            && !method.has_modifier(JavaModifier::Default)
            && !method.has_modifier(Static)
            && !method.has_modifier(JavaModifier::Private)
    }
}

impl From<JavaTypeSpec> for CodePart {
    fn from(spec: JavaTypeSpec) -> Self {
        CodePart::embedded(spec)
    }
}

#[derive(Debug, Clone)]
pub struct JavaTypeSpecBuilder {
    kind: JavaTypeKind,
    name: Option<String>,
    anonymous_args: Option<CodeValue>,
    doc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<JavaModifier>,
    type_variables: Vec<TypeVariableName>,
    superclass: Option<TypeRef>,
    superinterfaces: Vec<TypeRef>,
    permits: Vec<TypeRef>,
    enum_constants: IndexMap<String, JavaTypeSpec>,
    record_components: Vec<JavaParameterSpec>,
    fields: Vec<JavaFieldSpec>,
    static_block: CodeValue,
    initializer_block: CodeValue,
    methods: Vec<JavaMethodSpec>,
    subtypes: Vec<JavaTypeSpec>,
}

impl JavaTypeSpecBuilder {
    fn new(kind: JavaTypeKind, name: Option<String>, anonymous_args: Option<CodeValue>) -> Self {
        Self {
            kind,
            name,
            anonymous_args,
            doc: CodeValue::empty(),
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            type_variables: Vec::new(),
            superclass: None,
            superinterfaces: Vec::new(),
            permits: Vec::new(),
            enum_constants: IndexMap::new(),
            record_components: Vec::new(),
            fields: Vec::new(),
            static_block: CodeValue::empty(),
            initializer_block: CodeValue::empty(),
            methods: Vec::new(),
            subtypes: Vec::new(),
        }
    }

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

    pub fn add_type_variable(mut self, type_variable: TypeVariableName) -> Self {
        self.type_variables.push(type_variable);
        self
    }

    pub fn superclass(mut self, superclass: impl Into<TypeRef>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn add_superinterface(mut self, superinterface: impl Into<TypeRef>) -> Self {
        self.superinterfaces.push(superinterface.into());
        self
    }

    pub fn add_permitted_subclass(mut self, subclass: impl Into<TypeRef>) -> Self {
        self.permits.push(subclass.into());
        self
    }

    /// A plain enum constant: `NAME`.
    pub fn add_enum_constant(self, name: impl Into<String>) -> Self {
        let constant = JavaTypeSpec::from(JavaTypeSpecBuilder::new(
            JavaTypeKind::Class,
            None,
            None,
        ));
        self.add_enum_constant_spec(name, constant)
    }

    /// An enum constant with arguments and/or a class body, built with
    /// [`JavaTypeSpec::anonymous_class_builder`].
    pub fn add_enum_constant_spec(mut self, name: impl Into<String>, spec: JavaTypeSpec) -> Self {
        self.enum_constants.insert(name.into(), spec);
        self
    }

    pub fn add_record_component(mut self, component: JavaParameterSpec) -> Self {
        self.record_components.push(component);
        self
    }

    pub fn add_field(mut self, field: JavaFieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn add_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = JavaFieldSpec>,
    {
        self.fields.extend(fields);
        self
    }

    /// Appended to the `static { ... }` block.
    pub fn add_static_block(mut self, code: CodeValue) -> Self {
        self.static_block = self.static_block + code;
        self
    }

    /// Appended to the instance `{ ... }` initializer block.
    pub fn add_initializer_block(mut self, code: CodeValue) -> Self {
        self.initializer_block = self.initializer_block + code;
        self
    }

    pub fn add_method(mut self, method: JavaMethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    pub fn add_methods<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = JavaMethodSpec>,
    {
        self.methods.extend(methods);
        self
    }

    pub fn add_subtype(mut self, subtype: JavaTypeSpec) -> Self {
        self.subtypes.push(subtype);
        self
    }

    pub fn build(self) -> Result<JavaTypeSpec> {
        if let Some(name) = &self.name
            && !is_valid_java_name(name)
        {
            return Err(Error::invalid_name("type", name.clone()));
        }
        let display_name = self.name.clone().unwrap_or_else(|| "<anonymous>".to_string());

        match self.kind {
            JavaTypeKind::Enum if self.enum_constants.is_empty() => {
                return Err(Error::illegal_state(format!(
                    "enum '{display_name}' requires at least one constant"
                )));
            }
            JavaTypeKind::Enum => {}
            _ if !self.enum_constants.is_empty() => {
                return Err(Error::illegal_state(format!(
                    "{} '{display_name}' cannot have enum constants",
                    self.kind
                )));
            }
            _ => {}
        }
        for name in self.enum_constants.keys() {
            if !is_valid_java_name(name) {
                return Err(Error::invalid_name("enum constant", name.clone()));
            }
        }

        if self.kind != JavaTypeKind::Record && !self.record_components.is_empty() {
            return Err(Error::illegal_state(format!(
                "{} '{display_name}' cannot have record components",
                self.kind
            )));
        }

        if self.superclass.is_some() && self.kind != JavaTypeKind::Class {
            return Err(Error::illegal_state(format!(
                "{} '{display_name}' cannot extend a superclass",
                self.kind
            )));
        }
        if let Some(superclass) = &self.superclass
            && let TypeName::Primitive(_) | TypeName::Array(_) = superclass.type_name()
        {
            return Err(Error::invalid_type(
                superclass.type_name(),
                "superclass must be a class type",
            ));
        }

        if self.name.is_none() && self.superclass.is_some() && !self.superinterfaces.is_empty() {
            return Err(Error::illegal_state(
                "anonymous class cannot have both a superclass and a superinterface",
            ));
        }
        if self.name.is_none() && self.superinterfaces.len() > 1 {
            return Err(Error::illegal_state(
                "anonymous class can implement at most one interface",
            ));
        }

        let abstract_owner = self.modifiers.contains(&Abstract)
            || matches!(
                self.kind,
                JavaTypeKind::Interface | JavaTypeKind::Annotation | JavaTypeKind::Enum
            );
        for method in &self.methods {
            if method.has_modifier(Abstract) && !abstract_owner {
                return Err(Error::illegal_state(format!(
                    "{} '{display_name}' must be abstract to declare abstract method '{}'",
                    self.kind, method.name
                )));
            }
            if method.is_constructor() && self.kind.is_interface_like() {
                return Err(Error::illegal_state(format!(
                    "{} '{display_name}' cannot declare a constructor",
                    self.kind
                )));
            }
            if !method.default_value.is_empty() && self.kind != JavaTypeKind::Annotation {
                return Err(Error::illegal_state(format!(
                    "method '{}' of {} '{display_name}' cannot have a default value",
                    method.name, self.kind
                )));
            }
        }

        Ok(JavaTypeSpec::from(self))
    }
}

impl From<JavaTypeSpecBuilder> for JavaTypeSpec {
    fn from(builder: JavaTypeSpecBuilder) -> Self {
        // `extends Object` is never written.
        let superclass = builder
            .superclass
            .filter(|s| s.type_name().as_class_name() != Some(&*OBJECT) || !s.annotations().is_empty());
        Self {
            kind: builder.kind,
            name: builder.name,
            anonymous_args: builder.anonymous_args,
            doc: builder.doc,
            annotations: builder.annotations,
            modifiers: builder.modifiers,
            type_variables: builder.type_variables,
            superclass,
            superinterfaces: builder.superinterfaces,
            permits: builder.permits,
            enum_constants: builder.enum_constants,
            record_components: builder.record_components,
            fields: builder.fields,
            static_block: builder.static_block,
            initializer_block: builder.initializer_block,
            methods: builder.methods,
            subtypes: builder.subtypes,
        }
    }
}

#[cfg(test)]
mod tests {
    use codegentle_common::{ClassName, PrimitiveTypeName};

    use super::*;

    #[test]
    fn test_enum_requires_constants() {
        let err = JavaTypeSpec::enum_builder("Empty").build().unwrap_err();
        assert!(matches!(*err, Error::IllegalState { .. }));

        let spec = JavaTypeSpec::enum_builder("Color")
            .add_enum_constant("RED")
            .add_enum_constant("GREEN")
            .build()
            .unwrap();
        let names: Vec<&str> = spec.enum_constants().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["RED", "GREEN"]);
    }

    #[test]
    fn test_only_enums_have_constants() {
        let err = JavaTypeSpec::class_builder("Color")
            .add_enum_constant("RED")
            .build()
            .unwrap_err();
        assert!(matches!(*err, Error::IllegalState { .. }));
    }

    #[test]
    fn test_only_records_have_components() {
        let component = JavaParameterSpec::of("x", PrimitiveTypeName::Int).unwrap();
        assert!(
            JavaTypeSpec::record_builder("Point")
                .add_record_component(component.clone())
                .build()
                .is_ok()
        );
        assert!(
            JavaTypeSpec::class_builder("Point")
                .add_record_component(component)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_abstract_method_needs_abstract_owner() {
        let method = JavaMethodSpec::builder("run")
            .add_modifier(Abstract)
            .build()
            .unwrap();
        assert!(
            JavaTypeSpec::class_builder("Task")
                .add_method(method.clone())
                .build()
                .is_err()
        );
        assert!(
            JavaTypeSpec::class_builder("Task")
                .add_modifier(Abstract)
                .add_method(method.clone())
                .build()
                .is_ok()
        );
        assert!(
            JavaTypeSpec::interface_builder("Task")
                .add_method(method)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_interface_cannot_extend_superclass() {
        let err = JavaTypeSpec::interface_builder("Shape")
            .superclass(ClassName::new("com.example", "Base"))
            .build()
            .unwrap_err();
        assert!(matches!(*err, Error::IllegalState { .. }));
    }

    #[test]
    fn test_object_superclass_is_dropped() {
        let spec = JavaTypeSpec::class_builder("Plain")
            .superclass(OBJECT.clone())
            .build()
            .unwrap();
        assert!(spec.superclass().is_none());
    }

    #[test]
    fn test_interface_method_without_body_is_abstract() {
        let spec = JavaTypeSpec::interface_builder("Greeter")
            .add_method(JavaMethodSpec::builder("greet").build().unwrap())
            .add_method(
                JavaMethodSpec::builder("hello")
                    .add_modifier(JavaModifier::Default)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert!(spec.is_abstract_method(&spec.methods()[0]));
        assert!(!spec.is_abstract_method(&spec.methods()[1]));
    }
}

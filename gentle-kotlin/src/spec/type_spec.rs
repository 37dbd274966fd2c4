use std::{collections::BTreeSet, fmt};

use codegentle_common::{
    AnnotationRef, CodePart, CodeValue, Error, Result, TypeName, TypeRef, TypeVariableName,
};
use indexmap::IndexMap;

use super::{KotlinConstructorSpec, KotlinFunctionSpec, KotlinPropertySpec, Mutability};
use crate::{
    modifier::KotlinModifier::{self, Abstract, Open, Sealed},
    naming::ANY,
    strategy::is_valid_kotlin_name,
};

/// The declaration keyword of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KotlinTypeKind {
    Class,
    Interface,
    Object,
    Companion,
    Enum,
    Annotation,
    Value,
}

impl KotlinTypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Object => "object",
            Self::Companion => "companion object",
            Self::Enum => "enum class",
            Self::Annotation => "annotation class",
            Self::Value => "value class",
        }
    }

    /// Kinds that can never have constructors.
    fn is_singleton_or_interface(&self) -> bool {
        matches!(self, Self::Interface | Self::Object | Self::Companion)
    }

    /// Modifiers implied on the functions and properties of this kind.
    pub(crate) fn implicit_member_modifiers(&self) -> &'static [KotlinModifier] {
        match self {
            Self::Interface => &[Abstract],
            _ => &[],
        }
    }
}

impl fmt::Display for KotlinTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A class, interface, object, enum, annotation or value class. Anonymous
/// object expressions and enum constants with arguments or bodies are type
/// specs without a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KotlinTypeSpec {
    pub(crate) kind: KotlinTypeKind,
    pub(crate) name: Option<String>,
    pub(crate) doc: CodeValue,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<KotlinModifier>,
    pub(crate) type_variables: Vec<TypeVariableName>,
    pub(crate) primary_constructor: Option<KotlinConstructorSpec>,
    pub(crate) superclass: Option<TypeRef>,
    /// Arguments of the superclass constructor call; for an enum constant,
    /// the arguments of the enum constructor.
    pub(crate) superclass_args: Vec<CodeValue>,
    pub(crate) superinterfaces: Vec<TypeRef>,
    pub(crate) enum_constants: IndexMap<String, KotlinTypeSpec>,
    pub(crate) init_block: CodeValue,
    pub(crate) constructors: Vec<KotlinConstructorSpec>,
    pub(crate) properties: Vec<KotlinPropertySpec>,
    pub(crate) functions: Vec<KotlinFunctionSpec>,
    pub(crate) subtypes: Vec<KotlinTypeSpec>,
}

impl KotlinTypeSpec {
    pub fn class_builder(name: impl Into<String>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Class, Some(name.into()))
    }

    pub fn interface_builder(name: impl Into<String>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Interface, Some(name.into()))
    }

    pub fn object_builder(name: impl Into<String>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Object, Some(name.into()))
    }

    /// `companion object`, written without a name.
    pub fn companion_builder() -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Companion, None)
    }

    pub fn enum_builder(name: impl Into<String>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Enum, Some(name.into()))
    }

    pub fn annotation_builder(name: impl Into<String>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Annotation, Some(name.into()))
    }

    pub fn value_builder(name: impl Into<String>) -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Value, Some(name.into()))
    }

    /// `object : Super(args), Iface { ... }` for use inside code values.
    pub fn anonymous_object_builder() -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Object, None)
    }

    /// Arguments and body of an enum constant, passed to
    /// [`KotlinTypeSpecBuilder::add_enum_constant_spec`].
    pub fn enum_constant_builder() -> KotlinTypeSpecBuilder {
        KotlinTypeSpecBuilder::new(KotlinTypeKind::Class, None)
    }

    pub fn kind(&self) -> KotlinTypeKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none() && self.kind != KotlinTypeKind::Companion
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

    pub fn type_variables(&self) -> &[TypeVariableName] {
        &self.type_variables
    }

    pub fn primary_constructor(&self) -> Option<&KotlinConstructorSpec> {
        self.primary_constructor.as_ref()
    }

    pub fn superclass(&self) -> Option<&TypeRef> {
        self.superclass.as_ref()
    }

    pub fn superclass_args(&self) -> &[CodeValue] {
        &self.superclass_args
    }

    pub fn superinterfaces(&self) -> &[TypeRef] {
        &self.superinterfaces
    }

    pub fn enum_constants(&self) -> &IndexMap<String, KotlinTypeSpec> {
        &self.enum_constants
    }

    pub fn init_block(&self) -> &CodeValue {
        &self.init_block
    }

    pub fn constructors(&self) -> &[KotlinConstructorSpec] {
        &self.constructors
    }

    pub fn properties(&self) -> &[KotlinPropertySpec] {
        &self.properties
    }

    pub fn functions(&self) -> &[KotlinFunctionSpec] {
        &self.functions
    }

    pub fn subtypes(&self) -> &[KotlinTypeSpec] {
        &self.subtypes
    }

    /// The name nested types are resolved against; an unnamed companion is
    /// `Companion`.
    pub(crate) fn scope_name(&self) -> Option<&str> {
        match (&self.name, self.kind) {
            (Some(name), _) => Some(name),
            (None, KotlinTypeKind::Companion) => Some("Companion"),
            (None, _) => None,
        }
    }

    pub(crate) fn subtype_names(&self) -> Vec<&str> {
        self.subtypes.iter().filter_map(|t| t.scope_name()).collect()
    }

    pub(crate) fn has_members(&self) -> bool {
        !self.init_block.is_empty()
            || !self.constructors.is_empty()
            || !self.properties.is_empty()
            || !self.functions.is_empty()
            || !self.subtypes.is_empty()
    }
}

impl From<KotlinTypeSpec> for CodePart {
    fn from(spec: KotlinTypeSpec) -> Self {
        CodePart::embedded(spec)
    }
}

#[derive(Debug, Clone)]
pub struct KotlinTypeSpecBuilder {
    kind: KotlinTypeKind,
    name: Option<String>,
    doc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<KotlinModifier>,
    type_variables: Vec<TypeVariableName>,
    primary_constructor: Option<KotlinConstructorSpec>,
    superclass: Option<TypeRef>,
    superclass_args: Vec<CodeValue>,
    superinterfaces: Vec<TypeRef>,
    enum_constants: IndexMap<String, KotlinTypeSpec>,
    init_block: CodeValue,
    constructors: Vec<KotlinConstructorSpec>,
    properties: Vec<KotlinPropertySpec>,
    functions: Vec<KotlinFunctionSpec>,
    subtypes: Vec<KotlinTypeSpec>,
}

impl KotlinTypeSpecBuilder {
    fn new(kind: KotlinTypeKind, name: Option<String>) -> Self {
        Self {
            kind,
            name,
            doc: CodeValue::empty(),
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            type_variables: Vec::new(),
            primary_constructor: None,
            superclass: None,
            superclass_args: Vec::new(),
            superinterfaces: Vec::new(),
            enum_constants: IndexMap::new(),
            init_block: CodeValue::empty(),
            constructors: Vec::new(),
            properties: Vec::new(),
            functions: Vec::new(),
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

    pub fn add_type_variable(mut self, type_variable: TypeVariableName) -> Self {
        self.type_variables.push(type_variable);
        self
    }

    pub fn primary_constructor(mut self, constructor: KotlinConstructorSpec) -> Self {
        self.primary_constructor = Some(constructor);
        self
    }

    pub fn superclass(mut self, superclass: impl Into<TypeRef>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn add_superclass_argument(mut self, argument: impl Into<CodeValue>) -> Self {
        self.superclass_args.push(argument.into());
        self
    }

    pub fn add_superinterface(mut self, superinterface: impl Into<TypeRef>) -> Self {
        self.superinterfaces.push(superinterface.into());
        self
    }

    /// A plain enum constant: `NAME`.
    pub fn add_enum_constant(self, name: impl Into<String>) -> Self {
        let constant = KotlinTypeSpec::from(KotlinTypeSpec::enum_constant_builder());
        self.add_enum_constant_spec(name, constant)
    }

    pub fn add_enum_constant_spec(mut self, name: impl Into<String>, spec: KotlinTypeSpec) -> Self {
        self.enum_constants.insert(name.into(), spec);
        self
    }

    /// Appended to the `init` block.
    pub fn add_init_block(mut self, code: CodeValue) -> Self {
        self.init_block = self.init_block + code;
        self
    }

    pub fn add_constructor(mut self, constructor: KotlinConstructorSpec) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn add_property(mut self, property: KotlinPropertySpec) -> Self {
        self.properties.push(property);
        self
    }

    pub fn add_properties<I>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = KotlinPropertySpec>,
    {
        self.properties.extend(properties);
        self
    }

    pub fn add_function(mut self, function: KotlinFunctionSpec) -> Self {
        self.functions.push(function);
        self
    }

    pub fn add_functions<I>(mut self, functions: I) -> Self
    where
        I: IntoIterator<Item = KotlinFunctionSpec>,
    {
        self.functions.extend(functions);
        self
    }

    pub fn add_subtype(mut self, subtype: KotlinTypeSpec) -> Self {
        self.subtypes.push(subtype);
        self
    }

    pub fn build(self) -> Result<KotlinTypeSpec> {
        use KotlinTypeKind as Kind;

        if let Some(name) = &self.name
            && !is_valid_kotlin_name(name)
        {
            return Err(Error::invalid_name("type", name.clone()));
        }
        let label = self.name.clone().unwrap_or_else(|| "<anonymous>".to_string());

        if !self.enum_constants.is_empty() && self.kind != Kind::Enum {
            return Err(Error::illegal_state(format!(
                "{label}: only enum classes have constants"
            )));
        }
        for name in self.enum_constants.keys() {
            if !is_valid_kotlin_name(name) {
                return Err(Error::invalid_name("enum constant", name.clone()));
            }
        }

        if self.kind.is_singleton_or_interface()
            && (self.primary_constructor.is_some() || !self.constructors.is_empty())
        {
            return Err(Error::illegal_state(format!(
                "{label}: a {} cannot declare constructors",
                self.kind
            )));
        }
        if let Some(primary) = &self.primary_constructor
            && (primary.delegation.is_some() || !primary.code.is_empty())
        {
            return Err(Error::illegal_state(format!(
                "{label}: the primary constructor cannot delegate or have a body; use an init block"
            )));
        }
        if self
            .constructors
            .iter()
            .any(|c| c.parameters.iter().any(|p| p.property.is_some()))
        {
            return Err(Error::illegal_state(format!(
                "{label}: only primary constructor parameters can declare properties"
            )));
        }
        if self.kind == Kind::Value {
            let properties = self
                .primary_constructor
                .as_ref()
                .map(|c| c.parameters.as_slice())
                .unwrap_or_default();
            if !matches!(properties, [p] if p.property == Some(Mutability::Val)) {
                return Err(Error::illegal_state(format!(
                    "{label}: a value class needs exactly one val parameter"
                )));
            }
        }

        if let Some(superclass) = &self.superclass {
            if matches!(self.kind, Kind::Interface | Kind::Enum | Kind::Annotation | Kind::Value) {
                return Err(Error::illegal_state(format!(
                    "{label}: a {} cannot extend a class",
                    self.kind
                )));
            }
            if matches!(
                superclass.type_name(),
                TypeName::Primitive(_) | TypeName::Array(_)
            ) {
                return Err(Error::invalid_type(
                    superclass.type_name(),
                    "superclass must be a class",
                ));
            }
        }
        if self.name.is_some() && self.superclass.is_none() && !self.superclass_args.is_empty() {
            return Err(Error::illegal_state(format!(
                "{label}: superclass arguments without a superclass"
            )));
        }
        if self.kind == Kind::Annotation
            && (!self.superinterfaces.is_empty() || self.has_body_members())
        {
            return Err(Error::illegal_state(format!(
                "{label}: annotation classes only declare primary constructor parameters"
            )));
        }

        let holds_abstract = self.kind == Kind::Interface
            || self.kind == Kind::Enum
            || self.modifiers.contains(&Abstract)
            || self.modifiers.contains(&Sealed);
        let abstract_function = self
            .functions
            .iter()
            .find(|f| f.has_modifier(Abstract))
            .map(|f| f.name.clone());
        let abstract_property = self
            .properties
            .iter()
            .find(|p| p.has_modifier(Abstract))
            .map(|p| p.name.clone());
        if !holds_abstract && let Some(member) = abstract_function.or(abstract_property) {
            return Err(Error::illegal_state(format!(
                "{label}: abstract member '{member}' requires an abstract class or interface"
            )));
        }

        if self.subtypes.iter().filter(|t| t.kind == Kind::Companion).count() > 1 {
            return Err(Error::illegal_state(format!(
                "{label}: at most one companion object"
            )));
        }
        if self.kind == Kind::Interface && self.modifiers.contains(&Open) {
            return Err(Error::illegal_state(format!(
                "{label}: interfaces are always open"
            )));
        }
        if let Some(subtype) = self.subtypes.iter().find(|t| t.is_anonymous()) {
            return Err(Error::illegal_state(format!(
                "{label}: nested type {} must be named",
                subtype.kind
            )));
        }

        Ok(KotlinTypeSpec::from(self))
    }

    fn has_body_members(&self) -> bool {
        !self.init_block.is_empty()
            || !self.constructors.is_empty()
            || !self.properties.is_empty()
            || !self.functions.is_empty()
            || !self.subtypes.is_empty()
    }
}

impl From<KotlinTypeSpecBuilder> for KotlinTypeSpec {
    fn from(builder: KotlinTypeSpecBuilder) -> Self {
        // `: Any()` is never written.
        let superclass = builder.superclass.filter(|s| {
            s.type_name().as_class_name() != Some(&*ANY) || !s.annotations().is_empty()
        });
        Self {
            kind: builder.kind,
            name: builder.name,
            doc: builder.doc,
            annotations: builder.annotations,
            modifiers: builder.modifiers,
            type_variables: builder.type_variables,
            primary_constructor: builder.primary_constructor,
            superclass,
            superclass_args: builder.superclass_args,
            superinterfaces: builder.superinterfaces,
            enum_constants: builder.enum_constants,
            init_block: builder.init_block,
            constructors: builder.constructors,
            properties: builder.properties,
            functions: builder.functions,
            subtypes: builder.subtypes,
        }
    }
}

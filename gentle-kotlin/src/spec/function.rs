use std::collections::BTreeSet;

use codegentle_common::{
    AnnotationRef, CodePart, CodeValue, CodeValueBuilder, Error, Result, TypeRef,
    TypeVariableName,
};

use super::KotlinValueParameterSpec;
use crate::{modifier::KotlinModifier, strategy::is_valid_kotlin_name};

/// One entry of a `context(...)` list. Unnamed entries are written `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextParameter {
    pub(crate) name: Option<String>,
    pub(crate) type_ref: TypeRef,
}

impl ContextParameter {
    pub fn named(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> Result<Self> {
        let name = name.into();
        if !is_valid_kotlin_name(&name) {
            return Err(Error::invalid_name("context parameter", name));
        }
        Ok(Self {
            name: Some(name),
            type_ref: type_ref.into(),
        })
    }

    pub fn unnamed(type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: None,
            type_ref: type_ref.into(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }
}

/// A `fun` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KotlinFunctionSpec {
    pub(crate) name: String,
    pub(crate) doc: CodeValue,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<KotlinModifier>,
    pub(crate) type_variables: Vec<TypeVariableName>,
    pub(crate) context_parameters: Vec<ContextParameter>,
    pub(crate) receiver: Option<TypeRef>,
    pub(crate) parameters: Vec<KotlinValueParameterSpec>,
    pub(crate) return_type: Option<TypeRef>,
    pub(crate) code: CodeValue,
}

impl KotlinFunctionSpec {
    pub fn builder(name: impl Into<String>) -> KotlinFunctionSpecBuilder {
        KotlinFunctionSpecBuilder {
            name: name.into(),
            doc: CodeValue::empty(),
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            type_variables: Vec::new(),
            context_parameters: Vec::new(),
            receiver: None,
            parameters: Vec::new(),
            return_type: None,
            code: CodeValue::builder(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
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

    pub fn context_parameters(&self) -> &[ContextParameter] {
        &self.context_parameters
    }

    /// Receiver type of an extension function.
    pub fn receiver(&self) -> Option<&TypeRef> {
        self.receiver.as_ref()
    }

    pub fn parameters(&self) -> &[KotlinValueParameterSpec] {
        &self.parameters
    }

    /// `None` when no return type was given; `Unit` is then implied.
    pub fn return_type(&self) -> Option<&TypeRef> {
        self.return_type.as_ref()
    }

    pub fn code(&self) -> &CodeValue {
        &self.code
    }

    /// Whether the declaration is written without a body.
    pub(crate) fn is_bodiless(&self, in_interface: bool) -> bool {
        self.has_modifier(KotlinModifier::Abstract)
            || self.has_modifier(KotlinModifier::Expect)
            || self.has_modifier(KotlinModifier::External)
            || (in_interface && self.code.is_empty())
    }
}

/// The doc followed by one `@param` line per documented parameter.
pub(crate) fn doc_with_parameters(
    doc: &CodeValue,
    parameters: &[KotlinValueParameterSpec],
) -> CodeValue {
    let documented: Vec<&KotlinValueParameterSpec> =
        parameters.iter().filter(|p| !p.doc.is_empty()).collect();
    if documented.is_empty() {
        return doc.clone();
    }

    let mut builder = doc.to_builder();
    if !doc.is_empty() {
        builder = builder.add("\n\n");
    }
    for (i, parameter) in documented.iter().enumerate() {
        if i > 0 {
            builder = builder.add("\n");
        }
        builder = builder
            .add(format!("@param {} ", parameter.name))
            .add_code(parameter.doc.clone());
    }
    builder.build()
}

#[derive(Debug, Clone)]
pub struct KotlinFunctionSpecBuilder {
    name: String,
    doc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<KotlinModifier>,
    type_variables: Vec<TypeVariableName>,
    context_parameters: Vec<ContextParameter>,
    receiver: Option<TypeRef>,
    parameters: Vec<KotlinValueParameterSpec>,
    return_type: Option<TypeRef>,
    code: CodeValueBuilder,
}

impl KotlinFunctionSpecBuilder {
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

    pub fn add_context_parameter(mut self, parameter: ContextParameter) -> Self {
        self.context_parameters.push(parameter);
        self
    }

    pub fn receiver(mut self, receiver: impl Into<TypeRef>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn add_parameter(mut self, parameter: KotlinValueParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn add_parameters<I>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = KotlinValueParameterSpec>,
    {
        self.parameters.extend(parameters);
        self
    }

    /// An explicit return type. Passing `void` writes `: Unit`.
    pub fn returns(mut self, return_type: impl Into<TypeRef>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn add_code(mut self, code: CodeValue) -> Self {
        self.code = self.code.add_code(code);
        self
    }

    pub fn add_statement(mut self, statement: impl Into<String>) -> Self {
        self.code = self.code.add_statement(statement);
        self
    }

    pub fn add_statement_format<I>(mut self, format: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = CodePart>,
    {
        self.code = self.code.add_statement_format(format, args)?;
        Ok(self)
    }

    pub fn begin_control_flow(mut self, control_flow: impl Into<String>) -> Self {
        self.code = self.code.begin_control_flow(control_flow);
        self
    }

    pub fn next_control_flow(mut self, control_flow: impl Into<String>) -> Self {
        self.code = self.code.next_control_flow(control_flow);
        self
    }

    pub fn end_control_flow(mut self) -> Self {
        self.code = self.code.end_control_flow();
        self
    }

    pub fn build(self) -> Result<KotlinFunctionSpec> {
        if !is_valid_kotlin_name(&self.name) {
            return Err(Error::invalid_name("function", self.name));
        }
        let varargs = self
            .parameters
            .iter()
            .filter(|p| p.has_modifier(KotlinModifier::Vararg))
            .count();
        if varargs > 1 {
            return Err(Error::illegal_state(format!(
                "function '{}' has more than one vararg parameter",
                self.name
            )));
        }
        if let Some(parameter) = self.parameters.iter().find(|p| p.property.is_some()) {
            return Err(Error::illegal_state(format!(
                "function parameter '{}' cannot declare a property",
                parameter.name
            )));
        }

        let code = self.code.build();
        if self.modifiers.contains(&KotlinModifier::Abstract) && !code.is_empty() {
            return Err(Error::illegal_state(format!(
                "abstract function '{}' cannot have a body",
                self.name
            )));
        }

        Ok(KotlinFunctionSpec {
            name: self.name,
            doc: self.doc,
            annotations: self.annotations,
            modifiers: self.modifiers,
            type_variables: self.type_variables,
            context_parameters: self.context_parameters,
            receiver: self.receiver,
            parameters: self.parameters,
            return_type: self.return_type,
            code,
        })
    }
}

#[cfg(test)]
mod tests {
    use codegentle_common::PrimitiveTypeName;

    use super::*;
    use crate::spec::Mutability;

    #[test]
    fn test_abstract_function_cannot_have_body() {
        let err = KotlinFunctionSpec::builder("run")
            .add_modifier(KotlinModifier::Abstract)
            .add_statement("println()")
            .build()
            .unwrap_err();
        assert!(matches!(*err, Error::IllegalState { .. }));
    }

    #[test]
    fn test_single_vararg() {
        let vararg = || {
            KotlinValueParameterSpec::builder("xs", PrimitiveTypeName::Int)
                .add_modifier(KotlinModifier::Vararg)
        };
        let err = KotlinFunctionSpec::builder("sum")
            .add_parameter(vararg().build().unwrap())
            .add_parameter(
                KotlinValueParameterSpec::builder("ys", PrimitiveTypeName::Int)
                    .add_modifier(KotlinModifier::Vararg)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap_err();
        assert!(matches!(*err, Error::IllegalState { .. }));
    }

    #[test]
    fn test_parameters_cannot_declare_properties() {
        let parameter = KotlinValueParameterSpec::builder("id", PrimitiveTypeName::Int)
            .property(Mutability::Val)
            .build()
            .unwrap();
        assert!(KotlinFunctionSpec::builder("f").add_parameter(parameter).build().is_err());
    }

    #[test]
    fn test_bodiless() {
        let function = KotlinFunctionSpec::builder("close").build().unwrap();
        assert!(function.is_bodiless(true));
        assert!(!function.is_bodiless(false));
        assert!(function.return_type().is_none());
    }
}

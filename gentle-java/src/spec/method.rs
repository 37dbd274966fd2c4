use std::collections::BTreeSet;

use codegentle_common::{
    AnnotationRef, CodePart, CodeValue, CodeValueBuilder, Error, Result, TypeName, TypeRef,
    TypeVariableName,
};

use super::JavaParameterSpec;
use crate::{modifier::JavaModifier, strategy::is_valid_java_name};

pub(crate) const CONSTRUCTOR: &str = "<init>";

/// A method or constructor declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JavaMethodSpec {
    pub(crate) name: String,
    pub(crate) doc: CodeValue,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<JavaModifier>,
    pub(crate) type_variables: Vec<TypeVariableName>,
    pub(crate) return_type: Option<TypeRef>,
    pub(crate) parameters: Vec<JavaParameterSpec>,
    pub(crate) varargs: bool,
    pub(crate) exceptions: Vec<TypeRef>,
    pub(crate) code: CodeValue,
    pub(crate) default_value: CodeValue,
}

impl JavaMethodSpec {
    pub fn builder(name: impl Into<String>) -> JavaMethodSpecBuilder {
        JavaMethodSpecBuilder::new(name.into())
    }

    pub fn constructor_builder() -> JavaMethodSpecBuilder {
        JavaMethodSpecBuilder::new(CONSTRUCTOR.to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR
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

    /// `None` for constructors and `void` methods.
    pub fn return_type(&self) -> Option<&TypeRef> {
        self.return_type.as_ref()
    }

    pub fn parameters(&self) -> &[JavaParameterSpec] {
        &self.parameters
    }

    pub fn is_varargs(&self) -> bool {
        self.varargs
    }

    pub fn exceptions(&self) -> &[TypeRef] {
        &self.exceptions
    }

    pub fn code(&self) -> &CodeValue {
        &self.code
    }

    pub fn default_value(&self) -> &CodeValue {
        &self.default_value
    }

    /// The method doc followed by one `@param` line per documented parameter.
    pub(crate) fn doc_with_parameters(&self) -> CodeValue {
        let documented: Vec<&JavaParameterSpec> = self
            .parameters
            .iter()
            .filter(|p| !p.doc.is_empty())
            .collect();
        if documented.is_empty() {
            return self.doc.clone();
        }

        let mut builder = self.doc.to_builder();
        if !self.doc.is_empty() {
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
}

#[derive(Debug, Clone)]
pub struct JavaMethodSpecBuilder {
    name: String,
    doc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<JavaModifier>,
    type_variables: Vec<TypeVariableName>,
    return_type: Option<TypeRef>,
    parameters: Vec<JavaParameterSpec>,
    varargs: bool,
    exceptions: Vec<TypeRef>,
    code: CodeValueBuilder,
    default_value: CodeValue,
}

impl JavaMethodSpecBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            doc: CodeValue::empty(),
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            type_variables: Vec::new(),
            return_type: None,
            parameters: Vec::new(),
            varargs: false,
            exceptions: Vec::new(),
            code: CodeValue::builder(),
            default_value: CodeValue::empty(),
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

    /// `void` is stored as no return type.
    pub fn returns(mut self, return_type: impl Into<TypeRef>) -> Self {
        let return_type = return_type.into();
        self.return_type = if return_type.type_name().is_void() && return_type.annotations().is_empty() {
            None
        } else {
            Some(return_type)
        };
        self
    }

    pub fn add_parameter(mut self, parameter: JavaParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn add_parameters<I>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = JavaParameterSpec>,
    {
        self.parameters.extend(parameters);
        self
    }

    pub fn varargs(mut self, varargs: bool) -> Self {
        self.varargs = varargs;
        self
    }

    pub fn add_exception(mut self, exception: impl Into<TypeRef>) -> Self {
        self.exceptions.push(exception.into());
        self
    }

    /// Append raw code to the body.
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

    /// `default` value of an annotation type member.
    pub fn default_value(mut self, value: impl Into<CodeValue>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn build(self) -> Result<JavaMethodSpec> {
        let constructor = self.name == CONSTRUCTOR;
        if !constructor && !is_valid_java_name(&self.name) {
            return Err(Error::invalid_name("method", self.name));
        }
        if constructor && self.return_type.is_some() {
            return Err(Error::illegal_state("constructors have no return type"));
        }

        let code = self.code.build();
        if self.modifiers.contains(&JavaModifier::Abstract) {
            if !code.is_empty() {
                return Err(Error::illegal_state(format!(
                    "abstract method '{}' cannot have code",
                    self.name
                )));
            }
            if constructor {
                return Err(Error::illegal_state("constructors cannot be abstract"));
            }
        }

        if self.varargs {
            let last_is_array = self
                .parameters
                .last()
                .is_some_and(|p| matches!(p.type_ref.type_name(), TypeName::Array(_)));
            if !last_is_array {
                return Err(Error::illegal_state(format!(
                    "last parameter of varargs method '{}' must be an array",
                    self.name
                )));
            }
        }

        Ok(JavaMethodSpec {
            name: self.name,
            doc: self.doc,
            annotations: self.annotations,
            modifiers: self.modifiers,
            type_variables: self.type_variables,
            return_type: self.return_type,
            parameters: self.parameters,
            varargs: self.varargs,
            exceptions: self.exceptions,
            code,
            default_value: self.default_value,
        })
    }
}

use std::collections::BTreeSet;

use codegentle_common::{AnnotationRef, CodePart, CodeValue, CodeValueBuilder, Error, Result};

use super::KotlinValueParameterSpec;
use crate::modifier::KotlinModifier;

/// Target of a secondary constructor's delegation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelegationKind {
    This,
    Super,
}

impl DelegationKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::This => "this",
            Self::Super => "super",
        }
    }
}

/// `: this(args)` or `: super(args)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstructorDelegation {
    pub(crate) kind: DelegationKind,
    pub(crate) arguments: Vec<CodeValue>,
}

impl ConstructorDelegation {
    pub fn kind(&self) -> DelegationKind {
        self.kind
    }

    pub fn arguments(&self) -> &[CodeValue] {
        &self.arguments
    }
}

/// A primary or secondary constructor. Primary constructors carry no body
/// and no delegation; their initialization code lives in `init`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KotlinConstructorSpec {
    pub(crate) doc: CodeValue,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<KotlinModifier>,
    pub(crate) parameters: Vec<KotlinValueParameterSpec>,
    pub(crate) delegation: Option<ConstructorDelegation>,
    pub(crate) code: CodeValue,
}

impl KotlinConstructorSpec {
    pub fn builder() -> KotlinConstructorSpecBuilder {
        KotlinConstructorSpecBuilder {
            doc: CodeValue::empty(),
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            parameters: Vec::new(),
            delegation: None,
            code: CodeValue::builder(),
        }
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

    pub fn parameters(&self) -> &[KotlinValueParameterSpec] {
        &self.parameters
    }

    pub fn delegation(&self) -> Option<&ConstructorDelegation> {
        self.delegation.as_ref()
    }

    pub fn code(&self) -> &CodeValue {
        &self.code
    }

    /// Whether the `constructor` keyword is needed when this is the
    /// primary constructor.
    pub(crate) fn needs_keyword(&self) -> bool {
        !self.annotations.is_empty() || !self.modifiers.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct KotlinConstructorSpecBuilder {
    doc: CodeValue,
    annotations: Vec<AnnotationRef>,
    modifiers: BTreeSet<KotlinModifier>,
    parameters: Vec<KotlinValueParameterSpec>,
    delegation: Option<ConstructorDelegation>,
    code: CodeValueBuilder,
}

impl KotlinConstructorSpecBuilder {
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

    pub fn delegate_this<I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = CodeValue>,
    {
        self.delegation = Some(ConstructorDelegation {
            kind: DelegationKind::This,
            arguments: arguments.into_iter().collect(),
        });
        self
    }

    pub fn delegate_super<I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = CodeValue>,
    {
        self.delegation = Some(ConstructorDelegation {
            kind: DelegationKind::Super,
            arguments: arguments.into_iter().collect(),
        });
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

    pub fn build(self) -> Result<KotlinConstructorSpec> {
        if let Some(modifier) = self
            .modifiers
            .iter()
            .find(|m| !m.is_visibility() && !matches!(m, KotlinModifier::Actual | KotlinModifier::Expect))
        {
            return Err(Error::illegal_state(format!(
                "constructors cannot be '{modifier}'"
            )));
        }
        Ok(KotlinConstructorSpec {
            doc: self.doc,
            annotations: self.annotations,
            modifiers: self.modifiers,
            parameters: self.parameters,
            delegation: self.delegation,
            code: self.code.build(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_visibility_modifiers() {
        assert!(
            KotlinConstructorSpec::builder()
                .add_modifier(KotlinModifier::Private)
                .build()
                .unwrap()
                .needs_keyword()
        );
        let err = KotlinConstructorSpec::builder()
            .add_modifier(KotlinModifier::Open)
            .build()
            .unwrap_err();
        assert!(matches!(*err, Error::IllegalState { .. }));
    }

    #[test]
    fn test_delegation() {
        let constructor = KotlinConstructorSpec::builder()
            .delegate_this([CodeValue::of("0")])
            .build()
            .unwrap();
        let delegation = constructor.delegation().unwrap();
        assert_eq!(delegation.kind().keyword(), "this");
        assert_eq!(delegation.arguments(), &[CodeValue::of("0")]);
        assert!(!constructor.needs_keyword());
    }
}

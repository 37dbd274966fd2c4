use crate::{
    Error, Result,
    code::CodeValue,
    naming::{ClassName, is_identifier},
};

/// An applied annotation: a class name plus member values in insertion order.
///
/// A member holding more than one value is rendered as an array literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationRef {
    class_name: ClassName,
    members: Vec<(String, Vec<CodeValue>)>,
}

impl AnnotationRef {
    /// An annotation with no members, e.g. `@Override`.
    pub fn new(class_name: ClassName) -> Self {
        Self {
            class_name,
            members: Vec::new(),
        }
    }

    pub fn builder(class_name: ClassName) -> AnnotationRefBuilder {
        AnnotationRefBuilder {
            class_name,
            members: Vec::new(),
        }
    }

    pub fn class_name(&self) -> &ClassName {
        &self.class_name
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, &[CodeValue])> {
        self.members
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn member(&self, name: &str) -> Option<&[CodeValue]> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn is_marker(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct AnnotationRefBuilder {
    class_name: ClassName,
    members: Vec<(String, Vec<CodeValue>)>,
}

impl AnnotationRefBuilder {
    /// Append `value` to member `name`. Adding under the same name again
    /// turns the member into an array.
    pub fn add_member(mut self, name: impl Into<String>, value: CodeValue) -> Self {
        let name = name.into();
        match self.members.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.members.push((name, vec![value])),
        }
        self
    }

    pub fn add_members<I>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = CodeValue>,
    {
        let name = name.into();
        values
            .into_iter()
            .fold(self, |builder, value| builder.add_member(name.clone(), value))
    }

    pub fn build(self) -> Result<AnnotationRef> {
        for (name, _) in &self.members {
            if !is_identifier(name) {
                return Err(Error::invalid_name("annotation member", name.clone()));
            }
        }
        Ok(AnnotationRef {
            class_name: self.class_name,
            members: self.members,
        })
    }
}

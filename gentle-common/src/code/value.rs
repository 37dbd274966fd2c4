use std::ops::Add;

use super::{CodePart, PLACEHOLDER};
use crate::{Error, Result};

/// An immutable sequence of [`CodePart`]s.
///
/// # Example
///
/// ```
/// use codegentle_common::code::{CodePart, CodeValue};
///
/// let call = CodeValue::format("%V.println(%V)", [
///     CodePart::name("System.out"),
///     CodePart::string("Hello"),
/// ])
/// .unwrap();
/// assert_eq!(call.parts().len(), 4);
/// assert!(CodeValue::format("%V", []).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodeValue {
    parts: Vec<CodePart>,
}

impl CodeValue {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A value made of a single run of raw text.
    pub fn of(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::empty();
        }
        Self {
            parts: vec![CodePart::Simple(text)],
        }
    }

    pub fn from_parts(parts: Vec<CodePart>) -> Self {
        Self { parts }
    }

    /// Split `format` on `%V` and substitute `args` in order.
    ///
    /// Fails when the number of arguments differs from the number of
    /// placeholders.
    pub fn format<I>(format: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = CodePart>,
    {
        let mut args = args.into_iter();
        let segments: Vec<&str> = format.split(PLACEHOLDER).collect();
        let placeholders = segments.len() - 1;
        let mut parts = Vec::with_capacity(segments.len() + placeholders);

        for (index, segment) in segments.iter().enumerate() {
            if !segment.is_empty() {
                parts.push(CodePart::Simple((*segment).to_string()));
            }
            if index < placeholders {
                let arg = args.next().ok_or_else(|| {
                    Box::new(Error::MissingArgument {
                        format: format.to_string(),
                        index,
                    })
                })?;
                parts.push(arg);
            }
        }

        let redundant = args.count();
        if redundant > 0 {
            return Err(Box::new(Error::RedundantArgument {
                format: format.to_string(),
                count: redundant,
            }));
        }

        Ok(Self { parts })
    }

    pub fn builder() -> CodeValueBuilder {
        CodeValueBuilder::default()
    }

    pub fn to_builder(&self) -> CodeValueBuilder {
        CodeValueBuilder {
            parts: self.parts.clone(),
        }
    }

    pub fn parts(&self) -> &[CodePart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Concatenate `values`, inserting `separator` text between them.
    pub fn join<I>(values: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = CodeValue>,
    {
        let mut parts = Vec::new();
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 && !separator.is_empty() {
                parts.push(CodePart::Simple(separator.to_string()));
            }
            parts.extend(value.parts);
        }
        Self { parts }
    }
}

impl Add for CodeValue {
    type Output = CodeValue;

    fn add(mut self, rhs: CodeValue) -> Self::Output {
        self.parts.extend(rhs.parts);
        self
    }
}

impl Add<&CodeValue> for &CodeValue {
    type Output = CodeValue;

    fn add(self, rhs: &CodeValue) -> Self::Output {
        let mut parts = self.parts.clone();
        parts.extend(rhs.parts.iter().cloned());
        CodeValue { parts }
    }
}

impl From<&str> for CodeValue {
    fn from(value: &str) -> Self {
        Self::of(value)
    }
}

impl From<String> for CodeValue {
    fn from(value: String) -> Self {
        Self::of(value)
    }
}

/// Accumulates parts for a [`CodeValue`].
///
/// Statements are bracketed by statement markers; the writer appends the
/// dialect's terminator and a newline when it reaches the end marker.
///
/// ```
/// use codegentle_common::code::{CodePart, CodeValue};
///
/// let body = CodeValue::builder()
///     .begin_control_flow("for (int i = 0; i < 10; i++)")
///     .add_statement_format("total += %V", [CodePart::name("i")])
///     .unwrap()
///     .end_control_flow()
///     .build();
/// assert!(!body.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeValueBuilder {
    parts: Vec<CodePart>,
}

impl CodeValueBuilder {
    /// Append raw text. Placeholders are not interpreted.
    pub fn add(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.parts.push(CodePart::Simple(text));
        }
        self
    }

    pub fn add_part(mut self, part: CodePart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn add_code(mut self, code: CodeValue) -> Self {
        self.parts.extend(code.parts);
        self
    }

    pub fn add_format<I>(self, format: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = CodePart>,
    {
        Ok(self.add_code(CodeValue::format(format, args)?))
    }

    pub fn add_statement(self, text: impl Into<String>) -> Self {
        self.add_statement_code(CodeValue::of(text))
    }

    pub fn add_statement_format<I>(self, format: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = CodePart>,
    {
        Ok(self.add_statement_code(CodeValue::format(format, args)?))
    }

    pub fn add_statement_code(mut self, code: CodeValue) -> Self {
        self.parts.push(CodePart::StatementBegin);
        self.parts.extend(code.parts);
        self.parts.push(CodePart::StatementEnd);
        self
    }

    /// `controlFlow {` followed by an indent.
    pub fn begin_control_flow(self, control_flow: impl Into<String>) -> Self {
        self.add(format!("{} {{\n", control_flow.into())).indent()
    }

    pub fn begin_control_flow_format<I>(self, control_flow: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = CodePart>,
    {
        Ok(self
            .add_format(&format!("{control_flow} {{\n"), args)?
            .indent())
    }

    /// `} controlFlow {`, e.g. `} else {`.
    pub fn next_control_flow(self, control_flow: impl Into<String>) -> Self {
        self.unindent()
            .add(format!("}} {} {{\n", control_flow.into()))
            .indent()
    }

    pub fn next_control_flow_format<I>(self, control_flow: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = CodePart>,
    {
        Ok(self
            .unindent()
            .add_format(&format!("}} {control_flow} {{\n"), args)?
            .indent())
    }

    pub fn end_control_flow(self) -> Self {
        self.unindent().add("}\n")
    }

    /// Closes a `do` block with a trailing construct: `} while (x);`.
    pub fn end_control_flow_format<I>(self, control_flow: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = CodePart>,
    {
        Ok(self
            .unindent()
            .add_statement_format(&format!("}} {control_flow}"), args)?)
    }

    pub fn indent(mut self) -> Self {
        self.parts.push(CodePart::Indent(1));
        self
    }

    pub fn unindent(mut self) -> Self {
        self.parts.push(CodePart::Unindent(1));
        self
    }

    pub fn clear(mut self) -> Self {
        self.parts.clear();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn build(self) -> CodeValue {
        CodeValue { parts: self.parts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_placeholder() {
        let value = CodeValue::format("%V", [CodePart::literal(1)]).unwrap();
        assert_eq!(value.parts(), &[CodePart::Literal("1".to_string())]);

        let missing = CodeValue::format("%V", []).unwrap_err();
        assert!(matches!(*missing, Error::MissingArgument { index: 0, .. }));

        let redundant =
            CodeValue::format("%V", [CodePart::literal(1), CodePart::literal(2)]).unwrap_err();
        assert!(matches!(*redundant, Error::RedundantArgument { count: 1, .. }));
    }

    #[test]
    fn test_text_between_placeholders() {
        let value = CodeValue::format(
            "%V.%V(%V)",
            [
                CodePart::name("a"),
                CodePart::name("b"),
                CodePart::literal(3),
            ],
        )
        .unwrap();
        assert_eq!(
            value.parts(),
            &[
                CodePart::Name("a".to_string()),
                CodePart::Simple(".".to_string()),
                CodePart::Name("b".to_string()),
                CodePart::Simple("(".to_string()),
                CodePart::Literal("3".to_string()),
                CodePart::Simple(")".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_argument_index() {
        let err = CodeValue::format("%V + %V", [CodePart::literal(1)]).unwrap_err();
        assert!(matches!(*err, Error::MissingArgument { index: 1, .. }));
    }

    #[test]
    fn test_plus_concatenates() {
        let a = CodeValue::of("a");
        let b = CodeValue::of("b");
        let joined = &a + &b;
        assert_eq!(joined.parts().len(), 2);
        assert_eq!(a.parts().len(), 1);
        assert!(CodeValue::empty().is_empty());
        assert!(!(CodeValue::empty() + a).is_empty());
    }

    #[test]
    fn test_join() {
        let joined = CodeValue::join([CodeValue::of("a"), CodeValue::of("b")], ", ");
        assert_eq!(
            joined.parts(),
            &[
                CodePart::Simple("a".to_string()),
                CodePart::Simple(", ".to_string()),
                CodePart::Simple("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_statement_markers() {
        let value = CodeValue::builder().add_statement("return 1").build();
        assert_eq!(
            value.parts(),
            &[
                CodePart::StatementBegin,
                CodePart::Simple("return 1".to_string()),
                CodePart::StatementEnd,
            ]
        );
    }

    #[test]
    fn test_control_flow_shape() {
        let value = CodeValue::builder()
            .begin_control_flow("if (x)")
            .next_control_flow("else")
            .end_control_flow()
            .build();
        assert_eq!(
            value.parts(),
            &[
                CodePart::Simple("if (x) {\n".to_string()),
                CodePart::Indent(1),
                CodePart::Unindent(1),
                CodePart::Simple("} else {\n".to_string()),
                CodePart::Indent(1),
                CodePart::Unindent(1),
                CodePart::Simple("}\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_clear() {
        let builder = CodeValue::builder().add("x").clear();
        assert!(builder.is_empty());
    }
}

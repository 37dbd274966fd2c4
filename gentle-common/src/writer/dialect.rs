use super::CodeWriter;
use crate::{Result, code::EmbeddedSpec, naming::ClassName, refs::TypeRef};

/// The parts of emission that differ between target languages.
///
/// A dialect is a zero-sized marker type; [`CodeWriter`] is generic over it
/// and calls back here for type references, embedded spec nodes and literal
/// syntax.
pub trait Dialect: Sized + 'static {
    /// Human-readable name, used in diagnostics.
    const NAME: &'static str;

    /// Written at the end of every statement, before the newline.
    const STATEMENT_TERMINATOR: &'static str;

    /// Opening and closing brackets of an annotation array value.
    const ANNOTATION_ARRAY: (&'static str, &'static str);

    /// Packages whose classes resolve without an import.
    fn implicit_packages() -> &'static [&'static str];

    /// A quoted, escaped string literal. `indent` is one indent unit, used
    /// for continuation lines.
    fn string_literal(value: &str, indent: &str) -> String;

    fn emit_type_ref(writer: &mut CodeWriter<'_, Self>, type_ref: &TypeRef) -> Result<()>;

    fn emit_embedded(writer: &mut CodeWriter<'_, Self>, spec: &EmbeddedSpec) -> Result<()>;

    fn is_implicit(class_name: &ClassName) -> bool {
        let package = class_name.top_level_class().package_name().to_string();
        Self::implicit_packages().contains(&package.as_str())
    }
}

//! The Java dialect of the shared code writer.

mod collect;
mod emit;
mod literal;

use codegentle_common::{
    Error, Result, TypeRef, code::EmbeddedSpec,
    writer::{CodeWriter, Dialect},
};

pub(crate) use collect::collect_type;
pub(crate) use emit::{MethodOwner, emit_field, emit_method, emit_parameter, emit_type};
pub use literal::string_literal;

use crate::{naming::JAVA_LANG, spec::JavaTypeSpec};

/// Marker type selecting Java syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JavaDialect;

pub type JavaCodeWriter<'a> = CodeWriter<'a, JavaDialect>;

impl Dialect for JavaDialect {
    const NAME: &'static str = "java";
    const STATEMENT_TERMINATOR: &'static str = ";";
    const ANNOTATION_ARRAY: (&'static str, &'static str) = ("{", "}");

    fn implicit_packages() -> &'static [&'static str] {
        &[JAVA_LANG]
    }

    fn string_literal(value: &str, indent: &str) -> String {
        literal::string_literal(value, indent)
    }

    fn emit_type_ref(writer: &mut JavaCodeWriter<'_>, type_ref: &TypeRef) -> Result<()> {
        emit::emit_type_ref(writer, type_ref)
    }

    fn emit_embedded(writer: &mut JavaCodeWriter<'_>, spec: &EmbeddedSpec) -> Result<()> {
        match spec.downcast_ref::<JavaTypeSpec>() {
            Some(type_spec) => emit::emit_type(writer, type_spec, None, &[]),
            None => Err(Error::illegal_state(format!(
                "cannot embed {spec:?} in Java code"
            ))),
        }
    }
}

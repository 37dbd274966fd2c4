//! The Kotlin dialect of the shared code writer.

mod collect;
mod emit;
mod literal;

use codegentle_common::{
    Error, Result, TypeRef, code::EmbeddedSpec,
    writer::{CodeWriter, Dialect},
};

pub(crate) use collect::{collect_function, collect_property, collect_type};
pub(crate) use emit::{FunctionOwner, emit_function, emit_parameter, emit_property, emit_type};
pub use literal::string_literal;

use crate::{naming::DEFAULT_IMPORTS, spec::KotlinTypeSpec};

/// Marker type selecting Kotlin syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KotlinDialect;

pub type KotlinCodeWriter<'a> = CodeWriter<'a, KotlinDialect>;

impl Dialect for KotlinDialect {
    const NAME: &'static str = "kotlin";
    const STATEMENT_TERMINATOR: &'static str = "";
    const ANNOTATION_ARRAY: (&'static str, &'static str) = ("[", "]");

    fn implicit_packages() -> &'static [&'static str] {
        DEFAULT_IMPORTS
    }

    fn string_literal(value: &str, indent: &str) -> String {
        literal::string_literal(value, indent)
    }

    fn emit_type_ref(writer: &mut KotlinCodeWriter<'_>, type_ref: &TypeRef) -> Result<()> {
        emit::emit_type_ref(writer, type_ref)
    }

    fn emit_embedded(writer: &mut KotlinCodeWriter<'_>, spec: &EmbeddedSpec) -> Result<()> {
        match spec.downcast_ref::<KotlinTypeSpec>() {
            Some(type_spec) => emit::emit_type(writer, type_spec, None, &[]),
            None => Err(Error::illegal_state(format!(
                "cannot embed {spec:?} in Kotlin code"
            ))),
        }
    }
}

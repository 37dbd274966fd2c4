//! Rendering single values as Kotlin text, outside of any file.
//!
//! No name checks are applied. Classes of the default-imported packages are
//! written by simple name; everything else is fully qualified.

use std::fmt;

use codegentle_common::{AnnotationRef, ClassName, CodeValue, Result, TypeName, TypeRef};

use crate::{
    spec::{KotlinFunctionSpec, KotlinPropertySpec, KotlinTypeSpec, KotlinValueParameterSpec},
    strategy::ToStringKotlinWriteStrategy,
    writer::{
        FunctionOwner, KotlinCodeWriter, emit_function, emit_parameter, emit_property, emit_type,
    },
};

pub trait ToKotlinString {
    fn to_kotlin_string(&self) -> Result<String>;
}

fn render<F>(f: F) -> Result<String>
where
    F: FnOnce(&mut KotlinCodeWriter<'_>) -> Result<()>,
{
    let strategy = ToStringKotlinWriteStrategy;
    let mut writer = KotlinCodeWriter::new(&strategy);
    f(&mut writer)?;
    Ok(writer.finish().code)
}

impl ToKotlinString for CodeValue {
    fn to_kotlin_string(&self) -> Result<String> {
        render(|writer| writer.emit_code(self))
    }
}

impl ToKotlinString for TypeName {
    fn to_kotlin_string(&self) -> Result<String> {
        render(|writer| writer.emit_type_name(self))
    }
}

impl ToKotlinString for TypeRef {
    fn to_kotlin_string(&self) -> Result<String> {
        render(|writer| writer.emit_type_ref(self))
    }
}

impl ToKotlinString for ClassName {
    fn to_kotlin_string(&self) -> Result<String> {
        render(|writer| writer.emit_class_name(self))
    }
}

impl ToKotlinString for AnnotationRef {
    fn to_kotlin_string(&self) -> Result<String> {
        render(|writer| writer.emit_annotation(self))
    }
}

impl ToKotlinString for KotlinValueParameterSpec {
    fn to_kotlin_string(&self) -> Result<String> {
        render(|writer| emit_parameter(writer, self))
    }
}

impl ToKotlinString for KotlinPropertySpec {
    fn to_kotlin_string(&self) -> Result<String> {
        render(|writer| emit_property(writer, self, &[]))
    }
}

impl ToKotlinString for KotlinFunctionSpec {
    fn to_kotlin_string(&self) -> Result<String> {
        render(|writer| emit_function(writer, self, &FunctionOwner::TOP_LEVEL))
    }
}

impl ToKotlinString for KotlinTypeSpec {
    fn to_kotlin_string(&self) -> Result<String> {
        render(|writer| emit_type(writer, self, None, &[]))
    }
}

macro_rules! display_via_kotlin_string {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let rendered = self.to_kotlin_string().map_err(|_| fmt::Error)?;
                    f.write_str(&rendered)
                }
            }
        )*
    };
}

display_via_kotlin_string!(
    KotlinValueParameterSpec,
    KotlinPropertySpec,
    KotlinFunctionSpec,
    KotlinTypeSpec,
);

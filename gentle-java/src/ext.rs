//! Rendering single values as Java text, outside of any file.
//!
//! Names are written fully qualified (including `java.lang`) and no name
//! checks are applied.

use std::fmt;

use codegentle_common::{AnnotationRef, ClassName, CodeValue, Result, TypeName, TypeRef};

use crate::{
    modifier::JavaModifier,
    spec::{JavaFieldSpec, JavaMethodSpec, JavaParameterSpec, JavaTypeSpec},
    strategy::ToStringJavaWriteStrategy,
    writer::{JavaCodeWriter, MethodOwner, emit_field, emit_method, emit_parameter, emit_type},
};

pub trait ToJavaString {
    fn to_java_string(&self) -> Result<String>;
}

fn render<F>(f: F) -> Result<String>
where
    F: FnOnce(&mut JavaCodeWriter<'_>) -> Result<()>,
{
    let strategy = ToStringJavaWriteStrategy;
    let mut writer = JavaCodeWriter::new(&strategy).omit_implicit_package(false);
    f(&mut writer)?;
    Ok(writer.finish().code)
}

impl ToJavaString for CodeValue {
    fn to_java_string(&self) -> Result<String> {
        render(|writer| writer.emit_code(self))
    }
}

impl ToJavaString for TypeName {
    fn to_java_string(&self) -> Result<String> {
        render(|writer| writer.emit_type_name(self))
    }
}

impl ToJavaString for TypeRef {
    fn to_java_string(&self) -> Result<String> {
        render(|writer| writer.emit_type_ref(self))
    }
}

impl ToJavaString for ClassName {
    fn to_java_string(&self) -> Result<String> {
        render(|writer| writer.emit_class_name(self))
    }
}

impl ToJavaString for AnnotationRef {
    fn to_java_string(&self) -> Result<String> {
        render(|writer| writer.emit_annotation(self))
    }
}

impl ToJavaString for JavaParameterSpec {
    fn to_java_string(&self) -> Result<String> {
        render(|writer| emit_parameter(writer, self, false))
    }
}

impl ToJavaString for JavaFieldSpec {
    fn to_java_string(&self) -> Result<String> {
        render(|writer| emit_field(writer, self, &[]))
    }
}

impl ToJavaString for JavaMethodSpec {
    fn to_java_string(&self) -> Result<String> {
        let owner = MethodOwner {
            name: Some("Constructor"),
            implicit: &[],
            is_abstract: self.has_modifier(JavaModifier::Abstract),
        };
        render(|writer| emit_method(writer, self, &owner))
    }
}

impl ToJavaString for JavaTypeSpec {
    fn to_java_string(&self) -> Result<String> {
        render(|writer| emit_type(writer, self, None, &[]))
    }
}

macro_rules! display_via_java_string {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let rendered = self.to_java_string().map_err(|_| fmt::Error)?;
                    f.write_str(&rendered)
                }
            }
        )*
    };
}

display_via_java_string!(JavaParameterSpec, JavaFieldSpec, JavaMethodSpec, JavaTypeSpec);

#[cfg(test)]
mod tests {
    use codegentle_common::{CodePart, PrimitiveTypeName};

    use super::*;
    use crate::naming::STRING;

    #[test]
    fn test_java_lang_is_qualified() {
        let type_name = TypeName::from(STRING.clone());
        assert_eq!(type_name.to_java_string().unwrap(), "java.lang.String");
    }

    #[test]
    fn test_code_value() {
        let code = CodeValue::format(
            "%V x = %V",
            [
                CodePart::type_name(PrimitiveTypeName::Int),
                CodePart::literal(1),
            ],
        )
        .unwrap();
        assert_eq!(code.to_java_string().unwrap(), "int x = 1");
    }

    #[test]
    fn test_field_display() {
        let field = JavaFieldSpec::builder("name", STRING.clone())
            .initializer(CodeValue::format("%V", [CodePart::string("x")]).unwrap())
            .build()
            .unwrap();
        assert_eq!(field.to_string(), "java.lang.String name = \"x\";\n");
    }
}

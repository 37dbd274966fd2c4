use codegentle_common::CodeValue;
use codegentle_java::{
    JavaFieldSpec, JavaFile, JavaMethodSpec, JavaModifier, JavaParameterSpec, JavaTypeSpec,
};

use super::{Lowering, doc};
use crate::{
    OutputConfig, Result,
    definition::{FieldDef, FileDef, MethodDef, ParamDef, TypeDef, TypeKind},
};

pub(super) fn lower_file(
    file: &FileDef,
    output: &OutputConfig,
    lowering: &Lowering<'_>,
) -> Result<JavaFile> {
    let type_spec = lower_type(&file.type_def, lowering)?;
    let mut builder = JavaFile::builder(lowering.package().clone(), type_spec)
        .add_static_imports(file.static_imports.iter().cloned())
        .always_qualify(output.always_qualify.iter().cloned())
        .skip_java_lang_imports(output.skip_implicit_imports)
        .config(output.writer_config());
    if let Some(comment) = &file.comment {
        builder = builder.file_comment(CodeValue::of(comment.as_str()));
    }
    lowering.model("file", &file.type_def.name, builder.build())
}

fn lower_type<'m>(def: &'m TypeDef, outer: &Lowering<'m>) -> Result<JavaTypeSpec> {
    let lowering = outer.enter(&def.name, &def.type_params);
    let mut builder = match def.kind {
        TypeKind::Class => JavaTypeSpec::class_builder(&def.name),
        TypeKind::Interface => JavaTypeSpec::interface_builder(&def.name),
        TypeKind::Enum => JavaTypeSpec::enum_builder(&def.name),
        TypeKind::Annotation => JavaTypeSpec::annotation_builder(&def.name),
        TypeKind::Record => JavaTypeSpec::record_builder(&def.name),
        TypeKind::Object => {
            return Err(lowering.unsupported(
                format!("'{}': object declarations are Kotlin-only, use a class", def.name),
                &def.name,
            ));
        }
    };

    if let Some(doc) = doc(&def.doc) {
        builder = builder.doc(doc);
    }
    builder = builder.add_modifiers(lowering.modifiers::<JavaModifier>(&def.modifiers)?);
    for annotation in lowering.annotations(&def.annotations)? {
        builder = builder.add_annotation(annotation);
    }
    for type_variable in lowering.type_variables(&def.type_params)? {
        builder = builder.add_type_variable(type_variable);
    }
    if let Some(superclass) = &def.superclass {
        builder = builder.superclass(lowering.resolve(superclass)?);
    }
    for interface in &def.interfaces {
        builder = builder.add_superinterface(lowering.resolve(interface)?);
    }

    if !def.parameters.is_empty() && def.kind != TypeKind::Record {
        return Err(lowering.unsupported(
            format!("'{}': only records declare parameters in Java", def.name),
            &def.name,
        ));
    }
    for parameter in &def.parameters {
        builder = builder.add_record_component(lower_parameter(parameter, &lowering)?);
    }

    for constant in &def.constants {
        if constant.args.is_empty() && constant.doc.is_none() {
            builder = builder.add_enum_constant(&constant.name);
            continue;
        }
        let args = CodeValue::join(lowering.codes(&constant.args)?, ", ");
        let mut constant_builder = JavaTypeSpec::anonymous_class_builder(args);
        if let Some(doc) = doc(&constant.doc) {
            constant_builder = constant_builder.doc(doc);
        }
        let spec = lowering.model("enum constant", &constant.name, constant_builder.build())?;
        builder = builder.add_enum_constant_spec(&constant.name, spec);
    }

    for field in &def.fields {
        builder = builder.add_field(lower_field(field, &lowering)?);
    }
    for constructor in &def.constructors {
        builder = builder.add_method(lower_method(constructor, &def.name, &lowering)?);
    }
    for method in &def.methods {
        builder = builder.add_method(lower_method(method, &def.name, &lowering)?);
    }
    for subtype in &def.types {
        builder = builder.add_subtype(lower_type(subtype, &lowering)?);
    }

    lowering.model(def.kind.as_str(), &def.name, builder.build())
}

fn lower_field(field: &FieldDef, lowering: &Lowering<'_>) -> Result<JavaFieldSpec> {
    let mut builder = JavaFieldSpec::builder(&field.name, lowering.resolve(&field.ty)?)
        .add_modifiers(lowering.modifiers::<JavaModifier>(&field.modifiers)?);
    if let Some(doc) = doc(&field.doc) {
        builder = builder.doc(doc);
    }
    for annotation in lowering.annotations(&field.annotations)? {
        builder = builder.add_annotation(annotation);
    }
    if let Some(initializer) = &field.initializer {
        builder = builder.initializer(lowering.code(initializer)?);
    }
    lowering.model("field", &field.name, builder.build())
}

/// Methods, and constructors when `method.name` is empty.
fn lower_method<'m>(
    method: &'m MethodDef,
    owner: &str,
    outer: &Lowering<'m>,
) -> Result<JavaMethodSpec> {
    let is_constructor = method.name.is_empty();
    let display_name = if is_constructor { owner } else { method.name.as_str() };
    if let Some(receiver) = &method.receiver {
        return Err(outer.unsupported(
            format!("'{display_name}': extension receivers are Kotlin-only"),
            receiver,
        ));
    }

    if method.delegate.is_some() {
        return Err(outer.unsupported(
            format!("'{display_name}': write 'this(...)' as the first body statement in Java"),
            display_name,
        ));
    }

    let lowering = outer.enter(display_name_segment(method), &method.type_params);
    let mut builder = if is_constructor {
        JavaMethodSpec::constructor_builder()
    } else {
        JavaMethodSpec::builder(&method.name)
    };
    if let Some(doc) = doc(&method.doc) {
        builder = builder.doc(doc);
    }
    builder = builder.add_modifiers(lowering.modifiers::<JavaModifier>(&method.modifiers)?);
    for annotation in lowering.annotations(&method.annotations)? {
        builder = builder.add_annotation(annotation);
    }
    for type_variable in lowering.type_variables(&method.type_params)? {
        builder = builder.add_type_variable(type_variable);
    }
    for param in &method.params {
        builder = builder.add_parameter(lower_parameter(param, &lowering)?);
    }
    if let Some(returns) = &method.returns {
        if is_constructor {
            return Err(lowering.unsupported(
                format!("constructor of '{owner}' cannot declare a return type"),
                returns,
            ));
        }
        builder = builder.returns(lowering.resolve(returns)?);
    }
    for exception in &method.throws {
        builder = builder.add_exception(lowering.resolve(exception)?);
    }
    if !method.body.is_empty() {
        builder = builder.add_code(lowering.statements(&method.body)?);
    }
    let kind = if is_constructor { "constructor" } else { "method" };
    lowering.model(kind, display_name, builder.build())
}

fn display_name_segment(method: &MethodDef) -> &str {
    if method.name.is_empty() {
        "<init>"
    } else {
        &method.name
    }
}

fn lower_parameter(param: &ParamDef, lowering: &Lowering<'_>) -> Result<JavaParameterSpec> {
    if param.property.is_some() || param.default.is_some() {
        return Err(lowering.unsupported(
            format!("parameter '{}': 'property' and 'default' are Kotlin-only", param.name),
            &param.name,
        ));
    }
    let mut builder = JavaParameterSpec::builder(&param.name, lowering.resolve(&param.ty)?);
    for modifier in lowering.modifiers::<JavaModifier>(&param.modifiers)? {
        builder = builder.add_modifier(modifier);
    }
    for annotation in lowering.annotations(&param.annotations)? {
        builder = builder.add_annotation(annotation);
    }
    lowering.model("parameter", &param.name, builder.build())
}

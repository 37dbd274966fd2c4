use codegentle_common::CodeValue;
use codegentle_kotlin::{
    KotlinConstructorSpec, KotlinFile, KotlinFunctionSpec, KotlinModifier, KotlinPropertySpec,
    KotlinTypeSpec, KotlinValueParameterSpec, Mutability,
};

use super::{Lowering, doc};
use crate::{
    OutputConfig, Result,
    definition::{FieldDef, FileDef, MethodDef, ParamDef, PropertyKind, TypeDef, TypeKind},
};

/// Nested objects with this name become the enclosing type's companion.
const COMPANION: &str = "Companion";

pub(super) fn lower_file(
    file: &FileDef,
    output: &OutputConfig,
    lowering: &Lowering<'_>,
) -> Result<KotlinFile> {
    let name = file.name.as_deref().unwrap_or(&file.type_def.name);
    let mut builder = KotlinFile::builder(lowering.package().clone(), name)
        .add_type(lower_type(&file.type_def, lowering, false)?)
        .always_qualify(output.always_qualify.iter().cloned())
        .skip_kotlin_imports(output.skip_implicit_imports)
        .config(output.writer_config());
    for signature in &file.static_imports {
        builder = builder.add_member_import(signature.as_str());
    }
    if let Some(comment) = &file.comment {
        builder = builder.file_comment(CodeValue::of(comment.as_str()));
    }
    lowering.model("file", name, builder.build())
}

fn lower_type<'m>(def: &'m TypeDef, outer: &Lowering<'m>, nested: bool) -> Result<KotlinTypeSpec> {
    let lowering = outer.enter(&def.name, &def.type_params);
    let mut builder = match def.kind {
        TypeKind::Class => KotlinTypeSpec::class_builder(&def.name),
        TypeKind::Interface => KotlinTypeSpec::interface_builder(&def.name),
        TypeKind::Enum => KotlinTypeSpec::enum_builder(&def.name),
        TypeKind::Annotation => KotlinTypeSpec::annotation_builder(&def.name),
        TypeKind::Object if nested && def.name == COMPANION => KotlinTypeSpec::companion_builder(),
        TypeKind::Object => KotlinTypeSpec::object_builder(&def.name),
        TypeKind::Record => {
            return Err(lowering.unsupported(
                format!("'{}': records are Java-only, use a data class", def.name),
                &def.name,
            ));
        }
    };

    if let Some(doc) = doc(&def.doc) {
        builder = builder.doc(doc);
    }
    builder = builder.add_modifiers(lowering.modifiers::<KotlinModifier>(&def.modifiers)?);
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

    if !def.parameters.is_empty() {
        let mut primary = KotlinConstructorSpec::builder();
        for parameter in &def.parameters {
            primary = primary.add_parameter(lower_parameter(parameter, &lowering)?);
        }
        let primary = lowering.model("primary constructor", &def.name, primary.build())?;
        builder = builder.primary_constructor(primary);
    }

    for constant in &def.constants {
        if constant.args.is_empty() && constant.doc.is_none() {
            builder = builder.add_enum_constant(&constant.name);
            continue;
        }
        let mut constant_builder = KotlinTypeSpec::enum_constant_builder();
        if let Some(doc) = doc(&constant.doc) {
            constant_builder = constant_builder.doc(doc);
        }
        for arg in lowering.codes(&constant.args)? {
            constant_builder = constant_builder.add_superclass_argument(arg);
        }
        let spec = lowering.model("enum constant", &constant.name, constant_builder.build())?;
        builder = builder.add_enum_constant_spec(&constant.name, spec);
    }

    for field in &def.fields {
        builder = builder.add_property(lower_property(field, &lowering)?);
    }
    for constructor in &def.constructors {
        builder = builder.add_constructor(lower_constructor(constructor, def, &lowering)?);
    }
    for method in &def.methods {
        builder = builder.add_function(lower_function(method, &lowering)?);
    }
    for subtype in &def.types {
        builder = builder.add_subtype(lower_type(subtype, &lowering, true)?);
    }

    lowering.model(def.kind.as_str(), &def.name, builder.build())
}

fn lower_property(field: &FieldDef, lowering: &Lowering<'_>) -> Result<KotlinPropertySpec> {
    let mut builder = KotlinPropertySpec::builder(&field.name, lowering.resolve(&field.ty)?)
        .mutable(field.mutable)
        .add_modifiers(lowering.modifiers::<KotlinModifier>(&field.modifiers)?);
    if let Some(doc) = doc(&field.doc) {
        builder = builder.doc(doc);
    }
    for annotation in lowering.annotations(&field.annotations)? {
        builder = builder.add_annotation(annotation);
    }
    if let Some(initializer) = &field.initializer {
        builder = builder.initializer(lowering.code(initializer)?);
    }
    lowering.model("property", &field.name, builder.build())
}

fn lower_constructor(
    constructor: &MethodDef,
    owner: &TypeDef,
    lowering: &Lowering<'_>,
) -> Result<KotlinConstructorSpec> {
    if let Some(returns) = &constructor.returns {
        return Err(lowering.unsupported(
            format!("constructor of '{}' cannot declare a return type", owner.name),
            returns,
        ));
    }
    if !constructor.type_params.is_empty() || !constructor.throws.is_empty() {
        return Err(lowering.unsupported(
            format!(
                "constructor of '{}': type parameters and 'throws' are not supported in Kotlin",
                owner.name
            ),
            &owner.name,
        ));
    }

    let mut builder = KotlinConstructorSpec::builder();
    if let Some(doc) = doc(&constructor.doc) {
        builder = builder.doc(doc);
    }
    for modifier in lowering.modifiers::<KotlinModifier>(&constructor.modifiers)? {
        builder = builder.add_modifier(modifier);
    }
    for annotation in lowering.annotations(&constructor.annotations)? {
        builder = builder.add_annotation(annotation);
    }
    for param in &constructor.params {
        builder = builder.add_parameter(lower_parameter(param, lowering)?);
    }
    match &constructor.delegate {
        Some(args) => builder = builder.delegate_this(lowering.codes(args)?),
        None if !owner.parameters.is_empty() => {
            return Err(lowering.unsupported(
                format!(
                    "secondary constructor of '{}' must set 'delegate' to call the primary constructor",
                    owner.name
                ),
                &owner.name,
            ));
        }
        None => {}
    }
    if !constructor.body.is_empty() {
        builder = builder.add_code(lowering.statements(&constructor.body)?);
    }
    lowering.model("constructor", &owner.name, builder.build())
}

fn lower_function<'m>(method: &'m MethodDef, outer: &Lowering<'m>) -> Result<KotlinFunctionSpec> {
    if !method.throws.is_empty() {
        return Err(outer.unsupported(
            format!("'{}': Kotlin has no checked exceptions, use @Throws", method.name),
            &method.name,
        ));
    }

    let lowering = outer.enter(&method.name, &method.type_params);
    let mut builder = KotlinFunctionSpec::builder(&method.name)
        .add_modifiers(lowering.modifiers::<KotlinModifier>(&method.modifiers)?);
    if let Some(doc) = doc(&method.doc) {
        builder = builder.doc(doc);
    }
    for annotation in lowering.annotations(&method.annotations)? {
        builder = builder.add_annotation(annotation);
    }
    for type_variable in lowering.type_variables(&method.type_params)? {
        builder = builder.add_type_variable(type_variable);
    }
    if let Some(receiver) = &method.receiver {
        builder = builder.receiver(lowering.resolve(receiver)?);
    }
    for param in &method.params {
        if param.property.is_some() {
            return Err(lowering.unsupported(
                format!(
                    "parameter '{}': only primary constructor parameters can be properties",
                    param.name
                ),
                &param.name,
            ));
        }
        builder = builder.add_parameter(lower_parameter(param, &lowering)?);
    }
    if let Some(returns) = &method.returns {
        builder = builder.returns(lowering.resolve(returns)?);
    }
    if !method.body.is_empty() {
        builder = builder.add_code(lowering.statements(&method.body)?);
    }
    lowering.model("function", &method.name, builder.build())
}

fn lower_parameter(param: &ParamDef, lowering: &Lowering<'_>) -> Result<KotlinValueParameterSpec> {
    let mut builder = KotlinValueParameterSpec::builder(&param.name, lowering.resolve(&param.ty)?)
        .add_modifiers(lowering.modifiers::<KotlinModifier>(&param.modifiers)?);
    for annotation in lowering.annotations(&param.annotations)? {
        builder = builder.add_annotation(annotation);
    }
    match param.property {
        Some(PropertyKind::Val) => builder = builder.property(Mutability::Val),
        Some(PropertyKind::Var) => builder = builder.property(Mutability::Var),
        None => {}
    }
    if let Some(default) = &param.default {
        builder = builder.default_value(lowering.code(default)?);
    }
    lowering.model("parameter", &param.name, builder.build())
}

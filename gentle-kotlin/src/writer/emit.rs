//! Kotlin emission of type references and declarations.

use std::collections::BTreeSet;

use codegentle_common::{
    CodePart, CodeValue, ParameterizedTypeName, Result, TypeName, TypeRef, TypeVariableName,
    WildcardTypeName,
    naming::WildcardBound,
    writer::TypeScope,
};

use super::KotlinCodeWriter;
use crate::{
    modifier::KotlinModifier,
    naming::{ANY, ARRAY, primitive_array_class, primitive_class},
    spec::{
        KotlinConstructorSpec, KotlinFunctionSpec, KotlinPropertySpec, KotlinTypeKind,
        KotlinTypeSpec, KotlinValueParameterSpec, doc_with_parameters,
    },
};

pub(crate) fn emit_type_ref(writer: &mut KotlinCodeWriter<'_>, type_ref: &TypeRef) -> Result<()> {
    writer.emit_annotations(type_ref.annotations(), true)?;
    match type_ref.type_name() {
        TypeName::Primitive(primitive) => writer.emit_class_name(primitive_class(*primitive))?,
        TypeName::Class(class_name) => writer.emit_class_name(class_name)?,
        TypeName::Array(array) => emit_array(writer, array.component())?,
        TypeName::Parameterized(parameterized) => emit_parameterized(writer, parameterized)?,
        TypeName::TypeVariable(variable) => {
            writer.check_name(variable.name())?;
            writer.emit(variable.name());
        }
        TypeName::Wildcard(wildcard) => emit_wildcard(writer, wildcard)?,
    }
    if type_ref.is_nullable() {
        writer.emit("?");
    }
    Ok(())
}

/// `IntArray` for a plain primitive component, `Array<T>` otherwise.
fn emit_array(writer: &mut KotlinCodeWriter<'_>, component: &TypeRef) -> Result<()> {
    if let TypeName::Primitive(primitive) = component.type_name()
        && !component.is_nullable()
        && component.annotations().is_empty()
        && let Some(array_class) = primitive_array_class(*primitive)
    {
        return writer.emit_class_name(array_class);
    }
    writer.emit_class_name(&ARRAY)?;
    writer.emit("<");
    emit_type_ref(writer, component)?;
    writer.emit(">");
    Ok(())
}

fn emit_parameterized(
    writer: &mut KotlinCodeWriter<'_>,
    parameterized: &ParameterizedTypeName,
) -> Result<()> {
    match parameterized.enclosing() {
        Some(enclosing) => {
            emit_parameterized(writer, enclosing)?;
            writer.emit(".");
            writer.check_name(parameterized.raw_type().simple_name())?;
            writer.emit(parameterized.raw_type().simple_name());
        }
        None => writer.emit_class_name(parameterized.raw_type())?,
    }
    let arguments = parameterized.type_arguments();
    if !arguments.is_empty() {
        writer.emit("<");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                writer.emit(", ");
            }
            emit_type_ref(writer, argument)?;
        }
        writer.emit(">");
    }
    Ok(())
}

/// `*`, `out T` or `in T`. Kotlin projections take a single type, so only
/// the first bound is written.
fn emit_wildcard(writer: &mut KotlinCodeWriter<'_>, wildcard: &WildcardTypeName) -> Result<()> {
    let Some(bound) = wildcard.bounds().first() else {
        writer.emit("*");
        return Ok(());
    };
    match wildcard.bound() {
        WildcardBound::Upper if is_top_type(bound) => writer.emit("*"),
        WildcardBound::Upper => {
            writer.emit("out ");
            emit_type_ref(writer, bound)?;
        }
        WildcardBound::Lower => {
            writer.emit("in ");
            emit_type_ref(writer, bound)?;
        }
    }
    Ok(())
}

fn is_top_type(type_ref: &TypeRef) -> bool {
    type_ref.type_name().as_class_name().is_some_and(|class_name| {
        *class_name == *ANY || class_name.canonical_name() == "java.lang.Object"
    })
}

/// Write `modifiers` in conventional order, each followed by a space,
/// skipping those in `implicit`.
pub(crate) fn emit_modifiers(
    writer: &mut KotlinCodeWriter<'_>,
    modifiers: &BTreeSet<KotlinModifier>,
    implicit: &[KotlinModifier],
) {
    for modifier in modifiers {
        if implicit.contains(modifier) {
            continue;
        }
        writer.emit(modifier.keyword());
        writer.emit(" ");
    }
}

/// `<T : A, U>`; variables with several bounds are left to the `where`
/// clause.
fn emit_type_variables(
    writer: &mut KotlinCodeWriter<'_>,
    type_variables: &[TypeVariableName],
) -> Result<()> {
    if type_variables.is_empty() {
        return Ok(());
    }
    writer.emit("<");
    for (i, variable) in type_variables.iter().enumerate() {
        if i > 0 {
            writer.emit(", ");
        }
        writer.check_name(variable.name())?;
        writer.emit(variable.name());
        if let [bound] = variable.bounds() {
            writer.emit(" : ");
            emit_type_ref(writer, bound)?;
        }
    }
    writer.emit(">");
    Ok(())
}

/// ` where T : A, T : B`
fn emit_where_clause(
    writer: &mut KotlinCodeWriter<'_>,
    type_variables: &[TypeVariableName],
) -> Result<()> {
    let constraints: Vec<(&str, &TypeRef)> = type_variables
        .iter()
        .filter(|variable| variable.bounds().len() > 1)
        .flat_map(|variable| variable.bounds().iter().map(move |b| (variable.name(), b)))
        .collect();
    if constraints.is_empty() {
        return Ok(());
    }
    writer.emit(" where ");
    for (i, (name, bound)) in constraints.into_iter().enumerate() {
        if i > 0 {
            writer.emit(", ");
        }
        writer.emit(name);
        writer.emit(" : ");
        emit_type_ref(writer, bound)?;
    }
    Ok(())
}

pub(crate) fn emit_parameter(
    writer: &mut KotlinCodeWriter<'_>,
    parameter: &KotlinValueParameterSpec,
) -> Result<()> {
    writer.emit_annotations(&parameter.annotations, true)?;
    emit_modifiers(writer, &parameter.modifiers, &[]);
    if let Some(mutability) = parameter.property {
        writer.emit(mutability.keyword());
        writer.emit(" ");
    }
    writer.check_name(&parameter.name)?;
    writer.emit(&parameter.name);
    writer.emit(": ");
    emit_type_ref(writer, &parameter.type_ref)?;
    if !parameter.default_value.is_empty() {
        writer.emit(" = ");
        writer.emit_code(&parameter.default_value)?;
    }
    Ok(())
}

fn emit_parameters(
    writer: &mut KotlinCodeWriter<'_>,
    parameters: &[KotlinValueParameterSpec],
) -> Result<()> {
    writer.emit("(");
    writer.emit_zero_width_space();
    for (i, parameter) in parameters.iter().enumerate() {
        if i > 0 {
            writer.emit(",");
            writer.emit_wrapping_space();
        }
        emit_parameter(writer, parameter)?;
    }
    writer.emit(")");
    Ok(())
}

/// The value of a body that is exactly one `return expr` statement, still
/// bracketed as a statement.
fn expression_body(code: &CodeValue) -> Option<CodeValue> {
    let [CodePart::StatementBegin, inner @ .., CodePart::StatementEnd] = code.parts() else {
        return None;
    };
    if inner
        .iter()
        .any(|part| matches!(part, CodePart::StatementBegin | CodePart::StatementEnd))
    {
        return None;
    }
    let [CodePart::Simple(first), rest @ ..] = inner else {
        return None;
    };
    let expression = first.strip_prefix("return ")?;
    if expression.trim().is_empty() && rest.is_empty() {
        return None;
    }

    let mut parts = vec![CodePart::StatementBegin];
    if !expression.is_empty() {
        parts.push(CodePart::simple(expression));
    }
    parts.extend(rest.iter().cloned());
    parts.push(CodePart::StatementEnd);
    Some(CodeValue::from_parts(parts))
}

/// ` = expr` or a braced block.
fn emit_body(writer: &mut KotlinCodeWriter<'_>, code: &CodeValue) -> Result<()> {
    if let Some(expression) = expression_body(code) {
        writer.emit(" = ");
        return writer.emit_code(&expression);
    }
    writer.emit(" {\n");
    writer.indent(1);
    if !code.is_empty() {
        writer.emit_code_block(code)?;
    }
    writer.unindent(1)?;
    writer.emit("}\n");
    Ok(())
}

pub(crate) fn emit_property(
    writer: &mut KotlinCodeWriter<'_>,
    property: &KotlinPropertySpec,
    implicit: &[KotlinModifier],
) -> Result<()> {
    writer.emit_doc(&property.doc)?;
    writer.emit_annotations(&property.annotations, false)?;
    emit_modifiers(writer, &property.modifiers, implicit);
    writer.emit(property.mutability.keyword());
    writer.emit(" ");
    writer.check_name(&property.name)?;
    writer.emit(&property.name);
    writer.emit(": ");
    emit_type_ref(writer, &property.type_ref)?;
    if !property.initializer.is_empty() {
        writer.emit(" = ");
        writer.emit_code(&property.initializer)?;
    } else if !property.delegate.is_empty() {
        writer.emit(" by ");
        writer.emit_code(&property.delegate)?;
    }
    writer.emit("\n");

    if !property.getter.is_empty() || !property.setter.is_empty() {
        writer.indent(1);
        if !property.getter.is_empty() {
            writer.emit("get()");
            emit_body(writer, &property.getter)?;
        }
        if !property.setter.is_empty() {
            writer.emit("set(value)");
            emit_body(writer, &property.setter)?;
        }
        writer.unindent(1)?;
    }
    Ok(())
}

/// The enclosing declaration a function is written in.
pub(crate) struct FunctionOwner<'s> {
    pub(crate) implicit: &'s [KotlinModifier],
    pub(crate) in_interface: bool,
}

impl FunctionOwner<'static> {
    pub(crate) const TOP_LEVEL: Self = Self {
        implicit: &[],
        in_interface: false,
    };
}

impl<'s> FunctionOwner<'s> {
    pub(crate) fn of(spec: &'s KotlinTypeSpec) -> Self {
        Self {
            implicit: spec.kind.implicit_member_modifiers(),
            in_interface: spec.kind == KotlinTypeKind::Interface,
        }
    }
}

pub(crate) fn emit_function(
    writer: &mut KotlinCodeWriter<'_>,
    function: &KotlinFunctionSpec,
    owner: &FunctionOwner<'_>,
) -> Result<()> {
    let names: Vec<&str> = function.type_variables.iter().map(|t| t.name()).collect();
    writer.push_type_variables(names.iter().copied());
    let result = emit_function_declaration(writer, function, owner);
    writer.pop_type_variables(names.iter().copied());
    result
}

fn emit_function_declaration(
    writer: &mut KotlinCodeWriter<'_>,
    function: &KotlinFunctionSpec,
    owner: &FunctionOwner<'_>,
) -> Result<()> {
    writer.emit_doc(&doc_with_parameters(&function.doc, &function.parameters))?;
    writer.emit_annotations(&function.annotations, false)?;

    if !function.context_parameters.is_empty() {
        writer.emit("context(");
        for (i, parameter) in function.context_parameters.iter().enumerate() {
            if i > 0 {
                writer.emit(", ");
            }
            writer.emit(parameter.name().unwrap_or("_"));
            writer.emit(": ");
            emit_type_ref(writer, &parameter.type_ref)?;
        }
        writer.emit(")\n");
    }

    emit_modifiers(writer, &function.modifiers, owner.implicit);
    writer.emit("fun ");
    if !function.type_variables.is_empty() {
        emit_type_variables(writer, &function.type_variables)?;
        writer.emit(" ");
    }
    if let Some(receiver) = &function.receiver {
        emit_type_ref(writer, receiver)?;
        writer.emit(".");
    }
    writer.check_name(&function.name)?;
    writer.emit(&function.name);
    emit_parameters(writer, &function.parameters)?;

    if let Some(return_type) = &function.return_type {
        writer.emit(": ");
        emit_type_ref(writer, return_type)?;
    }
    emit_where_clause(writer, &function.type_variables)?;

    if function.is_bodiless(owner.in_interface) {
        writer.emit("\n");
        return Ok(());
    }
    emit_body(writer, &function.code)
}

fn emit_constructor(
    writer: &mut KotlinCodeWriter<'_>,
    constructor: &KotlinConstructorSpec,
) -> Result<()> {
    writer.emit_doc(&doc_with_parameters(&constructor.doc, &constructor.parameters))?;
    writer.emit_annotations(&constructor.annotations, false)?;
    emit_modifiers(writer, &constructor.modifiers, &[]);
    writer.emit("constructor");
    emit_parameters(writer, &constructor.parameters)?;
    if let Some(delegation) = &constructor.delegation {
        writer.emit(" : ");
        writer.emit(delegation.kind.keyword());
        emit_arguments(writer, &delegation.arguments)?;
    }
    if constructor.code.is_empty() {
        writer.emit("\n");
        return Ok(());
    }
    emit_body(writer, &constructor.code)
}

/// `(a, b)`
fn emit_arguments(writer: &mut KotlinCodeWriter<'_>, arguments: &[CodeValue]) -> Result<()> {
    writer.emit("(");
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            writer.emit(", ");
        }
        writer.emit_code(argument)?;
    }
    writer.emit(")");
    Ok(())
}

/// Write a type declaration. `enum_name` is set when `spec` is the
/// arguments and body of an enum constant; `implicit` holds the modifiers
/// not to print.
pub(crate) fn emit_type(
    writer: &mut KotlinCodeWriter<'_>,
    spec: &KotlinTypeSpec,
    enum_name: Option<&str>,
    implicit: &[KotlinModifier],
) -> Result<()> {
    writer.with_stashed_statement(|writer| {
        let names: Vec<&str> = spec.type_variables.iter().map(|t| t.name()).collect();
        writer.push_type_variables(names.iter().copied());
        let result = emit_type_declaration(writer, spec, enum_name, implicit);
        writer.pop_type_variables(names.iter().copied());
        result
    })
}

fn emit_type_declaration(
    writer: &mut KotlinCodeWriter<'_>,
    spec: &KotlinTypeSpec,
    enum_name: Option<&str>,
    implicit: &[KotlinModifier],
) -> Result<()> {
    let named = enum_name.is_none() && !spec.is_anonymous();
    if let Some(enum_name) = enum_name {
        writer.emit_doc(&spec.doc)?;
        writer.emit_annotations(&spec.annotations, false)?;
        writer.emit(enum_name);
        if !spec.superclass_args.is_empty() {
            emit_arguments(writer, &spec.superclass_args)?;
        }
        if !spec.has_members() {
            return Ok(());
        }
        writer.emit(" {\n");
    } else if named {
        emit_type_header(writer, spec, implicit)?;
    } else {
        writer.emit("object");
        emit_supertypes(writer, spec)?;
        writer.emit(" {\n");
    }

    let nested = spec.subtype_names();
    let scope = match spec.scope_name() {
        Some(name) if named => TypeScope::named(name, nested),
        _ => TypeScope::anonymous(nested),
    };
    writer.push_type(scope);
    writer.indent(1);
    let result = emit_members(writer, spec);
    writer.pop_type();
    result?;
    writer.unindent(1)?;

    writer.emit("}");
    // Object expressions and enum constant bodies are values.
    if named {
        writer.emit("\n");
    }
    Ok(())
}

fn emit_type_header(
    writer: &mut KotlinCodeWriter<'_>,
    spec: &KotlinTypeSpec,
    implicit: &[KotlinModifier],
) -> Result<()> {
    if let Some(name) = &spec.name {
        writer.check_name(name)?;
    }
    let primary_parameters = spec
        .primary_constructor
        .as_ref()
        .map(|c| c.parameters.as_slice())
        .unwrap_or_default();
    writer.emit_doc(&doc_with_parameters(&spec.doc, primary_parameters))?;
    writer.emit_annotations(&spec.annotations, false)?;
    emit_modifiers(writer, &spec.modifiers, implicit);

    writer.emit(spec.kind.keyword());
    if let Some(name) = &spec.name {
        writer.emit(" ");
        writer.emit(name);
    }
    emit_type_variables(writer, &spec.type_variables)?;

    if let Some(primary) = &spec.primary_constructor {
        if primary.needs_keyword() {
            writer.emit(" ");
            writer.emit_annotations(&primary.annotations, true)?;
            emit_modifiers(writer, &primary.modifiers, &[]);
            writer.emit("constructor");
        }
        emit_parameters(writer, &primary.parameters)?;
    }

    emit_supertypes(writer, spec)?;
    emit_where_clause(writer, &spec.type_variables)?;
    writer.emit(" {\n");
    Ok(())
}

/// ` : Super(args), Iface`
fn emit_supertypes(writer: &mut KotlinCodeWriter<'_>, spec: &KotlinTypeSpec) -> Result<()> {
    if spec.superclass.is_none() && spec.superinterfaces.is_empty() {
        return Ok(());
    }
    writer.emit(" : ");
    let mut first = true;
    if let Some(superclass) = &spec.superclass {
        emit_type_ref(writer, superclass)?;
        emit_arguments(writer, &spec.superclass_args)?;
        first = false;
    }
    for superinterface in &spec.superinterfaces {
        if !first {
            writer.emit(", ");
        }
        emit_type_ref(writer, superinterface)?;
        first = false;
    }
    Ok(())
}

fn emit_members(writer: &mut KotlinCodeWriter<'_>, spec: &KotlinTypeSpec) -> Result<()> {
    let mut first = true;
    let mut separate = |writer: &mut KotlinCodeWriter<'_>| {
        if !first {
            writer.emit("\n");
        }
        first = false;
    };

    if !spec.enum_constants.is_empty() {
        let needs_semicolon = spec.has_members();
        let count = spec.enum_constants.len();
        separate(writer);
        for (i, (name, constant)) in spec.enum_constants.iter().enumerate() {
            writer.check_name(name)?;
            emit_type(writer, constant, Some(name), &[])?;
            if i + 1 < count {
                writer.emit(",\n");
            } else if needs_semicolon {
                writer.emit(";\n");
            } else {
                writer.emit("\n");
            }
        }
    }

    let implicit = spec.kind.implicit_member_modifiers();
    for property in &spec.properties {
        separate(writer);
        emit_property(writer, property, implicit)?;
    }

    if !spec.init_block.is_empty() {
        separate(writer);
        writer.emit("init {\n");
        writer.indent(1);
        writer.emit_code_block(&spec.init_block)?;
        writer.unindent(1)?;
        writer.emit("}\n");
    }

    for constructor in &spec.constructors {
        separate(writer);
        emit_constructor(writer, constructor)?;
    }

    let owner = FunctionOwner::of(spec);
    for function in &spec.functions {
        separate(writer);
        emit_function(writer, function, &owner)?;
    }

    for subtype in &spec.subtypes {
        separate(writer);
        emit_type(writer, subtype, None, &[])?;
    }
    Ok(())
}

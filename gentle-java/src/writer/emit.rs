//! Java emission of type references and declarations.

use std::collections::BTreeSet;

use codegentle_common::{
    CodeValue, Error, ParameterizedTypeName, Result, TypeName, TypeRef, TypeVariableName,
    naming::WildcardBound, writer::TypeScope,
};

use super::JavaCodeWriter;
use crate::{
    modifier::JavaModifier,
    naming::OBJECT,
    spec::{JavaFieldSpec, JavaMethodSpec, JavaParameterSpec, JavaTypeKind, JavaTypeSpec},
};

pub(crate) fn emit_type_ref(writer: &mut JavaCodeWriter<'_>, type_ref: &TypeRef) -> Result<()> {
    let annotations = type_ref.annotations();
    match type_ref.type_name() {
        // Type-use annotations on an array apply to the brackets.
        TypeName::Array(array) => {
            emit_type_ref(writer, array.component())?;
            if !annotations.is_empty() {
                writer.emit(" ");
                writer.emit_annotations(annotations, true)?;
            }
            writer.emit("[]");
            return Ok(());
        }
        _ => writer.emit_annotations(annotations, true)?,
    }

    match type_ref.type_name() {
        TypeName::Primitive(primitive) => writer.emit(primitive.keyword()),
        TypeName::Class(class_name) => writer.emit_class_name(class_name)?,
        TypeName::Array(_) => {}
        TypeName::Parameterized(parameterized) => {
            emit_parameterized(writer, parameterized)?;
        }
        TypeName::TypeVariable(variable) => {
            writer.check_name(variable.name())?;
            writer.emit(variable.name());
        }
        TypeName::Wildcard(wildcard) => {
            writer.emit("?");
            let keyword = match wildcard.bound() {
                WildcardBound::Upper => " extends ",
                WildcardBound::Lower => " super ",
            };
            for (i, bound) in wildcard.bounds().iter().enumerate() {
                if i == 0 && bound.type_name().as_class_name() == Some(&*OBJECT) {
                    continue;
                }
                writer.emit(if i == 0 { keyword } else { " & " });
                emit_type_ref(writer, bound)?;
            }
        }
    }
    Ok(())
}

fn emit_parameterized(
    writer: &mut JavaCodeWriter<'_>,
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

/// Write `modifiers` in declaration order, each followed by a space,
/// skipping those in `implicit`.
pub(crate) fn emit_modifiers(
    writer: &mut JavaCodeWriter<'_>,
    modifiers: &BTreeSet<JavaModifier>,
    implicit: &[JavaModifier],
) {
    for modifier in modifiers {
        if implicit.contains(modifier) {
            continue;
        }
        writer.emit(modifier.keyword());
        writer.emit(" ");
    }
}

/// `<T extends A & B, U>`
pub(crate) fn emit_type_variables(
    writer: &mut JavaCodeWriter<'_>,
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
        for (j, bound) in variable.bounds().iter().enumerate() {
            writer.emit(if j == 0 { " extends " } else { " & " });
            emit_type_ref(writer, bound)?;
        }
    }
    writer.emit(">");
    Ok(())
}

pub(crate) fn emit_parameter(
    writer: &mut JavaCodeWriter<'_>,
    parameter: &JavaParameterSpec,
    varargs: bool,
) -> Result<()> {
    writer.emit_annotations(&parameter.annotations, true)?;
    emit_modifiers(writer, &parameter.modifiers, &[]);
    match parameter.type_ref.type_name() {
        TypeName::Array(array) if varargs => {
            emit_type_ref(writer, array.component())?;
            writer.emit("...");
        }
        _ => emit_type_ref(writer, &parameter.type_ref)?,
    }
    writer.emit(" ");
    writer.check_name(&parameter.name)?;
    writer.emit(&parameter.name);
    Ok(())
}

pub(crate) fn emit_field(
    writer: &mut JavaCodeWriter<'_>,
    field: &JavaFieldSpec,
    implicit: &[JavaModifier],
) -> Result<()> {
    writer.emit_doc(&field.doc)?;
    writer.emit_annotations(&field.annotations, false)?;
    emit_modifiers(writer, &field.modifiers, implicit);
    emit_type_ref(writer, &field.type_ref)?;
    writer.emit(" ");
    writer.check_name(&field.name)?;
    writer.emit(&field.name);
    if !field.initializer.is_empty() {
        writer.emit(" = ");
        writer.emit_code(&field.initializer)?;
    }
    writer.emit(";\n");
    Ok(())
}

/// The enclosing type a method is written in.
pub(crate) struct MethodOwner<'s> {
    /// Written as the constructor name.
    pub(crate) name: Option<&'s str>,
    pub(crate) implicit: &'s [JavaModifier],
    /// Whether the method is written without a body.
    pub(crate) is_abstract: bool,
}

impl<'s> MethodOwner<'s> {
    pub(crate) fn of(spec: &'s JavaTypeSpec, method: &JavaMethodSpec) -> Self {
        Self {
            name: spec.name(),
            implicit: spec.kind.implicit_method_modifiers(),
            is_abstract: spec.is_abstract_method(method),
        }
    }
}

pub(crate) fn emit_method(
    writer: &mut JavaCodeWriter<'_>,
    method: &JavaMethodSpec,
    owner: &MethodOwner<'_>,
) -> Result<()> {
    let names: Vec<&str> = method.type_variables.iter().map(|t| t.name()).collect();
    writer.push_type_variables(names.iter().copied());
    let result = emit_method_declaration(writer, method, owner);
    writer.pop_type_variables(names.iter().copied());
    result
}

fn emit_method_declaration(
    writer: &mut JavaCodeWriter<'_>,
    method: &JavaMethodSpec,
    owner: &MethodOwner<'_>,
) -> Result<()> {
    writer.emit_doc(&method.doc_with_parameters())?;
    writer.emit_annotations(&method.annotations, false)?;
    emit_modifiers(writer, &method.modifiers, owner.implicit);
    if !method.type_variables.is_empty() {
        emit_type_variables(writer, &method.type_variables)?;
        writer.emit(" ");
    }

    if method.is_constructor() {
        let Some(name) = owner.name else {
            return Err(Error::illegal_state(
                "anonymous classes cannot declare constructors",
            ));
        };
        writer.emit(name);
    } else {
        match &method.return_type {
            Some(return_type) => emit_type_ref(writer, return_type)?,
            None => writer.emit("void"),
        }
        writer.emit(" ");
        writer.check_name(&method.name)?;
        writer.emit(&method.name);
    }

    writer.emit("(");
    writer.emit_zero_width_space();
    let count = method.parameters.len();
    for (i, parameter) in method.parameters.iter().enumerate() {
        if i > 0 {
            writer.emit(",");
            writer.emit_wrapping_space();
        }
        emit_parameter(writer, parameter, method.varargs && i + 1 == count)?;
    }
    writer.emit(")");

    if !method.default_value.is_empty() {
        writer.emit(" default ");
        writer.emit_code(&method.default_value)?;
    }

    if !method.exceptions.is_empty() {
        writer.emit_wrapping_space();
        writer.emit("throws");
        for (i, exception) in method.exceptions.iter().enumerate() {
            if i > 0 {
                writer.emit(",");
            }
            writer.emit_wrapping_space();
            emit_type_ref(writer, exception)?;
        }
    }

    if owner.is_abstract {
        writer.emit(";\n");
    } else if method.has_modifier(JavaModifier::Native) {
        writer.emit_code(&method.code)?;
        writer.emit(";\n");
    } else {
        writer.emit(" {\n");
        writer.indent(1);
        writer.emit_code_block(&method.code)?;
        writer.unindent(1)?;
        writer.emit("}\n");
    }
    Ok(())
}

/// Write a type declaration. `enum_name` is set when `spec` is the body of
/// an enum constant; `implicit` holds the modifiers the enclosing type
/// implies for its nested types.
pub(crate) fn emit_type(
    writer: &mut JavaCodeWriter<'_>,
    spec: &JavaTypeSpec,
    enum_name: Option<&str>,
    implicit: &[JavaModifier],
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
    writer: &mut JavaCodeWriter<'_>,
    spec: &JavaTypeSpec,
    enum_name: Option<&str>,
    implicit: &[JavaModifier],
) -> Result<()> {
    if let Some(enum_name) = enum_name {
        writer.emit_doc(&spec.doc)?;
        writer.emit_annotations(&spec.annotations, false)?;
        writer.emit(enum_name);
        if let Some(args) = &spec.anonymous_args
            && !args.is_empty()
        {
            writer.emit("(");
            writer.emit_code(args)?;
            writer.emit(")");
        }
        if !spec.has_members() {
            return Ok(());
        }
        writer.emit(" {\n");
    } else if let Some(name) = &spec.name {
        emit_type_header(writer, spec, name, implicit)?;
    } else {
        let supertype = spec.superinterfaces.first().or(spec.superclass.as_ref());
        writer.emit("new ");
        match supertype {
            Some(supertype) => emit_type_ref(writer, supertype)?,
            None => writer.emit_class_name(&OBJECT)?,
        }
        writer.emit("(");
        if let Some(args) = &spec.anonymous_args {
            writer.emit_code(args)?;
        }
        writer.emit(") {\n");
    }

    let nested = spec.subtype_names();
    let scope = match (&spec.name, enum_name) {
        (Some(name), None) => TypeScope::named(name.clone(), nested),
        _ => TypeScope::anonymous(nested),
    };
    writer.push_type(scope);
    writer.indent(1);
    let result = emit_members(writer, spec);
    writer.pop_type();
    result?;
    writer.unindent(1)?;

    writer.emit("}");
    // Anonymous classes and enum constant bodies are values, not statements.
    if enum_name.is_none() && spec.name.is_some() {
        writer.emit("\n");
    }
    Ok(())
}

fn emit_type_header(
    writer: &mut JavaCodeWriter<'_>,
    spec: &JavaTypeSpec,
    name: &str,
    implicit: &[JavaModifier],
) -> Result<()> {
    writer.check_name(name)?;
    writer.emit_doc(&spec.doc)?;
    writer.emit_annotations(&spec.annotations, false)?;

    let mut implied: Vec<JavaModifier> = implicit.to_vec();
    implied.extend_from_slice(spec.kind.as_member_modifiers());
    emit_modifiers(writer, &spec.modifiers, &implied);

    writer.emit(spec.kind.keyword());
    writer.emit(" ");
    writer.emit(name);
    emit_type_variables(writer, &spec.type_variables)?;

    if spec.kind == JavaTypeKind::Record {
        writer.emit("(");
        for (i, component) in spec.record_components.iter().enumerate() {
            if i > 0 {
                writer.emit(",");
                writer.emit_wrapping_space();
            }
            emit_parameter(writer, component, false)?;
        }
        writer.emit(")");
    }

    let (extends, implements): (Vec<&TypeRef>, Vec<&TypeRef>) = match spec.kind {
        JavaTypeKind::Interface => (spec.superinterfaces.iter().collect(), Vec::new()),
        _ => (
            spec.superclass.iter().collect(),
            spec.superinterfaces.iter().collect(),
        ),
    };
    emit_type_list(writer, " extends", &extends)?;
    emit_type_list(writer, " implements", &implements)?;
    let permits: Vec<&TypeRef> = spec.permits.iter().collect();
    emit_type_list(writer, " permits", &permits)?;

    writer.emit(" {\n");
    Ok(())
}

fn emit_type_list(writer: &mut JavaCodeWriter<'_>, keyword: &str, types: &[&TypeRef]) -> Result<()> {
    if types.is_empty() {
        return Ok(());
    }
    writer.emit(keyword);
    for (i, type_ref) in types.iter().enumerate() {
        if i > 0 {
            writer.emit(",");
        }
        writer.emit(" ");
        emit_type_ref(writer, type_ref)?;
    }
    Ok(())
}

fn emit_members(writer: &mut JavaCodeWriter<'_>, spec: &JavaTypeSpec) -> Result<()> {
    let kind = spec.kind;
    let mut first = true;
    let mut separate = |writer: &mut JavaCodeWriter<'_>| {
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

    let implicit_fields = kind.implicit_field_modifiers();
    let is_static = |field: &JavaFieldSpec| {
        field.has_modifier(JavaModifier::Static) || implicit_fields.contains(&JavaModifier::Static)
    };

    for field in spec.fields.iter().filter(|f| is_static(f)) {
        separate(writer);
        emit_field(writer, field, implicit_fields)?;
    }

    if !spec.static_block.is_empty() {
        separate(writer);
        emit_block(writer, "static {\n", &spec.static_block)?;
    }

    for field in spec.fields.iter().filter(|f| !is_static(f)) {
        separate(writer);
        emit_field(writer, field, implicit_fields)?;
    }

    if !spec.initializer_block.is_empty() {
        separate(writer);
        emit_block(writer, "{\n", &spec.initializer_block)?;
    }

    let constructors = spec.methods.iter().filter(|m| m.is_constructor());
    let methods = spec.methods.iter().filter(|m| !m.is_constructor());
    for method in constructors.chain(methods) {
        separate(writer);
        emit_method(writer, method, &MethodOwner::of(spec, method))?;
    }

    for subtype in &spec.subtypes {
        separate(writer);
        emit_type(writer, subtype, None, kind.implicit_type_modifiers())?;
    }
    Ok(())
}

fn emit_block(
    writer: &mut JavaCodeWriter<'_>,
    opening: &str,
    code: &CodeValue,
) -> Result<()> {
    writer.emit(opening);
    writer.indent(1);
    writer.emit_code_block(code)?;
    writer.unindent(1)?;
    writer.emit("}\n");
    Ok(())
}

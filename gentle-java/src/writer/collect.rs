//! The import collection pass over a Java spec tree.

use codegentle_common::{CodeValue, writer::ImportCollector};

use crate::spec::{JavaFieldSpec, JavaMethodSpec, JavaParameterSpec, JavaTypeSpec};

/// Register every class referenced anywhere in `spec`, including anonymous
/// classes embedded in code values. Doc comments are skipped; the writer
/// never imports for them either.
pub(crate) fn collect_type(imports: &mut ImportCollector, spec: &JavaTypeSpec) {
    for annotation in &spec.annotations {
        imports.visit_annotation(annotation);
    }
    for variable in &spec.type_variables {
        for bound in variable.bounds() {
            imports.visit_type_ref(bound);
        }
    }
    if let Some(superclass) = &spec.superclass {
        imports.visit_type_ref(superclass);
    }
    for type_ref in spec.superinterfaces.iter().chain(&spec.permits) {
        imports.visit_type_ref(type_ref);
    }
    if let Some(args) = &spec.anonymous_args {
        collect_code(imports, args);
    }
    for constant in spec.enum_constants.values() {
        collect_type(imports, constant);
    }
    for component in &spec.record_components {
        collect_parameter(imports, component);
    }
    for field in &spec.fields {
        collect_field(imports, field);
    }
    collect_code(imports, &spec.static_block);
    collect_code(imports, &spec.initializer_block);
    for method in &spec.methods {
        collect_method(imports, method);
    }
    for subtype in &spec.subtypes {
        collect_type(imports, subtype);
    }
}

fn collect_field(imports: &mut ImportCollector, field: &JavaFieldSpec) {
    for annotation in &field.annotations {
        imports.visit_annotation(annotation);
    }
    imports.visit_type_ref(&field.type_ref);
    collect_code(imports, &field.initializer);
}

fn collect_method(imports: &mut ImportCollector, method: &JavaMethodSpec) {
    for annotation in &method.annotations {
        imports.visit_annotation(annotation);
    }
    for variable in &method.type_variables {
        for bound in variable.bounds() {
            imports.visit_type_ref(bound);
        }
    }
    if let Some(return_type) = &method.return_type {
        imports.visit_type_ref(return_type);
    }
    for parameter in &method.parameters {
        collect_parameter(imports, parameter);
    }
    for exception in &method.exceptions {
        imports.visit_type_ref(exception);
    }
    collect_code(imports, &method.code);
    collect_code(imports, &method.default_value);
}

fn collect_parameter(imports: &mut ImportCollector, parameter: &JavaParameterSpec) {
    for annotation in &parameter.annotations {
        imports.visit_annotation(annotation);
    }
    imports.visit_type_ref(&parameter.type_ref);
}

fn collect_code(imports: &mut ImportCollector, code: &CodeValue) {
    imports.visit_code_value(code, &mut |imports, embedded| {
        if let Some(spec) = embedded.downcast_ref::<JavaTypeSpec>() {
            collect_type(imports, spec);
        }
    });
}

//! The import collection pass over a Kotlin spec tree.

use codegentle_common::{CodeValue, TypeVariableName, writer::ImportCollector};

use crate::spec::{
    KotlinConstructorSpec, KotlinFunctionSpec, KotlinPropertySpec, KotlinTypeSpec,
    KotlinValueParameterSpec,
};

/// Register every class referenced anywhere in `spec`, including object
/// expressions embedded in code values. Doc comments are skipped.
pub(crate) fn collect_type(imports: &mut ImportCollector, spec: &KotlinTypeSpec) {
    for annotation in &spec.annotations {
        imports.visit_annotation(annotation);
    }
    collect_type_variables(imports, &spec.type_variables);
    if let Some(primary) = &spec.primary_constructor {
        collect_constructor(imports, primary);
    }
    if let Some(superclass) = &spec.superclass {
        imports.visit_type_ref(superclass);
    }
    for argument in &spec.superclass_args {
        collect_code(imports, argument);
    }
    for superinterface in &spec.superinterfaces {
        imports.visit_type_ref(superinterface);
    }
    for constant in spec.enum_constants.values() {
        collect_type(imports, constant);
    }
    for property in &spec.properties {
        collect_property(imports, property);
    }
    collect_code(imports, &spec.init_block);
    for constructor in &spec.constructors {
        collect_constructor(imports, constructor);
    }
    for function in &spec.functions {
        collect_function(imports, function);
    }
    for subtype in &spec.subtypes {
        collect_type(imports, subtype);
    }
}

pub(crate) fn collect_property(imports: &mut ImportCollector, property: &KotlinPropertySpec) {
    for annotation in &property.annotations {
        imports.visit_annotation(annotation);
    }
    imports.visit_type_ref(&property.type_ref);
    collect_code(imports, &property.initializer);
    collect_code(imports, &property.delegate);
    collect_code(imports, &property.getter);
    collect_code(imports, &property.setter);
}

pub(crate) fn collect_function(imports: &mut ImportCollector, function: &KotlinFunctionSpec) {
    for annotation in &function.annotations {
        imports.visit_annotation(annotation);
    }
    collect_type_variables(imports, &function.type_variables);
    for context in &function.context_parameters {
        imports.visit_type_ref(&context.type_ref);
    }
    if let Some(receiver) = &function.receiver {
        imports.visit_type_ref(receiver);
    }
    for parameter in &function.parameters {
        collect_parameter(imports, parameter);
    }
    if let Some(return_type) = &function.return_type {
        imports.visit_type_ref(return_type);
    }
    collect_code(imports, &function.code);
}

fn collect_constructor(imports: &mut ImportCollector, constructor: &KotlinConstructorSpec) {
    for annotation in &constructor.annotations {
        imports.visit_annotation(annotation);
    }
    for parameter in &constructor.parameters {
        collect_parameter(imports, parameter);
    }
    if let Some(delegation) = &constructor.delegation {
        for argument in &delegation.arguments {
            collect_code(imports, argument);
        }
    }
    collect_code(imports, &constructor.code);
}

fn collect_parameter(imports: &mut ImportCollector, parameter: &KotlinValueParameterSpec) {
    for annotation in &parameter.annotations {
        imports.visit_annotation(annotation);
    }
    imports.visit_type_ref(&parameter.type_ref);
    collect_code(imports, &parameter.default_value);
}

fn collect_type_variables(imports: &mut ImportCollector, type_variables: &[TypeVariableName]) {
    for variable in type_variables {
        for bound in variable.bounds() {
            imports.visit_type_ref(bound);
        }
    }
}

fn collect_code(imports: &mut ImportCollector, code: &CodeValue) {
    imports.visit_code_value(code, &mut |imports, embedded| {
        if let Some(spec) = embedded.downcast_ref::<KotlinTypeSpec>() {
            collect_type(imports, spec);
        }
    });
}

//! End-to-end rendering of Kotlin files.

use codegentle_common::{
    AnnotationRef, ClassName, CodePart, CodeValue, Error, ParameterizedTypeName,
    PrimitiveTypeName, TypeRef, TypeVariableName,
};
use codegentle_kotlin::{
    ContextParameter, KotlinConstructorSpec, KotlinFile, KotlinFunctionSpec, KotlinPropertySpec,
    KotlinTypeSpec, KotlinValueParameterSpec, Mutability, ToKotlinString,
    naming::{DOUBLE, INT, JVM_INLINE, LIST, LONG, MUTABLE_LIST, STRING},
};

use codegentle_kotlin::KotlinModifier::{Const, Data, Override, Private};

fn comparable(of: impl Into<TypeRef>) -> ParameterizedTypeName {
    ParameterizedTypeName::new(ClassName::new("kotlin", "Comparable"), [of.into()]).unwrap()
}

fn val(name: &str, type_ref: impl Into<TypeRef>) -> KotlinValueParameterSpec {
    KotlinValueParameterSpec::builder(name, type_ref)
        .property(Mutability::Val)
        .build()
        .unwrap()
}

fn greeting_file() -> KotlinFile {
    let greeting = KotlinPropertySpec::builder("greeting", STRING.clone())
        .initializer_format("%V", [CodePart::string("Hello, World!")])
        .unwrap()
        .build()
        .unwrap();
    let say_hello = KotlinFunctionSpec::builder("sayHello")
        .add_statement("println(greeting)")
        .build()
        .unwrap();
    KotlinFile::builder("com.example", "Greeting")
        .add_property(greeting)
        .add_function(say_hello)
        .add_type(KotlinTypeSpec::class_builder("Greeter").build().unwrap())
        .build()
        .unwrap()
}

#[test]
fn test_greeting_file() {
    let file = greeting_file();
    assert_eq!(
        file.render().unwrap(),
        "package com.example\n\
         \n\
         val greeting: String = \"Hello, World!\"\n\
         \n\
         fun sayHello() {\n    println(greeting)\n}\n\
         \n\
         class Greeter {\n}\n"
    );
    assert_eq!(file.relative_path().to_str(), Some("com/example/Greeting.kt"));
}

#[test]
fn test_data_class_with_primary_constructor() {
    let instant = ClassName::new("java.time", "Instant");
    let created_at = KotlinValueParameterSpec::builder("createdAt", instant.clone())
        .property(Mutability::Val)
        .default_value_format("%V.now()", [CodePart::type_name(instant)])
        .unwrap()
        .build()
        .unwrap();
    let name = KotlinValueParameterSpec::builder("name", TypeRef::from(STRING.clone()).nullable())
        .property(Mutability::Var)
        .build()
        .unwrap();
    let display_name = KotlinFunctionSpec::builder("displayName")
        .returns(STRING.clone())
        .add_statement_format("return name ?: %V", [CodePart::string("anonymous")])
        .unwrap()
        .build()
        .unwrap();
    let user = KotlinTypeSpec::class_builder("User")
        .add_modifier(Data)
        .primary_constructor(
            KotlinConstructorSpec::builder()
                .add_parameters([val("id", LONG.clone()), name, created_at])
                .build()
                .unwrap(),
        )
        .add_function(display_name)
        .build()
        .unwrap();
    let file = KotlinFile::builder("com.example.model", "User")
        .add_type(user)
        .build()
        .unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r#"
    package com.example.model

    import java.time.Instant

    data class User(val id: Long, var name: String?, val createdAt: Instant = Instant.now()) {
        fun displayName(): String = name ?: "anonymous"
    }
    "#);
}

#[test]
fn test_interface_members_are_abstract() {
    let shape = KotlinTypeSpec::interface_builder("Shape")
        .add_property(KotlinPropertySpec::builder("name", STRING.clone()).build().unwrap())
        .add_function(
            KotlinFunctionSpec::builder("area")
                .returns(PrimitiveTypeName::Double)
                .build()
                .unwrap(),
        )
        .add_function(
            KotlinFunctionSpec::builder("describe")
                .returns(STRING.clone())
                .add_statement_format("return %V", [CodePart::string("shape")])
                .unwrap()
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let file = KotlinFile::builder("com.example", "Shape")
        .add_type(shape)
        .build()
        .unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r#"
    package com.example

    interface Shape {
        val name: String

        fun area(): Double

        fun describe(): String = "shape"
    }
    "#);
}

#[test]
fn test_enum_constants_with_arguments_and_body() {
    let green = KotlinTypeSpec::enum_constant_builder()
        .add_superclass_argument("0x00FF00")
        .add_function(
            KotlinFunctionSpec::builder("toString")
                .add_modifier(Override)
                .returns(STRING.clone())
                .add_statement_format("return %V", [CodePart::string("green")])
                .unwrap()
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let red = KotlinTypeSpec::enum_constant_builder()
        .add_superclass_argument("0xFF0000")
        .build()
        .unwrap();
    let color = KotlinTypeSpec::enum_builder("Color")
        .primary_constructor(
            KotlinConstructorSpec::builder()
                .add_parameter(val("rgb", INT.clone()))
                .build()
                .unwrap(),
        )
        .add_enum_constant_spec("RED", red)
        .add_enum_constant_spec("GREEN", green)
        .add_function(
            KotlinFunctionSpec::builder("hex")
                .returns(STRING.clone())
                .add_statement("return rgb.toString(16)")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let file = KotlinFile::builder("com.example", "Color")
        .add_type(color)
        .build()
        .unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r#"
    package com.example

    enum class Color(val rgb: Int) {
        RED(0xFF0000),
        GREEN(0x00FF00) {
            override fun toString(): String = "green"
        };

        fun hex(): String = rgb.toString(16)
    }
    "#);
}

#[test]
fn test_plain_enum_has_no_semicolon() {
    let level = KotlinTypeSpec::enum_builder("Level")
        .add_enum_constant("LOW")
        .add_enum_constant("HIGH")
        .build()
        .unwrap();
    let file = KotlinFile::builder("com.example", "Level")
        .add_type(level)
        .build()
        .unwrap();
    assert_eq!(
        file.render().unwrap(),
        "package com.example\n\nenum class Level {\n    LOW,\n    HIGH\n}\n"
    );
}

#[test]
fn test_secondary_constructor_init_block_and_getter() {
    let temperature = KotlinTypeSpec::class_builder("Temperature")
        .primary_constructor(
            KotlinConstructorSpec::builder()
                .add_parameter(val("celsius", DOUBLE.clone()))
                .build()
                .unwrap(),
        )
        .add_property(
            KotlinPropertySpec::builder("fahrenheit", DOUBLE.clone())
                .getter(
                    CodeValue::builder()
                        .add_statement("return celsius * 9 / 5 + 32")
                        .build(),
                )
                .build()
                .unwrap(),
        )
        .add_init_block(
            CodeValue::builder()
                .add_statement("require(celsius >= -273.15)")
                .build(),
        )
        .add_constructor(
            KotlinConstructorSpec::builder()
                .add_parameter(KotlinValueParameterSpec::of("kelvin", INT.clone()).unwrap())
                .delegate_this([CodeValue::of("kelvin - 273.15")])
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let file = KotlinFile::builder("com.example", "Temperature")
        .add_type(temperature)
        .build()
        .unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r"
    package com.example

    class Temperature(val celsius: Double) {
        val fahrenheit: Double
            get() = celsius * 9 / 5 + 32

        init {
            require(celsius >= -273.15)
        }

        constructor(kelvin: Int) : this(kelvin - 273.15)
    }
    ");
}

#[test]
fn test_companion_resolves_enclosing_type() {
    let registry = ClassName::new("com.example", "Registry");
    let companion = KotlinTypeSpec::companion_builder()
        .add_property(
            KotlinPropertySpec::builder("VERSION", INT.clone())
                .add_modifier(Const)
                .initializer("1")
                .build()
                .unwrap(),
        )
        .add_function(
            KotlinFunctionSpec::builder("create")
                .returns(registry.clone())
                .add_statement_format("return %V()", [CodePart::type_name(registry)])
                .unwrap()
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let spec = KotlinTypeSpec::class_builder("Registry")
        .primary_constructor(
            KotlinConstructorSpec::builder()
                .add_modifier(Private)
                .build()
                .unwrap(),
        )
        .add_subtype(companion)
        .build()
        .unwrap();
    let file = KotlinFile::builder("com.example", "Registry")
        .add_type(spec)
        .build()
        .unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r"
    package com.example

    class Registry private constructor() {
        companion object {
            const val VERSION: Int = 1

            fun create(): Registry = Registry()
        }
    }
    ");
}

#[test]
fn test_extension_and_context_functions() {
    let t = TypeVariableName::with_bounds("T", [comparable(TypeVariableName::new("T"))]).unwrap();
    let list_of_t = ParameterizedTypeName::new(LIST.clone(), [TypeVariableName::new("T")]).unwrap();
    let largest = KotlinFunctionSpec::builder("largest")
        .add_type_variable(t)
        .receiver(list_of_t)
        .returns(TypeRef::from(TypeVariableName::new("T")).nullable())
        .add_statement("if (isEmpty()) return null")
        .add_statement("return maxOf { it }")
        .build()
        .unwrap();
    let logger = ClassName::new("org.slf4j", "Logger");
    let audit = KotlinFunctionSpec::builder("audit")
        .add_context_parameter(ContextParameter::named("logger", logger).unwrap())
        .add_parameter(KotlinValueParameterSpec::of("message", STRING.clone()).unwrap())
        .add_statement("logger.info(message)")
        .build()
        .unwrap();
    let file = KotlinFile::builder("com.example.util", "Extensions")
        .add_function(largest)
        .add_function(audit)
        .build()
        .unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r"
    package com.example.util

    import org.slf4j.Logger

    fun <T : Comparable<T>> List<T>.largest(): T? {
        if (isEmpty()) return null
        return maxOf { it }
    }

    context(logger: Logger)
    fun audit(message: String) {
        logger.info(message)
    }
    ");
}

#[test]
fn test_where_clause_for_multiple_bounds() {
    let t = TypeVariableName::with_bounds(
        "T",
        [
            TypeRef::from(ClassName::new("kotlin", "CharSequence")),
            TypeRef::from(comparable(TypeVariableName::new("T"))),
        ],
    )
    .unwrap();
    let copy = KotlinFunctionSpec::builder("copy")
        .add_type_variable(t)
        .add_parameter(KotlinValueParameterSpec::of("source", TypeVariableName::new("T")).unwrap())
        .returns(TypeVariableName::new("T"))
        .add_statement("return source")
        .build()
        .unwrap();
    assert_eq!(
        copy.to_kotlin_string().unwrap(),
        "fun <T> copy(source: T): T where T : CharSequence, T : Comparable<T> = source\n"
    );
}

#[test]
fn test_object_expression_in_initializer() {
    let runnable = ClassName::new("java.lang", "Runnable");
    let task = KotlinTypeSpec::anonymous_object_builder()
        .add_superinterface(runnable.clone())
        .add_function(
            KotlinFunctionSpec::builder("run")
                .add_modifier(Override)
                .add_statement_format("println(%V)", [CodePart::string("run")])
                .unwrap()
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let property = KotlinPropertySpec::builder("task", runnable)
        .initializer_format("%V", [CodePart::embedded(task)])
        .unwrap()
        .build()
        .unwrap();
    let file = KotlinFile::builder("com.example", "Tasks")
        .add_property(property)
        .build()
        .unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r#"
    package com.example

    import java.lang.Runnable

    val task: Runnable = object : Runnable {
        override fun run() {
            println("run")
        }
    }
    "#);
}

#[test]
fn test_member_import_shortens_call() {
    let collections = ClassName::new("java.util", "Collections");
    let names = KotlinPropertySpec::builder(
        "names",
        ParameterizedTypeName::new(MUTABLE_LIST.clone(), [STRING.clone()]).unwrap(),
    )
    .initializer_format("%V.emptyList()", [CodePart::type_name(collections)])
    .unwrap()
    .build()
    .unwrap();
    let file = KotlinFile::builder("com.example", "Names")
        .add_property(names)
        .add_member_import("java.util.Collections.emptyList")
        .build()
        .unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r"
    package com.example

    import java.util.Collections.emptyList

    val names: MutableList<String> = emptyList()
    ");
}

#[test]
fn test_value_class_imports_annotation() {
    let email = KotlinTypeSpec::value_builder("Email")
        .add_annotation(AnnotationRef::new(JVM_INLINE.clone()))
        .primary_constructor(
            KotlinConstructorSpec::builder()
                .add_parameter(val("value", STRING.clone()))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let file = KotlinFile::builder("com.example", "Email")
        .add_type(email)
        .build()
        .unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r"
    package com.example

    import kotlin.jvm.JvmInline

    @JvmInline
    value class Email(val value: String) {
    }
    ");
}

#[test]
fn test_default_imports_can_be_written_explicitly() {
    let file = KotlinFile::builder("com.example", "Greeting")
        .add_property(
            KotlinPropertySpec::builder("greeting", STRING.clone())
                .initializer_format("%V", [CodePart::string("Hi")])
                .unwrap()
                .build()
                .unwrap(),
        )
        .skip_kotlin_imports(false)
        .build()
        .unwrap();
    assert_eq!(
        file.render().unwrap(),
        "package com.example\n\nimport kotlin.String\n\nval greeting: String = \"Hi\"\n"
    );
}

#[test]
fn test_keyword_class_name_is_rejected() {
    let property = KotlinPropertySpec::builder("value", ClassName::new("com.example", "in"))
        .build()
        .unwrap();
    let file = KotlinFile::builder("com.example", "Values")
        .add_property(property)
        .build()
        .unwrap();
    let err = file.render().unwrap_err();
    assert!(matches!(*err, Error::RejectedName { .. }));
}

#[test]
fn test_display_is_permissive() {
    let property = KotlinPropertySpec::builder("value", ClassName::new("com.example", "in"))
        .build()
        .unwrap();
    let file = KotlinFile::builder("com.example", "Values")
        .add_property(property)
        .build()
        .unwrap();
    assert_eq!(file.to_string(), "package com.example\n\nval value: in\n");
}

#[test]
fn test_same_package_name_disables_default_import_shortcut() {
    let local = ClassName::new("com.example", "String");
    let a = KotlinPropertySpec::builder("a", STRING.clone())
        .initializer_format("%V", [CodePart::string("")])
        .unwrap()
        .build()
        .unwrap();
    let b = KotlinPropertySpec::builder("b", local.clone())
        .initializer_format("%V()", [CodePart::type_name(local)])
        .unwrap()
        .build()
        .unwrap();
    let file = KotlinFile::builder("com.example", "Holder")
        .add_property(a)
        .add_property(b)
        .build()
        .unwrap();

    let rendered = file.render().unwrap();
    assert!(rendered.contains("val a: kotlin.String = \"\""), "{rendered}");
    assert!(rendered.contains("val b: String = String()"), "{rendered}");
    assert!(!rendered.contains("import"), "{rendered}");
}

//! End-to-end rendering of Java files.

use codegentle_common::{
    AnnotationRef, ArrayTypeName, ClassName, CodePart, CodeValue, Error, PackageName,
    ParameterizedTypeName, PrimitiveTypeName, TypeVariableName,
};
use codegentle_java::{
    JavaFieldSpec, JavaFile, JavaMethodSpec, JavaModifier, JavaParameterSpec, JavaTypeSpec,
    ToJavaString,
    naming::{BOXED_INT, OVERRIDE, RUNNABLE, STRING, SYSTEM},
};

use codegentle_java::JavaModifier::{Abstract, Final, Private, Public, Static};

fn hello_world() -> JavaTypeSpec {
    let forte = ClassName::new("love.forte", "Forte");
    let field = JavaFieldSpec::builder("forte", forte.clone())
        .add_modifier(Private)
        .initializer_format("%V.getInstance()", [CodePart::type_name(forte)])
        .unwrap()
        .build()
        .unwrap();
    let main = JavaMethodSpec::builder("main")
        .add_modifiers([Public, Static])
        .add_parameter(
            JavaParameterSpec::of("args", ArrayTypeName::of(STRING.clone()).unwrap()).unwrap(),
        )
        .add_statement_format(
            "%V.out.println(%V)",
            [
                CodePart::type_name(SYSTEM.clone()),
                CodePart::string("Hello, World!"),
            ],
        )
        .unwrap()
        .build()
        .unwrap();
    JavaTypeSpec::class_builder("HelloWorld")
        .add_modifiers([Public, Final])
        .add_field(field)
        .add_method(main)
        .build()
        .unwrap()
}

#[test]
fn test_hello_world() {
    let file = JavaFile::builder("com.example.helloworld", hello_world())
        .build()
        .unwrap();
    assert_eq!(
        file.render().unwrap(),
        "package com.example.helloworld;\n\
         \n\
         import love.forte.Forte;\n\
         \n\
         public final class HelloWorld {\n    \
             private Forte forte = Forte.getInstance();\n\
         \n    \
             public static void main(String[] args) {\n        \
                 System.out.println(\"Hello, World!\");\n    \
             }\n\
         }\n"
    );
}

#[test]
fn test_render_is_deterministic() {
    let file = JavaFile::builder("com.example.helloworld", hello_world())
        .build()
        .unwrap();
    assert_eq!(file.render().unwrap(), file.render().unwrap());
    assert_eq!(
        file.relative_path(),
        std::path::PathBuf::from("com/example/helloworld/HelloWorld.java")
    );
}

#[test]
fn test_write_to_sink() {
    let file = JavaFile::builder("com.example.helloworld", hello_world())
        .build()
        .unwrap();
    let mut sink = String::from("// header\n");
    file.write_to(&mut sink, &codegentle_java::JavaWriteStrategy::default())
        .unwrap();
    assert_eq!(sink, format!("// header\n{}", file.render().unwrap()));
}

#[test]
fn test_members_in_insertion_order() {
    let int_field = |name: &str, value: &str, visibility| {
        JavaFieldSpec::builder(name, PrimitiveTypeName::Int)
            .add_modifiers([visibility, Static, Final])
            .initializer(value)
            .build()
            .unwrap()
    };
    let spec = JavaTypeSpec::class_builder("MyClass")
        .add_modifier(Public)
        .add_method(
            JavaMethodSpec::builder("methodPub")
                .add_modifier(Public)
                .build()
                .unwrap(),
        )
        .add_field(int_field("valuePub", "1", Public))
        .add_field(int_field("valuePri", "2", Private))
        .build()
        .unwrap();
    let file = JavaFile::builder(PackageName::EMPTY, spec).build().unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r"
    public class MyClass {
        public static final int valuePub = 1;

        private static final int valuePri = 2;

        public void methodPub() {
        }
    }
    ");
}

#[test]
fn test_type_variable_masks_import() {
    let spec = JavaTypeSpec::class_builder("Box")
        .add_modifier(Public)
        .add_type_variable(TypeVariableName::new("Item"))
        .add_field(
            JavaFieldSpec::builder("value", TypeVariableName::new("Item"))
                .add_modifier(Private)
                .build()
                .unwrap(),
        )
        .add_field(
            JavaFieldSpec::builder("other", ClassName::new("com.other", "Item"))
                .add_modifier(Private)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let file = JavaFile::builder("com.example", spec).build().unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r"
    package com.example;

    public class Box<Item> {
        private Item value;

        private com.other.Item other;
    }
    ");
}

#[test]
fn test_simple_name_collision_qualifies_second() {
    let util_list =
        ParameterizedTypeName::new(ClassName::new("java.util", "List"), [STRING.clone()]).unwrap();
    let entry = ParameterizedTypeName::new(
        ClassName::nested("java.util", "Map", &["Entry"]),
        [STRING.clone(), BOXED_INT.clone()],
    )
    .unwrap();
    let spec = JavaTypeSpec::class_builder("Lists")
        .add_field(JavaFieldSpec::builder("a", util_list).build().unwrap())
        .add_field(
            JavaFieldSpec::builder("b", ClassName::new("com.other", "List"))
                .build()
                .unwrap(),
        )
        .add_field(JavaFieldSpec::builder("entry", entry).build().unwrap())
        .build()
        .unwrap();
    let file = JavaFile::builder("com.example", spec).build().unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r"
    package com.example;

    import java.util.List;
    import java.util.Map;

    class Lists {
        List<String> a;

        com.other.List b;

        Map.Entry<String, Integer> entry;
    }
    ");
}

#[test]
fn test_enum_with_constant_bodies() {
    let to_string = JavaMethodSpec::builder("toString")
        .add_annotation(AnnotationRef::new(OVERRIDE.clone()))
        .add_modifier(Public)
        .returns(STRING.clone())
        .add_statement("return \"blue\"")
        .build()
        .unwrap();
    let spec = JavaTypeSpec::enum_builder("Color")
        .add_modifier(Public)
        .add_enum_constant("RED")
        .add_enum_constant_spec(
            "GREEN",
            JavaTypeSpec::anonymous_class_builder(
                CodeValue::format("%V", [CodePart::string("g")]).unwrap(),
            )
            .build()
            .unwrap(),
        )
        .add_enum_constant_spec(
            "BLUE",
            JavaTypeSpec::anonymous_class_builder(CodeValue::empty())
                .add_method(to_string)
                .build()
                .unwrap(),
        )
        .add_method(
            JavaMethodSpec::builder("label")
                .add_modifier(Public)
                .returns(STRING.clone())
                .add_statement("return name().toLowerCase()")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let file = JavaFile::builder("com.example", spec).build().unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r#"
    package com.example;

    public enum Color {
        RED,
        GREEN("g"),
        BLUE {
            @Override
            public String toString() {
                return "blue";
            }
        };

        public String label() {
            return name().toLowerCase();
        }
    }
    "#);
}

#[test]
fn test_interface_implicit_modifiers() {
    let list_of_strings =
        ParameterizedTypeName::new(ClassName::new("java.util", "List"), [STRING.clone()]).unwrap();
    let greeter = ClassName::new("com.example", "Greeter");
    let spec = JavaTypeSpec::interface_builder("Greeter")
        .add_modifier(Public)
        .add_field(
            JavaFieldSpec::builder("PREFIX", STRING.clone())
                .add_modifiers([Public, Static, Final])
                .initializer(CodeValue::format("%V", [CodePart::string("Hello")]).unwrap())
                .build()
                .unwrap(),
        )
        .add_method(
            JavaMethodSpec::builder("greet")
                .add_modifiers([Public, Abstract])
                .returns(STRING.clone())
                .add_parameter(JavaParameterSpec::of("name", STRING.clone()).unwrap())
                .build()
                .unwrap(),
        )
        .add_method(
            JavaMethodSpec::builder("greetAll")
                .add_modifier(JavaModifier::Default)
                .returns(list_of_strings.clone())
                .add_parameter(JavaParameterSpec::of("names", list_of_strings).unwrap())
                .add_statement("return names.stream().map(this::greet).toList()")
                .build()
                .unwrap(),
        )
        .add_method(
            JavaMethodSpec::builder("polite")
                .add_modifier(Static)
                .returns(greeter)
                .add_statement("return name -> PREFIX + name")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let file = JavaFile::builder("com.example", spec).build().unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r#"
    package com.example;

    import java.util.List;

    public interface Greeter {
        String PREFIX = "Hello";

        String greet(String name);

        default List<String> greetAll(List<String> names) {
            return names.stream().map(this::greet).toList();
        }

        static Greeter polite() {
            return name -> PREFIX + name;
        }
    }
    "#);
}

#[test]
fn test_record() {
    let spec = JavaTypeSpec::record_builder("Point")
        .add_modifier(Public)
        .add_record_component(JavaParameterSpec::of("x", PrimitiveTypeName::Int).unwrap())
        .add_record_component(JavaParameterSpec::of("y", PrimitiveTypeName::Int).unwrap())
        .add_superinterface(ClassName::new("java.io", "Serializable"))
        .build()
        .unwrap();
    let file = JavaFile::builder("com.example", spec).build().unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r"
    package com.example;

    import java.io.Serializable;

    public record Point(int x, int y) implements Serializable {
    }
    ");
}

#[test]
fn test_anonymous_class_in_statement() {
    let run = JavaMethodSpec::builder("run")
        .add_annotation(AnnotationRef::new(OVERRIDE.clone()))
        .add_modifier(Public)
        .add_statement_format(
            "%V.out.println(%V)",
            [CodePart::type_name(SYSTEM.clone()), CodePart::string("run")],
        )
        .unwrap()
        .build()
        .unwrap();
    let task = JavaTypeSpec::anonymous_class_builder(CodeValue::empty())
        .add_superinterface(RUNNABLE.clone())
        .add_method(run)
        .build()
        .unwrap();
    let create = JavaMethodSpec::builder("create")
        .add_modifier(Public)
        .add_statement_format(
            "%V task = %V",
            [CodePart::type_name(RUNNABLE.clone()), CodePart::from(task)],
        )
        .unwrap()
        .add_statement("task.run()")
        .build()
        .unwrap();
    let spec = JavaTypeSpec::class_builder("Tasks")
        .add_modifier(Public)
        .add_method(create)
        .build()
        .unwrap();
    let file = JavaFile::builder("com.example", spec).build().unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r#"
    package com.example;

    public class Tasks {
        public void create() {
            Runnable task = new Runnable() {
                @Override
                public void run() {
                    System.out.println("run");
                }
            };
            task.run();
        }
    }
    "#);
}

#[test]
fn test_static_import_shortens_member() {
    let objects = ClassName::new("java.util", "Objects");
    let check = JavaMethodSpec::builder("check")
        .add_modifier(Public)
        .add_parameter(JavaParameterSpec::of("value", ClassName::new("java.lang", "Object")).unwrap())
        .add_statement_format("%V.requireNonNull(value)", [CodePart::type_name(objects)])
        .unwrap()
        .build()
        .unwrap();
    let spec = JavaTypeSpec::class_builder("Checks")
        .add_modifier(Public)
        .add_method(check)
        .build()
        .unwrap();
    let file = JavaFile::builder("com.example", spec)
        .add_static_import("java.util.Objects.requireNonNull")
        .build()
        .unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r"
    package com.example;

    import static java.util.Objects.requireNonNull;

    public class Checks {
        public void check(Object value) {
            requireNonNull(value);
        }
    }
    ");
}

#[test]
fn test_java_lang_imports_when_not_skipped() {
    let spec = JavaTypeSpec::class_builder("Named")
        .add_field(
            JavaFieldSpec::builder("name", STRING.clone())
                .add_modifier(Private)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let file = JavaFile::builder("com.example", spec)
        .skip_java_lang_imports(false)
        .file_comment("Generated, do not edit.")
        .build()
        .unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r"
    // Generated, do not edit.
    package com.example;

    import java.lang.String;

    class Named {
        private String name;
    }
    ");
}

#[test]
fn test_keyword_class_name_is_rejected() {
    let spec = JavaTypeSpec::class_builder("Broken")
        .add_field(
            JavaFieldSpec::builder("value", ClassName::new("com.other", "enum"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let file = JavaFile::builder("com.example", spec).build().unwrap();
    let err = file.render().unwrap_err();
    assert!(matches!(*err, Error::RejectedName { .. }));
}

#[test]
fn test_annotation_to_string() {
    let anno = ClassName::new("com.example.anno", "Anno");
    let marker = AnnotationRef::new(anno.clone());
    assert_eq!(marker.to_java_string().unwrap(), "@com.example.anno.Anno");

    let single = AnnotationRef::builder(anno.clone())
        .add_member("value", CodeValue::of("42"))
        .build()
        .unwrap();
    assert_eq!(single.to_java_string().unwrap(), "@com.example.anno.Anno(42)");

    let named = AnnotationRef::builder(anno.clone())
        .add_member("name", CodeValue::format("%V", [CodePart::string("test")]).unwrap())
        .add_member("value", CodeValue::of("42"))
        .build()
        .unwrap();
    assert_eq!(
        named.to_java_string().unwrap(),
        "@com.example.anno.Anno(name = \"test\", value = 42)"
    );

    let array = AnnotationRef::builder(anno.clone())
        .add_members("value", ["1", "2", "3"].map(CodeValue::of))
        .build()
        .unwrap();
    assert_eq!(
        array.to_java_string().unwrap(),
        "@com.example.anno.Anno({1, 2, 3})"
    );

    let mixed = AnnotationRef::builder(anno)
        .add_member("values", CodeValue::of("1"))
        .add_member("values", CodeValue::of("2"))
        .add_member("values", CodeValue::of("3"))
        .add_member("name", CodeValue::format("%V", [CodePart::string("test")]).unwrap())
        .build()
        .unwrap();
    assert_eq!(
        mixed.to_java_string().unwrap(),
        "@com.example.anno.Anno(values = {1, 2, 3}, name = \"test\")"
    );
}

#[test]
fn test_method_display() {
    let method = JavaMethodSpec::builder("sum")
        .add_modifiers([Public, Static])
        .add_type_variable(
            TypeVariableName::with_bounds("T", [ClassName::new("java.lang", "Number")]).unwrap(),
        )
        .returns(PrimitiveTypeName::Double)
        .add_parameter(
            JavaParameterSpec::of(
                "values",
                ArrayTypeName::of(TypeVariableName::new("T")).unwrap(),
            )
            .unwrap(),
        )
        .varargs(true)
        .add_exception(ClassName::new("java.io", "IOException"))
        .add_statement("return 0")
        .build()
        .unwrap();
    assert_eq!(
        method.to_string(),
        "public static <T extends java.lang.Number> double sum(T... values) throws java.io.IOException {\n    return 0;\n}\n"
    );
}

fn holder(first: ClassName, second: ClassName) -> JavaFile {
    let spec = JavaTypeSpec::class_builder("Holder")
        .add_field(JavaFieldSpec::builder("a", first).add_modifier(Private).build().unwrap())
        .add_field(JavaFieldSpec::builder("b", second).add_modifier(Private).build().unwrap())
        .build()
        .unwrap();
    JavaFile::builder("com.example", spec).build().unwrap()
}

#[test]
fn test_same_package_name_disables_java_lang_shortcut() {
    let local = ClassName::new("com.example", "String");

    let rendered = holder(STRING.clone(), local.clone()).render().unwrap();
    assert!(rendered.contains("private java.lang.String a;"), "{rendered}");
    assert!(rendered.contains("private String b;"), "{rendered}");
    assert!(!rendered.contains("import"), "{rendered}");

    let rendered = holder(local, STRING.clone()).render().unwrap();
    assert!(rendered.contains("private String a;"), "{rendered}");
    assert!(rendered.contains("private java.lang.String b;"), "{rendered}");
}

fn create_task(message: &str) -> JavaMethodSpec {
    let run = JavaMethodSpec::builder("run")
        .add_modifier(Public)
        .add_statement_format("log(%V)", [CodePart::string(message)])
        .unwrap()
        .build()
        .unwrap();
    let task = JavaTypeSpec::anonymous_class_builder(CodeValue::empty())
        .add_superinterface(RUNNABLE.clone())
        .add_method(run)
        .build()
        .unwrap();
    JavaMethodSpec::builder("create")
        .returns(RUNNABLE.clone())
        .add_statement_format("return %V", [CodePart::from(task)])
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn test_specs_with_anonymous_classes_compare_by_value() {
    assert_eq!(create_task("run"), create_task("run"));
    assert_ne!(create_task("run"), create_task("stop"));

    let tasks = |message| {
        JavaTypeSpec::class_builder("Tasks")
            .add_method(create_task(message))
            .build()
            .unwrap()
    };
    assert_eq!(tasks("run"), tasks("run"));
    assert_ne!(tasks("run"), tasks("stop"));
}

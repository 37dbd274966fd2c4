//! Writer behaviour exercised through a minimal dialect: name lookup,
//! import bookkeeping, statements, comments and annotations.

use codegentle_common::{
    AnnotationRef, ClassName, CodePart, CodeValue, Error, PackageName, Result, TypeName, TypeRef,
    WriteStrategy,
    code::EmbeddedSpec,
    writer::{CodeWriter, Dialect, TypeScope, emit_with_late_imports},
};
use indexmap::IndexMap;

struct Plain;

impl Dialect for Plain {
    const NAME: &'static str = "plain";
    const STATEMENT_TERMINATOR: &'static str = ";";
    const ANNOTATION_ARRAY: (&'static str, &'static str) = ("{", "}");

    fn implicit_packages() -> &'static [&'static str] {
        &["java.lang"]
    }

    fn string_literal(value: &str, _indent: &str) -> String {
        format!("\"{value}\"")
    }

    fn emit_type_ref(writer: &mut CodeWriter<'_, Self>, type_ref: &TypeRef) -> Result<()> {
        match type_ref.type_name() {
            TypeName::Class(class_name) => writer.emit_class_name(class_name),
            other => {
                writer.emit(&other.to_string());
                Ok(())
            }
        }
    }

    fn emit_embedded(writer: &mut CodeWriter<'_, Self>, spec: &EmbeddedSpec) -> Result<()> {
        if let Some(text) = spec.downcast_ref::<&'static str>() {
            writer.emit(text);
        }
        Ok(())
    }
}

struct Permissive {
    omit: bool,
}

impl WriteStrategy for Permissive {
    fn dialect(&self) -> &str {
        "plain"
    }

    fn is_valid_source_name(&self, name: &str) -> bool {
        name != "class"
    }

    fn omit_implicit_package(&self) -> bool {
        self.omit
    }
}

const OMIT: Permissive = Permissive { omit: true };

fn render(writer: CodeWriter<'_, Plain>) -> String {
    writer.finish().code
}

fn list() -> ClassName {
    ClassName::new("java.util", "List")
}

fn imports(classes: &[ClassName]) -> IndexMap<String, ClassName> {
    classes
        .iter()
        .map(|c| (c.simple_name().to_string(), c.clone()))
        .collect()
}

#[test]
fn test_unimported_class_is_qualified() {
    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.emit_class_name(&list()).unwrap();
    let output = writer.finish();
    assert_eq!(output.code, "java.util.List");
    assert_eq!(output.late_imports.get("List"), Some(&list()));
}

#[test]
fn test_late_imports_trigger_one_more_emission() {
    let mut passes = Vec::new();
    let output = emit_with_late_imports(IndexMap::new(), |imports| {
        passes.push(imports.keys().cloned().collect::<Vec<_>>());
        let mut writer = CodeWriter::<Plain>::new(&OMIT).imported_types(imports);
        writer.emit_class_name(&list())?;
        Ok(writer.finish())
    })
    .unwrap();
    assert_eq!(passes, vec![vec![], vec!["List".to_string()]]);
    assert_eq!(output.code, "List");
    assert_eq!(output.used_imports, vec![list()]);
    assert!(output.late_imports.is_empty());
}

#[test]
fn test_complete_import_table_emits_once() {
    let mut passes = 0;
    let output = emit_with_late_imports(imports(&[list()]), |imports| {
        passes += 1;
        let mut writer = CodeWriter::<Plain>::new(&OMIT).imported_types(imports);
        writer.emit_class_name(&list())?;
        Ok(writer.finish())
    })
    .unwrap();
    assert_eq!(passes, 1);
    assert_eq!(output.code, "List");
}

#[test]
fn test_referenced_name_disables_implicit_package() {
    let mut writer = CodeWriter::<Plain>::new(&OMIT).referenced_names(["String"]);
    writer.emit_class_name(&ClassName::new("java.lang", "String")).unwrap();
    let output = writer.finish();
    assert_eq!(output.code, "java.lang.String");
    assert!(output.late_imports.is_empty());
}

#[test]
fn test_implicit_package() {
    let string = ClassName::new("java.lang", "String");

    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.emit_class_name(&string).unwrap();
    assert_eq!(render(writer), "String");

    let keep = Permissive { omit: false };
    let mut writer = CodeWriter::<Plain>::new(&keep);
    writer.emit_class_name(&string).unwrap();
    assert_eq!(render(writer), "java.lang.String");

    let mut writer = CodeWriter::<Plain>::new(&OMIT).always_qualify(["String"]);
    writer.emit_class_name(&string).unwrap();
    assert_eq!(render(writer), "java.lang.String");
}

#[test]
fn test_same_package_is_short() {
    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.push_package(PackageName::parse("com.example")).unwrap();
    writer
        .emit_class_name(&ClassName::new("com.example", "Sibling"))
        .unwrap();
    let output = writer.finish();
    assert_eq!(output.code, "Sibling");
    assert!(output.late_imports.is_empty());
}

#[test]
fn test_package_can_only_be_set_once() {
    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.push_package(PackageName::parse("a")).unwrap();
    let err = writer.push_package(PackageName::parse("b")).unwrap_err();
    assert!(matches!(*err, Error::IllegalState { .. }));
    writer.pop_package().unwrap();
    assert!(writer.pop_package().is_err());
}

#[test]
fn test_imported_class_is_short_and_used() {
    let mut writer = CodeWriter::<Plain>::new(&OMIT).imported_types(imports(&[
        list(),
        ClassName::new("java.util", "Set"),
    ]));
    writer.emit_class_name(&list()).unwrap();
    let output = writer.finish();
    assert_eq!(output.code, "List");
    assert_eq!(output.used_imports, vec![list()]);
}

#[test]
fn test_type_variable_masks_import() {
    let mut writer = CodeWriter::<Plain>::new(&OMIT).imported_types(imports(&[list()]));
    writer.push_type_variables(["List"]);
    writer.emit_class_name(&list()).unwrap();
    writer.pop_type_variables(["List"]);
    writer.emit(" ");
    writer.emit_class_name(&list()).unwrap();
    assert_eq!(render(writer), "java.util.List List");
}

#[test]
fn test_nested_type_masks_import() {
    let mut writer = CodeWriter::<Plain>::new(&OMIT).imported_types(imports(&[list()]));
    writer.push_package(PackageName::parse("com.example")).unwrap();
    writer.push_type(TypeScope::named("Outer", ["List"]));
    writer.emit_class_name(&list()).unwrap();
    writer.emit(" ");
    writer
        .emit_class_name(&ClassName::nested("com.example", "Outer", &["List"]))
        .unwrap();
    writer.pop_type();
    assert_eq!(render(writer), "java.util.List List");
}

#[test]
fn test_shortest_resolving_suffix() {
    let entry = ClassName::nested("java.util", "Map", &["Entry"]);
    let mut writer = CodeWriter::<Plain>::new(&OMIT)
        .imported_types(imports(&[ClassName::new("java.util", "Map")]));
    writer.emit_class_name(&entry).unwrap();
    assert_eq!(render(writer), "Map.Entry");

    let inner = ClassName::nested("com.example", "Outer", &["Middle", "Inner"]);
    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.push_package(PackageName::parse("com.example")).unwrap();
    writer.push_type(TypeScope::named("Outer", ["Middle"]));
    writer.push_type(TypeScope::named("Middle", ["Inner"]));
    writer.emit_class_name(&inner).unwrap();
    assert_eq!(render(writer), "Inner");
}

#[test]
fn test_rejected_name() {
    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    let err = writer
        .emit_class_name(&ClassName::new("com.example", "class"))
        .unwrap_err();
    assert!(matches!(*err, Error::RejectedName { .. }));
}

#[test]
fn test_statement_and_control_flow() {
    let code = CodeValue::builder()
        .begin_control_flow("if (ready)")
        .add_statement("go()")
        .next_control_flow("else")
        .add_statement_format("wait(%V)", [CodePart::literal(10)])
        .unwrap()
        .end_control_flow()
        .build();

    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.emit_code(&code).unwrap();
    assert_eq!(
        render(writer),
        "if (ready) {\n    go();\n} else {\n    wait(10);\n}\n"
    );
}

#[test]
fn test_do_while_end() {
    let code = CodeValue::builder()
        .begin_control_flow("do")
        .add_statement("i++")
        .end_control_flow_format("while (i < %V)", [CodePart::literal(3)])
        .unwrap()
        .build();

    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.emit_code(&code).unwrap();
    assert_eq!(render(writer), "do {\n    i++;\n} while (i < 3);\n");
}

#[test]
fn test_multiline_statement_is_double_indented() {
    let code = CodeValue::builder()
        .add_statement("builder\n.name(\"x\")\n.build()")
        .build();
    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.emit_code(&code).unwrap();
    assert_eq!(
        render(writer),
        "builder\n        .name(\"x\")\n        .build();\n"
    );
}

#[test]
fn test_unbalanced_statement_markers() {
    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    let err = writer
        .emit_code(&CodeValue::from_parts(vec![CodePart::StatementEnd]))
        .unwrap_err();
    assert!(matches!(*err, Error::IllegalState { .. }));
}

#[test]
fn test_unindent_underflow() {
    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.indent(1);
    let err = writer.unindent(2).unwrap_err();
    assert!(matches!(
        *err,
        Error::UnindentUnderflow {
            levels: 2,
            current: 1
        }
    ));
}

#[test]
fn test_doc_and_comment() {
    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.emit_doc(&CodeValue::of("Hello\n\nWorld")).unwrap();
    writer.emit_comment(&CodeValue::of("one\ntwo")).unwrap();
    assert_eq!(
        render(writer),
        "/**\n * Hello\n *\n * World\n */\n// one\n// two\n"
    );
}

#[test]
fn test_doc_comment_does_not_register_imports() {
    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer
        .emit_doc(
            &CodeValue::format("See %V", [CodePart::type_name(list())]).unwrap(),
        )
        .unwrap();
    let output = writer.finish();
    assert!(output.code.contains(" * See java.util.List"));
    assert!(output.late_imports.is_empty());
}

#[test]
fn test_static_import_member() {
    let objects = ClassName::new("java.util", "Objects");
    let code = CodeValue::format(
        "%V.requireNonNull(x)",
        [CodePart::type_name(objects.clone())],
    )
    .unwrap();

    let mut writer = CodeWriter::<Plain>::new(&OMIT)
        .static_imports(["java.util.Objects.requireNonNull"]);
    writer.emit_code(&code).unwrap();
    assert_eq!(render(writer), "requireNonNull(x)");

    let mut writer = CodeWriter::<Plain>::new(&OMIT).static_imports(["java.util.Objects.*"]);
    writer.emit_code(&code).unwrap();
    assert_eq!(render(writer), "requireNonNull(x)");

    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.emit_code(&code).unwrap();
    assert_eq!(render(writer), "java.util.Objects.requireNonNull(x)");
}

#[test]
fn test_annotation_shapes() {
    let anno = ClassName::new("com.example.anno", "Anno");
    let cases = [
        (AnnotationRef::new(anno.clone()), "@com.example.anno.Anno"),
        (
            AnnotationRef::builder(anno.clone())
                .add_member("value", CodeValue::of("42"))
                .build()
                .unwrap(),
            "@com.example.anno.Anno(42)",
        ),
        (
            AnnotationRef::builder(anno.clone())
                .add_member("name", CodeValue::format("%V", [CodePart::string("test")]).unwrap())
                .add_member("value", CodeValue::of("42"))
                .build()
                .unwrap(),
            "@com.example.anno.Anno(name = \"test\", value = 42)",
        ),
        (
            AnnotationRef::builder(anno)
                .add_members("value", ["1", "2", "3"].map(CodeValue::of))
                .build()
                .unwrap(),
            "@com.example.anno.Anno({1, 2, 3})",
        ),
    ];

    for (annotation, expected) in cases {
        let mut writer = CodeWriter::<Plain>::new(&OMIT);
        writer.emit_annotation(&annotation).unwrap();
        assert_eq!(render(writer), expected);
    }
}

#[test]
fn test_embedded_spec_suspends_statement() {
    let code = CodeValue::builder()
        .add_statement_code(
            CodeValue::format("run(%V)", [CodePart::embedded("new Task() {\n}")]).unwrap(),
        )
        .build();
    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.emit_code(&code).unwrap();
    assert_eq!(render(writer), "run(new Task() {\n});\n");
}

#[test]
fn test_wrapping_space_respects_column_limit() {
    let code = CodeValue::from_parts(vec![
        CodePart::simple("call(aaaaaaaa,"),
        CodePart::WrappingSpace,
        CodePart::simple("bbbbbbbb)"),
    ]);
    let config = codegentle_common::WriterConfig::default().with_column_limit(20);
    let mut writer = CodeWriter::<Plain>::with_config(&OMIT, config);
    writer.emit_code(&code).unwrap();
    assert_eq!(render(writer), "call(aaaaaaaa,\n        bbbbbbbb)");

    let mut writer = CodeWriter::<Plain>::new(&OMIT);
    writer.emit_code(&code).unwrap();
    assert_eq!(render(writer), "call(aaaaaaaa, bbbbbbbb)");
}

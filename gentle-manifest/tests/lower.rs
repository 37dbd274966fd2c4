//! Loading gentle.toml files from disk and rendering the lowered files.

use std::path::PathBuf;

use codegentle_manifest::{Error, GeneratedFile, GentleToml, Language};
use tempfile::TempDir;

fn write_manifest(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gentle.toml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

fn render_single(content: &str) -> String {
    let (_dir, path) = write_manifest(content);
    let toml = GentleToml::open(&path).unwrap();
    let files = toml.lower(None).unwrap();
    assert_eq!(files.len(), 1);
    files[0].render().unwrap()
}

const GREETER: &str = r#"
[output]
language = "java"

[[file]]
package = "com.example"
comment = "Generated, do not edit."

[file.type]
name = "Greeter"
modifiers = ["public"]

[[file.type.methods]]
name = "greet"
modifiers = ["public"]
returns = "String"
body = [{ format = "return %V", args = [{ string = "Hello, World!" }] }]
"#;

#[test]
fn test_java_class() {
    insta::assert_snapshot!(render_single(GREETER), @r#"
    // Generated, do not edit.
    package com.example;

    public class Greeter {
        public String greet() {
            return "Hello, World!";
        }
    }
    "#);
}

#[test]
fn test_relative_output_dir() {
    let content = format!("{}\n", GREETER).replace(
        "language = \"java\"",
        "language = \"java\"\ndir = \"src/main/java\"",
    );
    let (dir, path) = write_manifest(&content);
    let toml = GentleToml::open(&path).unwrap();
    assert_eq!(toml.output_dir(), Some(dir.path().join("src/main/java")));

    let files = toml.lower(None).unwrap();
    assert_eq!(
        files[0].relative_path(),
        PathBuf::from("com/example/Greeter.java")
    );
    assert_eq!(files[0].language(), Language::Java);
    assert_eq!(files[0].name(), "Greeter");
}

#[test]
fn test_java_record_imports_resolved_types() {
    let rendered = render_single(
        r#"
[[file]]
package = "com.example.model"

[file.type]
kind = "record"
name = "User"
modifiers = ["public"]
interfaces = ["java.io.Serializable"]
parameters = [
    { name = "id", type = "long" },
    { name = "tags", type = "java.util.List<String>" },
]
"#,
    );
    insta::assert_snapshot!(rendered, @r"
    package com.example.model;

    import java.io.Serializable;
    import java.util.List;

    public record User(long id, List<String> tags) implements Serializable {
    }
    ");
}

#[test]
fn test_java_method_with_type_variable_and_throws() {
    let rendered = render_single(
        r#"
[[file]]
package = "com.example"

[file.type]
name = "Loader"
modifiers = ["public"]

[[file.type.methods]]
name = "load"
modifiers = ["public"]
type_params = ["T"]
params = [{ name = "path", type = "java.nio.file.Path" }]
returns = "T"
throws = ["java.io.IOException"]
body = ["return null"]
"#,
    );
    insta::assert_snapshot!(rendered, @r"
    package com.example;

    import java.io.IOException;
    import java.nio.file.Path;

    public class Loader {
        public <T> T load(Path path) throws IOException {
            return null;
        }
    }
    ");
}

#[test]
fn test_simple_names_resolve_to_file_package() {
    let rendered = render_single(
        r#"
[[file]]
package = "com.example"

[file.type]
name = "Repository"

[[file.type.fields]]
name = "users"
type = "java.util.Map<String, User>"
modifiers = ["private", "final"]
initializer = { format = "new %V<>()", args = [{ type = "java.util.HashMap" }] }
"#,
    );
    assert!(rendered.contains("import java.util.HashMap;\nimport java.util.Map;\n"));
    assert!(rendered.contains("private final Map<String, User> users = new HashMap<>();"));
    assert!(!rendered.contains("import com.example.User;"));
}

#[test]
fn test_kotlin_data_class() {
    let rendered = render_single(
        r#"
[output]
language = "kotlin"

[[file]]
package = "com.example.model"

[file.type]
name = "User"
modifiers = ["data"]
parameters = [
    { name = "id", type = "Long", property = "val" },
    { name = "name", type = "String?", property = "var" },
]

[[file.type.methods]]
name = "displayName"
returns = "String"
body = [{ format = "return name ?: %V", args = [{ string = "anonymous" }] }]
"#,
    );
    insta::assert_snapshot!(rendered, @r#"
    package com.example.model

    data class User(val id: Long, var name: String?) {
        fun displayName(): String = name ?: "anonymous"
    }
    "#);
}

#[test]
fn test_kotlin_enum_with_arguments() {
    let rendered = render_single(
        r#"
[output]
language = "kotlin"

[[file]]
package = "com.example"

[file.type]
kind = "enum"
name = "Planet"
parameters = [{ name = "mass", type = "Double", property = "val" }]
constants = [
    { name = "MERCURY", args = ["3.303e+23"] },
    { name = "VENUS", args = ["4.869e+24"] },
]
"#,
    );
    assert!(rendered.contains("enum class Planet(val mass: Double)"));
    assert!(rendered.contains("MERCURY(3.303e+23)"));
    assert!(rendered.contains("VENUS(4.869e+24)"));
}

#[test]
fn test_language_override() {
    let (_dir, path) = write_manifest(GREETER);
    let toml = GentleToml::open(&path).unwrap();
    let files = toml.lower(Some(Language::Kotlin)).unwrap();
    assert!(matches!(files[0], GeneratedFile::Kotlin(_)));
    assert_eq!(files[0].relative_path(), PathBuf::from("com/example/Greeter.kt"));
    let rendered = files[0].render().unwrap();
    assert!(rendered.starts_with("// Generated, do not edit.\npackage com.example\n"));
    assert!(!rendered.contains("import kotlin.String"));
}

#[test]
fn test_invalid_type_expression_is_reported() {
    let (_dir, path) = write_manifest(
        r#"
[[file]]
package = "com.example"

[file.type]
name = "Broken"
fields = [{ name = "values", type = "List<String" }]
"#,
    );
    let toml = GentleToml::open(&path).unwrap();
    let err = toml.lower(None).unwrap_err();
    let Error::InvalidTypeExpression { span, expr, .. } = *err else {
        panic!("expected an invalid type expression, got {err:?}");
    };
    assert_eq!(expr, "List<String");
    assert!(span.is_some());
}

#[test]
fn test_unknown_modifier_is_reported() {
    let (_dir, path) = write_manifest(
        r#"
[output]
language = "kotlin"

[[file]]
package = "com.example"

[file.type]
name = "Broken"
modifiers = ["static"]
"#,
    );
    let toml = GentleToml::open(&path).unwrap();
    let err = toml.lower(None).unwrap_err();
    assert!(matches!(*err, Error::InvalidModifier { .. }));
}

#[test]
fn test_record_is_java_only() {
    let (_dir, path) = write_manifest(
        r#"
[output]
language = "kotlin"

[[file]]
package = "com.example"

[file.type]
kind = "record"
name = "Point"
"#,
    );
    let toml = GentleToml::open(&path).unwrap();
    let err = toml.lower(None).unwrap_err();
    assert!(matches!(*err, Error::Validation { .. }));
    assert!(err.to_string().contains("Java-only"));
}

#[test]
fn test_secondary_constructor_must_delegate() {
    let (_dir, path) = write_manifest(
        r#"
[output]
language = "kotlin"

[[file]]
package = "com.example"

[file.type]
name = "Temperature"
parameters = [{ name = "celsius", type = "Double", property = "val" }]

[[file.type.constructors]]
params = [{ name = "kelvin", type = "Int" }]
"#,
    );
    let toml = GentleToml::open(&path).unwrap();
    let err = toml.lower(None).unwrap_err();
    assert!(err.to_string().contains("delegate"));
}

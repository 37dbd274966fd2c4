//! A Java compilation unit: package, imports and one top-level type.

use std::{collections::BTreeSet, fmt, path::PathBuf};

use codegentle_common::{
    ClassName, CodeValue, Error, Indent, PackageName, Result, WriteStrategy, WriterConfig,
    naming::is_identifier,
    writer::{ImportCollector, WriterOutput, emit_with_late_imports},
};
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    naming::JAVA_LANG_PACKAGE,
    spec::JavaTypeSpec,
    strategy::{JavaWriteStrategy, ToStringJavaWriteStrategy},
    writer::{JavaCodeWriter, collect_type, emit_type},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    package: PackageName,
    type_spec: JavaTypeSpec,
    file_comment: CodeValue,
    static_imports: BTreeSet<String>,
    always_qualify: BTreeSet<String>,
    skip_java_lang_imports: bool,
    config: WriterConfig,
}

impl JavaFile {
    pub fn builder(package: impl Into<PackageName>, type_spec: JavaTypeSpec) -> JavaFileBuilder {
        JavaFileBuilder {
            package: package.into(),
            type_spec,
            file_comment: CodeValue::empty(),
            static_imports: BTreeSet::new(),
            always_qualify: BTreeSet::new(),
            skip_java_lang_imports: true,
            config: WriterConfig::default(),
        }
    }

    pub fn package(&self) -> &PackageName {
        &self.package
    }

    pub fn type_spec(&self) -> &JavaTypeSpec {
        &self.type_spec
    }

    pub fn type_name(&self) -> &str {
        self.type_spec.name().unwrap_or_default()
    }

    /// `com/example/Name.java`
    pub fn relative_path(&self) -> PathBuf {
        self.package
            .to_path()
            .join(format!("{}.java", self.type_name()))
    }

    /// Render with the default validating strategy.
    pub fn render(&self) -> Result<String> {
        self.render_with(&JavaWriteStrategy::default())
    }

    /// Render the whole file. Imports are collected from the spec tree
    /// first; when emission still finds unimported classes the body is
    /// written once more with those added.
    pub fn render_with(&self, strategy: &dyn WriteStrategy) -> Result<String> {
        debug!(package = %self.package, name = self.type_name(), "rendering java file");
        let omit_java_lang = self.skip_java_lang_imports && strategy.omit_implicit_package();

        let mut collector =
            ImportCollector::new(self.package.clone()).always_qualify(self.always_qualify.iter().cloned());
        if omit_java_lang {
            collector = collector.skip_package(JAVA_LANG_PACKAGE.clone());
        }
        collect_type(&mut collector, &self.type_spec);
        let local_names = collector.local_names().clone();
        let imports = collector.into_imports();
        debug!(count = imports.len(), "collected imports");

        let body = emit_with_late_imports(imports, |imports| {
            self.emit_body(strategy, imports, &local_names, omit_java_lang)
        })?;

        let mut header = JavaCodeWriter::with_config(strategy, self.config);
        if !self.file_comment.is_empty() {
            header.emit_comment(&self.file_comment)?;
        }
        if !self.package.is_empty() {
            header.emit(&format!("package {};\n\n", self.package));
        }
        if !self.static_imports.is_empty() {
            for signature in &self.static_imports {
                header.emit(&format!("import static {signature};\n"));
            }
            header.emit("\n");
        }
        if !body.used_imports.is_empty() {
            for class_name in &body.used_imports {
                header.emit(&format!("import {};\n", class_name.canonical_name()));
            }
            header.emit("\n");
        }

        let mut out = header.finish().code;
        out.push_str(&body.code);
        debug!(imports = body.used_imports.len(), bytes = out.len(), "rendered java file");
        Ok(out)
    }

    /// Render into a caller-supplied sink.
    pub fn write_to(&self, sink: &mut dyn fmt::Write, strategy: &dyn WriteStrategy) -> Result<()> {
        let rendered = self.render_with(strategy)?;
        sink.write_str(&rendered)?;
        Ok(())
    }

    fn emit_body(
        &self,
        strategy: &dyn WriteStrategy,
        imports: IndexMap<String, ClassName>,
        local_names: &BTreeSet<String>,
        omit_java_lang: bool,
    ) -> Result<WriterOutput> {
        let mut writer = JavaCodeWriter::with_config(strategy, self.config)
            .imported_types(imports)
            .referenced_names(local_names.iter().cloned())
            .static_imports(self.static_imports.iter().cloned())
            .always_qualify(self.always_qualify.iter().cloned())
            .omit_implicit_package(omit_java_lang);
        writer.push_package(self.package.clone())?;
        writer.declare_file_types([self.type_name()]);
        emit_type(&mut writer, &self.type_spec, None, &[])?;
        writer.pop_package()?;
        Ok(writer.finish())
    }
}

impl fmt::Display for JavaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .render_with(&ToStringJavaWriteStrategy)
            .map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

#[derive(Debug, Clone)]
pub struct JavaFileBuilder {
    package: PackageName,
    type_spec: JavaTypeSpec,
    file_comment: CodeValue,
    static_imports: BTreeSet<String>,
    always_qualify: BTreeSet<String>,
    skip_java_lang_imports: bool,
    config: WriterConfig,
}

impl JavaFileBuilder {
    /// A `//` comment written before the package line.
    pub fn file_comment(mut self, comment: impl Into<CodeValue>) -> Self {
        self.file_comment = comment.into();
        self
    }

    /// `java.util.Objects.requireNonNull` or `java.util.Collections.*`.
    pub fn add_static_import(mut self, signature: impl Into<String>) -> Self {
        self.static_imports.insert(signature.into());
        self
    }

    pub fn add_static_imports<I, S>(mut self, signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.static_imports.extend(signatures.into_iter().map(Into::into));
        self
    }

    /// Simple names never shortened by an import.
    pub fn always_qualify<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_qualify.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether `java.lang` classes are written by simple name without an
    /// import. When off they are imported like any other class.
    pub fn skip_java_lang_imports(mut self, skip: bool) -> Self {
        self.skip_java_lang_imports = skip;
        self
    }

    pub fn indent(mut self, indent: Indent) -> Self {
        self.config.indent = indent;
        self
    }

    pub fn config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<JavaFile> {
        if self.type_spec.is_anonymous() {
            return Err(Error::illegal_state(
                "the top-level type of a file must be named",
            ));
        }
        for signature in &self.static_imports {
            let valid = signature
                .split('.')
                .enumerate()
                .all(|(i, segment)| (segment == "*" && i > 0) || is_identifier(segment));
            if !valid || !signature.contains('.') {
                return Err(Error::invalid_name("static import", signature.clone()));
            }
        }
        Ok(JavaFile {
            package: self.package,
            type_spec: self.type_spec,
            file_comment: self.file_comment,
            static_imports: self.static_imports,
            always_qualify: self.always_qualify,
            skip_java_lang_imports: self.skip_java_lang_imports,
            config: self.config,
        })
    }
}

//! A Kotlin source file: package, imports and any number of top-level
//! properties, functions and types.

use std::{collections::BTreeSet, fmt, path::PathBuf};

use codegentle_common::{
    ClassName, CodeValue, Error, Indent, PackageName, Result, WriteStrategy, WriterConfig,
    writer::{ImportCollector, WriterOutput, emit_with_late_imports},
};
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    naming::DEFAULT_IMPORT_PACKAGES,
    spec::{KotlinFunctionSpec, KotlinPropertySpec, KotlinTypeKind, KotlinTypeSpec},
    strategy::{KotlinWriteStrategy, ToStringKotlinWriteStrategy, is_kotlin_identifier},
    writer::{
        FunctionOwner, KotlinCodeWriter, collect_function, collect_property, collect_type,
        emit_function, emit_property, emit_type,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KotlinFile {
    package: PackageName,
    name: String,
    file_comment: CodeValue,
    properties: Vec<KotlinPropertySpec>,
    functions: Vec<KotlinFunctionSpec>,
    types: Vec<KotlinTypeSpec>,
    member_imports: BTreeSet<String>,
    always_qualify: BTreeSet<String>,
    skip_kotlin_imports: bool,
    config: WriterConfig,
}

impl KotlinFile {
    /// `name` is the file name without the `.kt` extension.
    pub fn builder(package: impl Into<PackageName>, name: impl Into<String>) -> KotlinFileBuilder {
        KotlinFileBuilder {
            package: package.into(),
            name: name.into(),
            file_comment: CodeValue::empty(),
            properties: Vec::new(),
            functions: Vec::new(),
            types: Vec::new(),
            member_imports: BTreeSet::new(),
            always_qualify: BTreeSet::new(),
            skip_kotlin_imports: true,
            config: WriterConfig::default(),
        }
    }

    pub fn package(&self) -> &PackageName {
        &self.package
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[KotlinPropertySpec] {
        &self.properties
    }

    pub fn functions(&self) -> &[KotlinFunctionSpec] {
        &self.functions
    }

    pub fn types(&self) -> &[KotlinTypeSpec] {
        &self.types
    }

    /// `com/example/Name.kt`
    pub fn relative_path(&self) -> PathBuf {
        self.package.to_path().join(format!("{}.kt", self.name))
    }

    /// Render with the default validating strategy.
    pub fn render(&self) -> Result<String> {
        self.render_with(&KotlinWriteStrategy::default())
    }

    /// Render the whole file: collect imports, write the body, write it once
    /// more when emission found classes missing from the import table, then
    /// prepend the header.
    pub fn render_with(&self, strategy: &dyn WriteStrategy) -> Result<String> {
        debug!(package = %self.package, name = %self.name, "rendering kotlin file");
        let omit_defaults = self.skip_kotlin_imports && strategy.omit_implicit_package();

        let mut collector = ImportCollector::new(self.package.clone())
            .always_qualify(self.always_qualify.iter().cloned());
        if omit_defaults {
            for package in DEFAULT_IMPORT_PACKAGES.iter() {
                collector = collector.skip_package(package.clone());
            }
        }
        for property in &self.properties {
            collect_property(&mut collector, property);
        }
        for function in &self.functions {
            collect_function(&mut collector, function);
        }
        for type_spec in &self.types {
            collect_type(&mut collector, type_spec);
        }
        let local_names = collector.local_names().clone();
        let imports = collector.into_imports();
        debug!(count = imports.len(), "collected imports");

        let body = emit_with_late_imports(imports, |imports| {
            self.emit_body(strategy, imports, &local_names, omit_defaults)
        })?;

        let mut header = KotlinCodeWriter::with_config(strategy, self.config);
        if !self.file_comment.is_empty() {
            header.emit_comment(&self.file_comment)?;
        }
        if !self.package.is_empty() {
            header.emit(&format!("package {}\n\n", self.package));
        }
        let import_lines: BTreeSet<String> = self
            .member_imports
            .iter()
            .cloned()
            .chain(body.used_imports.iter().map(ClassName::canonical_name))
            .collect();
        if !import_lines.is_empty() {
            for line in &import_lines {
                header.emit(&format!("import {line}\n"));
            }
            header.emit("\n");
        }

        let mut out = header.finish().code;
        out.push_str(&body.code);
        debug!(imports = import_lines.len(), bytes = out.len(), "rendered kotlin file");
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
        omit_defaults: bool,
    ) -> Result<WriterOutput> {
        let mut writer = KotlinCodeWriter::with_config(strategy, self.config)
            .imported_types(imports)
            .referenced_names(local_names.iter().cloned())
            .static_imports(self.member_imports.iter().cloned())
            .always_qualify(self.always_qualify.iter().cloned())
            .omit_implicit_package(omit_defaults);
        writer.push_package(self.package.clone())?;
        writer.declare_file_types(self.types.iter().filter_map(KotlinTypeSpec::name));

        let mut first = true;
        let mut separate = |writer: &mut KotlinCodeWriter<'_>| {
            if !first {
                writer.emit("\n");
            }
            first = false;
        };
        for property in &self.properties {
            separate(&mut writer);
            emit_property(&mut writer, property, &[])?;
        }
        for function in &self.functions {
            separate(&mut writer);
            emit_function(&mut writer, function, &FunctionOwner::TOP_LEVEL)?;
        }
        for type_spec in &self.types {
            separate(&mut writer);
            emit_type(&mut writer, type_spec, None, &[])?;
        }

        writer.pop_package()?;
        Ok(writer.finish())
    }
}

impl fmt::Display for KotlinFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .render_with(&ToStringKotlinWriteStrategy)
            .map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

#[derive(Debug, Clone)]
pub struct KotlinFileBuilder {
    package: PackageName,
    name: String,
    file_comment: CodeValue,
    properties: Vec<KotlinPropertySpec>,
    functions: Vec<KotlinFunctionSpec>,
    types: Vec<KotlinTypeSpec>,
    member_imports: BTreeSet<String>,
    always_qualify: BTreeSet<String>,
    skip_kotlin_imports: bool,
    config: WriterConfig,
}

impl KotlinFileBuilder {
    /// A `//` comment written before the package line.
    pub fn file_comment(mut self, comment: impl Into<CodeValue>) -> Self {
        self.file_comment = comment.into();
        self
    }

    pub fn add_property(mut self, property: KotlinPropertySpec) -> Self {
        self.properties.push(property);
        self
    }

    pub fn add_function(mut self, function: KotlinFunctionSpec) -> Self {
        self.functions.push(function);
        self
    }

    pub fn add_type(mut self, type_spec: KotlinTypeSpec) -> Self {
        self.types.push(type_spec);
        self
    }

    /// Import of a member such as `kotlin.math.max`. References written as
    /// `Class.member` are then shortened to `member`.
    pub fn add_member_import(mut self, signature: impl Into<String>) -> Self {
        self.member_imports.insert(signature.into());
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

    /// Whether classes of the default-imported `kotlin.*` packages are
    /// written by simple name without an import.
    pub fn skip_kotlin_imports(mut self, skip: bool) -> Self {
        self.skip_kotlin_imports = skip;
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

    pub fn build(self) -> Result<KotlinFile> {
        if self.name.is_empty() || self.name.contains(['/', '\\', '.']) {
            return Err(Error::invalid_name("file", self.name));
        }
        if let Some(type_spec) = self
            .types
            .iter()
            .find(|t| t.is_anonymous() || t.kind() == KotlinTypeKind::Companion)
        {
            return Err(Error::illegal_state(format!(
                "a top-level {} must be named and cannot be a companion",
                type_spec.kind()
            )));
        }
        for signature in &self.member_imports {
            let valid = signature
                .split('.')
                .enumerate()
                .all(|(i, segment)| (segment == "*" && i > 0) || is_kotlin_identifier(segment));
            if !valid || !signature.contains('.') {
                return Err(Error::invalid_name("import", signature.clone()));
            }
        }
        Ok(KotlinFile {
            package: self.package,
            name: self.name,
            file_comment: self.file_comment,
            properties: self.properties,
            functions: self.functions,
            types: self.types,
            member_imports: self.member_imports,
            always_qualify: self.always_qualify,
            skip_kotlin_imports: self.skip_kotlin_imports,
            config: self.config,
        })
    }
}

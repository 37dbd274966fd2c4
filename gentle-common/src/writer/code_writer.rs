//! The stateful emission engine shared by every dialect.

use std::{
    collections::{BTreeSet, HashMap},
    marker::PhantomData,
};

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::{Dialect, LineWrapper};
use crate::{
    Error, Result,
    code::{CodePart, CodeValue, PLACEHOLDER},
    config::{Indent, WriterConfig},
    naming::{ClassName, PackageName, TypeName},
    refs::{AnnotationRef, TypeRef},
    strategy::WriteStrategy,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentKind {
    Doc,
    Line,
}

/// A type declaration currently being written: its simple name (`None` for
/// anonymous classes) and the simple names of the types nested in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeScope {
    name: Option<String>,
    nested: Vec<String>,
}

impl TypeScope {
    pub fn named<I, S>(name: impl Into<String>, nested: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: Some(name.into()),
            nested: nested.into_iter().map(Into::into).collect(),
        }
    }

    pub fn anonymous<I, S>(nested: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            nested: nested.into_iter().map(Into::into).collect(),
        }
    }
}

/// What a finished writer produced.
#[derive(Debug, Clone, Default)]
pub struct WriterOutput {
    pub code: String,
    /// Imports that were actually used to shorten a name, sorted.
    pub used_imports: Vec<ClassName>,
    /// Classes written fully qualified because they were missing from the
    /// import table; candidates for another pass.
    pub late_imports: IndexMap<String, ClassName>,
}

/// Run `emit` against `imports`. When the emission wrote classes that are
/// missing from the table, the table is extended with them and `emit` runs
/// exactly once more.
pub fn emit_with_late_imports<F>(
    mut imports: IndexMap<String, ClassName>,
    mut emit: F,
) -> Result<WriterOutput>
where
    F: FnMut(IndexMap<String, ClassName>) -> Result<WriterOutput>,
{
    let output = emit(imports.clone())?;
    if output.late_imports.is_empty() {
        return Ok(output);
    }
    debug!(count = output.late_imports.len(), "late imports found, writing body again");
    imports.extend(output.late_imports);
    emit(imports)
}

/// Renders code values, annotations and type references for dialect `D`,
/// tracking indentation, comment mode, the enclosing type scopes, in-scope
/// type variables and the import table.
pub struct CodeWriter<'a, D: Dialect> {
    strategy: &'a dyn WriteStrategy,
    indent: Indent,
    out: LineWrapper,
    indent_level: usize,
    comment: Option<CommentKind>,
    package: Option<PackageName>,
    file_types: Vec<String>,
    type_stack: Vec<TypeScope>,
    type_variables: HashMap<String, usize>,
    trailing_newline: bool,
    /// Line of the statement being written; subsequent lines of a statement
    /// are double-indented. `None` outside statements.
    statement_line: Option<usize>,
    static_imports: BTreeSet<String>,
    always_qualify: BTreeSet<String>,
    imported_types: IndexMap<String, ClassName>,
    used_imports: BTreeSet<String>,
    importable_types: IndexMap<String, ClassName>,
    referenced_names: BTreeSet<String>,
    omit_implicit_package: bool,
    dialect: PhantomData<D>,
}

impl<'a, D: Dialect> CodeWriter<'a, D> {
    pub fn new(strategy: &'a dyn WriteStrategy) -> Self {
        Self::with_config(strategy, WriterConfig::default())
    }

    pub fn with_config(strategy: &'a dyn WriteStrategy, config: WriterConfig) -> Self {
        Self {
            strategy,
            indent: config.indent,
            out: LineWrapper::new(config.indent.as_str(), config.column_limit),
            indent_level: 0,
            comment: None,
            package: None,
            file_types: Vec::new(),
            type_stack: Vec::new(),
            type_variables: HashMap::new(),
            trailing_newline: false,
            statement_line: None,
            static_imports: BTreeSet::new(),
            always_qualify: BTreeSet::new(),
            imported_types: IndexMap::new(),
            used_imports: BTreeSet::new(),
            importable_types: IndexMap::new(),
            referenced_names: BTreeSet::new(),
            omit_implicit_package: strategy.omit_implicit_package(),
            dialect: PhantomData,
        }
    }

    /// Simple name to class name, as collected before emission.
    pub fn imported_types(mut self, imported_types: IndexMap<String, ClassName>) -> Self {
        self.imported_types = imported_types;
        self
    }

    /// Static import signatures such as `java.util.Objects.requireNonNull`
    /// or `java.util.Collections.*`.
    pub fn static_imports<I, S>(mut self, signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.static_imports = signatures.into_iter().map(Into::into).collect();
        self
    }

    /// Simple names that are always written fully qualified.
    pub fn always_qualify<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_qualify = names.into_iter().map(Into::into).collect();
        self
    }

    /// Simple names of same-package classes used anywhere in the file. An
    /// implicit-package class with one of these names is written fully
    /// qualified, wherever it appears.
    pub fn referenced_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.referenced_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether classes of the dialect's implicit packages are shortened
    /// without an import. Only takes effect when the strategy allows it.
    pub fn omit_implicit_package(mut self, omit: bool) -> Self {
        self.omit_implicit_package = omit && self.strategy.omit_implicit_package();
        self
    }

    pub fn strategy(&self) -> &'a dyn WriteStrategy {
        self.strategy
    }

    pub fn indent_unit(&self) -> &'static str {
        self.indent.as_str()
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn last_char(&self) -> Option<char> {
        self.out.last_char()
    }

    pub fn package(&self) -> Option<&PackageName> {
        self.package.as_ref()
    }

    pub fn static_import_signatures(&self) -> &BTreeSet<String> {
        &self.static_imports
    }

    pub fn is_always_qualified(&self, simple_name: &str) -> bool {
        self.always_qualify.contains(simple_name)
    }

    pub fn indent(&mut self, levels: usize) {
        self.indent_level += levels;
    }

    pub fn unindent(&mut self, levels: usize) -> Result<()> {
        if levels > self.indent_level {
            return Err(Box::new(Error::UnindentUnderflow {
                levels,
                current: self.indent_level,
            }));
        }
        self.indent_level -= levels;
        Ok(())
    }

    pub fn push_package(&mut self, package: PackageName) -> Result<()> {
        if let Some(current) = &self.package {
            return Err(Error::illegal_state(format!(
                "package already set: {current}"
            )));
        }
        self.package = Some(package);
        Ok(())
    }

    pub fn pop_package(&mut self) -> Result<()> {
        match self.package.take() {
            Some(_) => Ok(()),
            None => Err(Error::illegal_state("package not set")),
        }
    }

    /// Simple names of every top-level type declared in the file being
    /// written.
    pub fn declare_file_types<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_types = names.into_iter().map(Into::into).collect();
    }

    pub fn push_type(&mut self, scope: TypeScope) {
        self.type_stack.push(scope);
    }

    pub fn pop_type(&mut self) {
        self.type_stack.pop();
    }

    pub fn push_type_variables<'n, I>(&mut self, names: I)
    where
        I: IntoIterator<Item = &'n str>,
    {
        for name in names {
            *self.type_variables.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    pub fn pop_type_variables<'n, I>(&mut self, names: I)
    where
        I: IntoIterator<Item = &'n str>,
    {
        for name in names {
            if let Some(count) = self.type_variables.get_mut(name) {
                *count -= 1;
                if *count == 0 {
                    self.type_variables.remove(name);
                }
            }
        }
    }

    /// Reject `name` unless the strategy accepts it as a source name.
    pub fn check_name(&self, name: &str) -> Result<()> {
        if self.strategy.is_valid_source_name(name) {
            Ok(())
        } else {
            Err(Error::rejected_name(self.strategy.dialect(), name))
        }
    }

    pub fn check_type_name(&self, type_name: &TypeName) -> Result<()> {
        if self.strategy.is_valid_type_name(type_name) {
            Ok(())
        } else {
            Err(Error::rejected_name(self.strategy.dialect(), type_name.to_string()))
        }
    }

    /// Write `text`, indenting each non-empty line lazily and applying the
    /// comment prefix when inside a doc or line comment. Blank lines are
    /// never indented.
    pub fn emit(&mut self, text: &str) {
        let strategy = self.strategy;
        let mut first = true;
        for line in text.split('\n') {
            if !first {
                if self.trailing_newline {
                    match self.comment {
                        Some(CommentKind::Doc) => {
                            self.emit_indentation();
                            self.out.append(" *");
                        }
                        Some(CommentKind::Line) => {
                            self.emit_indentation();
                            self.out.append("//");
                        }
                        None => {}
                    }
                }
                self.out.append(strategy.newline());
                self.trailing_newline = true;
                if let Some(statement_line) = self.statement_line {
                    if statement_line == 0 {
                        // A statement spills onto a second line.
                        self.indent(2);
                    }
                    self.statement_line = Some(statement_line + 1);
                }
            }

            first = false;
            if line.is_empty() {
                continue;
            }

            if self.trailing_newline {
                self.emit_indentation();
                match self.comment {
                    Some(CommentKind::Doc) => self.out.append(" * "),
                    Some(CommentKind::Line) => self.out.append("// "),
                    None => {}
                }
            }

            self.out.append(line);
            self.trailing_newline = false;
        }
    }

    fn emit_indentation(&mut self) {
        for _ in 0..self.indent_level {
            self.out.append(self.indent.as_str());
        }
    }

    pub fn emit_wrapping_space(&mut self) {
        self.out.wrapping_space(self.indent_level + 2);
    }

    pub fn emit_zero_width_space(&mut self) {
        self.out.zero_width_space(self.indent_level + 2);
    }

    pub fn emit_format<I>(&mut self, format: &str, args: I) -> Result<()>
    where
        I: IntoIterator<Item = CodePart>,
    {
        let value = CodeValue::format(format, args)?;
        self.emit_code(&value)
    }

    pub fn emit_code(&mut self, code: &CodeValue) -> Result<()> {
        let parts = code.parts();
        let mut index = 0;
        while index < parts.len() {
            match &parts[index] {
                CodePart::Simple(text) => self.emit(text),
                CodePart::Skip => self.emit(PLACEHOLDER),
                CodePart::Literal(value) => self.emit(value),
                CodePart::Name(name) => self.emit(name),
                CodePart::Str(Some(value)) => {
                    let literal = D::string_literal(value, self.indent.as_str());
                    self.emit(&literal);
                }
                CodePart::Str(None) => self.emit("null"),
                CodePart::Type(type_ref) => {
                    if let (TypeName::Class(class_name), Some(CodePart::Simple(next))) =
                        (type_ref.type_name(), parts.get(index + 1))
                        && type_ref.annotations().is_empty()
                        && self.emit_static_import_member(class_name, next)
                    {
                        index += 2;
                        continue;
                    }
                    D::emit_type_ref(self, type_ref)?;
                }
                CodePart::Annotation(annotation) => self.emit_annotation(annotation)?,
                CodePart::Embedded(spec) => {
                    self.with_stashed_statement(|writer| D::emit_embedded(writer, spec))?;
                }
                CodePart::Code(nested) => self.emit_code(nested)?,
                CodePart::Indent(levels) => self.indent(*levels),
                CodePart::Unindent(levels) => self.unindent(*levels)?,
                CodePart::StatementBegin => {
                    if self.statement_line.is_some() {
                        return Err(Error::illegal_state(
                            "statement begin followed by another statement begin",
                        ));
                    }
                    self.statement_line = Some(0);
                }
                CodePart::StatementEnd => {
                    if self.statement_line.is_none() {
                        return Err(Error::illegal_state(
                            "statement end has no matching statement begin",
                        ));
                    }
                    self.emit(D::STATEMENT_TERMINATOR);
                    self.emit("\n");
                    if self.statement_line.is_some_and(|line| line > 0) {
                        self.unindent(2)?;
                    }
                    self.statement_line = None;
                }
                CodePart::WrappingSpace => self.emit_wrapping_space(),
                CodePart::ZeroWidthSpace => self.emit_zero_width_space(),
            }
            index += 1;
        }
        Ok(())
    }

    /// Emit `code`, then a newline unless it already ended with one.
    pub fn emit_code_block(&mut self, code: &CodeValue) -> Result<()> {
        self.emit_code(code)?;
        if self.last_char() != Some('\n') {
            self.emit("\n");
        }
        Ok(())
    }

    /// Write `member` alone when `ClassName.member` is statically imported.
    fn emit_static_import_member(&mut self, class_name: &ClassName, next: &str) -> bool {
        let Some(rest) = next.strip_prefix('.') else {
            return false;
        };
        let member = extract_member_name(rest);
        if member.is_empty() {
            return false;
        }
        let canonical = class_name.canonical_name();
        let explicit = format!("{canonical}.{member}");
        let wildcard = format!("{canonical}.*");
        if self.static_imports.contains(&explicit) || self.static_imports.contains(&wildcard) {
            self.emit(rest);
            return true;
        }
        false
    }

    /// Run `f` with statement tracking suspended, e.g. while writing an
    /// anonymous class body inside a statement.
    pub fn with_stashed_statement<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let previous = self.statement_line.take();
        let result = f(self);
        self.statement_line = previous;
        result
    }

    /// `/**`, each line prefixed with ` * `, ` */`. Nothing for an empty doc.
    pub fn emit_doc(&mut self, doc: &CodeValue) -> Result<()> {
        if doc.is_empty() {
            return Ok(());
        }
        self.emit("/**\n");
        self.comment = Some(CommentKind::Doc);
        let result = self.emit_code_block(doc);
        self.comment = None;
        result?;
        self.emit(" */\n");
        Ok(())
    }

    /// Each line prefixed with `// `.
    pub fn emit_comment(&mut self, comment: &CodeValue) -> Result<()> {
        self.trailing_newline = true;
        self.comment = Some(CommentKind::Line);
        let result = self.emit_code(comment);
        if result.is_ok() {
            self.emit("\n");
        }
        self.comment = None;
        result
    }

    pub fn emit_annotations(&mut self, annotations: &[AnnotationRef], inline: bool) -> Result<()> {
        for annotation in annotations {
            self.emit_annotation(annotation)?;
            self.emit(if inline { " " } else { "\n" });
        }
        Ok(())
    }

    /// `@Name`, `@Name(value)` or `@Name(a = x, b = y)`; members holding
    /// several values are written as the dialect's array literal.
    pub fn emit_annotation(&mut self, annotation: &AnnotationRef) -> Result<()> {
        self.emit("@");
        self.emit_class_name(annotation.class_name())?;
        let members: Vec<(&str, &[CodeValue])> = annotation.members().collect();
        if members.is_empty() {
            return Ok(());
        }

        self.emit("(");
        if let [("value", values)] = members.as_slice() {
            self.emit_annotation_value(values)?;
        } else {
            for (i, (name, values)) in members.iter().enumerate() {
                if i > 0 {
                    self.emit(", ");
                }
                self.emit(name);
                self.emit(" = ");
                self.emit_annotation_value(values)?;
            }
        }
        self.emit(")");
        Ok(())
    }

    fn emit_annotation_value(&mut self, values: &[CodeValue]) -> Result<()> {
        if let [single] = values {
            return self.emit_code(single);
        }
        let (open, close) = D::ANNOTATION_ARRAY;
        self.emit(open);
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            self.emit_code(value)?;
        }
        self.emit(close);
        Ok(())
    }

    pub fn emit_type_ref(&mut self, type_ref: &TypeRef) -> Result<()> {
        D::emit_type_ref(self, type_ref)
    }

    pub fn emit_type_name(&mut self, type_name: &TypeName) -> Result<()> {
        D::emit_type_ref(self, &TypeRef::new(type_name.clone()))
    }

    pub fn emit_class_name(&mut self, class_name: &ClassName) -> Result<()> {
        for name in class_name.simple_names() {
            if !self.strategy.is_valid_source_name(name) {
                return Err(Error::rejected_name(
                    self.strategy.dialect(),
                    class_name.canonical_name(),
                ));
            }
        }
        let name = self.lookup_name(class_name);
        self.emit(&name);
        Ok(())
    }

    /// The shortest form of `class_name` that is unambiguous here.
    ///
    /// Checked in order: type variables masking the top-level name, the
    /// nested-type scopes and the import table (shortest resolving suffix of
    /// the enclosing chain), the current package, the implicit packages.
    /// Anything else is written fully qualified and recorded as importable.
    pub fn lookup_name(&mut self, class_name: &ClassName) -> String {
        let top_level = class_name.top_level_class();
        if self.type_variables.contains_key(top_level.simple_name()) {
            return class_name.canonical_name();
        }

        let simple_names = class_name.simple_names();
        let mut name_resolved = false;
        let mut current = Some(class_name);
        while let Some(candidate) = current {
            let resolved = self.resolve(candidate.simple_name());
            name_resolved = resolved.is_some();
            if let Some((resolved, via_import)) = resolved
                && resolved == *candidate
            {
                if via_import {
                    self.used_imports.insert(candidate.simple_name().to_string());
                }
                let offset = candidate.simple_names().len() - 1;
                return simple_names[offset..].join(".");
            }
            current = candidate.enclosing_class();
        }

        // The simple name means something else here.
        if name_resolved {
            return class_name.canonical_name();
        }

        if self
            .package
            .as_ref()
            .is_some_and(|package| package == top_level.package_name())
        {
            self.referenced_names
                .insert(top_level.simple_name().to_string());
            return simple_names.join(".");
        }

        if self.omit_implicit_package
            && D::is_implicit(class_name)
            && !self.always_qualify.contains(top_level.simple_name())
            && !self.referenced_names.contains(top_level.simple_name())
        {
            return simple_names.join(".");
        }

        if self.comment != Some(CommentKind::Doc) {
            self.importable_type(class_name);
        }
        class_name.canonical_name()
    }

    fn resolve(&self, simple_name: &str) -> Option<(ClassName, bool)> {
        // A type nested in the current type or one enclosing it.
        for depth in (0..self.type_stack.len()).rev() {
            if self.type_stack[depth].nested.iter().any(|n| n == simple_name)
                && let Some(class_name) = self.stack_class_name(depth, simple_name)
            {
                return Some((class_name, false));
            }
        }

        // A top-level type of this file.
        let declared_top_level = self.file_types.iter().any(|n| n == simple_name)
            || self
                .type_stack
                .first()
                .and_then(|scope| scope.name.as_deref())
                == Some(simple_name);
        if declared_top_level {
            let package = self.package.clone().unwrap_or_default();
            return Some((ClassName::new(package, simple_name), false));
        }

        self.imported_types
            .get(simple_name)
            .map(|class_name| (class_name.clone(), true))
    }

    fn stack_class_name(&self, depth: usize, simple_name: &str) -> Option<ClassName> {
        let mut names = self.type_stack[..=depth]
            .iter()
            .filter_map(|scope| scope.name.as_deref());
        let root = names.next()?;
        let package = self.package.clone().unwrap_or_default();
        let enclosing = names.fold(ClassName::new(package, root), |acc, name| {
            acc.nested_class(name)
        });
        Some(enclosing.nested_class(simple_name))
    }

    fn importable_type(&mut self, class_name: &ClassName) {
        let top_level = class_name.top_level_class();
        if top_level.package_name().is_empty()
            || self.always_qualify.contains(class_name.simple_name())
            || self.always_qualify.contains(top_level.simple_name())
        {
            return;
        }
        if !self.importable_types.contains_key(top_level.simple_name()) {
            trace!(import = %top_level, "late importable type");
            self.importable_types
                .insert(top_level.simple_name().to_string(), top_level.clone());
        }
    }

    pub fn finish(self) -> WriterOutput {
        let Self {
            out,
            imported_types,
            used_imports,
            importable_types,
            referenced_names,
            ..
        } = self;

        let mut used: Vec<ClassName> = used_imports
            .iter()
            .filter_map(|name| imported_types.get(name).cloned())
            .collect();
        used.sort();

        let late_imports = importable_types
            .into_iter()
            .filter(|(name, _)| {
                !referenced_names.contains(name) && !imported_types.contains_key(name)
            })
            .collect();

        WriterOutput {
            code: out.finish(),
            used_imports: used,
            late_imports,
        }
    }
}

/// The longest identifier prefix of `part`.
fn extract_member_name(part: &str) -> &str {
    let mut end = 0;
    for (i, c) in part.char_indices() {
        let valid = if i == 0 {
            c.is_alphabetic() || c == '_' || c == '$'
        } else {
            c.is_alphanumeric() || c == '_' || c == '$'
        };
        if !valid {
            break;
        }
        end = i + c.len_utf8();
    }
    &part[..end]
}

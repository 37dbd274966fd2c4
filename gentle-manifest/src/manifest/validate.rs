//! Validation context and utilities for manifest parsing.

use std::{collections::HashSet, sync::Arc};

use miette::SourceSpan;

use super::Manifest;
use crate::{
    Error, Language, Result,
    definition::{MethodDef, TypeDef},
    error::SourceContext,
};

/// Parsing and validation context that carries source information.
///
/// Holds the source for labelled diagnostics and the path through the
/// manifest (`com.example.User.fields`) used to describe where a problem is.
///
/// ```ignore
/// let ctx = ParseContext::new(src, "gentle.toml");
/// let nested = ctx.push("User").push("methods");
/// nested.validate_name("getName", "method", Language::Java)?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Shared across nested contexts
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// e.g. "field in 'com.example.User'", or just "field" at the root.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.src(), value)
    }

    pub fn validation_error(&self, message: impl Into<String>, near: &str) -> Box<Error> {
        self.source
            .validation_error(message, self.find_span(near))
    }

    pub fn invalid_type_error(&self, expr: &str, reason: impl Into<String>) -> Box<Error> {
        self.source
            .invalid_type_error(expr, reason, self.find_span(expr))
    }

    pub fn invalid_modifier_error(&self, modifier: &str, language: Language) -> Box<Error> {
        self.source
            .invalid_modifier_error(modifier, language.display_name(), self.find_span(modifier))
    }

    /// Wrap an error raised while building the code model for `name`.
    pub fn model_error(&self, kind: &str, name: &str, source: Box<codegentle_common::Error>) -> Box<Error> {
        let context = format!("{} '{}'", self.context_for(kind), name);
        self.source.model_error(context, source, self.find_span(name))
    }

    /// A name must be an identifier of `language` and not one of its
    /// reserved words.
    pub fn validate_name(&self, name: &str, kind: &str, language: Language) -> Result<()> {
        if language.is_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                language.display_name(),
                self.find_span(name),
            ));
        }
        if let Some(reason) = identifier_problem(name, language) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }
        Ok(())
    }

    pub fn validate_package(&self, package: &str, language: Language) -> Result<()> {
        if package.is_empty() {
            return Ok(());
        }
        for segment in package.split('.') {
            self.validate_name(segment, "package segment", language)?;
        }
        Ok(())
    }
}

/// Returns `None` if valid, `Some(reason)` otherwise.
pub(crate) fn identifier_problem(name: &str, language: Language) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name cannot be empty");
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Some("name must not start with a digit");
    }
    if language == Language::Kotlin && name.contains('$') {
        return Some("'$' is not allowed in Kotlin names");
    }
    if !language.is_identifier(name) {
        return Some("name contains characters that are not allowed");
    }
    None
}

/// Find the span of a quoted TOML value such as `name = "User"`.
///
/// Prefers a `= "value"` assignment and falls back to any quoted
/// occurrence, then to any occurrence at all.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    if value.is_empty() {
        return None;
    }
    let patterns = [format!("= \"{}\"", value), format!("=\"{}\"", value)];
    for pattern in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            let start = pos + pattern.len() - value.len() - 1;
            return Some(SourceSpan::from((start, value.len())));
        }
    }
    if let Some(pos) = src.find(&format!("\"{}\"", value)) {
        return Some(SourceSpan::from((pos + 1, value.len())));
    }
    src.find(value)
        .map(|pos| SourceSpan::from((pos, value.len())))
}

/// Checks that do not need type resolution: names, packages and duplicate
/// declarations. Type expressions and modifiers are checked when lowering.
pub(crate) fn validate_manifest<'m>(manifest: &'m Manifest, ctx: &ParseContext<'m>) -> Result<()> {
    let language = manifest.output.language;
    let mut seen = HashSet::new();
    for file in &manifest.files {
        ctx.validate_package(&file.package, language)?;
        if let Some(name) = &file.name {
            ctx.validate_name(name, "file", language)?;
        }
        let qualified = if file.package.is_empty() {
            file.type_def.name.clone()
        } else {
            format!("{}.{}", file.package, file.type_def.name)
        };
        if !seen.insert(qualified.clone()) {
            return Err(ctx.validation_error(
                format!("type '{qualified}' is declared more than once"),
                &file.type_def.name,
            ));
        }
        let file_ctx = if file.package.is_empty() {
            ctx.clone()
        } else {
            ctx.push(&file.package)
        };
        validate_type(&file.type_def, &file_ctx, language)?;
    }
    Ok(())
}

fn validate_type<'m>(def: &'m TypeDef, ctx: &ParseContext<'m>, language: Language) -> Result<()> {
    ctx.validate_name(&def.name, def.kind.as_str(), language)?;
    let ctx = ctx.push(&def.name);

    let mut members = HashSet::new();
    for constant in &def.constants {
        ctx.validate_name(&constant.name, "enum constant", language)?;
        if !members.insert(constant.name.as_str()) {
            return Err(ctx.validation_error(
                format!("'{}' is declared more than once in '{}'", constant.name, def.name),
                &constant.name,
            ));
        }
    }
    for field in &def.fields {
        ctx.validate_name(&field.name, "field", language)?;
        if !members.insert(field.name.as_str()) {
            return Err(ctx.validation_error(
                format!("'{}' is declared more than once in '{}'", field.name, def.name),
                &field.name,
            ));
        }
    }
    for parameter in &def.parameters {
        ctx.validate_name(&parameter.name, "parameter", language)?;
    }
    for constructor in &def.constructors {
        if !constructor.name.is_empty() {
            return Err(ctx.validation_error(
                format!("constructor of '{}' must not have a name", def.name),
                &constructor.name,
            ));
        }
        validate_method_params(constructor, &ctx, language)?;
    }
    for method in &def.methods {
        if method.name.is_empty() {
            return Err(ctx.validation_error(
                format!("a method of '{}' has no name", def.name),
                &def.name,
            ));
        }
        ctx.validate_name(&method.name, "method", language)?;
        validate_method_params(method, &ctx, language)?;
    }

    let mut nested = HashSet::new();
    for subtype in &def.types {
        if !nested.insert(subtype.name.as_str()) || subtype.name == def.name {
            return Err(ctx.validation_error(
                format!("nested type '{}' clashes with another name in '{}'", subtype.name, def.name),
                &subtype.name,
            ));
        }
        validate_type(subtype, &ctx, language)?;
    }
    Ok(())
}

fn validate_method_params(method: &MethodDef, ctx: &ParseContext<'_>, language: Language) -> Result<()> {
    let mut names = HashSet::new();
    for param in &method.params {
        ctx.validate_name(&param.name, "parameter", language)?;
        if !names.insert(param.name.as_str()) {
            return Err(ctx.validation_error(
                format!("parameter '{}' is declared more than once", param.name),
                &param.name,
            ));
        }
    }
    Ok(())
}

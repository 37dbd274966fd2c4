//! Lowering manifest declarations into the Java and Kotlin code models.
//!
//! Type expressions, modifiers and snippets are resolved here; the
//! `*Spec` builders of the dialect crates then apply their own checks, and any
//! error they raise is reported against the declaration that caused it.

mod java;
mod kotlin;

use std::{path::PathBuf, str::FromStr};

use codegentle_common::{
    AnnotationRef, ClassName, CodePart, CodeValue, PackageName, TypeRef, TypeVariableName,
};
use codegentle_java::JavaFile;
use codegentle_kotlin::KotlinFile;
use tracing::debug;

use crate::{
    Error, Language, Manifest, ParseContext, Result,
    definition::{Snippet, SnippetArg},
    type_expr::TypeResolver,
};

/// A lowered file, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedFile {
    Java(JavaFile),
    Kotlin(KotlinFile),
}

impl GeneratedFile {
    pub fn language(&self) -> Language {
        match self {
            GeneratedFile::Java(_) => Language::Java,
            GeneratedFile::Kotlin(_) => Language::Kotlin,
        }
    }

    pub fn package(&self) -> &PackageName {
        match self {
            GeneratedFile::Java(file) => file.package(),
            GeneratedFile::Kotlin(file) => file.package(),
        }
    }

    /// The top-level type name (Java) or file name (Kotlin).
    pub fn name(&self) -> &str {
        match self {
            GeneratedFile::Java(file) => file.type_name(),
            GeneratedFile::Kotlin(file) => file.name(),
        }
    }

    pub fn relative_path(&self) -> PathBuf {
        match self {
            GeneratedFile::Java(file) => file.relative_path(),
            GeneratedFile::Kotlin(file) => file.relative_path(),
        }
    }

    pub fn render(&self) -> codegentle_common::Result<String> {
        match self {
            GeneratedFile::Java(file) => file.render(),
            GeneratedFile::Kotlin(file) => file.render(),
        }
    }
}

pub(crate) fn lower_manifest<'m>(
    manifest: &'m Manifest,
    language: Language,
    ctx: &ParseContext<'m>,
) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::with_capacity(manifest.files.len());
    for file in &manifest.files {
        let package = PackageName::parse(&file.package);
        let file_ctx = if file.package.is_empty() {
            ctx.clone()
        } else {
            ctx.push(&file.package)
        };
        let lowering = Lowering {
            ctx: file_ctx,
            resolver: TypeResolver::new(language, package),
        };
        let generated = match language {
            Language::Java => GeneratedFile::Java(java::lower_file(file, &manifest.output, &lowering)?),
            Language::Kotlin => {
                GeneratedFile::Kotlin(kotlin::lower_file(file, &manifest.output, &lowering)?)
            }
        };
        debug!(path = %generated.relative_path().display(), "lowered file");
        files.push(generated);
    }
    Ok(files)
}

/// Resolution state while walking one declaration.
#[derive(Debug, Clone)]
pub(crate) struct Lowering<'m> {
    ctx: ParseContext<'m>,
    resolver: TypeResolver,
}

impl<'m> Lowering<'m> {
    pub(crate) fn package(&self) -> &PackageName {
        self.resolver.package()
    }

    /// Descend into a declaration that may introduce type variables.
    pub(crate) fn enter(&self, name: &'m str, type_params: &[String]) -> Self {
        Self {
            ctx: self.ctx.push(name),
            resolver: self.resolver.with_type_variables(type_params),
        }
    }

    pub(crate) fn resolve(&self, expr: &str) -> Result<TypeRef> {
        self.resolver
            .resolve(expr)
            .map_err(|reason| self.ctx.invalid_type_error(expr, reason))
    }

    pub(crate) fn resolve_class(&self, expr: &str) -> Result<ClassName> {
        self.resolver
            .resolve_class(expr)
            .map_err(|reason| self.ctx.invalid_type_error(expr, reason))
    }

    pub(crate) fn type_variables(&self, decls: &[String]) -> Result<Vec<TypeVariableName>> {
        decls
            .iter()
            .map(|decl| {
                self.resolver
                    .type_variable(decl)
                    .map_err(|reason| self.ctx.invalid_type_error(decl, reason))
            })
            .collect()
    }

    pub(crate) fn annotations(&self, exprs: &[String]) -> Result<Vec<AnnotationRef>> {
        exprs
            .iter()
            .map(|expr| Ok(AnnotationRef::new(self.resolve_class(expr)?)))
            .collect()
    }

    pub(crate) fn modifiers<M>(&self, names: &[String]) -> Result<Vec<M>>
    where
        M: FromStr<Err = Box<codegentle_common::Error>>,
    {
        names
            .iter()
            .map(|name| {
                M::from_str(name).map_err(|_| {
                    self.ctx
                        .invalid_modifier_error(name, self.resolver.language())
                })
            })
            .collect()
    }

    pub(crate) fn code(&self, snippet: &Snippet) -> Result<CodeValue> {
        match snippet {
            Snippet::Plain(text) => Ok(CodeValue::of(text.as_str())),
            Snippet::Format { format, args } => {
                let parts = args
                    .iter()
                    .map(|arg| self.code_part(arg))
                    .collect::<Result<Vec<_>>>()?;
                self.model("code", format, CodeValue::format(format, parts))
            }
        }
    }

    fn code_part(&self, arg: &SnippetArg) -> Result<CodePart> {
        Ok(match arg {
            SnippetArg::Type(expr) => CodePart::type_name(self.resolve(expr)?),
            SnippetArg::String(value) => CodePart::string(value.as_str()),
            SnippetArg::Literal(toml::Value::String(raw)) => CodePart::literal(raw),
            SnippetArg::Literal(value) => CodePart::literal(value),
            SnippetArg::Name(name) => CodePart::name(name.as_str()),
        })
    }

    pub(crate) fn codes(&self, snippets: &[Snippet]) -> Result<Vec<CodeValue>> {
        snippets.iter().map(|snippet| self.code(snippet)).collect()
    }

    /// One statement per snippet.
    pub(crate) fn statements(&self, body: &[Snippet]) -> Result<CodeValue> {
        let mut builder = CodeValue::builder();
        for snippet in body {
            builder = builder.add_statement_code(self.code(snippet)?);
        }
        Ok(builder.build())
    }

    pub(crate) fn unsupported(&self, message: impl Into<String>, near: &str) -> Box<Error> {
        self.ctx.validation_error(message, near)
    }

    /// Attach a code-model error to the declaration `name`.
    pub(crate) fn model<T>(
        &self,
        kind: &str,
        name: &str,
        result: codegentle_common::Result<T>,
    ) -> Result<T> {
        result.map_err(|source| self.ctx.model_error(kind, name, source))
    }
}

pub(crate) fn doc(doc: &Option<String>) -> Option<CodeValue> {
    doc.as_deref().map(CodeValue::of)
}

//! Collection of importable class names ahead of emission.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::trace;

use crate::{
    code::{CodePart, CodeValue, EmbeddedSpec},
    naming::{ClassName, PackageName, TypeName},
    refs::{AnnotationRef, TypeRef},
};

/// Records every top-level class referenced by a spec tree, keyed by simple
/// name. On a simple-name collision the first class wins. Classes of the
/// file's own package are never imported; their simple names are kept in
/// [`local_names`](Self::local_names) instead.
///
/// Dialect crates walk their own spec nodes and feed types, annotations and
/// code values in; embedded specs are handed back through the callback given
/// to [`visit_code_value`](Self::visit_code_value).
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    package: PackageName,
    skipped_packages: Vec<PackageName>,
    always_qualify: BTreeSet<String>,
    importable: IndexMap<String, ClassName>,
    local_names: BTreeSet<String>,
}

impl ImportCollector {
    pub fn new(package: PackageName) -> Self {
        Self {
            package,
            ..Self::default()
        }
    }

    /// Never import classes of `package` (a dialect's implicit package).
    pub fn skip_package(mut self, package: PackageName) -> Self {
        self.skipped_packages.push(package);
        self
    }

    pub fn always_qualify<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_qualify.extend(names.into_iter().map(Into::into));
        self
    }

    /// Register the top-level class of `class_name` as importable.
    pub fn add(&mut self, class_name: &ClassName) {
        let top_level = class_name.top_level_class();
        let package = top_level.package_name();
        if *package == self.package {
            self.local_names.insert(top_level.simple_name().to_string());
            return;
        }
        if package.is_empty()
            || self.skipped_packages.contains(package)
            || self.always_qualify.contains(top_level.simple_name())
            || self.always_qualify.contains(class_name.simple_name())
        {
            return;
        }
        if !self.importable.contains_key(top_level.simple_name()) {
            trace!(import = %top_level, "importable type");
            self.importable
                .insert(top_level.simple_name().to_string(), top_level.clone());
        }
    }

    pub fn visit_type_name(&mut self, type_name: &TypeName) {
        match type_name {
            TypeName::Primitive(_) => {}
            TypeName::Class(class_name) => self.add(class_name),
            TypeName::Array(array) => self.visit_type_ref(array.component()),
            TypeName::Parameterized(parameterized) => {
                let mut current = Some(parameterized);
                while let Some(p) = current {
                    for argument in p.type_arguments() {
                        self.visit_type_ref(argument);
                    }
                    current = p.enclosing();
                }
                self.add(parameterized.raw_type());
            }
            TypeName::TypeVariable(variable) => {
                for bound in variable.bounds() {
                    self.visit_type_ref(bound);
                }
            }
            TypeName::Wildcard(wildcard) => {
                for bound in wildcard.bounds() {
                    self.visit_type_ref(bound);
                }
            }
        }
    }

    pub fn visit_type_ref(&mut self, type_ref: &TypeRef) {
        for annotation in type_ref.annotations() {
            self.visit_annotation(annotation);
        }
        self.visit_type_name(type_ref.type_name());
    }

    pub fn visit_annotation(&mut self, annotation: &AnnotationRef) {
        self.add(annotation.class_name());
        for (_, values) in annotation.members() {
            for value in values {
                self.visit_code_value(value, &mut |_, _| {});
            }
        }
    }

    pub fn visit_code_value(
        &mut self,
        value: &CodeValue,
        on_embedded: &mut dyn FnMut(&mut Self, &EmbeddedSpec),
    ) {
        for part in value.parts() {
            match part {
                CodePart::Type(type_ref) => self.visit_type_ref(type_ref),
                CodePart::Annotation(annotation) => self.visit_annotation(annotation),
                CodePart::Code(nested) => self.visit_code_value(nested, on_embedded),
                CodePart::Embedded(spec) => on_embedded(self, spec),
                _ => {}
            }
        }
    }

    pub fn len(&self) -> usize {
        self.importable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.importable.is_empty()
    }

    /// Simple names of same-package classes seen so far.
    pub fn local_names(&self) -> &BTreeSet<String> {
        &self.local_names
    }

    pub fn into_imports(self) -> IndexMap<String, ClassName> {
        self.importable
    }
}

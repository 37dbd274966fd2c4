//! Fully-qualified class names, possibly nested.

use std::{cmp::Ordering, fmt};

use super::PackageName;
use crate::{Error, Result};

/// A named class, interface, enum, record or annotation type.
///
/// Equality and hashing are structural: two names built through different
/// paths (`nested_class` vs. `best_guess`) are equal when their package,
/// enclosing chain and simple name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName {
    package_name: PackageName,
    enclosing: Option<Box<ClassName>>,
    simple_name: String,
}

impl ClassName {
    /// A top-level class in `package_name`.
    pub fn new(package_name: impl Into<PackageName>, simple_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            enclosing: None,
            simple_name: simple_name.into(),
        }
    }

    /// A top-level class followed by a chain of nested simple names.
    pub fn nested(
        package_name: impl Into<PackageName>,
        top_level: impl Into<String>,
        nested: &[&str],
    ) -> Self {
        nested
            .iter()
            .fold(Self::new(package_name, top_level), |acc, name| {
                acc.nested_class(*name)
            })
    }

    /// Guess a class name from a dotted string.
    ///
    /// Leading lowercase segments are taken as the package and the remaining
    /// capitalized segments as the class chain: `java.util.Map.Entry` yields
    /// `Entry` nested in `Map` in package `java.util`.
    pub fn best_guess(name: &str) -> Result<Self> {
        let guess_error = || {
            Box::new(Error::BestGuess {
                name: name.to_string(),
            })
        };

        let mut p = 0;
        while p < name.len() && name[p..].starts_with(|c: char| c.is_lowercase()) {
            p = match name[p..].find('.') {
                Some(dot) => p + dot + 1,
                None => return Err(guess_error()),
            };
        }

        let package_name = if p == 0 {
            PackageName::EMPTY
        } else {
            PackageName::parse(&name[..p - 1])
        };

        let mut class_name: Option<ClassName> = None;
        for simple_name in name[p..].split('.') {
            if !simple_name.starts_with(|c: char| c.is_uppercase()) {
                return Err(guess_error());
            }
            class_name = Some(match class_name {
                None => ClassName::new(package_name.clone(), simple_name),
                Some(enclosing) => enclosing.nested_class(simple_name),
            });
        }
        class_name.ok_or_else(guess_error)
    }

    pub fn package_name(&self) -> &PackageName {
        &self.package_name
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// The class this one is nested in, if any.
    pub fn enclosing_class(&self) -> Option<&ClassName> {
        self.enclosing.as_deref()
    }

    /// The outermost class of the enclosing chain (`self` for top-level classes).
    pub fn top_level_class(&self) -> &ClassName {
        let mut current = self;
        while let Some(enclosing) = current.enclosing.as_deref() {
            current = enclosing;
        }
        current
    }

    pub fn is_top_level(&self) -> bool {
        self.enclosing.is_none()
    }

    /// A class named `name` nested inside this class.
    pub fn nested_class(&self, name: impl Into<String>) -> Self {
        Self {
            package_name: self.package_name.clone(),
            enclosing: Some(Box::new(self.clone())),
            simple_name: name.into(),
        }
    }

    /// A class named `name` that shares this class's enclosing scope.
    pub fn peer_class(&self, name: impl Into<String>) -> Self {
        Self {
            package_name: self.package_name.clone(),
            enclosing: self.enclosing.clone(),
            simple_name: name.into(),
        }
    }

    /// Simple names from the top-level class down to this one.
    pub fn simple_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = Some(self);
        while let Some(class) = current {
            names.push(class.simple_name.as_str());
            current = class.enclosing.as_deref();
        }
        names.reverse();
        names
    }

    /// `java.util.Map.Entry`
    pub fn canonical_name(&self) -> String {
        self.qualified_name('.')
    }

    /// `java.util.Map$Entry`
    pub fn reflection_name(&self) -> String {
        self.qualified_name('$')
    }

    fn qualified_name(&self, nested_separator: char) -> String {
        let mut out = String::new();
        if !self.package_name.is_empty() {
            out.push_str(&self.package_name.to_string());
            out.push('.');
        }
        for (i, name) in self.simple_names().iter().enumerate() {
            if i > 0 {
                out.push(nested_separator);
            }
            out.push_str(name);
        }
        out
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

impl PartialOrd for ClassName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_name().cmp(&other.canonical_name())
    }
}

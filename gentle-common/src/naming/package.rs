//! Dotted package names.

use std::{convert::Infallible, fmt, ops::Add, str::FromStr};

/// An ordered sequence of package segments, e.g. `love.forte.codegentle`.
///
/// The empty package is a regular value ([`PackageName::EMPTY`]); parsing an
/// empty string or a string made only of dots yields it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName {
    segments: Vec<String>,
}

impl PackageName {
    /// The empty (default) package.
    pub const EMPTY: Self = Self {
        segments: Vec::new(),
    };

    /// Build a package name from segments. Empty segments are dropped.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(Into::into)
            .filter(|s| !s.is_empty())
            .collect();
        Self { segments }
    }

    /// Parse a dotted string such as `"java.util"`.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() {
            return Self::EMPTY;
        }
        Self::new(value.split('.'))
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment, e.g. `util` for `java.util`.
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The first segment, e.g. `java` for `java.util`.
    pub fn top(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// The enclosing package, or `None` for a top-level or empty package.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Append a single segment.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        let segment = segment.into();
        if !segment.is_empty() {
            segments.push(segment);
        }
        Self { segments }
    }

    /// Whether `self` is `other` or nested inside it.
    pub fn starts_with(&self, other: &PackageName) -> bool {
        self.segments.starts_with(&other.segments)
    }

    /// Relative directory for sources in this package, e.g. `java/util`.
    pub fn to_path(&self) -> std::path::PathBuf {
        self.segments.iter().collect()
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for PackageName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for PackageName {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Add for PackageName {
    type Output = PackageName;

    fn add(mut self, rhs: PackageName) -> Self::Output {
        if rhs.is_empty() {
            return self;
        }
        if self.is_empty() {
            return rhs;
        }
        self.segments.extend(rhs.segments);
        self
    }
}

impl Add<&PackageName> for &PackageName {
    type Output = PackageName;

    fn add(self, rhs: &PackageName) -> Self::Output {
        self.clone() + rhs.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let name = PackageName::parse("love.forte.codegentle");
        assert_eq!(name.segments().len(), 3);
        assert_eq!(name.to_string(), "love.forte.codegentle");
        assert_eq!(name.top(), Some("love"));
        assert_eq!(name.last_segment(), Some("codegentle"));
    }

    #[test]
    fn test_empty_is_canonical() {
        assert_eq!(PackageName::parse(""), PackageName::EMPTY);
        assert_eq!(PackageName::parse("..."), PackageName::EMPTY);
        assert_eq!(PackageName::default(), PackageName::EMPTY);
        assert!(PackageName::EMPTY.is_empty());
        assert_eq!(PackageName::EMPTY.to_string(), "");
    }

    #[test]
    fn test_add_with_empty_returns_other() {
        let util = PackageName::parse("java.util");
        assert_eq!(util.clone() + PackageName::EMPTY, util);
        assert_eq!(PackageName::EMPTY + util.clone(), util);
        assert_eq!(
            (PackageName::parse("java") + PackageName::parse("util.concurrent")).to_string(),
            "java.util.concurrent"
        );
    }

    #[test]
    fn test_parent_and_join() {
        let name = PackageName::parse("java.util.concurrent");
        assert_eq!(name.parent(), Some(PackageName::parse("java.util")));
        assert_eq!(PackageName::parse("java").parent(), None);
        assert_eq!(PackageName::parse("java").join("lang").to_string(), "java.lang");
        assert!(name.starts_with(&PackageName::parse("java.util")));
        assert_eq!(
            name.to_path(),
            std::path::PathBuf::from("java").join("util").join("concurrent")
        );
    }
}

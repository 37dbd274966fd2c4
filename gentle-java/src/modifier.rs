//! Java declaration modifiers.

use std::{fmt, str::FromStr};

use codegentle_common::Error;

/// A Java modifier. The declaration order is the order in which modifiers
/// are written, so a `BTreeSet<JavaModifier>` iterates canonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JavaModifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
    Sealed,
    NonSealed,
}

impl JavaModifier {
    pub const ALL: [JavaModifier; 14] = [
        Self::Public,
        Self::Protected,
        Self::Private,
        Self::Abstract,
        Self::Default,
        Self::Static,
        Self::Final,
        Self::Transient,
        Self::Volatile,
        Self::Synchronized,
        Self::Native,
        Self::Strictfp,
        Self::Sealed,
        Self::NonSealed,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Abstract => "abstract",
            Self::Default => "default",
            Self::Static => "static",
            Self::Final => "final",
            Self::Transient => "transient",
            Self::Volatile => "volatile",
            Self::Synchronized => "synchronized",
            Self::Native => "native",
            Self::Strictfp => "strictfp",
            Self::Sealed => "sealed",
            Self::NonSealed => "non-sealed",
        }
    }
}

impl fmt::Display for JavaModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for JavaModifier {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|m| m.keyword() == normalized)
            .ok_or_else(|| Error::invalid_name("java modifier", s))
    }
}

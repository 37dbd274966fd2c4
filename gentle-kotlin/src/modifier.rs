//! Kotlin declaration modifiers.

use std::{fmt, str::FromStr};

use codegentle_common::Error;

/// A Kotlin modifier, declared in the conventional writing order so that a
/// `BTreeSet<KotlinModifier>` iterates the way the compiler's style guide
/// lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KotlinModifier {
    Public,
    Protected,
    Private,
    Internal,
    Expect,
    Actual,
    Final,
    Open,
    Abstract,
    Sealed,
    Const,
    External,
    Override,
    Lateinit,
    Tailrec,
    Vararg,
    Suspend,
    Inner,
    Enum,
    Annotation,
    Value,
    Fun,
    Companion,
    Inline,
    Noinline,
    Crossinline,
    Reified,
    Infix,
    Operator,
    Data,
    In,
    Out,
}

impl KotlinModifier {
    pub const ALL: [KotlinModifier; 32] = [
        Self::Public,
        Self::Protected,
        Self::Private,
        Self::Internal,
        Self::Expect,
        Self::Actual,
        Self::Final,
        Self::Open,
        Self::Abstract,
        Self::Sealed,
        Self::Const,
        Self::External,
        Self::Override,
        Self::Lateinit,
        Self::Tailrec,
        Self::Vararg,
        Self::Suspend,
        Self::Inner,
        Self::Enum,
        Self::Annotation,
        Self::Value,
        Self::Fun,
        Self::Companion,
        Self::Inline,
        Self::Noinline,
        Self::Crossinline,
        Self::Reified,
        Self::Infix,
        Self::Operator,
        Self::Data,
        Self::In,
        Self::Out,
    ];

    pub const VISIBILITY: [KotlinModifier; 4] =
        [Self::Public, Self::Protected, Self::Private, Self::Internal];

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Internal => "internal",
            Self::Expect => "expect",
            Self::Actual => "actual",
            Self::Final => "final",
            Self::Open => "open",
            Self::Abstract => "abstract",
            Self::Sealed => "sealed",
            Self::Const => "const",
            Self::External => "external",
            Self::Override => "override",
            Self::Lateinit => "lateinit",
            Self::Tailrec => "tailrec",
            Self::Vararg => "vararg",
            Self::Suspend => "suspend",
            Self::Inner => "inner",
            Self::Enum => "enum",
            Self::Annotation => "annotation",
            Self::Value => "value",
            Self::Fun => "fun",
            Self::Companion => "companion",
            Self::Inline => "inline",
            Self::Noinline => "noinline",
            Self::Crossinline => "crossinline",
            Self::Reified => "reified",
            Self::Infix => "infix",
            Self::Operator => "operator",
            Self::Data => "data",
            Self::In => "in",
            Self::Out => "out",
        }
    }

    pub fn is_visibility(&self) -> bool {
        Self::VISIBILITY.contains(self)
    }
}

impl fmt::Display for KotlinModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for KotlinModifier {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.keyword() == normalized)
            .ok_or_else(|| Error::invalid_name("kotlin modifier", s))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_set_iterates_in_conventional_order() {
        let set: BTreeSet<KotlinModifier> = [
            KotlinModifier::Data,
            KotlinModifier::Override,
            KotlinModifier::Suspend,
            KotlinModifier::Internal,
        ]
        .into_iter()
        .collect();
        let written: Vec<&str> = set.iter().map(KotlinModifier::keyword).collect();
        assert_eq!(written, vec!["internal", "override", "suspend", "data"]);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("LATEINIT".parse::<KotlinModifier>().unwrap(), KotlinModifier::Lateinit);
        assert!("static".parse::<KotlinModifier>().is_err());
        assert!(KotlinModifier::Private.is_visibility());
        assert!(!KotlinModifier::Open.is_visibility());
    }
}

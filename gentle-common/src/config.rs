//! Writer configuration: indentation and column limit.

use serde::{Deserialize, Serialize};

const SPACES: &str = "                ";

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IndentRepr", into = "IndentRepr")]
pub enum Indent {
    /// Spaces with the specified width (1 to 16).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation (Java, Kotlin).
    pub const JAVA: Self = Self::Spaces(4);

    /// 2-space indentation.
    pub const COMPACT: Self = Self::Spaces(2);

    /// The string written for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(width) => &SPACES[..usize::from(*width).clamp(1, SPACES.len())],
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::JAVA
    }
}

/// `indent = 4` or `indent = "tab"` in TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum IndentRepr {
    Width(u8),
    Name(String),
}

impl TryFrom<IndentRepr> for Indent {
    type Error = String;

    fn try_from(value: IndentRepr) -> Result<Self, Self::Error> {
        match value {
            IndentRepr::Width(width) if (1..=16).contains(&width) => Ok(Indent::Spaces(width)),
            IndentRepr::Width(width) => Err(format!("indent width must be 1..=16, got {width}")),
            IndentRepr::Name(name) if name.eq_ignore_ascii_case("tab") => Ok(Indent::Tab),
            IndentRepr::Name(name) => Err(format!("unknown indent '{name}', expected a width or \"tab\"")),
        }
    }
}

impl From<Indent> for IndentRepr {
    fn from(value: Indent) -> Self {
        match value {
            Indent::Spaces(width) => IndentRepr::Width(width),
            Indent::Tab => IndentRepr::Name("tab".to_string()),
        }
    }
}

/// Settings shared by every dialect writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    pub indent: Indent,
    /// Column at which wrapping spaces turn into newlines.
    pub column_limit: usize,
}

impl WriterConfig {
    pub const UNLIMITED: usize = usize::MAX;

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_column_limit(mut self, column_limit: usize) -> Self {
        self.column_limit = column_limit;
        self
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            column_limit: Self::UNLIMITED,
        }
    }
}

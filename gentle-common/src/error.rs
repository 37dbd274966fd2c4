use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for model construction and emission (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("missing argument at index {index} for format '{format}'")]
    #[diagnostic(
        code(codegentle::missing_argument),
        help("every '%V' placeholder consumes exactly one argument")
    )]
    MissingArgument { format: String, index: usize },

    #[error("{count} redundant argument(s) for format '{format}'")]
    #[diagnostic(
        code(codegentle::redundant_argument),
        help("remove the extra arguments or add matching '%V' placeholders")
    )]
    RedundantArgument { format: String, count: usize },

    #[error("cannot unindent {levels} from {current}")]
    #[diagnostic(code(codegentle::unindent_underflow))]
    UnindentUnderflow { levels: usize, current: usize },

    #[error("invalid {kind} name '{name}'")]
    #[diagnostic(
        code(codegentle::invalid_name),
        help("names must be identifiers and must not be reserved keywords")
    )]
    InvalidName { kind: String, name: String },

    #[error("'{type_name}' cannot be used here: {reason}")]
    #[diagnostic(code(codegentle::invalid_type))]
    InvalidType { type_name: String, reason: String },

    #[error("couldn't make a guess for '{name}'")]
    #[diagnostic(
        code(codegentle::best_guess),
        help("use lowercase package segments followed by capitalized class names, e.g. 'java.util.Map.Entry'")
    )]
    BestGuess { name: String },

    #[error("{message}")]
    #[diagnostic(code(codegentle::illegal_state))]
    IllegalState { message: String },

    #[error("'{name}' is not a valid {dialect} source name")]
    #[diagnostic(code(codegentle::rejected_name))]
    RejectedName { dialect: String, name: String },

    #[error("failed to write rendered source")]
    #[diagnostic(code(codegentle::write))]
    Write(#[source] fmt::Error),
}

impl Error {
    pub fn invalid_name(kind: impl Into<String>, name: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidName {
            kind: kind.into(),
            name: name.into(),
        })
    }

    pub fn invalid_type(type_name: impl fmt::Display, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidType {
            type_name: type_name.to_string(),
            reason: reason.into(),
        })
    }

    pub fn illegal_state(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::IllegalState {
            message: message.into(),
        })
    }

    pub fn rejected_name(dialect: impl Into<String>, name: impl Into<String>) -> Box<Self> {
        Box::new(Error::RejectedName {
            dialect: dialect.into(),
            name: name.into(),
        })
    }
}

impl From<fmt::Error> for Box<Error> {
    fn from(source: fmt::Error) -> Self {
        Box::new(Error::Write(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::MissingArgument {
            format: "%V.%V".to_string(),
            index: 1,
        };
        assert_eq!(err.to_string(), "missing argument at index 1 for format '%V.%V'");

        let err = Error::UnindentUnderflow {
            levels: 2,
            current: 1,
        };
        assert_eq!(err.to_string(), "cannot unindent 2 from 1");
    }

    #[test]
    fn test_fmt_error_converts() {
        let boxed: Box<Error> = fmt::Error.into();
        assert!(matches!(*boxed, Error::Write(_)));
    }
}

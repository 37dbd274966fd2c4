//! Code values: format-driven sequences of parts describing statements and
//! expressions.

mod part;
mod value;

pub use part::{CodePart, EmbeddedSpec, PLACEHOLDER};
pub use value::{CodeValue, CodeValueBuilder};

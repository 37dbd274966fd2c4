//! Dialect-independent emission: line wrapping, indentation, comments,
//! name lookup and import bookkeeping.

mod code_writer;
mod dialect;
mod imports;
mod line_wrapper;

pub use code_writer::{CodeWriter, TypeScope, WriterOutput, emit_with_late_imports};
pub use dialect::Dialect;
pub use imports::ImportCollector;
pub use line_wrapper::LineWrapper;

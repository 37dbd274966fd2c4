//! Java declarations.
//!
//! Every spec is immutable once built; builders validate on `build()`.

mod field;
mod method;
mod parameter;
mod type_spec;

pub use field::{JavaFieldSpec, JavaFieldSpecBuilder};
pub use method::{JavaMethodSpec, JavaMethodSpecBuilder};
pub use parameter::{JavaParameterSpec, JavaParameterSpecBuilder};
pub use type_spec::{JavaTypeKind, JavaTypeSpec, JavaTypeSpecBuilder};

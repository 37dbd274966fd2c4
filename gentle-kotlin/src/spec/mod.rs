//! Kotlin declarations.
//!
//! Every spec is immutable once built; builders validate on `build()`.

mod constructor;
mod function;
mod parameter;
mod property;
mod type_spec;

pub use constructor::{
    ConstructorDelegation, DelegationKind, KotlinConstructorSpec, KotlinConstructorSpecBuilder,
};
pub(crate) use function::doc_with_parameters;
pub use function::{ContextParameter, KotlinFunctionSpec, KotlinFunctionSpecBuilder};
pub use parameter::{KotlinValueParameterSpec, KotlinValueParameterSpecBuilder, Mutability};
pub use property::{KotlinPropertySpec, KotlinPropertySpecBuilder};
pub use type_spec::{KotlinTypeKind, KotlinTypeSpec, KotlinTypeSpecBuilder};

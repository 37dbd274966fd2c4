//! Type and annotation references: naming entities paired with the metadata
//! attached at the point of use.

mod annotation;
mod type_ref;

pub use annotation::{AnnotationRef, AnnotationRefBuilder};
pub use type_ref::{TypeRef, TypeRefStatus};

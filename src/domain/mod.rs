//! Core domain types: type descriptors, field kinds, override contexts.

pub mod context;
pub mod descriptor;
pub mod kind;

pub use context::{ContextEntry, ContextTree, FieldContext, FormOptions};
pub use descriptor::{EnumDescriptor, FieldDescriptor, ModelDescriptor, TypeExpr};
pub use kind::FieldKind;

//! # Formgen - schema-driven HTML form generation
//!
//! Formgen introspects a typed data-model description (or an equivalent
//! parsed JSON-Schema document) and renders an editable HTML form matching
//! the model's shape: nested objects, enumerations, discriminated unions,
//! lists and primitives, with no per-field templates.
//!
//! ## Quick start
//!
//! ```rust
//! use formgen::domain::{FieldDescriptor, FormOptions, ModelDescriptor, TypeExpr};
//!
//! let model = ModelDescriptor::new(
//!     "Login",
//!     vec![
//!         FieldDescriptor::required("username", TypeExpr::String),
//!         FieldDescriptor::required("remember_me", TypeExpr::Boolean),
//!     ],
//! );
//!
//! let markup = formgen::render_form(&model, None, &FormOptions::default());
//! assert!(markup.contains("name=\"username\""));
//! ```
//!
//! ## Architecture
//!
//! - **domain**: type descriptors, the closed field-kind classification,
//!   per-path override contexts
//! - **schema**: parsed JSON-Schema document types (the collaborator
//!   interface to the out-of-scope schema-loading layer)
//! - **generator**: the two recursive form-tree builders
//! - **markup**: the renderable tag tree and its serialization contract
//!
//! Generation is pure and synchronous: no I/O, no global state, safe to
//! call concurrently. Unsupported field shapes render visible inline
//! placeholders instead of failing, so a form with one odd field still
//! shows every other field.

pub mod domain;
pub mod error;
pub mod generator;
pub mod markup;
pub mod schema;

pub use domain::{
    ContextEntry, ContextTree, EnumDescriptor, FieldContext, FieldDescriptor, FieldKind,
    FormOptions, ModelDescriptor, TypeExpr,
};
pub use error::FormError;
pub use generator::{generate_form, generate_schema_form, SchemaFormOptions};
pub use markup::Tag;
pub use schema::{SchemaModel, SchemaProperty, SchemaType};

use serde_json::Value;

/// Guarded wrapper around [`generate_form`]: serializes the tag tree, and
/// on a generation failure substitutes an escaped plain-text error block
/// instead of partial markup.
pub fn render_form(
    model: &ModelDescriptor,
    instance: Option<&Value>,
    options: &FormOptions,
) -> String {
    match generator::generate_form(model, instance, options) {
        Ok(tag) => tag.to_string(),
        Err(error) => render_error(&error),
    }
}

/// Guarded wrapper around [`generate_schema_form`].
pub fn render_schema_form(schema: &SchemaModel, options: &SchemaFormOptions) -> String {
    match generator::generate_schema_form(schema, options) {
        Ok(tag) => tag.to_string(),
        Err(error) => render_error(&error),
    }
}

fn render_error(error: &FormError) -> String {
    tracing::error!(%error, "form generation failed");
    format!(
        "<pre>{}</pre>",
        markup::tags::escape_angle(&error.to_string())
    )
}

//! Per-path override contexts.
//!
//! A context tree mirrors the model's nesting: each node addresses one
//! field by name and either carries overrides for that field (extra
//! attributes, a forced kind) or a nested tree for its sub-model. The
//! builders pass the matching child down each recursive call; fields with
//! no entry get an empty context. Contexts are read-only during
//! generation, and the empty context is constructed explicitly per call
//! rather than shared.

use crate::domain::kind::FieldKind;
use crate::markup::AttrMap;
use indexmap::IndexMap;

/// Overrides for a single field.
#[derive(Debug, Clone, Default)]
pub struct FieldContext {
    /// Extra HTML attributes merged into the field's widget; built-in
    /// attributes win on key collision
    pub attributes: AttrMap,
    /// Forces the field kind, short-circuiting classification when not
    /// [`FieldKind::Unknown`]
    pub override_kind: FieldKind,
}

impl FieldContext {
    pub fn forced(kind: FieldKind) -> Self {
        Self {
            attributes: AttrMap::new(),
            override_kind: kind,
        }
    }

    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<crate::markup::AttrValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// One entry in a context tree: either overrides for the field itself or
/// a nested tree for the field's sub-model.
#[derive(Debug, Clone)]
pub enum ContextEntry {
    Field(FieldContext),
    Nested(ContextTree),
}

/// Per-child override contexts, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct ContextTree {
    pub children: IndexMap<String, ContextEntry>,
}

impl ContextTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the entry registered under `field_name`, if any.
    pub fn child(&self, field_name: &str) -> Option<&ContextEntry> {
        self.children.get(field_name)
    }

    pub fn with_field(mut self, name: impl Into<String>, context: FieldContext) -> Self {
        self.children
            .insert(name.into(), ContextEntry::Field(context));
        self
    }

    pub fn with_nested(mut self, name: impl Into<String>, tree: ContextTree) -> Self {
        self.children.insert(name.into(), ContextEntry::Nested(tree));
        self
    }
}

/// Top-level options for the model-driven generator.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    pub form_id: String,
    pub form_class: String,
    /// Forces `disabled` on every leaf input, at every nesting depth
    pub readonly: bool,
    /// Dotted field paths whose inputs render disabled
    pub disabled_fields: Vec<String>,
    pub contexts: ContextTree,
}

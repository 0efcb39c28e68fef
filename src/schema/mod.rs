//! Parsed JSON-Schema document types.
//!
//! These types are the collaborator interface to the schema-loading layer:
//! the generator consumes an already-deserialized [`SchemaModel`], it never
//! reads raw schema text itself. The shapes mirror what a typical
//! model-to-JSON-Schema exporter emits: a root object with `properties`, a
//! `definitions` table reached through `$ref`/`allOf` indirection, and
//! `anyOf` lists of references for polymorphic fields.
//!
//! Property and definition maps are [`IndexMap`]s on purpose: forms render
//! fields in schema declaration order, so order must survive parsing. The
//! crate enables serde_json's `preserve_order` feature for the same reason;
//! without it any document routed through an intermediate
//! [`serde_json::Value`] comes out key-sorted before these maps ever see it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared `type` of a schema node.
///
/// `textarea` and `html` are custom types layered on top of plain JSON
/// Schema; anything unrecognized parses as [`SchemaType::Unknown`] instead
/// of failing, matching the classifier's graceful-degradation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchemaType {
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "array")]
    Array,
    #[serde(rename = "class")]
    Class,

    // custom types
    #[serde(rename = "textarea")]
    Textarea,
    #[serde(rename = "html")]
    Html,

    #[default]
    #[serde(rename = "", other)]
    Unknown,
}

/// Declared `format` of a string-typed schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaFormat {
    #[serde(rename = "uuid")]
    Uuid,
    #[serde(rename = "date-time")]
    DateTime,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "time-delta")]
    TimeDelta,
    #[serde(rename = "binary")]
    Binary,
    #[serde(other)]
    Other,
}

/// One property of an object schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaProperty {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub property_type: SchemaType,

    #[serde(default)]
    pub format: Option<SchemaFormat>,
    #[serde(default)]
    pub default: Option<Value>,

    /// Union branches, each a `{"$ref": "#/definitions/Name"}` object
    #[serde(rename = "anyOf", default)]
    pub any_of: Option<Vec<Value>>,

    #[serde(rename = "additionalProperties", default)]
    pub additional_properties: Option<Value>,

    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<String>>,

    #[serde(rename = "uniqueItems", default)]
    pub unique_items: Option<bool>,

    #[serde(rename = "const", default)]
    pub const_value: Option<String>,

    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,

    /// Single-element `allOf` wrapping, the usual exporter spelling for a
    /// referenced definition with sibling keywords
    #[serde(rename = "allOf", default)]
    pub all_of: Option<Vec<Value>>,

    #[serde(default)]
    pub items: Option<Value>,
}

impl SchemaProperty {
    /// The reference this property resolves through, if any: a direct
    /// `$ref` or the first element of an `allOf` wrapper.
    pub fn some_ref(&self) -> Option<&str> {
        if let Some(reference) = &self.reference {
            return Some(reference);
        }
        self.all_of
            .as_ref()
            .and_then(|all_of| all_of.first())
            .and_then(ref_target)
    }

    pub fn is_class(&self) -> bool {
        self.reference.is_some() || self.all_of.is_some()
    }
}

/// A parsed schema document (or one entry of a `definitions` table).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaModel {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub model_type: SchemaType,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub properties: IndexMap<String, SchemaProperty>,

    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<String>>,

    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default)]
    pub definitions: IndexMap<String, SchemaModel>,
}

/// Extract the raw `$ref` target from a `{"$ref": "..."}` object.
pub fn ref_target(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}

/// Last path segment of a `$ref` target, i.e. the definition name
/// (`#/definitions/Enumed` -> `Enumed`).
pub fn ref_name(target: &str) -> &str {
    target.rsplit('/').next().unwrap_or(target)
}

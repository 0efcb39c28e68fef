//! Explicit type descriptors for the model-driven generator.
//!
//! Rust has no runtime reflection, so the shape of a data model is handed
//! to the generator as an explicit value: a [`ModelDescriptor`] carrying an
//! ordered list of [`FieldDescriptor`]s, each with a [`TypeExpr`] type
//! expression. An out-of-scope adapter (derive macro, schema importer,
//! hand-written registry) produces these from whatever the host application
//! uses as its source of truth.

use serde_json::Value;
use std::fmt::Write as _;
use std::sync::Arc;

/// Declared type expression of a single model field.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    String,
    /// Identifier-like scalar, rendered as a text input
    Uuid,
    Boolean,
    Integer,
    Float,
    /// Fixed-value type; rendered as a disabled text input
    Literal(Value),
    Enum(EnumDescriptor),
    List(Box<TypeExpr>),
    Dict(Box<TypeExpr>, Box<TypeExpr>),
    Model(Arc<ModelDescriptor>),
    Union(Vec<TypeExpr>),
    /// The "no value" marker that appears inside optional unions
    None,
    Unknown,
}

impl TypeExpr {
    pub fn list(element: TypeExpr) -> Self {
        TypeExpr::List(Box::new(element))
    }

    pub fn dict(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Dict(Box::new(key), Box::new(value))
    }

    pub fn model(descriptor: ModelDescriptor) -> Self {
        TypeExpr::Model(Arc::new(descriptor))
    }

    /// An optional wrapper is a union that includes the "no value" marker.
    pub fn is_optional(&self) -> bool {
        match self {
            TypeExpr::Union(branches) => branches.iter().any(|b| matches!(b, TypeExpr::None)),
            _ => false,
        }
    }

    /// Compact human-readable rendering used in diagnostic placeholders.
    pub fn describe(&self) -> String {
        match self {
            TypeExpr::String => "str".to_string(),
            TypeExpr::Uuid => "uuid".to_string(),
            TypeExpr::Boolean => "bool".to_string(),
            TypeExpr::Integer => "int".to_string(),
            TypeExpr::Float => "float".to_string(),
            TypeExpr::Literal(value) => format!("literal[{}]", value),
            TypeExpr::Enum(descriptor) => descriptor.name.clone(),
            TypeExpr::List(element) => format!("list[{}]", element.describe()),
            TypeExpr::Dict(key, value) => {
                format!("dict[{}, {}]", key.describe(), value.describe())
            }
            TypeExpr::Model(descriptor) => descriptor.name.clone(),
            TypeExpr::Union(branches) => {
                let mut out = String::new();
                for (index, branch) in branches.iter().enumerate() {
                    if index > 0 {
                        let _ = write!(out, " | ");
                    }
                    let _ = write!(out, "{}", branch.describe());
                }
                out
            }
            TypeExpr::None => "None".to_string(),
            TypeExpr::Unknown => "unknown".to_string(),
        }
    }
}

/// An enumeration type: its name plus the serialized form of each member,
/// in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    pub name: String,
    pub members: Vec<String>,
}

impl EnumDescriptor {
    pub fn new(name: impl Into<String>, members: &[&str]) -> Self {
        Self {
            name: name.into(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Metadata about one model field, derived on demand at form-build time.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    /// Wire name; differs from `name` when the schema aliases the field
    pub alias: Option<String>,
    pub declared: TypeExpr,
    pub default: Option<Value>,
    /// Used as the input placeholder when present
    pub description: Option<String>,
    pub required: bool,
}

impl FieldDescriptor {
    pub fn required(name: impl Into<String>, declared: TypeExpr) -> Self {
        Self {
            name: name.into(),
            alias: None,
            declared,
            default: None,
            description: None,
            required: true,
        }
    }

    pub fn with_default(name: impl Into<String>, declared: TypeExpr, default: Value) -> Self {
        Self {
            name: name.into(),
            alias: None,
            declared,
            default: Some(default),
            description: None,
            required: false,
        }
    }

    pub fn aliased(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Name used on the wire: the alias when present, the field name
    /// otherwise. Form paths are built from wire names.
    pub fn wire_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// One model type: its name and its fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_detection() {
        let optional = TypeExpr::Union(vec![TypeExpr::String, TypeExpr::None]);
        assert!(optional.is_optional());

        let plain_union = TypeExpr::Union(vec![TypeExpr::String, TypeExpr::Boolean]);
        assert!(!plain_union.is_optional());
        assert!(!TypeExpr::String.is_optional());
    }

    #[test]
    fn test_describe_nested() {
        let expr = TypeExpr::dict(TypeExpr::Uuid, TypeExpr::list(TypeExpr::Integer));
        assert_eq!(expr.describe(), "dict[uuid, list[int]]");

        let union = TypeExpr::Union(vec![TypeExpr::String, TypeExpr::None]);
        assert_eq!(union.describe(), "str | None");

        assert_eq!(TypeExpr::Literal(json!("fixed")).describe(), "literal[\"fixed\"]");
    }

    #[test]
    fn test_wire_name_prefers_alias() {
        let field =
            FieldDescriptor::required("some_aliased", TypeExpr::String).aliased("someAliased");
        assert_eq!(field.wire_name(), "someAliased");

        let plain = FieldDescriptor::required("some_str", TypeExpr::String);
        assert_eq!(plain.wire_name(), "some_str");
    }
}

//! Field kind classification.
//!
//! Every field resolves to exactly one [`FieldKind`] before a widget is
//! chosen. Classification is a pure, total function over the declared type
//! expression: unrecognized shapes fall through to [`FieldKind::Unknown`]
//! and render as a visible placeholder, never an error.

use crate::domain::descriptor::TypeExpr;

/// Closed classification of a field's renderable shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Unknown,

    NestedModel,

    Number,
    Boolean,
    String,

    List,
    Dict,

    Enum,
    EnumList,

    Literal,

    GenericUnion,

    NestedUnion,

    // Special kinds, reachable only through a context override or a
    // custom schema type, never through classification
    Textarea,
    Html,
}

impl FieldKind {
    /// Classify a declared type expression.
    ///
    /// The arms are ordered: shapes overlap (a union of model types is
    /// structurally a union but renders as a class selector, not as a
    /// generic-union placeholder), so the first matching rule wins.
    ///
    /// Optional wrappers (`T | None`) are not unwrapped here; the builders
    /// detect them with [`TypeExpr::is_optional`] before classification and
    /// render an explicit placeholder. Unwrapping the underlying type is a
    /// known gap, not implemented on purpose.
    pub fn classify(declared: &TypeExpr) -> Self {
        match declared {
            TypeExpr::Union(branches) => {
                if !branches.is_empty()
                    && branches.iter().all(|b| matches!(b, TypeExpr::Model(_)))
                {
                    FieldKind::NestedUnion
                } else {
                    FieldKind::GenericUnion
                }
            }
            TypeExpr::Literal(_) => FieldKind::Literal,
            TypeExpr::Enum(_) => FieldKind::Enum,
            TypeExpr::List(element) if matches!(**element, TypeExpr::Enum(_)) => {
                FieldKind::EnumList
            }
            TypeExpr::Dict(_, _) => FieldKind::Dict,
            TypeExpr::List(_) => FieldKind::List,
            TypeExpr::String | TypeExpr::Uuid => FieldKind::String,
            TypeExpr::Boolean => FieldKind::Boolean,
            TypeExpr::Integer | TypeExpr::Float => FieldKind::Number,
            TypeExpr::Model(_) => FieldKind::NestedModel,
            TypeExpr::None | TypeExpr::Unknown => FieldKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::descriptor::{EnumDescriptor, ModelDescriptor};

    fn sample_model(name: &str) -> TypeExpr {
        TypeExpr::model(ModelDescriptor::new(name, vec![]))
    }

    fn sample_enum() -> TypeExpr {
        TypeExpr::Enum(EnumDescriptor::new("Enumed", &["val1", "val2", "val3"]))
    }

    #[test]
    fn test_scalars() {
        assert_eq!(FieldKind::classify(&TypeExpr::String), FieldKind::String);
        assert_eq!(FieldKind::classify(&TypeExpr::Uuid), FieldKind::String);
        assert_eq!(FieldKind::classify(&TypeExpr::Boolean), FieldKind::Boolean);
        assert_eq!(FieldKind::classify(&TypeExpr::Integer), FieldKind::Number);
        assert_eq!(FieldKind::classify(&TypeExpr::Float), FieldKind::Number);
    }

    #[test]
    fn test_union_of_models_is_nested_union() {
        let union = TypeExpr::Union(vec![sample_model("A"), sample_model("B")]);
        assert_eq!(FieldKind::classify(&union), FieldKind::NestedUnion);
    }

    #[test]
    fn test_mixed_union_is_generic() {
        let union = TypeExpr::Union(vec![sample_model("A"), TypeExpr::String]);
        assert_eq!(FieldKind::classify(&union), FieldKind::GenericUnion);

        let scalar_union = TypeExpr::Union(vec![TypeExpr::String, TypeExpr::Boolean]);
        assert_eq!(FieldKind::classify(&scalar_union), FieldKind::GenericUnion);
    }

    #[test]
    fn test_empty_union_is_generic() {
        assert_eq!(
            FieldKind::classify(&TypeExpr::Union(vec![])),
            FieldKind::GenericUnion
        );
    }

    #[test]
    fn test_enum_before_list() {
        assert_eq!(FieldKind::classify(&sample_enum()), FieldKind::Enum);
        assert_eq!(
            FieldKind::classify(&TypeExpr::list(sample_enum())),
            FieldKind::EnumList
        );
        assert_eq!(
            FieldKind::classify(&TypeExpr::list(TypeExpr::String)),
            FieldKind::List
        );
    }

    #[test]
    fn test_dict_and_model() {
        assert_eq!(
            FieldKind::classify(&TypeExpr::dict(TypeExpr::Uuid, TypeExpr::String)),
            FieldKind::Dict
        );
        assert_eq!(
            FieldKind::classify(&sample_model("Sub")),
            FieldKind::NestedModel
        );
    }

    #[test]
    fn test_unrecognized_shapes_are_unknown() {
        assert_eq!(FieldKind::classify(&TypeExpr::Unknown), FieldKind::Unknown);
        assert_eq!(FieldKind::classify(&TypeExpr::None), FieldKind::Unknown);
    }

    #[test]
    fn test_literal_before_scalar() {
        let literal = TypeExpr::Literal(serde_json::json!("BaseSubModel"));
        assert_eq!(FieldKind::classify(&literal), FieldKind::Literal);
    }
}

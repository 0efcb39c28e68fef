//! Form tree builders.
//!
//! Two variants produce the same markup contract from different inputs:
//!
//! - [`model_form`] walks an explicit [`ModelDescriptor`](crate::domain::ModelDescriptor);
//! - [`schema_form`] walks a parsed JSON-Schema [`SchemaModel`](crate::schema::SchemaModel)
//!   and resolves `$ref`/`allOf` indirection through its `definitions` table.
//!
//! Both are pure, synchronous and stateless per call: no I/O, no shared
//! mutable state, safe to run concurrently for independent inputs.

pub mod model_form;
pub mod schema_form;

#[cfg(test)]
mod model_form_test;

pub use model_form::generate_form;
pub use schema_form::{generate_schema_form, SchemaFormOptions};

use crate::markup::tags::escape_angle;
use crate::markup::{AttrMap, AttrValue, Button, CommonAttrs, Tag};
use serde_json::Value;

/// Submit control appended after the field rows of every generated form.
pub(crate) fn submit_button() -> Tag {
    let mut extra = AttrMap::new();
    extra.insert("accesskey".to_string(), AttrValue::from("s"));
    Tag::Button(Button {
        common: CommonAttrs {
            class: "btn btn-primary btn-block mt-3".to_string(),
            extra,
            ..Default::default()
        },
        input_type: "submit".to_string(),
        value: "submit".to_string(),
        ..Default::default()
    })
}

/// Visible inline placeholder for unsupported shapes and broken
/// references. Angle brackets are escaped so raw type descriptions cannot
/// break the surrounding document.
pub(crate) fn diagnostic(text: &str) -> Tag {
    Tag::Raw(format!("<pre> {} </pre>", escape_angle(text)))
}

/// Merge caller-supplied attributes into a widget's built-in set.
/// Built-in keys win on collision: the selector wiring (`data-propname`,
/// `data-ref`) is not overridable.
pub(crate) fn merge_attrs(mut built_in: AttrMap, extra: &AttrMap) -> AttrMap {
    for (name, value) in extra {
        if !built_in.contains_key(name) {
            built_in.insert(name.clone(), value.clone());
        }
    }
    built_in
}

/// Dotted form path: `root.wire` with no leading dot at the root.
pub(crate) fn compose_path(path_root: Option<&str>, wire_name: &str) -> String {
    match path_root {
        Some(root) => format!("{}.{}", root, wire_name),
        None => wire_name.to_string(),
    }
}

/// Stringified form of a resolved value, `None` for absent/null.
pub(crate) fn display_value(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(other) => Some(other.to_string()),
    }
}

/// Truthy coercion used for checkbox state.
pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(entries)) => !entries.is_empty(),
        None | Some(Value::Null) => false,
    }
}

/// Field label: underscores to spaces, first letter capitalized, the rest
/// lowercased.
pub(crate) fn pretty_label(field_name: &str) -> String {
    let spaced = field_name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compose_path() {
        assert_eq!(compose_path(None, "integer"), "integer");
        assert_eq!(compose_path(Some("sub"), "integer"), "sub.integer");
        assert_eq!(compose_path(Some("a.b"), "c"), "a.b.c");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(None), None);
        assert_eq!(display_value(Some(&Value::Null)), None);
        assert_eq!(display_value(Some(&json!("text"))), Some("text".to_string()));
        assert_eq!(display_value(Some(&json!(1337))), Some("1337".to_string()));
        assert_eq!(display_value(Some(&json!(true))), Some("true".to_string()));
    }

    #[test]
    fn test_truthy() {
        assert!(truthy(Some(&json!(true))));
        assert!(truthy(Some(&json!(1))));
        assert!(truthy(Some(&json!("x"))));
        assert!(!truthy(Some(&json!(false))));
        assert!(!truthy(Some(&json!(0))));
        assert!(!truthy(Some(&json!(""))));
        assert!(!truthy(Some(&Value::Null)));
        assert!(!truthy(None));
    }

    #[test]
    fn test_pretty_label() {
        assert_eq!(pretty_label("some_initialized_str"), "Some initialized str");
        assert_eq!(pretty_label("some_WTF_list"), "Some wtf list");
        assert_eq!(pretty_label(""), "");
    }

    #[test]
    fn test_merge_attrs_built_in_wins() {
        let mut built_in = AttrMap::new();
        built_in.insert("data-propname".to_string(), AttrValue::from("sub"));
        let mut extra = AttrMap::new();
        extra.insert("data-propname".to_string(), AttrValue::from("spoofed"));
        extra.insert("readonly".to_string(), AttrValue::Flag(true));

        let merged = merge_attrs(built_in, &extra);
        assert_eq!(merged.get("data-propname"), Some(&AttrValue::from("sub")));
        assert_eq!(merged.get("readonly"), Some(&AttrValue::Flag(true)));
    }

    #[test]
    fn test_diagnostic_escapes_markup() {
        let tag = diagnostic("DICT, some_dict: dict[uuid, str]");
        let rendered = tag.to_string();
        assert!(rendered.starts_with("<pre> "));
        assert!(rendered.contains("some_dict"));

        let escaped = diagnostic("list[<raw>]").to_string();
        assert!(escaped.contains("&lt;raw&gt;"));
        assert!(!escaped.contains("<raw>"));
    }
}

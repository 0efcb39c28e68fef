//! JSON-Schema-driven form generation.
//!
//! Walks a parsed [`SchemaModel`]'s properties in declaration order and
//! dispatches on the declared [`SchemaType`], resolving `$ref`/`allOf`
//! indirection through the root document's `definitions` table. Referenced
//! definitions carrying an `enum` list render as selects; `anyOf` lists of
//! references render the class-selector pattern.
//!
//! Unlike descriptor graphs, a definitions table can reference itself, so
//! recursion carries a depth counter and degrades to a diagnostic
//! placeholder past [`MAX_NESTING_DEPTH`] instead of overflowing the stack.

use crate::error::FormError;
use crate::generator::{
    compose_path, diagnostic, display_value, merge_attrs, submit_button, truthy,
};
use crate::markup::{
    AttrMap, AttrValue, Button, CommonAttrs, Div, Form, Input, Label, Select, SelectOption, Tag,
    Textarea,
};
use crate::schema::{ref_name, ref_target, SchemaModel, SchemaProperty, SchemaType};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

/// Recursion cap for self-referential definition tables.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Top-level options for the schema-driven generator. The per-property
/// maps are keyed by property name and apply to the root level only;
/// nested sub-forms receive no overrides.
#[derive(Debug, Clone, Default)]
pub struct SchemaFormOptions {
    pub form_id: String,
    pub form_class: String,
    /// Current values, keyed by property name
    pub values: IndexMap<String, Value>,
    /// Forced schema types, keyed by property name
    pub overrides: IndexMap<String, SchemaType>,
    /// Extra widget attributes, keyed by property name
    pub attribs: IndexMap<String, AttrMap>,
}

/// Build a complete `<form>` for a parsed schema document.
pub fn generate_schema_form(
    schema: &SchemaModel,
    options: &SchemaFormOptions,
) -> Result<Tag, FormError> {
    debug!(schema = %schema.title, "generating schema form");
    let body = schema_fields(
        schema,
        &schema.definitions,
        &options.values,
        &options.overrides,
        &options.attribs,
        None,
        0,
    )?;

    Ok(Tag::Form(Form {
        common: CommonAttrs {
            id: options.form_id.clone(),
            class: options.form_class.clone(),
            ..Default::default()
        },
        children: vec![body, submit_button()],
    }))
}

#[allow(clippy::too_many_arguments)]
fn schema_fields(
    schema: &SchemaModel,
    definitions: &IndexMap<String, SchemaModel>,
    values: &IndexMap<String, Value>,
    overrides: &IndexMap<String, SchemaType>,
    attribs: &IndexMap<String, AttrMap>,
    path_root: Option<&str>,
    depth: usize,
) -> Result<Tag, FormError> {
    if depth > MAX_NESTING_DEPTH {
        let at = path_root.unwrap_or("<root>");
        warn!(path = %at, "nesting depth limit hit; schema is likely self-referential");
        return Ok(diagnostic(&format!(
            "MAX_DEPTH, {}: nesting deeper than {} levels",
            at, MAX_NESTING_DEPTH
        )));
    }

    let mut rows = Vec::with_capacity(schema.properties.len());

    for (prop_name, prop) in &schema.properties {
        let path = compose_path(path_root, prop_name);
        let widget = property_widget(
            &path,
            prop,
            definitions,
            attribs.get(prop_name),
            values.get(prop_name),
            overrides.get(prop_name).copied(),
            depth,
        )?;

        let label = Tag::Label(Label {
            common: CommonAttrs::class("col-2 col-form-label"),
            text: prop.title.clone().unwrap_or_else(|| prop_name.clone()),
        });
        let column = Tag::Div(Div {
            common: CommonAttrs::class("col"),
            children: vec![widget],
        });
        let row = Tag::Div(Div {
            common: CommonAttrs::class("form-group row"),
            children: vec![label, column],
        });
        rows.push(Tag::Paragraph(Div {
            common: CommonAttrs::class("my-1"),
            children: vec![row],
        }));
    }

    Ok(Tag::Group(rows))
}

fn property_widget(
    path: &str,
    prop: &SchemaProperty,
    definitions: &IndexMap<String, SchemaModel>,
    attribs: Option<&AttrMap>,
    value: Option<&Value>,
    type_override: Option<SchemaType>,
    depth: usize,
) -> Result<Tag, FormError> {
    let title = prop.title.clone().unwrap_or_else(|| path.to_string());
    let input_type = type_override.unwrap_or(prop.property_type);
    let extra = attribs.cloned().unwrap_or_default();

    // const pins the value; otherwise supplied value, then schema default
    let inner_value: Value = if let Some(constant) = &prop.const_value {
        Value::String(constant.clone())
    } else if let Some(value) = value {
        value.clone()
    } else if let Some(default) = &prop.default {
        default.clone()
    } else {
        Value::String(String::new())
    };

    match input_type {
        SchemaType::String => Ok(Tag::Input(Input {
            common: CommonAttrs {
                class: "form-control".to_string(),
                extra,
                ..Default::default()
            },
            input_type: "text".to_string(),
            name: path.to_string(),
            placeholder: title,
            value: display_value(Some(&inner_value)).unwrap_or_default(),
            ..Default::default()
        })),

        SchemaType::Integer => Ok(Tag::Input(Input {
            common: CommonAttrs {
                extra,
                ..Default::default()
            },
            input_type: "number".to_string(),
            name: path.to_string(),
            value: display_value(Some(&inner_value)).unwrap_or_default(),
            ..Default::default()
        })),

        SchemaType::Boolean => Ok(Tag::Input(Input {
            common: CommonAttrs {
                class: "my-2 form-check-input".to_string(),
                extra,
                ..Default::default()
            },
            input_type: "checkbox".to_string(),
            name: path.to_string(),
            checked: truthy(Some(&inner_value)),
            ..Default::default()
        })),

        SchemaType::Textarea => Ok(Tag::Textarea(Textarea {
            common: CommonAttrs {
                class: "form-control".to_string(),
                extra,
                ..Default::default()
            },
            input_type: "text".to_string(),
            name: path.to_string(),
            value: display_value(Some(&inner_value)).unwrap_or_default(),
            disabled: false,
        })),

        SchemaType::Array => array_widget(path, prop, definitions, &inner_value),

        SchemaType::Html => Ok(html_preview_widget(path, &title, &inner_value, &extra)),

        SchemaType::Class if prop.any_of.is_some() => class_selector_widget(
            path,
            prop,
            definitions,
            &inner_value,
            &extra,
            depth,
        ),

        // Everything else resolves through a reference, or degrades to a
        // visible placeholder
        _ => referenced_widget(path, prop, definitions, input_type, &inner_value, depth),
    }
}

fn array_widget(
    path: &str,
    prop: &SchemaProperty,
    definitions: &IndexMap<String, SchemaModel>,
    inner_value: &Value,
) -> Result<Tag, FormError> {
    let Some(items) = &prop.items else {
        return Ok(diagnostic(&format!("ARRAY_BROKE: {}", path)));
    };

    let Some(target) = ref_target(items) else {
        warn!(path = %path, "array of non-referenced items is not supported");
        return Ok(diagnostic(&format!("NOT_SUPPORTED_ARRAY, {}", path)));
    };

    let definition_name = ref_name(target);
    let Some(definition) = definitions.get(definition_name) else {
        warn!(path = %path, definition = %definition_name, "broken reference");
        return Ok(diagnostic(&format!(
            "_NO_REF_IN_DEF_{}_; {}",
            definition_name, path
        )));
    };

    let Some(enum_values) = &definition.enum_values else {
        warn!(path = %path, definition = %definition_name, "array of non-enum references is not supported");
        return Ok(diagnostic(&format!(
            "_ARRAY_REF_NOT_ENUM_{}_; {}",
            definition_name, path
        )));
    };

    let options = enum_values
        .iter()
        .map(|member| SelectOption {
            value: member.clone(),
            selected: member_selected(inner_value, member),
            ..Default::default()
        })
        .collect();

    Ok(Tag::Select(Select {
        common: CommonAttrs::class("form-select form-select-multiple"),
        options,
        multiple: true,
        ..Default::default()
    }))
}

/// Selection test that accepts either a sequence value (membership) or a
/// scalar value (equality), so defaults declared as a single member string
/// and supplied list values both work.
fn member_selected(value: &Value, member: &str) -> bool {
    match value {
        Value::Array(items) => items.iter().any(|item| item.as_str() == Some(member)),
        Value::String(text) => text == member,
        _ => false,
    }
}

fn class_selector_widget(
    path: &str,
    prop: &SchemaProperty,
    definitions: &IndexMap<String, SchemaModel>,
    inner_value: &Value,
    extra: &AttrMap,
    depth: usize,
) -> Result<Tag, FormError> {
    let branches = prop.any_of.as_deref().unwrap_or_default();

    let empty_values = IndexMap::new();
    let empty_overrides = IndexMap::new();
    let empty_attribs = IndexMap::new();

    let mut options = Vec::with_capacity(branches.len());
    let mut branch_divs = Vec::with_capacity(branches.len());

    for branch in branches {
        let Some(target) = ref_target(branch) else {
            options.push(SelectOption {
                value: format!("_BAD_REF_{}_", branch),
                ..Default::default()
            });
            continue;
        };
        let definition_name = ref_name(target);
        let Some(definition) = definitions.get(definition_name) else {
            warn!(path = %path, definition = %definition_name, "broken union branch reference");
            options.push(SelectOption {
                value: format!("_NO_REF_IN_DEF_{}_", definition_name),
                ..Default::default()
            });
            continue;
        };

        // Pre-select the branch matching the value's discriminator. The
        // model-driven variant never pre-selects; inherited inconsistency.
        let selected = inner_value
            .get("classtype")
            .and_then(Value::as_str)
            .is_some_and(|classtype| classtype == definition_name);

        let inner_form = schema_fields(
            definition,
            definitions,
            &empty_values,
            &empty_overrides,
            &empty_attribs,
            Some(path),
            depth + 1,
        )?;

        options.push(SelectOption {
            value: definition_name.to_string(),
            selected,
            ..Default::default()
        });

        let mut built_in = AttrMap::new();
        built_in.insert("data-propname".to_string(), AttrValue::from(path));
        built_in.insert(
            "data-ref".to_string(),
            AttrValue::from(definition_name.to_string()),
        );
        branch_divs.push(Tag::Div(Div {
            common: CommonAttrs {
                id: format!("class-selector-forms-{}", path),
                class: "form_class_selector_class".to_string(),
                extra: merge_attrs(built_in, extra),
                ..Default::default()
            },
            children: vec![inner_form],
        }));
    }

    let mut select_built_in = AttrMap::new();
    select_built_in.insert("data-propname".to_string(), AttrValue::from(path));

    Ok(Tag::Group(vec![
        Tag::Select(Select {
            common: CommonAttrs {
                id: format!("class-selector-{}", path),
                class: "form-control form_class_selector form-select".to_string(),
                extra: merge_attrs(select_built_in, extra),
                ..Default::default()
            },
            options,
            ..Default::default()
        }),
        Tag::Div(Div {
            common: CommonAttrs::class("form_class_selector_list"),
            children: branch_divs,
        }),
    ]))
}

fn referenced_widget(
    path: &str,
    prop: &SchemaProperty,
    definitions: &IndexMap<String, SchemaModel>,
    input_type: SchemaType,
    inner_value: &Value,
    depth: usize,
) -> Result<Tag, FormError> {
    let Some(target) = prop.some_ref() else {
        warn!(path = %path, ?input_type, "unrecognized schema shape rendered as placeholder");
        return Ok(diagnostic(&format!(
            "_NOT_KNOWN_TYPE_{:?}_; {}",
            input_type, path
        )));
    };

    let definition_name = ref_name(target);
    let Some(definition) = definitions.get(definition_name) else {
        warn!(path = %path, definition = %definition_name, "broken reference");
        return Ok(diagnostic(&format!(
            "_NO_REF_IN_DEF_{}_; {}",
            definition_name, path
        )));
    };

    if let Some(enum_values) = &definition.enum_values {
        let options = enum_values
            .iter()
            .map(|member| SelectOption {
                value: member.clone(),
                selected: member_selected(inner_value, member),
                ..Default::default()
            })
            .collect();
        return Ok(Tag::Select(Select {
            common: CommonAttrs::class("form-select"),
            options,
            ..Default::default()
        }));
    }

    let empty_values = IndexMap::new();
    let empty_overrides = IndexMap::new();
    let empty_attribs = IndexMap::new();
    schema_fields(
        definition,
        definitions,
        &empty_values,
        &empty_overrides,
        &empty_attribs,
        Some(path),
        depth + 1,
    )
}

fn html_preview_widget(path: &str, title: &str, inner_value: &Value, extra: &AttrMap) -> Tag {
    let collapse_id = format!("html-collapse-{}", path);
    let rendered_value = display_value(Some(inner_value)).unwrap_or_default();

    let mut button_built_in = AttrMap::new();
    button_built_in.insert("data-bs-toggle".to_string(), AttrValue::from("collapse"));
    button_built_in.insert(
        "data-bs-target".to_string(),
        AttrValue::from(format!("#{}", collapse_id)),
    );
    button_built_in.insert("aria-expanded".to_string(), AttrValue::from("false"));
    button_built_in.insert(
        "aria-controls".to_string(),
        AttrValue::from(collapse_id.clone()),
    );

    Tag::Group(vec![
        Tag::Input(Input {
            common: CommonAttrs {
                class: "form-control".to_string(),
                extra: extra.clone(),
                ..Default::default()
            },
            input_type: "hidden".to_string(),
            name: path.to_string(),
            placeholder: title.to_string(),
            value: rendered_value.clone(),
            disabled: true,
            ..Default::default()
        }),
        Tag::Button(Button {
            common: CommonAttrs {
                class: "btn btn-primary".to_string(),
                extra: merge_attrs(button_built_in, extra),
                ..Default::default()
            },
            input_type: "button".to_string(),
            value: "Display server MD preview".to_string(),
            ..Default::default()
        }),
        Tag::Div(Div {
            common: CommonAttrs::id_class(collapse_id, "collapse"),
            children: vec![Tag::Div(Div {
                common: CommonAttrs::default(),
                children: vec![Tag::Raw(rendered_value)],
            })],
        }),
    ])
}

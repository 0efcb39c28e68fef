//! Model-driven form generation.
//!
//! Walks a [`ModelDescriptor`]'s fields in declaration order, classifies
//! each declared type into a [`FieldKind`] and renders the matching widget
//! into the tag tree. Nested models recurse with the field's dotted path as
//! the new prefix; unions of models render the class-selector pattern the
//! companion client script drives via `data-propname`/`data-ref`.

use crate::domain::{
    ContextEntry, ContextTree, FieldDescriptor, FieldKind, FormOptions, ModelDescriptor, TypeExpr,
};
use crate::error::FormError;
use crate::generator::{
    compose_path, diagnostic, display_value, merge_attrs, pretty_label, submit_button, truthy,
};
use crate::markup::{
    AttrMap, AttrValue, Button, CommonAttrs, Div, Form, Input, Label, Select, SelectOption, Tag,
    Textarea,
};
use serde_json::Value;
use tracing::{debug, warn};

/// Build a complete `<form>` for `model`, optionally pre-filled from a
/// JSON `instance` (an object keyed by wire names).
pub fn generate_form(
    model: &ModelDescriptor,
    instance: Option<&Value>,
    options: &FormOptions,
) -> Result<Tag, FormError> {
    debug!(model = %model.name, "generating form");
    let body = form_fields(
        model,
        instance,
        None,
        options.readonly,
        &options.disabled_fields,
        &options.contexts,
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

/// One labelled row per field, in declaration order.
pub(crate) fn form_fields(
    model: &ModelDescriptor,
    instance: Option<&Value>,
    path_root: Option<&str>,
    readonly: bool,
    disabled_fields: &[String],
    contexts: &ContextTree,
) -> Result<Tag, FormError> {
    let mut rows = Vec::with_capacity(model.fields.len());

    for field in &model.fields {
        let widget = field_widget(
            field,
            instance,
            path_root,
            readonly,
            disabled_fields,
            contexts.child(&field.name),
        )?;

        let label = Tag::Label(Label {
            common: CommonAttrs::class("col-2 col-form-label"),
            text: pretty_label(&field.name),
        });
        let column = Tag::Div(Div {
            common: CommonAttrs::class("col"),
            children: vec![widget],
        });
        let row = Tag::Div(Div {
            common: CommonAttrs::id_class(
                row_dom_id(path_root, field.wire_name()),
                "form-group row",
            ),
            children: vec![label, column],
        });
        rows.push(Tag::Paragraph(Div {
            common: CommonAttrs::class("my-1"),
            children: vec![row],
        }));
    }

    Ok(Tag::Group(rows))
}

/// DOM id of a field's row: the dotted path prefixed with `div_`, dots
/// replaced with a separator that is valid in ids.
fn row_dom_id(path_root: Option<&str>, wire_name: &str) -> String {
    let prefix = path_root.map(|root| format!("{}.", root)).unwrap_or_default();
    format!("div_{}{}", prefix, wire_name).replace('.', "__")
}

/// Resolve the field's current value: the instance value when the field is
/// present on the instance, the declared default otherwise. Absent resolves
/// to `None`, never to a failure.
fn resolve_value<'a>(field: &'a FieldDescriptor, instance: Option<&'a Value>) -> Option<&'a Value> {
    if let Some(instance) = instance {
        if let Some(value) = instance.get(field.wire_name()) {
            return Some(value);
        }
    }
    field.default.as_ref()
}

fn field_widget(
    field: &FieldDescriptor,
    instance: Option<&Value>,
    path_root: Option<&str>,
    readonly: bool,
    disabled_fields: &[String],
    context: Option<&ContextEntry>,
) -> Result<Tag, FormError> {
    let path = compose_path(path_root, field.wire_name());
    let value = resolve_value(field, instance);
    let disabled = readonly || disabled_fields.iter().any(|p| p == &path);

    let (extra, forced_kind) = match context {
        Some(ContextEntry::Field(ctx)) => (ctx.attributes.clone(), ctx.override_kind),
        _ => (AttrMap::new(), FieldKind::Unknown),
    };

    // Optional wrappers are never unwrapped: they render a visible
    // placeholder even when the inner type would be supported. Known gap.
    if field.declared.is_optional() {
        warn!(path = %path, "optional field rendered as placeholder");
        return Ok(diagnostic(&format!(
            "OPTIONAL, {}: {}",
            path,
            field.declared.describe()
        )));
    }

    let kind = if forced_kind == FieldKind::Unknown {
        FieldKind::classify(&field.declared)
    } else {
        forced_kind
    };

    match kind {
        FieldKind::NestedModel => {
            let TypeExpr::Model(sub_model) = &field.declared else {
                return Err(FormError::contract(&path, "NestedModel kind on a non-model type"));
            };
            let empty = ContextTree::new();
            let sub_contexts = match context {
                Some(ContextEntry::Nested(tree)) => tree,
                _ => &empty,
            };
            form_fields(
                sub_model,
                value.filter(|v| v.is_object()),
                Some(&path),
                readonly,
                disabled_fields,
                sub_contexts,
            )
        }

        FieldKind::Number => Ok(Tag::Input(Input {
            common: CommonAttrs {
                extra,
                ..Default::default()
            },
            input_type: "number".to_string(),
            name: path,
            value: display_value(value).unwrap_or_else(|| "0".to_string()),
            disabled,
            ..Default::default()
        })),

        FieldKind::Boolean => Ok(Tag::Input(Input {
            common: CommonAttrs {
                class: "my-2 form-check-input".to_string(),
                extra,
                ..Default::default()
            },
            input_type: "checkbox".to_string(),
            name: path,
            checked: truthy(value),
            disabled,
            ..Default::default()
        })),

        FieldKind::String => Ok(Tag::Input(Input {
            common: CommonAttrs {
                class: "form-control".to_string(),
                extra,
                ..Default::default()
            },
            input_type: "text".to_string(),
            name: path.clone(),
            placeholder: field.description.clone().unwrap_or_else(|| path.clone()),
            value: display_value(value).unwrap_or_default(),
            disabled,
            ..Default::default()
        })),

        FieldKind::Literal => {
            // Fixed value: shown, never editable
            let fixed = display_value(value)
                .or_else(|| match &field.declared {
                    TypeExpr::Literal(literal) => display_value(Some(literal)),
                    _ => None,
                })
                .unwrap_or_default();
            Ok(Tag::Input(Input {
                common: CommonAttrs {
                    class: "form-control".to_string(),
                    extra,
                    ..Default::default()
                },
                input_type: "text".to_string(),
                name: path.clone(),
                placeholder: field.description.clone().unwrap_or_else(|| path.clone()),
                value: fixed,
                disabled: true,
                ..Default::default()
            }))
        }

        FieldKind::Enum => {
            let TypeExpr::Enum(descriptor) = &field.declared else {
                return Err(FormError::contract(&path, "Enum kind on a non-enum type"));
            };
            let current = display_value(value);
            let options = descriptor
                .members
                .iter()
                .map(|member| SelectOption {
                    value: member.clone(),
                    selected: current.as_deref() == Some(member.as_str()),
                    ..Default::default()
                })
                .collect();
            Ok(Tag::Select(Select {
                common: CommonAttrs {
                    class: "form-select".to_string(),
                    extra,
                    ..Default::default()
                },
                name: path,
                options,
                disabled,
                multiple: false,
            }))
        }

        FieldKind::EnumList => {
            let TypeExpr::List(element) = &field.declared else {
                return Err(FormError::contract(&path, "EnumList kind on a non-list type"));
            };
            let TypeExpr::Enum(descriptor) = element.as_ref() else {
                return Err(FormError::contract(&path, "EnumList element is not an enum"));
            };
            let selected_values = value.and_then(Value::as_array);
            let options = descriptor
                .members
                .iter()
                .map(|member| SelectOption {
                    value: member.clone(),
                    selected: selected_values.is_some_and(|values| {
                        values.iter().any(|v| v.as_str() == Some(member.as_str()))
                    }),
                    ..Default::default()
                })
                .collect();
            Ok(Tag::Select(Select {
                common: CommonAttrs {
                    class: "form-select form-select-multiple".to_string(),
                    extra,
                    ..Default::default()
                },
                name: path,
                options,
                disabled,
                multiple: true,
            }))
        }

        FieldKind::NestedUnion => nested_union_widget(
            field, value, &path, readonly, disabled_fields, disabled, context, &extra,
        ),

        FieldKind::Textarea => Ok(Tag::Textarea(Textarea {
            common: CommonAttrs {
                class: "form-control".to_string(),
                extra,
                ..Default::default()
            },
            input_type: "text".to_string(),
            name: path,
            value: display_value(value).unwrap_or_default(),
            disabled,
        })),

        FieldKind::Html => Ok(html_preview_widget(&path, field, value, extra)),

        FieldKind::List => {
            warn!(path = %path, "unsupported list field rendered as placeholder");
            Ok(diagnostic(&format!(
                "LIST, {}: {}",
                path,
                field.declared.describe()
            )))
        }

        FieldKind::Dict => {
            warn!(path = %path, "unsupported dict field rendered as placeholder");
            Ok(diagnostic(&format!(
                "DICT, {}: {}",
                path,
                field.declared.describe()
            )))
        }

        FieldKind::GenericUnion => {
            warn!(path = %path, "unsupported union field rendered as placeholder");
            Ok(diagnostic(&format!(
                "GENERIC_UNION, {}: {}",
                path,
                field.declared.describe()
            )))
        }

        FieldKind::Unknown => {
            warn!(path = %path, "unrecognized field shape rendered as fallback placeholder");
            Ok(diagnostic(&format!(
                "fallback, {}: {}",
                path,
                field.declared.describe()
            )))
        }
    }
}

/// Class-selector scaffolding for a union of model types: one `<select>`
/// naming every branch plus one hidden-able container per branch holding
/// that branch's full subform. The client script shows the container whose
/// `data-ref` matches the selector value.
///
/// No option is ever pre-selected here, even when the instance carries a
/// discriminator; the schema-driven variant does pre-select. The
/// inconsistency is inherited and kept as-is.
#[allow(clippy::too_many_arguments)]
fn nested_union_widget(
    field: &FieldDescriptor,
    value: Option<&Value>,
    path: &str,
    readonly: bool,
    disabled_fields: &[String],
    disabled: bool,
    context: Option<&ContextEntry>,
    extra: &AttrMap,
) -> Result<Tag, FormError> {
    let TypeExpr::Union(branches) = &field.declared else {
        return Err(FormError::contract(path, "NestedUnion kind on a non-union type"));
    };

    let empty = ContextTree::new();
    let sub_contexts = match context {
        Some(ContextEntry::Nested(tree)) => tree,
        _ => &empty,
    };

    let mut options = Vec::with_capacity(branches.len());
    let mut branch_divs = Vec::with_capacity(branches.len());

    for branch in branches {
        let TypeExpr::Model(sub_model) = branch else {
            return Err(FormError::contract(path, "NestedUnion branch is not a model"));
        };

        let inner_form = form_fields(
            sub_model,
            value.filter(|v| v.is_object()),
            Some(path),
            readonly,
            disabled_fields,
            sub_contexts,
        )?;

        options.push(SelectOption {
            value: sub_model.name.clone(),
            selected: false,
            ..Default::default()
        });

        let mut built_in = AttrMap::new();
        built_in.insert("data-propname".to_string(), AttrValue::from(path));
        built_in.insert("data-ref".to_string(), AttrValue::from(sub_model.name.clone()));
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

    let mut select_extra = AttrMap::new();
    select_extra.insert("data-propname".to_string(), AttrValue::from(path));

    Ok(Tag::Group(vec![
        Tag::Select(Select {
            common: CommonAttrs {
                id: format!("class-selector-{}", path),
                class: "form-control form_class_selector form-select".to_string(),
                extra: select_extra,
                ..Default::default()
            },
            name: path.to_string(),
            options,
            disabled,
            multiple: false,
        }),
        Tag::Div(Div {
            common: CommonAttrs::class("form_class_selector_list"),
            children: branch_divs,
        }),
    ]))
}

/// Server-rendered HTML preview: a hidden carrier input, a toggle button
/// and a collapsed container holding the raw value.
fn html_preview_widget(
    path: &str,
    field: &FieldDescriptor,
    value: Option<&Value>,
    extra: AttrMap,
) -> Tag {
    let collapse_id = format!("html-collapse-{}", path);

    let mut button_extra = AttrMap::new();
    button_extra.insert("data-toggle".to_string(), AttrValue::from("collapse"));
    button_extra.insert(
        "data-target".to_string(),
        AttrValue::from(format!("#{}", collapse_id)),
    );
    button_extra.insert("aria-expanded".to_string(), AttrValue::from("false"));
    button_extra.insert(
        "aria-controls".to_string(),
        AttrValue::from(format!("#{}", collapse_id)),
    );

    Tag::Group(vec![
        Tag::Input(Input {
            common: CommonAttrs {
                class: "form-control".to_string(),
                extra,
                ..Default::default()
            },
            input_type: "hidden".to_string(),
            name: path.to_string(),
            placeholder: field.description.clone().unwrap_or_else(|| path.to_string()),
            value: String::new(),
            disabled: true,
            ..Default::default()
        }),
        Tag::Button(Button {
            common: CommonAttrs {
                class: "btn btn-primary".to_string(),
                extra: button_extra,
                ..Default::default()
            },
            input_type: "button".to_string(),
            value: "Display server MD preview".to_string(),
            ..Default::default()
        }),
        Tag::Div(Div {
            common: CommonAttrs::id_class(collapse_id, "collapse"),
            children: vec![Tag::Div(Div {
                common: CommonAttrs::class("card card-body"),
                children: vec![Tag::Raw(display_value(value).unwrap_or_default())],
            })],
        }),
    ])
}

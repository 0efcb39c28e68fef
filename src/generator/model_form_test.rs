use super::model_form::generate_form;
use crate::domain::{
    ContextTree, EnumDescriptor, FieldContext, FieldDescriptor, FieldKind, FormOptions,
    ModelDescriptor, TypeExpr,
};
use crate::error::FormError;
use serde_json::json;

fn enumed() -> EnumDescriptor {
    EnumDescriptor::new("Enumed", &["val1", "val2", "val3"])
}

fn base_sub_model() -> ModelDescriptor {
    ModelDescriptor::new(
        "BaseSubModel",
        vec![FieldDescriptor::with_default(
            "classtype",
            TypeExpr::Literal(json!("BaseSubModel")),
            json!("BaseSubModel"),
        )],
    )
}

fn base_sub_model_n1() -> ModelDescriptor {
    ModelDescriptor::new(
        "BaseSubModelN1",
        vec![
            FieldDescriptor::with_default(
                "classtype",
                TypeExpr::Literal(json!("BaseSubModelN1")),
                json!("BaseSubModelN1"),
            ),
            FieldDescriptor::required("integer", TypeExpr::Integer),
            FieldDescriptor::with_default("initialized_integer", TypeExpr::Integer, json!(1337)),
        ],
    )
}

fn base_sub_model_n2() -> ModelDescriptor {
    ModelDescriptor::new(
        "BaseSubModelN2",
        vec![
            FieldDescriptor::with_default(
                "classtype",
                TypeExpr::Literal(json!("BaseSubModelN2")),
                json!("BaseSubModelN2"),
            ),
            FieldDescriptor::required("integer", TypeExpr::Integer),
            FieldDescriptor::with_default("initialized_integer", TypeExpr::Integer, json!(1337)),
            FieldDescriptor::with_default("initialized_string", TypeExpr::String, json!("l33t")),
        ],
    )
}

fn sub_union() -> TypeExpr {
    TypeExpr::Union(vec![
        TypeExpr::model(base_sub_model()),
        TypeExpr::model(base_sub_model_n1()),
        TypeExpr::model(base_sub_model_n2()),
    ])
}

fn render(model: &ModelDescriptor, instance: Option<&serde_json::Value>) -> String {
    generate_form(model, instance, &FormOptions::default())
        .unwrap()
        .to_string()
}

#[test]
fn test_primitive_fields_render_in_declaration_order() {
    let model = ModelDescriptor::new(
        "Primitives",
        vec![
            FieldDescriptor::required("zeta", TypeExpr::String),
            FieldDescriptor::required("alpha", TypeExpr::Integer),
            FieldDescriptor::required("mid", TypeExpr::Boolean),
        ],
    );
    let rendered = render(&model, None);

    let zeta = rendered.find("name=\"zeta\"").unwrap();
    let alpha = rendered.find("name=\"alpha\"").unwrap();
    let mid = rendered.find("name=\"mid\"").unwrap();
    assert!(zeta < alpha && alpha < mid);

    // one input per field, plus the submit button
    assert_eq!(rendered.matches("<input ").count(), 3);
    assert_eq!(rendered.matches("<button ").count(), 1);
}

#[test]
fn test_generation_is_idempotent() {
    let model = ModelDescriptor::new(
        "Stable",
        vec![
            FieldDescriptor::required("some_str", TypeExpr::String),
            FieldDescriptor::with_default("some_enum", TypeExpr::Enum(enumed()), json!("val2")),
            FieldDescriptor::required("sub", sub_union()),
        ],
    );
    let instance = json!({ "some_str": "x" });
    let first = render(&model, Some(&instance));
    let second = render(&model, Some(&instance));
    assert_eq!(first, second);
}

#[test]
fn test_nested_path_and_dom_id_composition() {
    let sub = ModelDescriptor::new(
        "Sub",
        vec![FieldDescriptor::required("integer", TypeExpr::Integer)],
    );
    let model = ModelDescriptor::new(
        "Outer",
        vec![FieldDescriptor::required("sub", TypeExpr::model(sub))],
    );
    let rendered = render(&model, None);

    assert!(rendered.contains("name=\"sub.integer\""));
    assert!(rendered.contains("id=\"div_sub__integer\""));
    assert!(!rendered.contains("name=\"integer\""));
}

#[test]
fn test_aliased_field_uses_wire_name_for_path() {
    let model = ModelDescriptor::new(
        "Aliased",
        vec![FieldDescriptor::with_default("some_aliased", TypeExpr::String, json!("keke"))
            .aliased("someAliased")],
    );
    let rendered = render(&model, None);

    assert!(rendered.contains("name=\"someAliased\""));
    assert!(rendered.contains("id=\"div_someAliased\""));
    // label still derives from the declared name
    assert!(rendered.contains(">Some aliased</label>"));
}

#[test]
fn test_enum_selects_resolved_value() {
    let model = ModelDescriptor::new(
        "WithEnum",
        vec![FieldDescriptor::required("some_enum", TypeExpr::Enum(enumed()))],
    );
    let instance = json!({ "some_enum": "val3" });
    let rendered = render(&model, Some(&instance));

    assert!(rendered.contains("<option value=\"val1\">val1</option>"));
    assert!(rendered.contains("<option value=\"val2\">val2</option>"));
    assert!(rendered.contains("<option value=\"val3\" selected>val3</option>"));
    assert_eq!(rendered.matches(" selected>").count(), 1);
}

#[test]
fn test_enum_falls_back_to_default() {
    let model = ModelDescriptor::new(
        "WithEnum",
        vec![FieldDescriptor::with_default(
            "some_enum_with_def",
            TypeExpr::Enum(enumed()),
            json!("val2"),
        )],
    );
    let rendered = render(&model, None);
    assert!(rendered.contains("<option value=\"val2\" selected>val2</option>"));
    assert_eq!(rendered.matches(" selected>").count(), 1);
}

#[test]
fn test_enum_list_membership_selection() {
    let model = ModelDescriptor::new(
        "WithEnumList",
        vec![FieldDescriptor::with_default(
            "some_enum_list",
            TypeExpr::list(TypeExpr::Enum(enumed())),
            json!(["val1", "val3"]),
        )],
    );
    let rendered = render(&model, None);

    assert!(rendered.contains("multiple"));
    assert!(rendered.contains("<option value=\"val1\" selected>val1</option>"));
    assert!(rendered.contains("<option value=\"val2\">val2</option>"));
    assert!(rendered.contains("<option value=\"val3\" selected>val3</option>"));
}

#[test]
fn test_enum_list_with_absent_value_selects_nothing() {
    let model = ModelDescriptor::new(
        "WithEnumList",
        vec![FieldDescriptor::required(
            "some_enum_list",
            TypeExpr::list(TypeExpr::Enum(enumed())),
        )],
    );
    let rendered = render(&model, None);
    assert!(!rendered.contains(" selected>"));
}

#[test]
fn test_readonly_propagates_to_every_depth() {
    let model = ModelDescriptor::new(
        "Deep",
        vec![
            FieldDescriptor::required("top", TypeExpr::String),
            FieldDescriptor::required("sub_1", TypeExpr::model(base_sub_model_n2())),
            FieldDescriptor::required("sub", sub_union()),
            FieldDescriptor::required("some_enum", TypeExpr::Enum(enumed())),
        ],
    );
    let options = FormOptions {
        readonly: true,
        ..Default::default()
    };
    let rendered = generate_form(&model, None, &options).unwrap().to_string();

    // every input at every nesting depth carries `disabled`; the submit
    // button is the only control without it
    for segment in rendered.split("<input ").skip(1) {
        let tag = &segment[..segment.find('>').unwrap()];
        assert!(tag.contains("disabled"), "input missing disabled: {}", tag);
    }
    for segment in rendered.split("<select ").skip(1) {
        let tag = &segment[..segment.find('>').unwrap()];
        assert!(tag.contains("disabled"), "select missing disabled: {}", tag);
    }
}

#[test]
fn test_disabled_field_paths() {
    let sub = ModelDescriptor::new(
        "Sub",
        vec![
            FieldDescriptor::required("integer", TypeExpr::Integer),
            FieldDescriptor::required("other", TypeExpr::Integer),
        ],
    );
    let model = ModelDescriptor::new(
        "Outer",
        vec![FieldDescriptor::required("sub", TypeExpr::model(sub))],
    );
    let options = FormOptions {
        disabled_fields: vec!["sub.integer".to_string()],
        ..Default::default()
    };
    let rendered = generate_form(&model, None, &options).unwrap().to_string();

    assert!(rendered.contains("name=\"sub.integer\" value=\"0\" disabled"));
    assert!(!rendered.contains("name=\"sub.other\" value=\"0\" disabled"));
}

#[test]
fn test_union_class_selector_scaffolding() {
    let model = ModelDescriptor::new(
        "WithUnion",
        vec![FieldDescriptor::required("sub", sub_union())],
    );
    let rendered = render(&model, None);

    // one selector, one option and one branch container per branch type
    assert_eq!(rendered.matches("class-selector-sub").count(), 1);
    assert_eq!(rendered.matches("data-ref=").count(), 3);
    assert!(rendered.contains("data-ref=\"BaseSubModel\""));
    assert!(rendered.contains("data-ref=\"BaseSubModelN1\""));
    assert!(rendered.contains("data-ref=\"BaseSubModelN2\""));
    assert!(rendered.contains("<option value=\"BaseSubModel\">BaseSubModel</option>"));
    assert!(rendered.contains("<option value=\"BaseSubModelN1\">BaseSubModelN1</option>"));
    assert!(rendered.contains("<option value=\"BaseSubModelN2\">BaseSubModelN2</option>"));

    // selector plus all three branch containers carry the field path
    assert_eq!(rendered.matches("data-propname=\"sub\"").count(), 4);

    // branch subforms render with the union field path as prefix
    assert!(rendered.contains("name=\"sub.integer\""));
    assert!(rendered.contains("name=\"sub.initialized_string\""));
}

#[test]
fn test_union_selector_never_preselects() {
    let model = ModelDescriptor::new(
        "WithUnion",
        vec![FieldDescriptor::required("sub", sub_union())],
    );
    let instance = json!({ "sub": { "classtype": "BaseSubModelN2", "integer": -1 } });
    let rendered = render(&model, Some(&instance));

    // options stay unselected even though the instance carries a
    // discriminator; the schema-driven variant behaves differently
    assert!(!rendered.contains(" selected>"));
    // but the instance values flow into every branch subform
    assert!(rendered.contains("name=\"sub.integer\" value=\"-1\""));
}

#[test]
fn test_dict_renders_placeholder_not_error() {
    let model = ModelDescriptor::new(
        "WithDict",
        vec![FieldDescriptor::with_default(
            "some_dict",
            TypeExpr::dict(TypeExpr::Uuid, TypeExpr::String),
            json!({}),
        )],
    );
    let rendered = render(&model, None);
    assert!(rendered.contains("DICT, some_dict"));
    assert!(rendered.contains("dict[uuid, str]"));
}

#[test]
fn test_list_and_generic_union_placeholders() {
    let model = ModelDescriptor::new(
        "Unsupported",
        vec![
            FieldDescriptor::required("some_list", TypeExpr::list(TypeExpr::String)),
            FieldDescriptor::with_default(
                "united",
                TypeExpr::Union(vec![TypeExpr::String, TypeExpr::Boolean]),
                json!(false),
            ),
        ],
    );
    let rendered = render(&model, None);
    assert!(rendered.contains("LIST, some_list: list[str]"));
    assert!(rendered.contains("GENERIC_UNION, united: str | bool"));
}

#[test]
fn test_optional_field_renders_placeholder() {
    let model = ModelDescriptor::new(
        "WithOptional",
        vec![FieldDescriptor::with_default(
            "some_WTF_list",
            TypeExpr::Union(vec![TypeExpr::list(TypeExpr::String), TypeExpr::None]),
            serde_json::Value::Null,
        )],
    );
    let rendered = render(&model, None);
    assert!(rendered.contains("OPTIONAL, some_WTF_list"));
    assert!(!rendered.contains("name=\"some_WTF_list\""));
}

#[test]
fn test_unknown_shape_renders_fallback_placeholder() {
    let model = ModelDescriptor::new(
        "WithUnknown",
        vec![FieldDescriptor::required("mystery", TypeExpr::Unknown)],
    );
    let rendered = render(&model, None);
    assert!(rendered.contains("fallback, mystery"));
}

#[test]
fn test_instance_value_wins_over_default() {
    let model = ModelDescriptor::new(
        "Defaults",
        vec![
            FieldDescriptor::with_default("some_initialized_str", TypeExpr::String, json!("initializer")),
            FieldDescriptor::with_default("some_initialized_bool", TypeExpr::Boolean, json!(true)),
        ],
    );
    let rendered = render(&model, None);
    assert!(rendered.contains("value=\"initializer\""));
    assert!(rendered.contains("checked"));

    let instance = json!({ "some_initialized_str": "overridden", "some_initialized_bool": false });
    let rendered = render(&model, Some(&instance));
    assert!(rendered.contains("value=\"overridden\""));
    assert!(!rendered.contains("checked"));
}

#[test]
fn test_absent_number_renders_zero() {
    let model = ModelDescriptor::new(
        "Numbers",
        vec![FieldDescriptor::required("integer", TypeExpr::Integer)],
    );
    let rendered = render(&model, None);
    assert!(rendered.contains("type=\"number\" name=\"integer\" value=\"0\""));
}

#[test]
fn test_uuid_renders_as_text_input() {
    let model = ModelDescriptor::new(
        "Ids",
        vec![FieldDescriptor::required("some_id", TypeExpr::Uuid)],
    );
    let id = uuid::Uuid::new_v4().to_string();
    let instance = json!({ "some_id": id });
    let rendered = render(&model, Some(&instance));
    assert!(rendered.contains("type=\"text\" name=\"some_id\""));
    assert!(rendered.contains(&format!("value=\"{}\"", id)));
}

#[test]
fn test_literal_field_is_always_disabled() {
    let model = ModelDescriptor::new(
        "WithLiteral",
        vec![FieldDescriptor::with_default(
            "classtype",
            TypeExpr::Literal(json!("BaseSubModel")),
            json!("BaseSubModel"),
        )],
    );
    let rendered = render(&model, None);
    assert!(rendered.contains("name=\"classtype\" value=\"BaseSubModel\" disabled"));
}

#[test]
fn test_description_used_as_placeholder() {
    let model = ModelDescriptor::new(
        "Described",
        vec![
            FieldDescriptor::required("plain", TypeExpr::String),
            FieldDescriptor::required("described", TypeExpr::String).described("kekeke"),
        ],
    );
    let rendered = render(&model, None);
    assert!(rendered.contains("placeholder=\"plain\""));
    assert!(rendered.contains("placeholder=\"kekeke\""));
}

#[test]
fn test_forced_kind_overrides_classification() {
    let model = ModelDescriptor::new(
        "Overridden",
        vec![
            FieldDescriptor::required("description", TypeExpr::String),
            FieldDescriptor::required("description_html", TypeExpr::String),
        ],
    );
    let options = FormOptions {
        contexts: ContextTree::new()
            .with_field("description", FieldContext::forced(FieldKind::Textarea))
            .with_field("description_html", FieldContext::forced(FieldKind::Html)),
        ..Default::default()
    };
    let instance = json!({ "description": "test", "description_html": "<h1> test </h1>" });
    let rendered = generate_form(&model, Some(&instance), &options)
        .unwrap()
        .to_string();

    assert!(rendered.contains("<textarea "));
    assert!(rendered.contains("test</textarea>"));
    assert!(rendered.contains("id=\"html-collapse-description_html\""));
    assert!(rendered.contains("Display server MD preview"));
}

#[test]
fn test_context_attributes_reach_the_widget() {
    let model = ModelDescriptor::new(
        "WithExtras",
        vec![FieldDescriptor::required("some_id", TypeExpr::Uuid)],
    );
    let options = FormOptions {
        contexts: ContextTree::new().with_field(
            "some_id",
            FieldContext::default().with_attribute("readonly", true),
        ),
        ..Default::default()
    };
    let rendered = generate_form(&model, None, &options).unwrap().to_string();
    assert!(rendered.contains("name=\"some_id\" placeholder=\"some_id\" readonly>"));
}

#[test]
fn test_nested_context_reaches_sub_model() {
    let sub = ModelDescriptor::new(
        "Sub",
        vec![FieldDescriptor::required("note", TypeExpr::String)],
    );
    let model = ModelDescriptor::new(
        "Outer",
        vec![FieldDescriptor::required("sub", TypeExpr::model(sub))],
    );
    let options = FormOptions {
        contexts: ContextTree::new().with_nested(
            "sub",
            ContextTree::new().with_field("note", FieldContext::forced(FieldKind::Textarea)),
        ),
        ..Default::default()
    };
    let rendered = generate_form(&model, None, &options).unwrap().to_string();
    assert!(rendered.contains("<textarea "));
    assert!(rendered.contains("name=\"sub.note\""));
}

#[test]
fn test_forced_kind_with_wrong_shape_is_contract_violation() {
    let model = ModelDescriptor::new(
        "Broken",
        vec![FieldDescriptor::required("some_str", TypeExpr::String)],
    );
    let options = FormOptions {
        contexts: ContextTree::new()
            .with_field("some_str", FieldContext::forced(FieldKind::EnumList)),
        ..Default::default()
    };
    let result = generate_form(&model, None, &options);
    assert!(matches!(
        result,
        Err(FormError::ContractViolation { ref path, .. }) if path == "some_str"
    ));
}

#[test]
fn test_form_wrapper_and_submit_button() {
    let model = ModelDescriptor::new(
        "Wrapped",
        vec![FieldDescriptor::required("some_str", TypeExpr::String)],
    );
    let options = FormOptions {
        form_id: "test-form".to_string(),
        form_class: "mb-3".to_string(),
        ..Default::default()
    };
    let rendered = generate_form(&model, None, &options).unwrap().to_string();

    assert!(rendered.starts_with("<form id=\"test-form\" class=\"mb-3\">"));
    assert!(rendered.ends_with("</form>"));
    assert!(rendered.contains(
        "<button class=\"btn btn-primary btn-block mt-3\" type=\"submit\" accesskey=\"s\">submit</button>"
    ));
}

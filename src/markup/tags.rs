//! Tag primitives for the generated form markup.
//!
//! This is a minimal ownership tree: containers own their children, leaf
//! nodes own their attributes, and serialization is a depth-first
//! [`fmt::Display`] traversal. Attribute emission follows a fixed rule set
//! that the companion client script depends on, so it must stay stable:
//!
//! - attributes render in declared order;
//! - `Null`, empty text and empty list values are omitted;
//! - a `true` flag renders as a bare attribute name, `false` is omitted;
//! - list values are space-joined into a single quoted value;
//! - caller-supplied extra attributes are merged after the built-in ones
//!   and never override a built-in key.

use indexmap::IndexMap;
use std::fmt;

/// A single attribute value, covering every shape the serializer emits.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Explicitly absent; never emitted
    Null,
    /// Boolean attribute: `true` renders as a bare name, `false` is omitted
    Flag(bool),
    /// Plain text value; the empty string is omitted
    Text(String),
    /// Space-joined list value; an empty list is omitted
    List(Vec<String>),
}

impl AttrValue {
    fn render(&self, name: &str) -> Option<String> {
        match self {
            AttrValue::Null | AttrValue::Flag(false) => None,
            AttrValue::Flag(true) => Some(name.to_string()),
            AttrValue::Text(text) if text.is_empty() => None,
            AttrValue::Text(text) => Some(format!("{}=\"{}\"", name, text)),
            AttrValue::List(items) if items.is_empty() => None,
            AttrValue::List(items) => Some(format!("{}=\"{}\"", name, items.join(" "))),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Flag(value)
    }
}

impl From<Option<String>> for AttrValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(text) => AttrValue::Text(text),
            None => AttrValue::Null,
        }
    }
}

/// Ordered attribute bag used for caller-supplied extras.
pub type AttrMap = IndexMap<String, AttrValue>;

/// Ordered attribute list assembled per tag before rendering.
///
/// Built-in attributes are pushed first; [`AttrList::merge_extra`] appends
/// extras but skips any key a built-in already declared, so callers cannot
/// break the selector wiring (`data-propname`, `data-ref`) by accident.
#[derive(Debug, Default)]
struct AttrList(Vec<(String, AttrValue)>);

impl AttrList {
    fn push(&mut self, name: &str, value: impl Into<AttrValue>) {
        self.0.push((name.to_string(), value.into()));
    }

    fn merge_extra(&mut self, extra: &AttrMap) {
        for (name, value) in extra {
            if self.0.iter().any(|(declared, _)| declared == name) {
                continue;
            }
            self.0.push((name.clone(), value.clone()));
        }
    }

    fn render(&self) -> String {
        self.0
            .iter()
            .filter_map(|(name, value)| value.render(name))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Attributes shared by every element tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonAttrs {
    pub id: String,
    pub class: String,
    pub title: String,
    pub hidden: bool,
    pub style: Vec<String>,
    /// Caller-supplied extras, merged after the built-in attributes
    pub extra: AttrMap,
}

impl CommonAttrs {
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            ..Default::default()
        }
    }

    pub fn id_class(id: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class: class.into(),
            ..Default::default()
        }
    }

    fn collect(&self, attrs: &mut AttrList) {
        attrs.push("id", self.id.as_str());
        attrs.push("class", self.class.as_str());
        attrs.push("title", self.title.as_str());
        attrs.push("hidden", self.hidden);
        attrs.push("style", AttrValue::List(self.style.clone()));
    }
}

/// Block container (`<div>`), also reused for `<p>` rows.
#[derive(Debug, Clone, Default)]
pub struct Div {
    pub common: CommonAttrs,
    pub children: Vec<Tag>,
}

impl Div {
    fn attrs(&self) -> String {
        let mut attrs = AttrList::default();
        self.common.collect(&mut attrs);
        attrs.merge_extra(&self.common.extra);
        attrs.render()
    }
}

/// Top-level `<form>` wrapper.
#[derive(Debug, Clone, Default)]
pub struct Form {
    pub common: CommonAttrs,
    pub children: Vec<Tag>,
}

impl Form {
    fn attrs(&self) -> String {
        let mut attrs = AttrList::default();
        self.common.collect(&mut attrs);
        attrs.merge_extra(&self.common.extra);
        attrs.render()
    }
}

/// `<label>`; the label text is element content, not an attribute.
#[derive(Debug, Clone, Default)]
pub struct Label {
    pub common: CommonAttrs,
    pub text: String,
}

impl Label {
    fn attrs(&self) -> String {
        let mut attrs = AttrList::default();
        self.common.collect(&mut attrs);
        attrs.merge_extra(&self.common.extra);
        attrs.render()
    }
}

/// Self-closing `<input>` element.
#[derive(Debug, Clone, Default)]
pub struct Input {
    pub common: CommonAttrs,
    pub input_type: String,
    pub name: String,
    pub value: String,
    pub disabled: bool,
    pub placeholder: String,
    pub checked: bool,
}

impl Input {
    fn attrs(&self) -> String {
        let mut attrs = AttrList::default();
        self.common.collect(&mut attrs);
        attrs.push("type", self.input_type.as_str());
        attrs.push("name", self.name.as_str());
        attrs.push("value", self.value.as_str());
        attrs.push("disabled", self.disabled);
        attrs.push("placeholder", self.placeholder.as_str());
        attrs.push("checked", self.checked);
        attrs.merge_extra(&self.common.extra);
        attrs.render()
    }
}

/// `<textarea>`; the value renders as element content.
#[derive(Debug, Clone, Default)]
pub struct Textarea {
    pub common: CommonAttrs,
    pub input_type: String,
    pub name: String,
    pub value: String,
    pub disabled: bool,
}

impl Textarea {
    fn attrs(&self) -> String {
        let mut attrs = AttrList::default();
        self.common.collect(&mut attrs);
        attrs.push("type", self.input_type.as_str());
        attrs.push("name", self.name.as_str());
        attrs.push("disabled", self.disabled);
        attrs.merge_extra(&self.common.extra);
        attrs.render()
    }
}

/// `<button>`; the value renders as element content.
#[derive(Debug, Clone, Default)]
pub struct Button {
    pub common: CommonAttrs,
    pub input_type: String,
    pub name: String,
    pub value: String,
    pub disabled: bool,
}

impl Button {
    fn attrs(&self) -> String {
        let mut attrs = AttrList::default();
        self.common.collect(&mut attrs);
        attrs.push("type", self.input_type.as_str());
        attrs.push("name", self.name.as_str());
        attrs.push("disabled", self.disabled);
        attrs.merge_extra(&self.common.extra);
        attrs.render()
    }
}

/// One `<option>` inside a [`Select`].
#[derive(Debug, Clone, Default)]
pub struct SelectOption {
    pub common: CommonAttrs,
    pub value: String,
    pub selected: bool,
}

impl SelectOption {
    fn attrs(&self) -> String {
        let mut attrs = AttrList::default();
        self.common.collect(&mut attrs);
        attrs.push("value", self.value.as_str());
        attrs.push("selected", self.selected);
        attrs.merge_extra(&self.common.extra);
        attrs.render()
    }
}

impl fmt::Display for SelectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<option {}>{}</option>", self.attrs(), self.value)
    }
}

/// `<select>` with ordered option children.
#[derive(Debug, Clone, Default)]
pub struct Select {
    pub common: CommonAttrs,
    pub name: String,
    pub options: Vec<SelectOption>,
    pub disabled: bool,
    pub multiple: bool,
}

impl Select {
    fn attrs(&self) -> String {
        let mut attrs = AttrList::default();
        self.common.collect(&mut attrs);
        attrs.push("name", self.name.as_str());
        attrs.push("disabled", self.disabled);
        attrs.push("multiple", self.multiple);
        attrs.merge_extra(&self.common.extra);
        attrs.render()
    }
}

/// One node of the form markup tree.
#[derive(Debug, Clone)]
pub enum Tag {
    /// Bare grouping node; children serialize newline-joined
    Group(Vec<Tag>),
    /// Pre-rendered markup emitted verbatim
    Raw(String),
    Form(Form),
    Div(Div),
    Paragraph(Div),
    Label(Label),
    Input(Input),
    Textarea(Textarea),
    Button(Button),
    Select(Select),
}

impl Tag {
    pub fn raw(text: impl Into<String>) -> Self {
        Tag::Raw(text.into())
    }
}

fn join_children(children: &[Tag]) -> String {
    children
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Group(children) => f.write_str(&join_children(children)),
            Tag::Raw(raw) => f.write_str(raw),
            Tag::Form(form) => write!(
                f,
                "<form {}>\n{}\n</form>",
                form.attrs(),
                join_children(&form.children)
            ),
            Tag::Div(div) => write!(
                f,
                "<div {}>\n{}\n</div>",
                div.attrs(),
                join_children(&div.children)
            ),
            Tag::Paragraph(div) => write!(
                f,
                "<p {}>\n{}\n</p>",
                div.attrs(),
                join_children(&div.children)
            ),
            Tag::Label(label) => write!(f, "<label {}>{}</label>", label.attrs(), label.text),
            Tag::Input(input) => write!(f, "<input {}>", input.attrs()),
            Tag::Textarea(textarea) => write!(
                f,
                "<textarea {}>{}</textarea>",
                textarea.attrs(),
                textarea.value
            ),
            Tag::Button(button) => {
                write!(f, "<button {}>{}</button>", button.attrs(), button.value)
            }
            Tag::Select(select) => {
                let options = select
                    .options
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n");
                write!(f, "<select {}>{}</select>", select.attrs(), options)
            }
        }
    }
}

/// Escape angle brackets for diagnostic placeholders embedded in markup.
pub(crate) fn escape_angle(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

//! Renderable tag tree and its markup serialization.

pub mod tags;

pub use tags::{
    AttrMap, AttrValue, Button, CommonAttrs, Div, Form, Input, Label, Select, SelectOption, Tag,
    Textarea,
};

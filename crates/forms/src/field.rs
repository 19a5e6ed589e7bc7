//! Field type & metadata.
//!
//! This module defines the declarative pieces of the form system:
//! - `FieldType`: the closed set of seven field kinds (wire tag names)
//! - `FieldKind`: per-kind attributes carried by a field
//! - `Field`: common metadata (id, label, help text, required/hidden flags)
//!
//! Everything here is pure data. Mutation lives in `controller.rs`, the
//! interaction rules per kind live in `input/`, validation in `validate.rs`.
//!
//! Wire shape (JSON):
//! ```json
//! { "id": "age", "type": "number", "label": "Age", "required": true, "min": 18 }
//! ```
//!
//! Usage:
//! ```ignore
//! use forms::{Field, FieldKind, NumberAttrs};
//!
//! let age = Field::new("age", "Age", FieldKind::Number(NumberAttrs { min: Some(18.0), max: None }))
//!     .help("Must be an adult")
//!     .required();
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::value::fmt_number;

/// The seven field kinds a schema may declare.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Radio,
    Checkbox,
    Slider,
    File,
}

/// Input affordance hint for text fields. Never affects validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
    Tel,
    Url,
}

/// Presentation of an options field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OptionsLayout {
    #[default]
    Vertical,
    Horizontal,
    Dropdown,
}

/// Value carried by a radio/checkbox option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    #[serde(serialize_with = "crate::value::serialize_number")]
    Number(f64),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Number(n) => f.write_str(&fmt_number(*n)),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionItem {
    pub label: String,
    pub value: OptionValue,
}

impl OptionItem {
    pub fn new(label: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Attributes shared by `text` and `textarea`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expression, searched (not anchored) in non-empty values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
}

impl TextAttrs {
    pub fn input_type(&self) -> InputType {
        self.input_type.unwrap_or_default()
    }
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderAttrs {
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default)]
    pub show_ticks: bool,
}

impl SliderAttrs {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: None,
            show_ticks: false,
        }
    }

    /// Step size, `1` when unset.
    pub fn step(&self) -> f64 {
        self.step.unwrap_or(1.0)
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Attributes shared by `radio` and `checkbox`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<OptionsLayout>,
    pub options: Vec<OptionItem>,
}

impl OptionsAttrs {
    pub fn new(options: Vec<OptionItem>) -> Self {
        Self {
            layout: None,
            options,
        }
    }

    pub fn layout(&self) -> OptionsLayout {
        self.layout.unwrap_or_default()
    }

    pub fn contains(&self, value: &OptionValue) -> bool {
        self.options.iter().any(|o| &o.value == value)
    }

    pub fn label_of(&self, value: &OptionValue) -> Option<&str> {
        self.options
            .iter()
            .find(|o| &o.value == value)
            .map(|o| o.label.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileAttrs {
    /// MIME / extension hint, advisory only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    #[serde(default, rename = "maxSizeMB", skip_serializing_if = "Option::is_none")]
    pub max_size_mb: Option<f64>,
    #[serde(default)]
    pub multiple: bool,
}

/// Per-kind attributes, internally tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text(TextAttrs),
    Textarea(TextAttrs),
    Number(NumberAttrs),
    Radio(OptionsAttrs),
    Checkbox(OptionsAttrs),
    Slider(SliderAttrs),
    File(FileAttrs),
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text(_) => FieldType::Text,
            FieldKind::Textarea(_) => FieldType::Textarea,
            FieldKind::Number(_) => FieldType::Number,
            FieldKind::Radio(_) => FieldType::Radio,
            FieldKind::Checkbox(_) => FieldType::Checkbox,
            FieldKind::Slider(_) => FieldType::Slider,
            FieldKind::File(_) => FieldType::File,
        }
    }

    pub fn text_attrs(&self) -> Option<&TextAttrs> {
        match self {
            FieldKind::Text(a) | FieldKind::Textarea(a) => Some(a),
            _ => None,
        }
    }

    pub fn options_attrs(&self) -> Option<&OptionsAttrs> {
        match self {
            FieldKind::Radio(a) | FieldKind::Checkbox(a) => Some(a),
            _ => None,
        }
    }
}

/// Declarative description of a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Unique within a schema; key into the value store.
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Hidden fields are neither rendered nor validated.
    #[serde(default)]
    pub hidden: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl Field {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            help_text: None,
            required: false,
            hidden: false,
            kind,
        }
    }

    /// Attach optional help / hint text shown beneath the label.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help_text = Some(help.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    /// True for fields edited through a free-text editor.
    pub fn is_textual(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::Text(_) | FieldKind::Textarea(_) | FieldKind::Number(_)
        )
    }
}

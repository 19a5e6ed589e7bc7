//! Form schema definition.
//!
//! `FormSchema` groups the ordered `Field` definitions together with form
//! level metadata (id, title, description, submit label). Field order is the
//! render and validation order; nothing reorders it.
//!
//! A schema is immutable once handed to a `FormController`. `check()` runs the
//! structural sanity pass (unique ids, sane bounds, compilable patterns) that
//! the controller also runs when mounting.
//!
//! ```ignore
//! let schema = FormSchema::new("signup", "Sign up", vec![
//!     Field::new("name", "Name", FieldKind::Text(TextAttrs::default())).required(),
//! ])
//! .description("Tell us who you are")
//! .with_submit_label("Create account");
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::field::{Field, FieldKind};
use crate::validate::PatternCache;

pub const DEFAULT_SUBMIT_LABEL: &str = "Submit";

/// Declarative schema for a multi-field form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub form_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_label: Option<String>,
    pub fields: Vec<Field>,
}

impl FormSchema {
    pub fn new(form_id: impl Into<String>, title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            form_id: form_id.into(),
            title: title.into(),
            description: None,
            submit_label: None,
            fields,
        }
    }

    /// Attach an optional description (multi-line friendly).
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = Some(label.into());
        self
    }

    /// Label of the submit button, `"Submit"` when unset.
    pub fn submit_label(&self) -> &str {
        self.submit_label.as_deref().unwrap_or(DEFAULT_SUBMIT_LABEL)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Find a field by its id.
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Fields that are rendered and validated, in schema order.
    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.hidden)
    }

    pub fn from_json_str(s: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(s)?)
    }

    /// RON schemas use map syntax with the same keys as the JSON form:
    /// `{ "formId": "x", "title": "X", "fields": [ { "id": "a", "type": "text", ... } ] }`
    pub fn from_ron_str(s: &str) -> Result<Self, SchemaError> {
        let value: serde_json::Value = ron::from_str(s)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Structural sanity pass.
    pub fn check(&self) -> Result<(), SchemaError> {
        self.compile().map(|_| ())
    }

    /// `check()` plus the compiled text patterns, keyed by field id.
    pub(crate) fn compile(&self) -> Result<PatternCache, SchemaError> {
        let mut ids = HashSet::new();
        for field in &self.fields {
            if field.id.is_empty() {
                return Err(SchemaError::EmptyId {
                    label: field.label.clone(),
                });
            }
            if !ids.insert(field.id.as_str()) {
                return Err(SchemaError::DuplicateId(field.id.clone()));
            }
            check_field(field)?;
        }
        PatternCache::compile(self)
    }
}

fn check_field(field: &Field) -> Result<(), SchemaError> {
    let id = || field.id.clone();
    match &field.kind {
        FieldKind::Text(attrs) | FieldKind::Textarea(attrs) => {
            if let (Some(min), Some(max)) = (attrs.min_length, attrs.max_length) {
                if min > max {
                    return Err(SchemaError::LengthBounds { field: id(), min, max });
                }
            }
        }
        FieldKind::Number(attrs) => {
            if let (Some(min), Some(max)) = (attrs.min, attrs.max) {
                if min > max {
                    return Err(SchemaError::NumberBounds { field: id(), min, max });
                }
            }
        }
        FieldKind::Slider(attrs) => {
            if !(attrs.min < attrs.max) {
                return Err(SchemaError::EmptyRange {
                    field: id(),
                    min: attrs.min,
                    max: attrs.max,
                });
            }
            let step = attrs.step();
            if !(step > 0.0) {
                return Err(SchemaError::InvalidStep { field: id(), step });
            }
        }
        FieldKind::Radio(attrs) | FieldKind::Checkbox(attrs) => {
            for (idx, option) in attrs.options.iter().enumerate() {
                if attrs.options[..idx].iter().any(|o| o.value == option.value) {
                    return Err(SchemaError::DuplicateOption {
                        field: id(),
                        value: option.value.to_string(),
                    });
                }
            }
        }
        FieldKind::File(attrs) => {
            if let Some(max_mb) = attrs.max_size_mb {
                if !(max_mb > 0.0) {
                    return Err(SchemaError::InvalidMaxSize { field: id(), max_mb });
                }
            }
        }
    }
    Ok(())
}

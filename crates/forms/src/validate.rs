//! Field validators.
//!
//! Validation runs only on submit. Fields are visited in schema order and
//! hidden fields are skipped. Each field yields at most one error; the first
//! failing check wins:
//!
//!   1. required     -> `Required` (blank value) / `EmptySelection` (checkbox)
//!   2. text family  -> `TooShort`, `TooLong`, `PatternMismatch`
//!   3. number       -> `BelowMin`, `AboveMax` (only when the value parses)
//!   4. slider, radio, file: nothing beyond the required check
//!
//! Non-numeric text in a number field is deliberately not rejected; only
//! parseable values are bounds-checked.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use regex::Regex;
use tracing::warn;

use crate::error::SchemaError;
use crate::field::{Field, FieldKind, NumberAttrs, TextAttrs};
use crate::schema::FormSchema;
use crate::value::{FieldValue, FormValues, fmt_number};

/// Field-scoped, user-facing validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    Required { label: String },
    EmptySelection,
    TooShort { min: usize },
    TooLong { max: usize },
    PatternMismatch,
    BelowMin { min: f64 },
    AboveMax { max: f64 },
    /// Advisory: a picked batch contained a file over the size limit.
    FileTooLarge { name: String, max_mb: f64 },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required { label } => write!(f, "{label} is required"),
            FieldError::EmptySelection => f.write_str("Please select at least one option"),
            FieldError::TooShort { min } => write!(f, "Minimum {min} characters required"),
            FieldError::TooLong { max } => write!(f, "Maximum {max} characters allowed"),
            FieldError::PatternMismatch => f.write_str("Invalid format"),
            FieldError::BelowMin { min } => write!(f, "Minimum value is {}", fmt_number(*min)),
            FieldError::AboveMax { max } => write!(f, "Maximum value is {}", fmt_number(*max)),
            FieldError::FileTooLarge { name, max_mb } => {
                write!(f, "File {name} exceeds {}MB", fmt_number(*max_mb))
            }
        }
    }
}

/// Field id -> error. A missing key means "no error for that field".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(HashMap<String, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&FieldError> {
        self.0.get(id)
    }

    /// Display text for a field's error, if any.
    pub fn message(&self, id: &str) -> Option<String> {
        self.0.get(id).map(|e| e.to_string())
    }

    pub fn insert(&mut self, id: &str, error: FieldError) {
        self.0.insert(id.to_string(), error);
    }

    pub fn remove(&mut self, id: &str) -> Option<FieldError> {
        self.0.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldError)> {
        self.0.iter()
    }

    /// Messages ordered by field id (stable for printing).
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(id, e)| (id.clone(), e.to_string()))
            .collect()
    }
}

/// Text patterns compiled once per mounted schema, keyed by field id.
#[derive(Debug, Clone, Default)]
pub struct PatternCache(HashMap<String, Regex>);

impl PatternCache {
    pub fn compile(schema: &FormSchema) -> Result<Self, SchemaError> {
        let mut cache = HashMap::new();
        for field in &schema.fields {
            let Some(pattern) = field.kind.text_attrs().and_then(|a| a.pattern.as_deref()) else {
                continue;
            };
            let regex = Regex::new(pattern).map_err(|source| SchemaError::Pattern {
                field: field.id.clone(),
                source,
            })?;
            cache.insert(field.id.clone(), regex);
        }
        Ok(Self(cache))
    }

    pub fn get(&self, id: &str) -> Option<&Regex> {
        self.0.get(id)
    }
}

/// Validate one field against its current value.
pub fn validate_field(
    field: &Field,
    value: &FieldValue,
    patterns: &PatternCache,
) -> Option<FieldError> {
    if field.required {
        if value.is_blank() {
            return Some(FieldError::Required {
                label: field.label.clone(),
            });
        }
        match &field.kind {
            FieldKind::Checkbox(_) if value.is_empty_sequence() => {
                return Some(FieldError::EmptySelection);
            }
            _ => {}
        }
    }

    match &field.kind {
        FieldKind::Text(attrs) | FieldKind::Textarea(attrs) => {
            check_text(field, attrs, value, patterns)
        }
        FieldKind::Number(attrs) => check_number(attrs, value),
        FieldKind::Radio(_) | FieldKind::Checkbox(_) | FieldKind::Slider(_) | FieldKind::File(_) => {
            None
        }
    }
}

fn check_text(
    field: &Field,
    attrs: &TextAttrs,
    value: &FieldValue,
    patterns: &PatternCache,
) -> Option<FieldError> {
    let text = value.as_text();
    let len = text.chars().count();

    if let Some(min) = attrs.min_length.filter(|m| *m > 0) {
        if len < min {
            return Some(FieldError::TooShort { min });
        }
    }
    if let Some(max) = attrs.max_length.filter(|m| *m > 0) {
        if len > max {
            return Some(FieldError::TooLong { max });
        }
    }
    if attrs.pattern.as_deref().is_some_and(|p| !p.is_empty()) && !text.is_empty() {
        match patterns.get(&field.id) {
            Some(regex) if !regex.is_match(&text) => return Some(FieldError::PatternMismatch),
            Some(_) => {}
            None => warn!(field = %field.id, "pattern not compiled, skipping format check"),
        }
    }
    None
}

fn check_number(attrs: &NumberAttrs, value: &FieldValue) -> Option<FieldError> {
    let n = value.as_number()?;
    if let Some(min) = attrs.min {
        if n < min {
            return Some(FieldError::BelowMin { min });
        }
    }
    if let Some(max) = attrs.max {
        if n > max {
            return Some(FieldError::AboveMax { max });
        }
    }
    None
}

/// Validate every visible field in schema order.
pub fn validate_form(schema: &FormSchema, values: &FormValues, patterns: &PatternCache) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in schema.visible_fields() {
        if let Some(err) = validate_field(field, values.value_or_null(&field.id), patterns) {
            errors.insert(&field.id, err);
        }
    }
    errors
}

use thiserror::Error;

use crate::field::FieldType;
use crate::picker::PickError;

/// Structural problems in a schema, detected when it is loaded or mounted.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("field id must not be empty (label: {label})")]
    EmptyId { label: String },

    #[error("duplicate field id: {0}")]
    DuplicateId(String),

    #[error("field {field}: duplicate option value {value}")]
    DuplicateOption { field: String, value: String },

    #[error("field {field}: slider range is empty (min {min}, max {max})")]
    EmptyRange { field: String, min: f64, max: f64 },

    #[error("field {field}: step must be positive, got {step}")]
    InvalidStep { field: String, step: f64 },

    #[error("field {field}: minLength {min} exceeds maxLength {max}")]
    LengthBounds { field: String, min: usize, max: usize },

    #[error("field {field}: min {min} exceeds max {max}")]
    NumberBounds { field: String, min: f64, max: f64 },

    #[error("field {field}: maxSizeMB must be positive, got {max_mb}")]
    InvalidMaxSize { field: String, max_mb: f64 },

    #[error("field {field}: invalid pattern: {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ron error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Errors raised by the form controller for requests it cannot honour.
///
/// Validation failures are *not* reported here; they end up in the field
/// error map (`FieldErrors`).
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field {field} ({kind}) does not accept {interaction}")]
    Unsupported {
        field: String,
        kind: FieldType,
        interaction: &'static str,
    },

    #[error("field {field}: {value} is not one of its options")]
    UnknownOption { field: String, value: String },

    #[error("file picker failed: {0}")]
    Picker(#[from] PickError),
}

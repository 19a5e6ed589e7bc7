//! Schema-driven dynamic forms.
//!
//! A `FormSchema` declares an ordered list of typed fields. Mounting it in a
//! `FormController` synthesizes default values, and the controller then
//! routes every widget gesture through the per-kind rules in `input`,
//! validates on submit and hands the value snapshot to the submit callback.
//!
//! The crate is headless. Front-ends draw fields from borrowed state and
//! feed `Interaction`s back in; see the `wizard` terminal front-end.

pub mod controller;
pub mod error;
pub mod field;
pub mod input;
pub mod picker;
pub mod schema;
pub mod validate;
pub mod value;

pub use controller::{FormController, Phase, PickResult, SubmitOutcome};
pub use error::{FormError, SchemaError};
pub use field::{
    Field, FieldKind, FieldType, FileAttrs, InputType, NumberAttrs, OptionItem, OptionValue,
    OptionsAttrs, OptionsLayout, SliderAttrs, TextAttrs,
};
pub use input::{interact, Interaction};
pub use picker::{FilePicker, PickError, PickOutcome, PickRequest};
pub use schema::FormSchema;
pub use validate::{validate_field, validate_form, FieldError, FieldErrors, PatternCache};
pub use value::{FieldValue, FileInfo, FormValues};

//! Field renderers, headless half.
//!
//! Each field kind has a module with the interaction rules its widget
//! follows. A renderer never owns the authoritative value: it receives the
//! current value, turns a user gesture into an `Interaction`, and `interact`
//! answers with the change event to emit (if any). The controller applies it.
//!
//! Drawing lives with the front-end; everything here is pure.

pub mod file;
pub mod number;
pub mod options;
pub mod slider;
pub mod text;

use strum::IntoStaticStr;

use crate::error::FormError;
use crate::field::{Field, FieldKind, OptionValue};
use crate::value::FieldValue;

/// A user gesture addressed to one field.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
pub enum Interaction {
    /// Keystroke in a text or number editor; carries the whole new text.
    SetText(String),
    Increment,
    Decrement,
    /// Radio selection.
    Select(OptionValue),
    /// Checkbox toggle.
    Toggle(OptionValue),
    /// Slider press or drag at `position` along a track of `track_width`.
    Drag { position: f64, track_width: f64 },
    /// Keyboard slider movement by whole steps.
    Nudge(i8),
    RemoveFile(usize),
}

/// Translate an interaction into the change event it produces.
///
/// `Ok(None)` means the gesture does not emit a change (e.g. re-selecting
/// the selected radio option).
pub fn interact(
    field: &Field,
    current: &FieldValue,
    interaction: Interaction,
) -> Result<Option<FieldValue>, FormError> {
    let unsupported = |interaction: &Interaction| FormError::Unsupported {
        field: field.id.clone(),
        kind: field.field_type(),
        interaction: interaction.into(),
    };

    match (&field.kind, interaction) {
        (FieldKind::Text(_) | FieldKind::Textarea(_), Interaction::SetText(s)) => {
            Ok(Some(text::on_text(s)))
        }
        (FieldKind::Number(_), Interaction::SetText(s)) => Ok(number::on_text(&s)),
        (FieldKind::Number(attrs), Interaction::Increment) => {
            Ok(Some(number::increment(attrs, current)))
        }
        (FieldKind::Number(attrs), Interaction::Decrement) => {
            Ok(Some(number::decrement(attrs, current)))
        }
        (FieldKind::Radio(attrs), Interaction::Select(value)) => {
            if !attrs.contains(&value) {
                return Err(unknown_option(field, &value));
            }
            Ok(options::select(current, value))
        }
        (FieldKind::Checkbox(attrs), Interaction::Toggle(value)) => {
            if !attrs.contains(&value) {
                return Err(unknown_option(field, &value));
            }
            Ok(Some(options::toggle(current, value)))
        }
        (FieldKind::Slider(attrs), Interaction::Drag { position, track_width }) => Ok(Some(
            FieldValue::Number(slider::value_at(attrs, position, track_width)),
        )),
        (FieldKind::Slider(attrs), Interaction::Nudge(steps)) => {
            Ok(Some(FieldValue::Number(slider::nudge(attrs, current, steps))))
        }
        (FieldKind::File(attrs), Interaction::RemoveFile(index)) => {
            Ok(file::remove(attrs, current, index))
        }
        (_, other) => Err(unsupported(&other)),
    }
}

fn unknown_option(field: &Field, value: &OptionValue) -> FormError {
    FormError::UnknownOption {
        field: field.id.clone(),
        value: value.to_string(),
    }
}

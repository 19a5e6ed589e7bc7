//! Radio and checkbox selection rules.

use crate::field::OptionValue;
use crate::value::FieldValue;

/// Radio: selecting replaces the value. Re-selecting the current option
/// emits nothing; radios cannot be deselected.
pub fn select(current: &FieldValue, value: OptionValue) -> Option<FieldValue> {
    let next = FieldValue::from(value);
    (current != &next).then_some(next)
}

/// Checkbox: remove the first occurrence if present, else append.
/// The result keeps selection order.
pub fn toggle(current: &FieldValue, value: OptionValue) -> FieldValue {
    let mut selection = current.as_list().to_vec();
    match selection.iter().position(|v| v == &value) {
        Some(idx) => {
            selection.remove(idx);
        }
        None => selection.push(value),
    }
    FieldValue::List(selection)
}

pub fn is_selected(current: &FieldValue, value: &OptionValue) -> bool {
    match current {
        FieldValue::List(items) => items.contains(value),
        other => other == &FieldValue::from(value.clone()),
    }
}

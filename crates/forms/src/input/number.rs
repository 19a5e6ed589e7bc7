//! Number field: stepper plus free text entry.

use crate::field::NumberAttrs;
use crate::value::{fmt_number, parse_leading_number, FieldValue};

const STEP: f64 = 1.0;

pub fn increment(attrs: &NumberAttrs, current: &FieldValue) -> FieldValue {
    FieldValue::Number(clamp(attrs, base(current) + STEP))
}

pub fn decrement(attrs: &NumberAttrs, current: &FieldValue) -> FieldValue {
    FieldValue::Number(clamp(attrs, base(current) - STEP))
}

/// Text entry. `""` and `"-"` pass through so the user can keep typing;
/// parseable text becomes a number; anything else emits nothing.
pub fn on_text(text: &str) -> Option<FieldValue> {
    if text.is_empty() || text == "-" {
        return Some(FieldValue::Text(text.to_string()));
    }
    parse_leading_number(text).map(FieldValue::Number)
}

/// `"Min: 0 · Max: 10"`, or whichever half is set. `None` without bounds.
pub fn range_hint(attrs: &NumberAttrs) -> Option<String> {
    let parts: Vec<String> = [("Min", attrs.min), ("Max", attrs.max)]
        .into_iter()
        .filter_map(|(name, bound)| bound.map(|b| format!("{name}: {}", fmt_number(b))))
        .collect();
    (!parts.is_empty()).then(|| parts.join(" · "))
}

/// Text shown in the editor for the stored value.
pub fn display(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(n) => fmt_number(*n),
        other => other.as_text().into_owned(),
    }
}

fn base(current: &FieldValue) -> f64 {
    current.as_number().unwrap_or(0.0)
}

fn clamp(attrs: &NumberAttrs, n: f64) -> f64 {
    let n = attrs.min.map_or(n, |min| n.max(min));
    attrs.max.map_or(n, |max| n.min(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded() -> NumberAttrs {
        NumberAttrs {
            min: Some(0.0),
            max: Some(10.0),
        }
    }

    #[test]
    fn stepper_stays_within_bounds() {
        let attrs = bounded();
        assert_eq!(increment(&attrs, &FieldValue::from(10)), FieldValue::from(10));
        assert_eq!(decrement(&attrs, &FieldValue::from(0)), FieldValue::from(0));
        assert_eq!(increment(&attrs, &FieldValue::from(4)), FieldValue::from(5));
        assert_eq!(decrement(&attrs, &FieldValue::from(4)), FieldValue::from(3));
    }

    #[test]
    fn stepper_starts_from_zero_on_partial_input() {
        let attrs = NumberAttrs::default();
        assert_eq!(increment(&attrs, &FieldValue::from("-")), FieldValue::from(1));
        assert_eq!(decrement(&attrs, &FieldValue::from("")), FieldValue::from(-1));
    }

    #[test]
    fn stepper_pulls_out_of_range_values_back() {
        let attrs = bounded();
        assert_eq!(decrement(&attrs, &FieldValue::from(25)), FieldValue::from(10));
    }

    #[test]
    fn text_entry_sentinels_and_parsing() {
        assert_eq!(on_text(""), Some(FieldValue::from("")));
        assert_eq!(on_text("-"), Some(FieldValue::from("-")));
        assert_eq!(on_text("-4"), Some(FieldValue::from(-4)));
        assert_eq!(on_text("2.5"), Some(FieldValue::from(2.5)));
        assert_eq!(on_text("abc"), None);
    }

    #[test]
    fn range_hint_formats_bounds() {
        assert_eq!(range_hint(&bounded()).as_deref(), Some("Min: 0 · Max: 10"));
        let lower = NumberAttrs {
            min: Some(18.0),
            max: None,
        };
        assert_eq!(range_hint(&lower).as_deref(), Some("Min: 18"));
        assert_eq!(range_hint(&NumberAttrs::default()), None);
    }
}

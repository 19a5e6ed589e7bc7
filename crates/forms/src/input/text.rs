//! Text and textarea editors.

use crate::field::{InputType, TextAttrs};
use crate::value::FieldValue;

/// Every keystroke emits the full new text.
pub fn on_text(text: String) -> FieldValue {
    FieldValue::Text(text)
}

/// Editor-side length cap. The editor refuses input past `maxLength`; the
/// validator still reports over-long values that arrive from elsewhere.
pub fn clip_to_max_length(attrs: &TextAttrs, text: &str) -> String {
    match attrs.max_length {
        Some(max) if max > 0 => text.chars().take(max).collect(),
        _ => text.to_string(),
    }
}

/// What the editor shows for the current value. Passwords are masked.
pub fn display(attrs: &TextAttrs, value: &FieldValue) -> String {
    let text = value.as_text();
    match attrs.input_type() {
        InputType::Password => "•".repeat(text.chars().count()),
        _ => text.into_owned(),
    }
}

/// Kind of entry the field expects, shown next to the label in place of a
/// platform keyboard. Plain text and passwords need no hint.
pub fn keyboard_hint(attrs: &TextAttrs) -> Option<&'static str> {
    match attrs.input_type() {
        InputType::Email => Some("email address"),
        InputType::Tel => Some("phone number"),
        InputType::Url => Some("web address"),
        InputType::Text | InputType::Password => None,
    }
}

/// Placeholder shown while the value is blank.
pub fn placeholder<'a>(attrs: &'a TextAttrs, value: &FieldValue) -> Option<&'a str> {
    if value.is_blank() {
        attrs.placeholder.as_deref()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clips_by_characters() {
        let attrs = TextAttrs {
            max_length: Some(3),
            ..Default::default()
        };
        assert_eq!(clip_to_max_length(&attrs, "héllo"), "hél");
        assert_eq!(clip_to_max_length(&TextAttrs::default(), "héllo"), "héllo");
    }

    #[test]
    fn zero_max_length_does_not_clip() {
        let attrs = TextAttrs {
            max_length: Some(0),
            ..Default::default()
        };
        assert_eq!(clip_to_max_length(&attrs, "abc"), "abc");
    }

    #[test]
    fn masks_passwords() {
        let attrs = TextAttrs {
            input_type: Some(InputType::Password),
            ..Default::default()
        };
        assert_eq!(display(&attrs, &FieldValue::from("abc")), "•••");
        assert_eq!(display(&TextAttrs::default(), &FieldValue::from("abc")), "abc");
    }

    #[test]
    fn placeholder_only_when_blank() {
        let attrs = TextAttrs {
            placeholder: Some("Your name".into()),
            ..Default::default()
        };
        assert_eq!(placeholder(&attrs, &FieldValue::from("")), Some("Your name"));
        assert_eq!(placeholder(&attrs, &FieldValue::from("Al")), None);
    }

    #[test]
    fn keyboard_hint_follows_input_type() {
        let of = |input_type| TextAttrs {
            input_type: Some(input_type),
            ..Default::default()
        };
        assert_eq!(keyboard_hint(&of(InputType::Email)), Some("email address"));
        assert_eq!(keyboard_hint(&of(InputType::Tel)), Some("phone number"));
        assert_eq!(keyboard_hint(&of(InputType::Url)), Some("web address"));
        assert_eq!(keyboard_hint(&of(InputType::Password)), None);
        assert_eq!(keyboard_hint(&TextAttrs::default()), None);
    }
}

//! Field values & the value store.
//!
//! `FieldValue` is the shape a field's current value may take. Which shape
//! applies is decided by the field kind:
//!   * text / textarea / radio      -> `Text` (radio may also hold `Number`/`Bool`)
//!   * number                       -> `Number`, or `Text` for partial input (`""`, `"-"`)
//!   * checkbox                     -> `List` (selection order)
//!   * slider                       -> `Number`
//!   * file                         -> `File` (single) / `Files` (multiple), `Null` once cleared
//!
//! `FormValues` maps field ids to values. It is kept ordered by id so
//! serialized snapshots are stable.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::field::{Field, FieldKind, OptionValue};
use crate::schema::FormSchema;

/// Metadata of a picked file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub uri: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl FileInfo {
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            size: None,
            mime_type: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    #[serde(serialize_with = "serialize_number")]
    Number(f64),
    Text(String),
    List(Vec<OptionValue>),
    File(FileInfo),
    Files(Vec<FileInfo>),
}

static NULL: FieldValue = FieldValue::Null;

impl FieldValue {
    /// Empty in the sense of the required check: `null` or `""`.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Lenient numeric reading: numbers as-is, text through its leading
    /// numeric prefix (`"12abc"` -> 12). `None` when nothing parses.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if !n.is_nan() => Some(*n),
            FieldValue::Text(s) => parse_leading_number(s),
            _ => None,
        }
    }

    /// String rendition used by the text validators.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Null => Cow::Borrowed(""),
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            FieldValue::Number(n) => Cow::Owned(fmt_number(*n)),
            FieldValue::Bool(b) => Cow::Owned(b.to_string()),
            FieldValue::List(items) => Cow::Owned(
                items
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            FieldValue::File(f) => Cow::Borrowed(f.name.as_str()),
            FieldValue::Files(files) => Cow::Owned(
                files
                    .iter()
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }

    /// Checkbox selection; empty for every other shape.
    pub fn as_list(&self) -> &[OptionValue] {
        match self {
            FieldValue::List(items) => items,
            _ => &[],
        }
    }

    /// True for an empty sequence of either kind.
    pub fn is_empty_sequence(&self) -> bool {
        match self {
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Files(files) => files.is_empty(),
            _ => false,
        }
    }
}

impl From<OptionValue> for FieldValue {
    fn from(value: OptionValue) -> Self {
        match value {
            OptionValue::Bool(b) => FieldValue::Bool(b),
            OptionValue::Number(n) => FieldValue::Number(n),
            OptionValue::Text(s) => FieldValue::Text(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<OptionValue>> for FieldValue {
    fn from(value: Vec<OptionValue>) -> Self {
        FieldValue::List(value)
    }
}

impl From<FileInfo> for FieldValue {
    fn from(value: FileInfo) -> Self {
        FieldValue::File(value)
    }
}

impl From<Vec<FileInfo>> for FieldValue {
    fn from(value: Vec<FileInfo>) -> Self {
        FieldValue::Files(value)
    }
}

/// Default value synthesized for a field when no override is supplied.
pub fn default_for(field: &Field) -> FieldValue {
    match &field.kind {
        FieldKind::Slider(attrs) => FieldValue::Number(attrs.min),
        FieldKind::Checkbox(_) => FieldValue::List(Vec::new()),
        FieldKind::Number(_) => FieldValue::Number(0.0),
        _ => FieldValue::Text(String::new()),
    }
}

/// Mapping from field id to current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for every field in schema order, then `overrides` on top.
    /// Hidden fields receive defaults too.
    pub fn initialize(schema: &FormSchema, overrides: Option<&FormValues>) -> Self {
        let mut values = FormValues::new();
        for field in &schema.fields {
            values.set(&field.id, default_for(field));
        }
        if let Some(overrides) = overrides {
            for (id, value) in overrides.iter() {
                values.set(id, value.clone());
            }
        }
        values
    }

    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.0.get(id)
    }

    /// Like `get`, but absent ids read as `Null`.
    pub fn value_or_null(&self, id: &str) -> &FieldValue {
        self.0.get(id).unwrap_or(&NULL)
    }

    pub fn set(&mut self, id: &str, value: impl Into<FieldValue>) {
        self.0.insert(id.to_string(), value.into());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Numbers as the user reads them: integral values without a fraction.
pub fn fmt_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Whole numbers go out as JSON integers (`20`, not `20.0`).
pub(crate) fn serialize_number<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        serializer.serialize_i64(*n as i64)
    } else {
        serializer.serialize_f64(*n)
    }
}

/// Parse the longest leading decimal literal of `text` (after leading
/// whitespace): optional sign, digits, optional fraction, optional exponent.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            end = j;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{NumberAttrs, OptionsAttrs, SliderAttrs, TextAttrs};

    fn schema() -> FormSchema {
        FormSchema::new(
            "f",
            "Form",
            vec![
                Field::new("name", "Name", FieldKind::Text(TextAttrs::default())),
                Field::new("age", "Age", FieldKind::Number(NumberAttrs::default())),
                Field::new("tags", "Tags", FieldKind::Checkbox(OptionsAttrs::default())),
                Field::new("level", "Level", FieldKind::Slider(SliderAttrs::new(3.0, 9.0))),
                Field::new("secret", "Secret", FieldKind::Text(TextAttrs::default())).hidden(),
            ],
        )
    }

    #[test]
    fn defaults_follow_field_kind() {
        let values = FormValues::initialize(&schema(), None);
        assert_eq!(values.get("name"), Some(&FieldValue::Text(String::new())));
        assert_eq!(values.get("age"), Some(&FieldValue::Number(0.0)));
        assert_eq!(values.get("tags"), Some(&FieldValue::List(vec![])));
        assert_eq!(values.get("level"), Some(&FieldValue::Number(3.0)));
        // hidden fields still get a default
        assert_eq!(values.get("secret"), Some(&FieldValue::Text(String::new())));
    }

    #[test]
    fn overrides_win_over_defaults() {
        let overrides: FormValues = [("age", FieldValue::from(42)), ("extra", FieldValue::from("x"))]
            .into_iter()
            .collect();
        let values = FormValues::initialize(&schema(), Some(&overrides));
        assert_eq!(values.get("age"), Some(&FieldValue::Number(42.0)));
        assert_eq!(values.get("name"), Some(&FieldValue::Text(String::new())));
        assert_eq!(values.get("extra"), Some(&FieldValue::Text("x".into())));
    }

    #[test]
    fn leading_number_prefix() {
        assert_eq!(parse_leading_number("12abc"), Some(12.0));
        assert_eq!(parse_leading_number("  -3.5"), Some(-3.5));
        assert_eq!(parse_leading_number("1."), Some(1.0));
        assert_eq!(parse_leading_number(".25"), Some(0.25));
        assert_eq!(parse_leading_number("2e3x"), Some(2000.0));
        assert_eq!(parse_leading_number("2e"), Some(2.0));
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number("."), None);
    }

    #[test]
    fn number_formatting_drops_integral_fraction() {
        assert_eq!(fmt_number(18.0), "18");
        assert_eq!(fmt_number(-2.0), "-2");
        assert_eq!(fmt_number(0.5), "0.5");
    }

    #[test]
    fn untagged_values_round_trip_through_json() {
        let json = r#"{
            "a": null,
            "b": "text",
            "c": 3,
            "d": ["x", 1, false],
            "e": { "uri": "file:///tmp/a.txt", "name": "a.txt", "size": 12 },
            "f": [{ "uri": "file:///tmp/b.txt", "name": "b.txt" }]
        }"#;
        let values: FormValues = serde_json::from_str(json).unwrap();
        assert_eq!(values.get("a"), Some(&FieldValue::Null));
        assert_eq!(values.get("c"), Some(&FieldValue::Number(3.0)));
        assert_eq!(
            values.get("d"),
            Some(&FieldValue::List(vec![
                OptionValue::Text("x".into()),
                OptionValue::Number(1.0),
                OptionValue::Bool(false),
            ]))
        );
        assert_eq!(
            values.get("e"),
            Some(&FieldValue::File(
                FileInfo::new("file:///tmp/a.txt", "a.txt").with_size(12)
            ))
        );
        assert_eq!(
            values.get("f"),
            Some(&FieldValue::Files(vec![FileInfo::new(
                "file:///tmp/b.txt",
                "b.txt"
            )]))
        );
    }

    #[test]
    fn whole_numbers_serialize_as_integers() {
        let values: FormValues = [
            ("age", FieldValue::Number(20.0)),
            ("ratio", FieldValue::Number(2.5)),
            ("tags", FieldValue::List(vec![OptionValue::Number(3.0), OptionValue::Number(-0.25)])),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            values.to_json(),
            serde_json::json!({"age": 20, "ratio": 2.5, "tags": [3, -0.25]})
        );
        assert_eq!(serde_json::to_string(&FieldValue::Number(-7.0)).unwrap(), "-7");
    }

    #[test]
    fn blank_and_numeric_views() {
        assert!(FieldValue::Null.is_blank());
        assert!(FieldValue::from("").is_blank());
        assert!(!FieldValue::from(0).is_blank());
        assert!(!FieldValue::List(vec![]).is_blank());
        assert_eq!(FieldValue::from("abc").as_number(), None);
        assert_eq!(FieldValue::from("15").as_number(), Some(15.0));
        assert_eq!(FieldValue::from(7).as_text(), "7");
    }
}

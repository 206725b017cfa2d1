//! Untyped field bag mutated by the form controller.
//!
//! Forms are edited one field at a time, so the controller keeps values in a
//! name-keyed map rather than a typed record. Typed records are built from the
//! map only once the whole form validates (see `FormPayload`).

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ModelError;

/// Accepted text layouts for date coercion, tried in order after RFC 3339.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// An uploaded identification document (metadata only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// A single form field value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    #[default]
    Empty,
    Text(String),
    Bool(bool),
    Date(NaiveDateTime),
    Files(Vec<Attachment>),
}

impl FieldValue {
    /// True for values an optional field treats as "not provided".
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Files(files) => files.is_empty(),
            Self::Bool(_) | Self::Date(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerce to a date: native dates pass through, text is parsed.
    pub fn coerce_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Text(s) => parse_date_text(s.trim()),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(d: NaiveDateTime) -> Self {
        Self::Date(d)
    }
}

impl From<Vec<Attachment>> for FieldValue {
    fn from(files: Vec<Attachment>) -> Self {
        Self::Files(files)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Field name → value. Missing keys read as `FieldValue::Empty`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style `set`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> &FieldValue {
        const EMPTY: &FieldValue = &FieldValue::Empty;
        self.0.get(field).unwrap_or(EMPTY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // ── Typed accessors used when building payloads ─────────

    /// Required text field.
    pub fn text(&self, field: &str) -> Result<String, ModelError> {
        match self.get(field) {
            FieldValue::Text(s) => Ok(s.clone()),
            FieldValue::Empty => Err(ModelError::MissingField(field.into())),
            _ => Err(ModelError::WrongType {
                field: field.into(),
                expected: "text",
            }),
        }
    }

    /// Optional text field; empty text reads as `None`.
    pub fn optional_text(&self, field: &str) -> Result<Option<String>, ModelError> {
        match self.get(field) {
            FieldValue::Empty => Ok(None),
            FieldValue::Text(s) if s.is_empty() => Ok(None),
            FieldValue::Text(s) => Ok(Some(s.clone())),
            _ => Err(ModelError::WrongType {
                field: field.into(),
                expected: "text",
            }),
        }
    }

    /// Boolean field; missing reads as `false` (checkbox default).
    pub fn flag(&self, field: &str) -> Result<bool, ModelError> {
        match self.get(field) {
            FieldValue::Empty => Ok(false),
            FieldValue::Bool(b) => Ok(*b),
            _ => Err(ModelError::WrongType {
                field: field.into(),
                expected: "boolean",
            }),
        }
    }

    pub fn date(&self, field: &str) -> Result<NaiveDateTime, ModelError> {
        let value = self.get(field);
        if value.is_empty() {
            return Err(ModelError::MissingField(field.into()));
        }
        value.coerce_date().ok_or_else(|| ModelError::WrongType {
            field: field.into(),
            expected: "date",
        })
    }

    pub fn files(&self, field: &str) -> Result<Vec<Attachment>, ModelError> {
        match self.get(field) {
            FieldValue::Empty => Ok(Vec::new()),
            FieldValue::Files(files) => Ok(files.clone()),
            _ => Err(ModelError::WrongType {
                field: field.into(),
                expected: "files",
            }),
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn empty_detection() {
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::Files(vec![]).is_empty());
        assert!(!FieldValue::from(false).is_empty());
        assert!(!FieldValue::from(" ").is_empty());
    }

    #[test]
    fn coerces_plain_date() {
        let v = FieldValue::from("1990-04-12");
        assert_eq!(v.coerce_date(), Some(midnight(1990, 4, 12)));
    }

    #[test]
    fn coerces_rfc3339_to_utc() {
        let v = FieldValue::from("2024-07-01T09:30:00-03:00");
        let expected = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        assert_eq!(v.coerce_date(), Some(expected));
    }

    #[test]
    fn coerces_local_datetime_without_seconds() {
        let v = FieldValue::from("2024-07-01 09:30");
        assert!(v.coerce_date().is_some());
    }

    #[test]
    fn rejects_garbage_and_empty_dates() {
        assert!(FieldValue::from("amanhã").coerce_date().is_none());
        assert!(FieldValue::from("").coerce_date().is_none());
        assert!(FieldValue::from(true).coerce_date().is_none());
    }

    #[test]
    fn missing_key_reads_empty() {
        let values = FormValues::new();
        assert_eq!(values.get("name"), &FieldValue::Empty);
        assert!(matches!(
            values.text("name"),
            Err(ModelError::MissingField(f)) if f == "name"
        ));
        assert!(!values.flag("privacyConsent").unwrap());
    }

    #[test]
    fn wrong_type_is_reported() {
        let values = FormValues::new().with("name", true);
        assert!(matches!(
            values.text("name"),
            Err(ModelError::WrongType { expected: "text", .. })
        ));
    }

    #[test]
    fn optional_text_treats_blank_as_none() {
        let values = FormValues::new().with("note", "").with("reason", "Dor");
        assert_eq!(values.optional_text("note").unwrap(), None);
        assert_eq!(values.optional_text("reason").unwrap().as_deref(), Some("Dor"));
    }

    #[test]
    fn option_converts_to_empty() {
        let none: Option<String> = None;
        assert_eq!(FieldValue::from(none), FieldValue::Empty);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::Text("x".into()));
    }
}

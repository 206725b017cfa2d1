//! Client-side validation for the intake forms.
//!
//! - `rules`: independent field checks (`Rule` trait + built-in rules)
//! - `schema`: named schemas per record shape, built once
//! - `selector`: appointment action → schema

pub mod rules;
pub mod schema;
pub mod selector;

pub use rules::{is_valid_email, Rule, PHONE_PATTERN};
pub use schema::{schema, FieldRules, Schema, SchemaKind};
pub use selector::{schema_for_action, select_appointment_schema};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// True iff `phone` is `+` followed by 10 to 15 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    rules::PHONE_RE.is_match(phone)
}

/// Field name → first failing message. Empty means the record is valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

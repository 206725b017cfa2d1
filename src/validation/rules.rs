//! Field rules: independent predicate + message pairs.
//!
//! Each rule type implements `Rule`, so new checks are added as new types
//! without touching `Schema`. Text rules fail on non-text values.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::is_known_doctor;
use crate::models::FieldValue;

/// `+` followed by 10 to 15 ASCII digits.
pub const PHONE_PATTERN: &str = r"^\+[0-9]{10,15}$";

pub(crate) static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(PHONE_PATTERN).unwrap());

// Local part may not start with a dot and may not contain "..": both are
// checked outside the regex (no lookaround support).
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@(?:[A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$").unwrap()
});

/// A single check applied to one field value.
pub trait Rule: Send + Sync {
    /// True when `value` satisfies the rule.
    fn check(&self, value: &FieldValue) -> bool;

    /// Message shown next to the field when `check` fails.
    fn message(&self) -> &str;
}

/// Text value, with `Empty` read as the empty string.
fn text_of(value: &FieldValue) -> Option<&str> {
    match value {
        FieldValue::Empty => Some(""),
        FieldValue::Text(s) => Some(s),
        _ => None,
    }
}

/// Minimum length in characters.
pub struct MinLength {
    pub min: usize,
    pub message: String,
}

impl MinLength {
    pub fn new(min: usize, message: impl Into<String>) -> Self {
        Self { min, message: message.into() }
    }
}

impl Rule for MinLength {
    fn check(&self, value: &FieldValue) -> bool {
        text_of(value).is_some_and(|s| s.chars().count() >= self.min)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Maximum length in characters.
pub struct MaxLength {
    pub max: usize,
    pub message: String,
}

impl MaxLength {
    pub fn new(max: usize, message: impl Into<String>) -> Self {
        Self { max, message: message.into() }
    }
}

impl Rule for MaxLength {
    fn check(&self, value: &FieldValue) -> bool {
        text_of(value).is_some_and(|s| s.chars().count() <= self.max)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

pub struct Email {
    pub message: String,
}

impl Email {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Rule for Email {
    fn check(&self, value: &FieldValue) -> bool {
        text_of(value).is_some_and(is_valid_email)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

pub fn is_valid_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && EMAIL_RE.is_match(s)
}

/// Full-text regex match. The pattern carries its own anchors.
pub struct Pattern {
    pub regex: Regex,
    pub message: String,
}

impl Pattern {
    pub fn new(regex: Regex, message: impl Into<String>) -> Self {
        Self { regex, message: message.into() }
    }

    /// Phone rule: `+` followed by 10-15 digits.
    pub fn phone(message: impl Into<String>) -> Self {
        Self::new(PHONE_RE.clone(), message)
    }
}

impl Rule for Pattern {
    fn check(&self, value: &FieldValue) -> bool {
        text_of(value).is_some_and(|s| self.regex.is_match(s))
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Enum membership: the text must equal one of the allowed tokens exactly.
pub struct OneOf {
    pub allowed: Vec<&'static str>,
    pub message: String,
}

impl OneOf {
    pub fn new(allowed: Vec<&'static str>, message: impl Into<String>) -> Self {
        Self { allowed, message: message.into() }
    }
}

impl Rule for OneOf {
    fn check(&self, value: &FieldValue) -> bool {
        text_of(value).is_some_and(|s| self.allowed.contains(&s))
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Text must name a provider on the roster.
pub struct KnownDoctor {
    pub message: String,
}

impl KnownDoctor {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Rule for KnownDoctor {
    fn check(&self, value: &FieldValue) -> bool {
        text_of(value).is_some_and(is_known_doctor)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Value must be text (or empty). Guards free-text fields against booleans,
/// dates and attachments.
pub struct IsText {
    pub message: String,
}

impl IsText {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Rule for IsText {
    fn check(&self, value: &FieldValue) -> bool {
        text_of(value).is_some()
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Value must be a list of attachments (or empty).
pub struct IsFiles {
    pub message: String,
}

impl IsFiles {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Rule for IsFiles {
    fn check(&self, value: &FieldValue) -> bool {
        matches!(value, FieldValue::Empty | FieldValue::Files(_))
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Affirmative consent: only an explicit `true` passes.
///
/// Kept separate from any generic boolean rule so a consent field cannot be
/// satisfied by "any boolean" or by a truthy non-boolean value.
pub struct MustConsent {
    pub message: String,
}

impl MustConsent {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Rule for MustConsent {
    fn check(&self, value: &FieldValue) -> bool {
        matches!(value, FieldValue::Bool(true))
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Value must be a date or text that coerces to one.
pub struct CoercibleDate {
    pub message: String,
}

impl CoercibleDate {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Rule for CoercibleDate {
    fn check(&self, value: &FieldValue) -> bool {
        value.coerce_date().is_some()
    }

    fn message(&self) -> &str {
        &self.message
    }
}

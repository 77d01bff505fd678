use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use validator::ValidationErrors;

pub mod feed;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod reviews;
pub mod trips;
pub mod visits;
pub mod wishlist;

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const BLANK: &str = "This field may not be blank.";

/// Result type returned by the form conversion helpers.
pub type FormResult<T> = Result<T, FieldErrors>;

/// Validation messages keyed by payload field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for a single problem on a single field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Merges the messages of `other` into `self`.
    pub fn extend(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(value)` when no problem was recorded.
    pub fn into_result<T>(self, value: T) -> FormResult<T> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(" "))?;
        }
        Ok(())
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut result = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value ({}).", error.code),
                };
                result.add(&field.to_string(), message);
            }
        }
        result
    }
}

pub(crate) const INCORRECT_ID: &str = "Incorrect type. Expected pk value.";

/// A primary-key field as sent by the client.
///
/// Numbers and numeric strings are accepted; anything else that is present
/// is kept as `Invalid` so the form can report it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdField {
    #[default]
    Absent,
    Valid(i32),
    Invalid,
}

impl IdField {
    /// The identifier, treating an invalid value as absent.
    pub fn valid(self) -> Option<i32> {
        match self {
            IdField::Valid(id) => Some(id),
            IdField::Absent | IdField::Invalid => None,
        }
    }

    /// The identifier, recording a field error when the value is unusable.
    pub(crate) fn check(self, errors: &mut FieldErrors, field: &str, required: bool) -> Option<i32> {
        match self {
            IdField::Valid(id) => Some(id),
            IdField::Invalid => {
                errors.add(field, INCORRECT_ID);
                None
            }
            IdField::Absent => {
                if required {
                    errors.add(field, REQUIRED);
                }
                None
            }
        }
    }
}

impl From<i32> for IdField {
    fn from(id: i32) -> Self {
        IdField::Valid(id)
    }
}

impl<'de> Deserialize<'de> for IdField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
            Other(serde_json::Value),
        }

        let raw = Option::<RawId>::deserialize(deserializer)?;
        Ok(match raw {
            None => IdField::Absent,
            Some(RawId::Number(value)) => i32::try_from(value).map_or(IdField::Invalid, IdField::Valid),
            Some(RawId::Text(value)) => value
                .trim()
                .parse::<i32>()
                .map_or(IdField::Invalid, IdField::Valid),
            Some(RawId::Other(_)) => IdField::Invalid,
        })
    }
}

/// Lenient identifier for lookups: a non-numeric value counts as absent.
pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    IdField::deserialize(deserializer).map(IdField::valid)
}

/// Trims the input, collapses runs of whitespace and drops control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitizes every line and drops leading, trailing and repeated blank lines.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut previous_empty = true;

    for line in input.lines().map(sanitize_inline_text) {
        if line.is_empty() {
            if !previous_empty {
                result.push(String::new());
            }
            previous_empty = true;
        } else {
            result.push(line);
            previous_empty = false;
        }
    }

    while matches!(result.last(), Some(line) if line.is_empty()) {
        result.pop();
    }

    result.join("\n")
}

/// Sanitized non-blank text, or a field error naming what is wrong.
pub(crate) fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    multiline: bool,
) -> Option<String> {
    let Some(value) = value else {
        errors.add(field, REQUIRED);
        return None;
    };

    let sanitized = if multiline {
        sanitize_multiline_text(value)
    } else {
        sanitize_inline_text(value)
    };

    if sanitized.is_empty() {
        errors.add(field, BLANK);
        return None;
    }

    Some(sanitized)
}

/// Sanitized text for an optional field; a supplied but blank value is an error.
pub(crate) fn optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    multiline: bool,
) -> Option<String> {
    let value = value?;
    if value.trim().is_empty() {
        errors.add(field, BLANK);
        return None;
    }
    required_text(errors, field, Some(value), multiline)
}

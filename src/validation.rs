//! Field-level validators.
//!
//! Each validator returns `Some(ValidationError)` when the value violates the
//! constraint and `None` otherwise, so a factory can run all of them and
//! collect the failures.

use chrono::{DateTime, Utc};
use regex::Regex;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required value was absent.
    Missing,
    /// The value was empty or whitespace.
    Blank,
    /// The value length was outside the allowed bounds.
    Length,
    /// The value did not match the required pattern.
    Pattern,
    /// The value was outside the allowed range.
    OutOfRange,
    /// The value was not an absolute URL.
    InvalidUrl,
}

/// A local validation failure for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    field: &'static str,
    kind: ValidationErrorKind,
    message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: &'static str, kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }

    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Category of the failure.
    #[must_use]
    pub fn kind(&self) -> ValidationErrorKind {
        self.kind
    }

    /// Human readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Fails when a required value is absent.
pub fn when_missing<T>(value: Option<&T>, field: &'static str) -> Option<ValidationError> {
    match value {
        Some(_) => None,
        None => Some(ValidationError::new(
            field,
            ValidationErrorKind::Missing,
            "Value cannot be null.",
        )),
    }
}

/// Fails when the value is absent, empty or whitespace.
pub fn when_blank(value: Option<&str>, field: &'static str) -> Option<ValidationError> {
    match value {
        None => when_missing::<&str>(None, field),
        Some(v) if v.is_empty() => Some(ValidationError::new(
            field,
            ValidationErrorKind::Blank,
            "Value was out of range. Must not be empty.",
        )),
        Some(v) if v.trim().is_empty() => Some(ValidationError::new(
            field,
            ValidationErrorKind::Blank,
            "Value was out of range. Must not be whitespace.",
        )),
        Some(_) => None,
    }
}

/// Fails when a supplied value is blank. Absent values pass.
pub fn when_supplied_blank(value: Option<&str>, field: &'static str) -> Option<ValidationError> {
    value.and_then(|v| when_blank(Some(v), field))
}

/// Fails when the character count lies outside `min..=max`. Absent values pass.
pub fn when_length_out_of_range(
    value: Option<&str>,
    min: usize,
    max: usize,
    field: &'static str,
) -> Option<ValidationError> {
    let length = value?.chars().count();
    if (min..=max).contains(&length) {
        return None;
    }

    let message = if min == 0 {
        format!("Value was out of range. The length must be less than {max}.")
    } else {
        format!("Value was out of range. The length must be between {min} and {max}.")
    };
    Some(ValidationError::new(field, ValidationErrorKind::Length, message))
}

/// Fails when the value does not match `pattern`. Absent values pass.
pub fn when_pattern_mismatch(
    value: Option<&str>,
    pattern: &Regex,
    field: &'static str,
) -> Option<ValidationError> {
    let v = value?;
    if pattern.is_match(v) {
        None
    } else {
        Some(ValidationError::new(
            field,
            ValidationErrorKind::Pattern,
            format!("Value was out of range. Must match the pattern {}.", pattern.as_str()),
        ))
    }
}

/// Fails when `value` is earlier than `minimum`.
pub fn when_before(
    value: DateTime<Utc>,
    minimum: DateTime<Utc>,
    field: &'static str,
) -> Option<ValidationError> {
    if value < minimum {
        Some(ValidationError::new(
            field,
            ValidationErrorKind::OutOfRange,
            format!("Value was out of range. Must be greater than {minimum}."),
        ))
    } else {
        None
    }
}

/// Fails when the value is blank or not an absolute URL.
pub fn when_invalid_url(value: Option<&str>, field: &'static str) -> Option<ValidationError> {
    if let Some(error) = when_blank(value, field) {
        return Some(error);
    }

    match url::Url::parse(value?) {
        Ok(_) => None,
        Err(e) => Some(ValidationError::new(
            field,
            ValidationErrorKind::InvalidUrl,
            format!("Invalid URI: {e}."),
        )),
    }
}

/// Returns the first error of a chain of checks on the same field.
pub fn first_of<const N: usize>(checks: [Option<ValidationError>; N]) -> Option<ValidationError> {
    checks.into_iter().flatten().next()
}

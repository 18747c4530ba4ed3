use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

/// Validation errors for form fields and outbound requests.
///
/// The `Display` text is what the user sees in the alert banner or the
/// dialog, so it is phrased for people, not logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all fields.")]
    IncompleteForm,
    #[error("Distance must be a number.")]
    InvalidDistance(String),
    #[error("Date must be YYYY-MM-DD and not in the future.")]
    InvalidDate(String),
    #[error("Code must be 6 digits.")]
    InvalidCode,
}

/// Length of the authenticator code accepted by the API.
pub const CODE_LENGTH: usize = 6;

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("valid hardcoded regex"));

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid hardcoded regex")
});

static DISTANCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid hardcoded regex"));

/// Validates an authenticator code: exactly six ASCII digits.
pub fn validate_code(token: &str) -> Result<(), ValidationError> {
    if CODE_RE.is_match(token) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCode)
    }
}

/// Validates a distance: a non-negative decimal number such as `53128` or `12.5`.
pub fn validate_distance(distance: &str) -> Result<(), ValidationError> {
    if DISTANCE_RE.is_match(distance.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDistance(distance.to_string()))
    }
}

/// Validates a zero-padded `YYYY-MM-DD` date that is not after `today`.
///
/// chrono alone accepts `2026-3-4`, so the shape is checked first.
pub fn validate_date(date: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate(date.to_string());
    if !DATE_RE.is_match(date) {
        return Err(invalid());
    }
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) if parsed <= today => Ok(parsed),
        _ => Err(invalid()),
    }
}

/// Trims a tag value. Returns `None` when nothing is left.
pub fn normalize_tag(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

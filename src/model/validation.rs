use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Validation errors for form field values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("invalid date (use YYYY-MM-DD): {0}")]
    InvalidDate(String),
    #[error("invalid time (use YYYY-MM-DDTHH:MM): {0}")]
    InvalidDateTime(String),
    #[error("invalid hours value: {0}")]
    InvalidHours(String),
}

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid hardcoded regex"));

static DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}$").expect("valid hardcoded regex")
});

/// Validates that a required field is non-empty after trimming.
pub fn validate_required(label: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(label))
    } else {
        Ok(())
    }
}

/// Validates a calendar date in `YYYY-MM-DD` form.
pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    if DATE_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDate(value.to_string()))
    }
}

/// Validates a local timestamp in `YYYY-MM-DDTHH:MM` form.
pub fn validate_datetime(value: &str) -> Result<(), ValidationError> {
    if DATETIME_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDateTime(value.to_string()))
    }
}

/// Validates an hours field: empty counts as zero, otherwise a finite,
/// non-negative number.
pub fn validate_hours(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    match value.trim().parse::<f64>() {
        Ok(h) if h.is_finite() && h >= 0.0 => Ok(()),
        _ => Err(ValidationError::InvalidHours(value.to_string())),
    }
}

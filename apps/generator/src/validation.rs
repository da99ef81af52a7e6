//! Form validation: required-field presence only, no format checks.

use crate::errors::AppError;
use crate::models::job::{JobFormInput, REQUIRED_FIELDS};

/// Names of required fields that are blank after trimming.
pub fn missing_fields(form: &JobFormInput) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|name| form.field(name).map_or(true, |v| v.trim().is_empty()))
        .collect()
}

/// Passes iff every required field is non-empty after trimming.
pub fn validate_form(form: &JobFormInput) -> Result<(), AppError> {
    let missing = missing_fields(form);
    if missing.is_empty() {
        return Ok(());
    }
    Err(AppError::Validation {
        missing: missing.into_iter().map(str::to_string).collect(),
    })
}

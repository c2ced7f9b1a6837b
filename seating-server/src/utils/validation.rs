//! Input validation helpers
//!
//! Length limits follow what fits on a place card and in the seating chart.

use shared::error::ErrorCode;

use crate::utils::AppError;

/// Guest first/last name, table name
pub const MAX_NAME_LEN: usize = 50;

/// Free-text dietary notes
pub const MAX_NOTE_LEN: usize = 500;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    let len = value.trim().chars().count();
    if len > max_len {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long ({len} chars, max {max_len})"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        let len = v.chars().count();
        if len > max_len {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("{field} is too long ({len} chars, max {max_len})"),
            )
            .with_detail("field", field));
        }
    }
    Ok(())
}

/// Validate an optional replacement for a required string.
pub fn validate_optional_required_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_required_text(v, field, max_len),
        None => Ok(()),
    }
}

//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by
//! the CRUD handlers.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu items, inventory items, user names
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, special instructions / requests
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, units, card fields
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that an integer falls inside an inclusive range.
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    field: &str,
    min: T,
    max: T,
) -> Result<(), AppError> {
    if value < min || value > max {
        return Err(AppError::validation(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(())
}

/// Validate that a float is finite and non-negative.
pub fn validate_non_negative(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("ok", "name", 10).is_ok());
        assert!(validate_required_text("  ", "name", 10).is_err());
        assert!(validate_required_text("toolongvalue", "name", 5).is_err());
    }

    #[test]
    fn test_range() {
        assert!(validate_range(3, "rating", 1, 5).is_ok());
        assert!(validate_range(0, "rating", 1, 5).is_err());
        assert!(validate_range(6, "rating", 1, 5).is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_non_negative(0.0, "price").is_ok());
        assert!(validate_non_negative(-1.0, "price").is_err());
        assert!(validate_non_negative(f64::NAN, "price").is_err());
    }
}

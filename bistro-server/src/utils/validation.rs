//! Input validation helpers
//!
//! Centralized text length limits and validation functions shared by the
//! catalog, settings and account services.

use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: wine, menu item, drink, category
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and the configuration announcement
pub const MAX_DESCRIPTION_LEN: usize = 2000;

pub const MAX_USERNAME_LEN: usize = 64;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, format!("{field} must not be empty"))
                .with_detail("field", field),
        );
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
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
            return Err(AppError::validation(format!(
                "{field} is too long ({len} chars, max {max_len})"
            ))
            .with_detail("field", field));
        }
    }
    Ok(())
}

/// Trim and drop empty optional text
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Chablis", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_length_counts_characters() {
        // 200 accented characters are more than 200 bytes but still valid
        let name = "é".repeat(MAX_NAME_LEN);
        assert!(validate_required_text(&name, "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "description", 10).is_ok());
        assert!(validate_optional_text(&Some("short".into()), "description", 10).is_ok());
        assert!(validate_optional_text(&Some("far too long".into()), "description", 10).is_err());
    }

    #[test]
    fn test_normalize_optional_text() {
        assert_eq!(normalize_optional_text(Some("  ".into())), None);
        assert_eq!(
            normalize_optional_text(Some(" Fruité ".into())),
            Some("Fruité".to_string())
        );
        assert_eq!(normalize_optional_text(None), None);
    }
}

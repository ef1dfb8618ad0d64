//! Model and share identifier validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Maximum length for model and share IDs
pub const MAX_ID_LENGTH: usize = 64;

/// Maximum length for model display names
pub const MAX_NAME_LENGTH: usize = 255;

/// Alphanumeric plus hyphens and underscores. Covers uuids and Mongo object ids.
static ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid id pattern"));

/// Model validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelValidationError {
    #[error("{kind} ID cannot be empty")]
    EmptyId { kind: &'static str },

    #[error("{kind} ID too long: {length} characters (max {max})")]
    IdTooLong {
        kind: &'static str,
        length: usize,
        max: usize,
    },

    #[error("Invalid {kind} ID format '{id}': must contain only letters, digits, '-' or '_'")]
    InvalidIdFormat { kind: &'static str, id: String },

    #[error("Model name cannot be empty")]
    EmptyName,

    #[error("Model name too long: {length} characters (max {max})")]
    NameTooLong { length: usize, max: usize },
}

/// Validate a model ID
pub fn validate_model_id(id: &str) -> Result<(), ModelValidationError> {
    validate_id("Model", id)
}

/// Validate a share ID
pub fn validate_share_id(id: &str) -> Result<(), ModelValidationError> {
    validate_id("Share", id)
}

/// Validate a model display name
pub fn validate_model_name(name: &str) -> Result<(), ModelValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ModelValidationError::EmptyName);
    }

    let length = trimmed.chars().count();

    if length > MAX_NAME_LENGTH {
        return Err(ModelValidationError::NameTooLong {
            length,
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

fn validate_id(kind: &'static str, id: &str) -> Result<(), ModelValidationError> {
    if id.is_empty() {
        return Err(ModelValidationError::EmptyId { kind });
    }

    if id.len() > MAX_ID_LENGTH {
        return Err(ModelValidationError::IdTooLong {
            kind,
            length: id.len(),
            max: MAX_ID_LENGTH,
        });
    }

    if !ID_PATTERN.is_match(id) {
        return Err(ModelValidationError::InvalidIdFormat {
            kind,
            id: id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_model_ids() {
        assert!(validate_model_id("a").is_ok());
        assert!(validate_model_id("model-id").is_ok());
        assert!(validate_model_id("64b7f0c2e4b0a1d2c3f4e5a6").is_ok());
        assert!(validate_model_id("my_model_2").is_ok());
        assert!(validate_model_id("7c9e6679-7425-40de-944b-e07fc1f90ae7").is_ok());
    }

    #[test]
    fn test_empty_id() {
        assert_eq!(
            validate_model_id(""),
            Err(ModelValidationError::EmptyId { kind: "Model" })
        );
        assert_eq!(
            validate_share_id(""),
            Err(ModelValidationError::EmptyId { kind: "Share" })
        );
    }

    #[test]
    fn test_id_too_long() {
        let long_id = "a".repeat(MAX_ID_LENGTH + 1);
        assert!(matches!(
            validate_share_id(&long_id),
            Err(ModelValidationError::IdTooLong { length: 65, max: 64, .. })
        ));
    }

    #[test]
    fn test_invalid_id_format() {
        assert!(validate_model_id("has space").is_err());
        assert!(validate_model_id("bad!id").is_err());
        assert!(validate_share_id("../etc").is_err());
    }

    #[test]
    fn test_model_name() {
        assert!(validate_model_name("Test Model").is_ok());
        assert_eq!(validate_model_name("   "), Err(ModelValidationError::EmptyName));
        assert!(matches!(
            validate_model_name(&"x".repeat(MAX_NAME_LENGTH + 1)),
            Err(ModelValidationError::NameTooLong { .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let error = ModelValidationError::InvalidIdFormat {
            kind: "Share",
            id: "a b".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid Share ID format 'a b': must contain only letters, digits, '-' or '_'"
        );
    }
}

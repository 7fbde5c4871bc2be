//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Generic validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// One or more form fields failed validation
    #[error("{0}")]
    InvalidForm(ValidationErrors),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// No active session; the user must sign in
    #[error("Not signed in. Run 'expenses auth login' first.")]
    NoSession,

    /// The backend rejected the request
    #[error("Backend error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// The backend could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// Biometric confirmation failed after password sign-in
    #[error("Biometric authentication failed: {0}")]
    Biometric(String),

    /// Local storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TrackerError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for profiles
    pub fn profile_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Profile",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error (generic or per-field)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidForm(_))
    }

    /// Check if the caller should be sent back to the login flow
    pub fn requires_login(&self) -> bool {
        match self {
            Self::NoSession => true,
            Self::Remote { status, .. } => *status == 401,
            _ => false,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<ValidationErrors> for TrackerError {
    fn from(errors: ValidationErrors) -> Self {
        Self::InvalidForm(errors)
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Json(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias for expense tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Field, FieldError};

    #[test]
    fn test_error_display() {
        let err = TrackerError::Config("missing backend url".into());
        assert_eq!(err.to_string(), "Configuration error: missing backend url");
    }

    #[test]
    fn test_not_found_error() {
        let err = TrackerError::expense_not_found("exp-1234abcd");
        assert_eq!(err.to_string(), "Expense not found: exp-1234abcd");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remote_error() {
        let err = TrackerError::Remote {
            status: 400,
            message: "Invalid login credentials".into(),
        };
        assert_eq!(
            err.to_string(),
            "Backend error (400): Invalid login credentials"
        );
        assert!(!err.requires_login());
    }

    #[test]
    fn test_requires_login() {
        assert!(TrackerError::NoSession.requires_login());
        let expired = TrackerError::Remote {
            status: 401,
            message: "JWT expired".into(),
        };
        assert!(expired.requires_login());
    }

    #[test]
    fn test_invalid_form_is_validation() {
        let errors = ValidationErrors::from(vec![FieldError::new(
            Field::Name,
            "Name must be at least 3 characters",
        )]);
        let err: TrackerError = errors.into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "name: Name must be at least 3 characters");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TrackerError = io_err.into();
        assert!(matches!(err, TrackerError::Io(_)));
    }
}

//! Error types for earbudtracker.
//!
//! This module defines all error types used throughout the earbudtracker crate.
//! Store errors are contract signals for callers; input errors are recovered by
//! the shell and turned into a re-prompt.

use thiserror::Error;

use crate::record::RecordId;

/// The main error type for earbudtracker operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// No record with the given id exists in the store.
    #[error("no record with id {id}")]
    NotFound {
        /// The id that was looked up.
        id: RecordId,
    },

    // === Input Errors ===
    /// Menu or selection input could not be used.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Human-readable description of what was wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Reading from or writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for earbudtracker operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given id.
    #[must_use]
    pub fn not_found(id: RecordId) -> Self {
        Self::NotFound { id }
    }

    /// Create a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Check if this error indicates an unknown record id.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was caused by unusable user input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let id = RecordId::new();
        let err = Error::not_found(id);
        assert_eq!(err.to_string(), format!("no record with id {id}"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = Error::invalid_input("expected a number");
        assert_eq!(err.to_string(), "invalid input: expected a number");
    }

    #[test]
    fn test_error_predicates() {
        assert!(Error::not_found(RecordId::new()).is_not_found());
        assert!(!Error::invalid_input("x").is_not_found());
        assert!(Error::invalid_input("x").is_invalid_input());
        assert!(!Error::not_found(RecordId::new()).is_invalid_input());
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "recent_limit must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("recent_limit"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_from_figment_error() {
        let err: Error = figment::Error::from("bad value".to_string()).into();
        assert!(matches!(err, Error::ConfigLoad(_)));
        assert!(err.to_string().contains("bad value"));
    }
}

//! Custom error types for onboard-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Field-level validation problems are not
//! errors in this sense; they are carried as [`crate::validation::FieldErrors`]
//! and rendered inline by the step that produced them.

use thiserror::Error;

/// The main error type for onboard-cli operations
#[derive(Error, Debug)]
pub enum OnboardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A prefill file contained something that is not a known store action
    #[error("Prefill error in {source_name}: {message}")]
    Prefill {
        source_name: String,
        message: String,
    },

    /// The partner redirect URL could not be built or opened
    #[error("Redirect error: {0}")]
    Redirect(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl OnboardError {
    /// Create a prefill error for the named source
    pub fn prefill(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Prefill {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Check if this is a prefill error
    pub fn is_prefill(&self) -> bool {
        matches!(self, Self::Prefill { .. })
    }
}

impl From<std::io::Error> for OnboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for OnboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<url::ParseError> for OnboardError {
    fn from(err: url::ParseError) -> Self {
        Self::Redirect(err.to_string())
    }
}

/// Result type alias for onboard-cli operations
pub type OnboardResult<T> = Result<T, OnboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OnboardError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_prefill_error() {
        let err = OnboardError::prefill("seed.json", "unknown variant `resetAll`");
        assert_eq!(
            err.to_string(),
            "Prefill error in seed.json: unknown variant `resetAll`"
        );
        assert!(err.is_prefill());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: OnboardError = io_err.into();
        assert!(matches!(err, OnboardError::Io(_)));
    }

    #[test]
    fn test_from_url_error() {
        let err: OnboardError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, OnboardError::Redirect(_)));
    }
}

//! Error types for the sqlexport core library

use sqlexport_common::{truncate_string, MAX_ECHOED_INPUT_CHARS};
use thiserror::Error;

/// Result type alias for sqlexport operations
pub type Result<T> = std::result::Result<T, SqlExportError>;

/// Failures of a single date normalization
///
/// The same input always fails the same way, so none of these are retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The value is not one of the accepted date representations
    #[error("Unsupported date representation: {kind}")]
    UnsupportedType { kind: &'static str },

    /// Text could not be resolved into year, month and day
    ///
    /// `input` is cut to [`MAX_ECHOED_INPUT_CHARS`] characters.
    #[error("Unparseable date '{input}': {reason}")]
    UnparseableDate { input: String, reason: String },

    /// The value converts to a date outside the representable calendar range
    #[error("Date value out of range: {value}")]
    OutOfRange { value: String },
}

impl NormalizeError {
    pub(crate) fn unparseable(input: &str, reason: impl Into<String>) -> Self {
        Self::UnparseableDate {
            input: truncate_string(input, MAX_ECHOED_INPUT_CHARS),
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(value: impl ToString) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
        }
    }
}

/// Main error type for sqlexport operations
#[derive(Error, Debug)]
pub enum SqlExportError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl SqlExportError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

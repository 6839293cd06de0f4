//! Custom error types for the benefits engine
//!
//! This module defines the error hierarchy for eligibility calculations using
//! thiserror for ergonomic error definitions. The engine never guesses a
//! default for a missing financial input; every failure identifies the
//! offending field so the caller can fix the record and retry the whole
//! invocation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for eligibility engine operations
#[derive(Error, Debug)]
pub enum EligibilityError {
    /// A required field is missing or malformed
    #[error("Invalid input in field '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A record exists but does not carry enough data to compute from
    #[error("Insufficient data in field '{field}': {reason}")]
    InsufficientData { field: &'static str, reason: String },

    /// No rule table exists for the requested state
    #[error("Unsupported state: {0}")]
    UnsupportedState(String),

    /// The state is known but has no table for the requested program
    #[error("Unsupported program '{program}' for state {state}")]
    UnsupportedProgram { state: String, program: String },

    /// No effective-dated rule table covers the calculation date
    #[error("No {program} rule table for state {state} is effective on {as_of}")]
    StaleConfiguration {
        state: String,
        program: String,
        as_of: NaiveDate,
    },

    /// Rule table parsing/validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors while loading rule tables
    #[error("I/O error: {0}")]
    Io(String),
}

impl EligibilityError {
    /// Create an `InvalidInput` error for a named field
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Create an `InsufficientData` error for a named field
    pub fn insufficient_data(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            field,
            reason: reason.into(),
        }
    }

    /// Check if this is an input error (invalid or insufficient)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::InsufficientData { .. }
        )
    }

    /// Check if this is a rule-table lookup failure
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedState(_)
                | Self::UnsupportedProgram { .. }
                | Self::StaleConfiguration { .. }
                | Self::Config(_)
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for EligibilityError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for EligibilityError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for EligibilityError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for eligibility engine operations
pub type EligibilityResult<T> = Result<T, EligibilityError>;

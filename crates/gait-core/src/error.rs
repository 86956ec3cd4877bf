//! Error types for gait event analysis
//!
//! Provides a unified error type for all gait-events crates.

use thiserror::Error;

/// Core error type for gait event operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A configuration value is invalid; processing for that configuration aborts
    #[error("Invalid configuration for `{parameter}`: {message}")]
    Configuration { parameter: String, message: String },

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error for the named parameter
    pub fn configuration(parameter: &str, message: impl Into<String>) -> Self {
        Self::Configuration {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Name of the offending parameter, if this is a configuration error
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::Configuration { parameter, .. } => Some(parameter),
            _ => None,
        }
    }
}

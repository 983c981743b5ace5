//! Error types for the phone lookup validator.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when talking to the carrier lookup service.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The service does not know the number (HTTP 404)
    #[error("Phone number not found: {0}")]
    NotFound(String),

    /// The service rejected the number as malformed (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an unexpected error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LookupError {
    /// Whether the service answered that the number does not resolve.
    ///
    /// Only these errors turn into a negative validation result. Everything
    /// else means the service could not give an answer at all.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidRequest(_))
    }
}

/// Errors that can occur during configuration loading or validator construction.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No lookup client was supplied to the validator
    #[error("A lookup client is required")]
    MissingClient,

    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Errors returned from `validate` when no verdict could be reached.
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// The lookup service was unreachable or answered unexpectedly
    #[error("Lookup transport error: {0}")]
    Transport(#[from] LookupError),

    /// A blocking validation task failed to complete
    #[error("Validation task failed: {0}")]
    Task(String),
}

/// Convenience type alias for Results with LookupError
pub type LookupResult<T> = Result<T, LookupError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ValidatorError
pub type ValidatorResult<T> = Result<T, ValidatorError>;

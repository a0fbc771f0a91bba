//! Error Types

use std::time::Duration;

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failures at the model gateway boundary
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Model service unreachable or not responding
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    /// Model service answered with an error or an unusable payload
    #[error("Model error: {0}")]
    Model(String),

    /// No answer within the allotted time
    #[error("Model timed out after {0:?}")]
    Timeout(Duration),

    /// Credentials rejected
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Rate limited by the model service
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Gateway missing or misconfigured
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification used for diagnostics
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The model could not be reached at all
    ModelUnavailable,
    /// The model was reached but the exchange failed
    ModelError,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ModelUnavailable => write!(f, "model_unavailable"),
            ErrorKind::ModelError => write!(f, "model_error"),
        }
    }
}

impl GatewayError {
    /// Classify the failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Unavailable(_) | GatewayError::Timeout(_) | GatewayError::Config(_) => {
                ErrorKind::ModelUnavailable
            }
            _ => ErrorKind::ModelError,
        }
    }
}

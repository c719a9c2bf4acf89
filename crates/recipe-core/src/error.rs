//! Gateway error types.

use thiserror::Error;

/// Errors that can occur during gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error (missing API key, invalid settings, etc.)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The provider returned an error response.
    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The provider response could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

//! Validator errors.

use thiserror::Error;

/// No verdict could be reached for a token.
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// Transport failure talking to the remote validator.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The remote validator did not answer within the configured timeout.
    #[error("validator at {endpoint} timed out after {timeout_secs}s")]
    Timeout { endpoint: String, timeout_secs: u64 },

    /// The remote validator answered with a server error.
    #[error("validator at {endpoint} returned {status}")]
    Upstream { endpoint: String, status: u16 },

    /// The remote validator's response body was not understood.
    #[error("failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// Validator configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

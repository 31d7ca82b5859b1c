//! Error types for banking API operations.

use thiserror::Error;

/// Errors that can occur talking to the banking API.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("Banking API returned {code} {reason}")]
    Status { code: u16, reason: String },

    #[error("Banking API request failed: {0}")]
    Request(String),

    #[error("Failed to decode banking API response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BankError {
    fn from(err: reqwest::Error) -> Self {
        BankError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for BankError {
    fn from(err: serde_json::Error) -> Self {
        BankError::Decode(err.to_string())
    }
}

impl BankError {
    /// Build a status error from a non-success response status.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        BankError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}

/// Result type for banking API operations.
pub type BankResult<T> = Result<T, BankError>;

//! Store error types
//!
//! Errors raised talking to the hosted venue table and object storage.

use thiserror::Error;

/// Errors that can occur reading or writing the venue store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Could not connect to the store
    #[error("Venue store unavailable")]
    Unavailable,

    /// Request did not complete in time
    #[error("Request timeout")]
    Timeout,

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// A write returned no row
    #[error("Store returned no row")]
    EmptyResponse,

    /// Reading a local file for upload failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Classify a reqwest error the same way for every call
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Timeout
        } else if err.is_connect() {
            StoreError::Unavailable
        } else {
            StoreError::Request(err)
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Api {
            status: 409,
            message: "duplicate key".to_string(),
        };
        assert_eq!(err.to_string(), "API error 409: duplicate key");
        assert_eq!(StoreError::EmptyResponse.to_string(), "Store returned no row");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Decode(_)));
    }
}

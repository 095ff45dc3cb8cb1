//! Normalized API error type

use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced by the REST, identity, and storage clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    ///
    /// `message` is taken from the structured error body when the server
    /// sent one, otherwise from the status line.
    #[error("api request failed with status {status_code}: {message}")]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Server-reported message
        message: String,
    },

    /// No response was received (DNS, connect, timeout, TLS).
    #[error("api transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("api response decode error: {0}")]
    Decode(String),

    /// A request could not be built (bad base URL or path).
    #[error("invalid api request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Whether this error is the server saying "no such resource".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status_code: 404, .. })
    }

    /// Whether the caller's credentials were missing or insufficient.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Status {
                status_code: 401 | 403,
                ..
            }
        )
    }
}

/// Structured error body the backend sends on failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err = ApiError::Status {
            status_code: 404,
            message: "no such offer".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_auth_failure_detection() {
        for code in [401u16, 403] {
            let err = ApiError::Status {
                status_code: code,
                message: "nope".to_string(),
            };
            assert!(err.is_auth_failure());
        }
    }
}

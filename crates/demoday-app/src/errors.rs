//! Categorized application errors
//!
//! One error type for everything workflows can fail with, categorized the
//! way frontends need to branch: inline field messages for validation, a
//! not-found page for absent/forbidden resources, toasts for the rest.

use std::fmt;

// Re-export ToastLevel from views::toasts (single source of truth)
pub use crate::views::toasts::ToastLevel;

/// Categorized application errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// No response received (DNS, connect, timeout).
    Network {
        message: String,
        /// Whether a retry is worth offering
        recoverable: bool,
    },
    /// The server answered with a non-success status.
    Api { status_code: u16, message: String },
    /// Client-side validation failed before any request was sent.
    Validation { field: String, message: String },
    /// The resource is absent or the caller lacks scope. Rendered as one
    /// generic not-found state; which of the two it was is not leaked.
    NotFound { resource: String },
    /// Unexpected internal condition.
    Internal { context: String, message: String },
}

impl AppError {
    /// Create a recoverable network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            recoverable: true,
        }
    }

    /// Create a server-reported error.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Create a validation error tied to one input field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Internal {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Get the appropriate toast severity for this error.
    pub fn toast_level(&self) -> ToastLevel {
        match self {
            Self::Network { recoverable, .. } => {
                if *recoverable {
                    ToastLevel::Warning
                } else {
                    ToastLevel::Error
                }
            }
            Self::Api { status_code, .. } if *status_code >= 500 => ToastLevel::Error,
            Self::Api { .. } => ToastLevel::Warning,
            Self::Validation { .. } => ToastLevel::Info,
            Self::NotFound { .. } => ToastLevel::Warning,
            Self::Internal { .. } => ToastLevel::Error,
        }
    }

    /// Check if the error is worth retrying.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network { recoverable, .. } => *recoverable,
            Self::Api { status_code, .. } => *status_code >= 500,
            Self::Validation { .. } => true,
            Self::NotFound { .. } => false,
            Self::Internal { .. } => false,
        }
    }

    /// Get a short error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network { .. } => "NETWORK",
            Self::Api { .. } => "API",
            Self::Validation { .. } => "VALIDATION",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal { .. } => "INTERNAL",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network { message, .. } => write!(f, "Network error: {message}"),
            Self::Api {
                status_code,
                message,
            } => write!(f, "Server error ({status_code}): {message}"),
            Self::Validation { field, message } => write!(f, "{field}: {message}"),
            Self::NotFound { resource } => write!(f, "{resource} not found"),
            Self::Internal { context, message } => write!(f, "{context}: {message}"),
        }
    }
}

impl std::error::Error for AppError {}

/// The display form an error takes inside a list state.
///
/// Lists only need something to print next to the retry control; the full
/// [`AppError`] stays with the workflow that produced it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    /// Human-readable message
    pub message: String,
}

impl ErrorDetail {
    /// Wrap a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&AppError> for ErrorDetail {
    fn from(err: &AppError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<AppError> for ErrorDetail {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_routing() {
        let err = AppError::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");
        assert_eq!(err.code(), "NETWORK");
        assert!(err.is_recoverable());
        assert_eq!(err.toast_level(), ToastLevel::Warning);
    }

    #[test]
    fn test_server_errors_split_on_status() {
        let client_side = AppError::api(409, "sector still referenced");
        assert_eq!(client_side.toast_level(), ToastLevel::Warning);
        assert!(!client_side.is_recoverable());

        let server_side = AppError::api(503, "maintenance");
        assert_eq!(server_side.toast_level(), ToastLevel::Error);
        assert!(server_side.is_recoverable());
    }

    #[test]
    fn test_validation_is_informational() {
        let err = AppError::validation("display_name", "too short");
        assert_eq!(err.to_string(), "display_name: too short");
        assert_eq!(err.toast_level(), ToastLevel::Info);
    }

    #[test]
    fn test_not_found_does_not_leak_cause() {
        let err = AppError::not_found("offer");
        assert_eq!(err.to_string(), "offer not found");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_detail_captures_display_form() {
        let err = AppError::api(500, "boom");
        let detail = ErrorDetail::from(&err);
        assert_eq!(detail.message, "Server error (500): boom");
    }
}

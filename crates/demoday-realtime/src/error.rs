//! Realtime client error type

use thiserror::Error;

/// Errors surfaced by the realtime client.
#[derive(Debug, Error)]
pub enum RealtimeError {
    /// The WebSocket connection could not be established.
    #[error("realtime connect failed: {0}")]
    Connect(String),

    /// The server rejected our credentials.
    #[error("realtime auth rejected: {0}")]
    Auth(String),

    /// A frame could not be encoded or decoded.
    #[error("realtime protocol error: {0}")]
    Protocol(String),

    /// The underlying transport failed mid-flight.
    #[error("realtime transport error: {0}")]
    Transport(String),

    /// An HTTP read was answered with a non-success status.
    #[error("realtime read failed with status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Server-reported message, if any
        message: String,
    },

    /// An invalid node path was supplied.
    #[error("invalid realtime path: {0}")]
    InvalidPath(String),

    /// The subscription is already closed.
    #[error("subscription closed")]
    Closed,
}

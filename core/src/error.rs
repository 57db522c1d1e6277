//! Error types for the todo API client.
//!
//! # Design
//! Callers see exactly one failure kind, "the request failed". The variants
//! only record where it failed so the log line is useful; the view never
//! branches on them. Status codes are not interpreted: anything outside
//! 2xx is `Status`.

use thiserror::Error;

/// Errors returned by `TodoClient` and reported by hosts for failed round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        ApiError::Transport(err.to_string())
    }
}

//! Backend failure model (transport-agnostic).

use thiserror::Error;

/// A failure reported by the backend, or on the way to it.
///
/// Transport adapters map their native errors into this type so that the
/// session and favorites layers never depend on a concrete HTTP client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The request never produced a response (connect, timeout, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The backend refused the bearer credential (401/403).
    #[error("unauthorized ({status})")]
    Unauthorized { status: u16 },

    /// The addressed resource does not exist (404).
    #[error("not found")]
    NotFound,

    /// The request conflicts with existing state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl RemoteError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Map a non-success HTTP status (and its body text) to an error kind.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            401 | 403 => Self::Unauthorized { status },
            404 => Self::NotFound,
            409 => Self::Conflict(body.into()),
            _ => Self::Status {
                status,
                message: body.into(),
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

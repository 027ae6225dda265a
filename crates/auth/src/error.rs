//! Session error types.

use propfinder_core::{DomainError, RemoteError};

use crate::store::StoreError;

/// Errors surfaced by [`SessionManager`](crate::SessionManager) operations.
///
/// Propagated to the caller unmodified; the manager never retries.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The backend refused the credentials.
    #[error("credentials rejected")]
    Rejected,

    /// Registration conflicts with an existing account.
    #[error("account already exists: {0}")]
    Conflict(String),

    /// Any other backend or transport failure.
    #[error(transparent)]
    Remote(RemoteError),

    /// The backend replied with something that is not a usable session.
    #[error("malformed identity: {0}")]
    MalformedIdentity(#[from] DomainError),

    /// The session could not be written to (or removed from) durable storage.
    #[error("session storage failed: {0}")]
    Storage(#[from] StoreError),

    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<RemoteError> for AuthError {
    fn from(value: RemoteError) -> Self {
        match value {
            RemoteError::Unauthorized { .. } => Self::Rejected,
            RemoteError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Remote(other),
        }
    }
}

impl AuthError {
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

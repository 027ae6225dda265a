use propfinder_core::{Credentials, IdentityPayload, Registration, RemoteError};

/// Authentication endpoints of the backend (`POST /users/login`, `POST /users`).
///
/// Both calls are unauthenticated; implementations must not attach a bearer
/// header to them.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<IdentityPayload, RemoteError>;

    async fn register(&self, registration: &Registration) -> Result<IdentityPayload, RemoteError>;
}

//! Session lifecycle: restore, login, register, logout.

use std::collections::HashMap;
use std::sync::Arc;

use propfinder_core::{Credentials, Identity, Registration};

use crate::api::AuthApi;
use crate::context::SessionContext;
use crate::error::AuthError;
use crate::store::KeyValueStore;

/// Storage key holding the serialized identity.
pub const SESSION_KEY: &str = "user";

/// Single source of truth for "who is logged in".
///
/// Every state change is written through to the store before it is published
/// to the [`SessionContext`]; a session that could not be persisted is never
/// observable by dependents.
pub struct SessionManager<A, S> {
    api: Arc<A>,
    store: Arc<S>,
    ctx: SessionContext,
}

impl<A, S> SessionManager<A, S>
where
    A: AuthApi,
    S: KeyValueStore,
{
    pub fn new(api: Arc<A>, store: Arc<S>, ctx: SessionContext) -> Self {
        Self { api, store, ctx }
    }

    /// Handle shared with dependents (HTTP client, views).
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Load a previously persisted identity at startup.
    ///
    /// Missing, unreadable or malformed state means "no session"; it is never
    /// an error.
    pub fn restore(&self) -> Option<Arc<Identity>> {
        let restored = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(Arc::new(identity)),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring malformed persisted session");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted session");
                None
            }
        };

        match &restored {
            Some(identity) => {
                tracing::info!(user_id = %identity.id(), "restored session");
                self.ctx.set(identity.clone());
            }
            None => self.ctx.clear(),
        }

        restored
    }

    /// Authenticate and establish a session, replacing any previous one.
    pub async fn login(&self, credentials: &Credentials) -> Result<Arc<Identity>, AuthError> {
        let payload = self.api.login(credentials).await.map_err(|e| {
            tracing::warn!(email = %credentials.email, error = %e, "login failed");
            AuthError::from(e)
        })?;

        let identity = Identity::from_payload(payload)?;
        self.establish(identity)
    }

    /// Create an account and immediately establish a session for it.
    ///
    /// When the registration reply carries no token, the manager signs in with
    /// the registration credentials to obtain one.
    pub async fn register(&self, registration: &Registration) -> Result<Arc<Identity>, AuthError> {
        let payload = self.api.register(registration).await.map_err(|e| {
            tracing::warn!(email = %registration.email, error = %e, "registration failed");
            AuthError::from(e)
        })?;

        if payload.has_token() {
            let identity = Identity::from_payload(payload)?;
            return self.establish(identity);
        }

        tracing::info!(email = %registration.email, "registration reply has no token; signing in");
        self.login(&registration.credentials()).await
    }

    /// End the session.
    ///
    /// The in-memory session is always cleared. An error means the persisted
    /// copy could not be removed and may come back on the next `restore`.
    pub fn logout(&self) -> Result<(), AuthError> {
        let previous = self.ctx.snapshot();
        self.ctx.clear();

        self.store.remove(SESSION_KEY).map_err(|e| {
            tracing::error!(error = %e, "failed to remove persisted session");
            AuthError::from(e)
        })?;

        if let Some(identity) = previous {
            tracing::info!(user_id = %identity.id(), "logged out");
        }
        Ok(())
    }

    pub fn current_identity(&self) -> Option<Arc<Identity>> {
        self.ctx.snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.ctx.is_authenticated()
    }

    /// Bearer header for the current session (empty when logged out).
    pub fn authorization_header(&self) -> HashMap<String, String> {
        self.ctx.authorization_header()
    }

    fn establish(&self, identity: Identity) -> Result<Arc<Identity>, AuthError> {
        let raw = serde_json::to_string(&identity)?;
        self.store.set(SESSION_KEY, &raw).map_err(|e| {
            tracing::error!(user_id = %identity.id(), error = %e, "failed to persist session");
            AuthError::from(e)
        })?;

        let identity = Arc::new(identity);
        self.ctx.set(identity.clone());
        tracing::info!(user_id = %identity.id(), "session established");
        Ok(identity)
    }
}

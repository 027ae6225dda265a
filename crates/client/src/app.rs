//! Application wiring: config → store → session context → HTTP client →
//! session manager and favorites coordinator.

use std::sync::Arc;

use propfinder_auth::{FileStore, KeyValueStore, SessionContext, SessionManager};
use propfinder_core::Identity;
use propfinder_favorites::FavoritesCoordinator;

use crate::config::ClientConfig;
use crate::http::ApiClient;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("not signed in")]
    NotSignedIn,
}

/// Everything a front end needs, sharing one session context.
pub struct App<S = FileStore> {
    config: ClientConfig,
    api: Arc<ApiClient>,
    session: SessionManager<ApiClient, S>,
    favorites: FavoritesCoordinator<ApiClient, ApiClient>,
}

impl App<FileStore> {
    /// Wire the application with the on-disk session store and restore any
    /// persisted session.
    pub fn new(config: ClientConfig) -> Result<Self, AppError> {
        let store = Arc::new(FileStore::new(config.session_dir.clone()));
        Self::with_store(config, store)
    }
}

impl<S> App<S>
where
    S: KeyValueStore,
{
    pub fn with_store(config: ClientConfig, store: Arc<S>) -> Result<Self, AppError> {
        let context = SessionContext::new();
        let api = Arc::new(ApiClient::new(
            config.api_base_url.clone(),
            config.request_timeout,
            context.clone(),
        )?);

        let session = SessionManager::new(api.clone(), store, context);
        session.restore();

        let favorites =
            FavoritesCoordinator::new(api.clone(), api.clone(), config.max_in_flight_hydrations);

        tracing::debug!(
            api = %config.api_base_url,
            max_in_flight = config.max_in_flight_hydrations,
            authenticated = session.is_authenticated(),
            "application wired"
        );

        Ok(Self {
            config,
            api,
            session,
            favorites,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &SessionManager<ApiClient, S> {
        &self.session
    }

    pub fn favorites(&self) -> &FavoritesCoordinator<ApiClient, ApiClient> {
        &self.favorites
    }

    /// The signed-in identity, or [`AppError::NotSignedIn`].
    pub fn require_identity(&self) -> Result<Arc<Identity>, AppError> {
        self.session.current_identity().ok_or(AppError::NotSignedIn)
    }
}

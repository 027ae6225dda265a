//! Bookmarked-property list: load, toggle, point query.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use propfinder_core::{Entity, Identity, PropertyId, PropertyRecord, RemoteError};

use crate::api::{BookmarkApi, PropertyApi};
use crate::error::FavoritesError;

/// Default cap on concurrent hydration requests.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// A bookmark whose property could not be hydrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationFailure {
    pub property_id: PropertyId,
    pub error: RemoteError,
}

/// Result of [`FavoritesCoordinator::load_favorites`].
///
/// `properties` follows the bookmark order returned by the backend;
/// `failed` lists the bookmarks that could not be resolved, in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesPage {
    pub properties: Vec<PropertyRecord>,
    pub failed: Vec<HydrationFailure>,
}

impl FavoritesPage {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn dropped_ids(&self) -> Vec<PropertyId> {
        self.failed.iter().map(|f| f.property_id).collect()
    }

    /// All-or-nothing view of the page: the first hydration failure fails the whole load.
    pub fn into_strict(self) -> Result<Vec<PropertyRecord>, FavoritesError> {
        match self.failed.into_iter().next() {
            Some(failure) => Err(FavoritesError::Hydration {
                property_id: failure.property_id,
                source: failure.error,
            }),
            None => Ok(self.properties),
        }
    }
}

/// Tri-state answer of the bookmark point query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteStatus {
    Favorited,
    NotFavorited,
    /// The backend could not be asked.
    Unknown,
}

/// Materializes and maintains the favorites of an authenticated identity.
pub struct FavoritesCoordinator<B, P> {
    bookmarks: Arc<B>,
    properties: Arc<P>,
    max_in_flight: usize,
}

impl<B, P> FavoritesCoordinator<B, P>
where
    B: BookmarkApi,
    P: PropertyApi,
{
    /// `max_in_flight` bounds concurrent hydration requests (minimum 1).
    pub fn new(bookmarks: Arc<B>, properties: Arc<P>, max_in_flight: usize) -> Self {
        Self {
            bookmarks,
            properties,
            max_in_flight: max_in_flight.max(1),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Fetch the bookmark references, then hydrate each into a full record.
    ///
    /// Only a failure of the bookmark list fails the call. Individual
    /// hydration failures are collected in [`FavoritesPage::failed`].
    pub async fn load_favorites(&self, identity: &Identity) -> Result<FavoritesPage, FavoritesError> {
        let user_id = identity.id();
        let references = self.bookmarks.list_bookmarks(user_id).await.map_err(|e| {
            tracing::warn!(user_id = %user_id, error = %e, "failed to list bookmarks");
            FavoritesError::Load(e)
        })?;

        tracing::debug!(
            user_id = %user_id,
            bookmarks = references.len(),
            max_in_flight = self.max_in_flight,
            "hydrating favorites"
        );

        let properties = &self.properties;
        // `buffered` keeps results in input order regardless of completion order.
        let outcomes: Vec<(PropertyId, Result<PropertyRecord, RemoteError>)> =
            stream::iter(references.into_iter().map(|r| r.property_id))
                .map(|property_id| async move {
                    (property_id, properties.get_property(property_id).await)
                })
                .buffered(self.max_in_flight)
                .collect()
                .await;

        let mut page = FavoritesPage::default();
        for (property_id, outcome) in outcomes {
            match outcome {
                Ok(record) => page.properties.push(record),
                Err(error) => {
                    tracing::warn!(
                        user_id = %user_id,
                        property_id = %property_id,
                        error = %error,
                        "dropping favorite that failed to hydrate"
                    );
                    page.failed.push(HydrationFailure { property_id, error });
                }
            }
        }

        if !page.is_complete() {
            tracing::warn!(
                user_id = %user_id,
                loaded = page.properties.len(),
                dropped = page.failed.len(),
                "favorites loaded partially"
            );
        }

        Ok(page)
    }

    /// Flip the bookmark state of a property.
    ///
    /// Returns the new state on success. On failure nothing changed on the
    /// backend and the caller must keep displaying `currently_favorited`.
    pub async fn toggle_favorite(
        &self,
        identity: &Identity,
        property_id: PropertyId,
        currently_favorited: bool,
    ) -> Result<bool, FavoritesError> {
        let user_id = identity.id();
        let result = if currently_favorited {
            self.bookmarks.remove_bookmark(user_id, property_id).await
        } else {
            self.bookmarks.add_bookmark(user_id, property_id).await
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    user_id = %user_id,
                    property_id = %property_id,
                    favorited = !currently_favorited,
                    "bookmark updated"
                );
                Ok(!currently_favorited)
            }
            Err(source) => {
                tracing::warn!(
                    user_id = %user_id,
                    property_id = %property_id,
                    error = %source,
                    "bookmark update failed"
                );
                Err(FavoritesError::BookmarkMutation {
                    property_id,
                    source,
                })
            }
        }
    }

    /// Point query with the failure case made explicit.
    pub async fn favorite_status(&self, identity: &Identity, property_id: PropertyId) -> FavoriteStatus {
        match self.bookmarks.is_bookmarked(identity.id(), property_id).await {
            Ok(true) => FavoriteStatus::Favorited,
            Ok(false) => FavoriteStatus::NotFavorited,
            Err(e) => {
                tracing::warn!(property_id = %property_id, error = %e, "bookmark check failed");
                FavoriteStatus::Unknown
            }
        }
    }

    /// Lossy point query: a failed check reads as "not favorited".
    pub async fn is_favorited(&self, identity: &Identity, property_id: PropertyId) -> bool {
        self.favorite_status(identity, property_id).await == FavoriteStatus::Favorited
    }
}

/// Drop the record with `property_id` from a displayed list.
pub fn remove_from_view<T>(properties: &[T], property_id: PropertyId) -> Vec<T>
where
    T: Entity<Id = PropertyId> + Clone,
{
    properties
        .iter()
        .filter(|p| p.id() != property_id)
        .cloned()
        .collect()
}

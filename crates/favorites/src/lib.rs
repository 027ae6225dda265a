//! `propfinder-favorites`: bookmarked properties of the signed-in user.
//!
//! The backend is reached through [`BookmarkApi`] and [`PropertyApi`]; the
//! caller passes the current [`Identity`](propfinder_core::Identity) explicitly.

pub mod api;
pub mod coordinator;
pub mod error;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::{BookmarkApi, PropertyApi};
pub use coordinator::{
    DEFAULT_MAX_IN_FLIGHT, FavoriteStatus, FavoritesCoordinator, FavoritesPage, HydrationFailure,
    remove_from_view,
};
pub use error::FavoritesError;
pub use view::{ErrorKind, FavoriteToggle, FavoritesEvent, FavoritesViewState, ToggleEvent};

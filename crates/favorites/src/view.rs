//! UI-independent view state for the favorites page and the per-property toggle.
//!
//! Reducers are pure: they take the previous state and an event and return
//! the next state. Whatever renders the page owns the state value.

use propfinder_core::{PropertyId, PropertyRecord};

use crate::coordinator::{remove_from_view, FavoritesPage};

/// Coarse failure class shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Load,
    Mutation,
    /// The bearer credential was refused; the view should route to sign-in.
    Unauthorized,
}

impl ErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::Load => "Failed to load your favorite properties. Please try again.",
            ErrorKind::Mutation => "Failed to update favorites. Please try again.",
            ErrorKind::Unauthorized => "Your session has expired. Please sign in again.",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesViewState {
    pub properties: Vec<PropertyRecord>,
    pub loading: bool,
    pub error: Option<ErrorKind>,
    /// Bookmarks that could not be hydrated on the last load.
    pub dropped: Vec<PropertyId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesEvent {
    LoadStarted,
    Loaded(FavoritesPage),
    LoadFailed(ErrorKind),
    Removed(PropertyId),
    RemoveFailed(ErrorKind),
    ErrorDismissed,
}

impl FavoritesViewState {
    /// Initial state of a freshly activated view.
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.loading && self.error.is_none() && self.properties.is_empty()
    }

    pub fn reduce(self, event: FavoritesEvent) -> Self {
        match event {
            FavoritesEvent::LoadStarted => Self {
                loading: true,
                error: None,
                ..self
            },
            FavoritesEvent::Loaded(page) => {
                let dropped = page.dropped_ids();
                Self {
                    properties: page.properties,
                    loading: false,
                    error: None,
                    dropped,
                }
            }
            // Keep whatever was displayed before; only the banner changes.
            FavoritesEvent::LoadFailed(kind) => Self {
                loading: false,
                error: Some(kind),
                ..self
            },
            FavoritesEvent::Removed(property_id) => Self {
                properties: remove_from_view(&self.properties, property_id),
                ..self
            },
            FavoritesEvent::RemoveFailed(kind) => Self {
                error: Some(kind),
                ..self
            },
            FavoritesEvent::ErrorDismissed => Self { error: None, ..self },
        }
    }
}

/// Favorite button state for a single property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FavoriteToggle {
    pub favorited: bool,
    pub pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    Requested,
    Confirmed(bool),
    Failed,
}

impl FavoriteToggle {
    pub fn new(favorited: bool) -> Self {
        Self {
            favorited,
            pending: false,
        }
    }

    /// The displayed flag only changes on confirmation.
    pub fn reduce(self, event: ToggleEvent) -> Self {
        match event {
            ToggleEvent::Requested => Self {
                pending: true,
                ..self
            },
            ToggleEvent::Confirmed(favorited) => Self {
                favorited,
                pending: false,
            },
            ToggleEvent::Failed => Self {
                pending: false,
                ..self
            },
        }
    }
}

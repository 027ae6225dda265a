use propfinder_core::{PropertyId, RemoteError};

use crate::view::ErrorKind;

/// Favorites errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FavoritesError {
    /// The bookmark list itself could not be fetched.
    #[error("failed to load bookmarks: {0}")]
    Load(#[source] RemoteError),

    /// Adding or removing a bookmark failed.
    #[error("failed to update bookmark for property {property_id}: {source}")]
    BookmarkMutation {
        property_id: PropertyId,
        #[source]
        source: RemoteError,
    },

    /// A single property could not be hydrated.
    #[error("failed to load property {property_id}: {source}")]
    Hydration {
        property_id: PropertyId,
        #[source]
        source: RemoteError,
    },
}

impl FavoritesError {
    pub fn remote(&self) -> &RemoteError {
        match self {
            FavoritesError::Load(source) => source,
            FavoritesError::BookmarkMutation { source, .. } => source,
            FavoritesError::Hydration { source, .. } => source,
        }
    }

    /// Classification used by the view state.
    pub fn kind(&self) -> ErrorKind {
        if self.remote().is_unauthorized() {
            return ErrorKind::Unauthorized;
        }
        match self {
            FavoritesError::Load(_) | FavoritesError::Hydration { .. } => ErrorKind::Load,
            FavoritesError::BookmarkMutation { .. } => ErrorKind::Mutation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_prefers_unauthorized() {
        let err = FavoritesError::BookmarkMutation {
            property_id: PropertyId::new(1),
            source: RemoteError::Unauthorized { status: 401 },
        };
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err = FavoritesError::Load(RemoteError::network("down"));
        assert_eq!(err.kind(), ErrorKind::Load);
        assert_eq!(err.to_string(), "failed to load bookmarks: network error: down");
    }
}

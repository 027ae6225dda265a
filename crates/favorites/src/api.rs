use propfinder_core::{BookmarkReference, PropertyId, PropertyRecord, RemoteError, UserId};

/// Bookmark endpoints (`/bookmarks/...`). All calls are authenticated.
#[async_trait::async_trait]
pub trait BookmarkApi: Send + Sync {
    /// `GET /bookmarks/user/{user_id}`, in backend order.
    async fn list_bookmarks(&self, user_id: UserId) -> Result<Vec<BookmarkReference>, RemoteError>;

    /// `POST /bookmarks`.
    async fn add_bookmark(&self, user_id: UserId, property_id: PropertyId) -> Result<(), RemoteError>;

    /// `DELETE /bookmarks/user/{user_id}/property/{property_id}`.
    async fn remove_bookmark(&self, user_id: UserId, property_id: PropertyId) -> Result<(), RemoteError>;

    /// `GET /bookmarks/check/{user_id}/{property_id}`.
    async fn is_bookmarked(&self, user_id: UserId, property_id: PropertyId) -> Result<bool, RemoteError>;
}

/// Property hydration (`GET /properties/{id}`).
#[async_trait::async_trait]
pub trait PropertyApi: Send + Sync {
    async fn get_property(&self, property_id: PropertyId) -> Result<PropertyRecord, RemoteError>;
}

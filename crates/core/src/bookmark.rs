use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::id::{PropertyId, UserId};

/// "User X has bookmarked property Y".
///
/// The backend enforces uniqueness per `(user_id, property_id)`; the client
/// does not deduplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub user_id: UserId,
    pub property_id: PropertyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl BookmarkReference {
    /// Body of `POST /bookmarks`.
    pub fn new(user_id: UserId, property_id: PropertyId) -> Self {
        Self {
            id: None,
            user_id,
            property_id,
            created_at: None,
        }
    }
}

//! Property catalogue endpoints (`/properties`).

use reqwest::Method;

use propfinder_core::{DomainError, PropertyDraft, PropertyId, PropertyRecord, RemoteError, SearchFilters};

use crate::http::ApiClient;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    /// The draft was rejected locally; nothing was sent.
    #[error("invalid property: {0}")]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ApiClient {
    /// `GET /properties`.
    pub async fn list_properties(&self) -> Result<Vec<PropertyRecord>, RemoteError> {
        let req = self.authorized(Method::GET, "/properties");
        self.fetch_json(req).await
    }

    /// `GET /properties/search`. Empty filters list the whole catalogue.
    pub async fn search_properties(&self, filters: &SearchFilters) -> Result<Vec<PropertyRecord>, RemoteError> {
        if filters.is_empty() {
            return self.list_properties().await;
        }
        let req = self
            .authorized(Method::GET, "/properties/search")
            .query(&filters.to_query());
        self.fetch_json(req).await
    }

    /// `POST /properties`.
    pub async fn create_property(&self, draft: &PropertyDraft) -> Result<PropertyRecord, CatalogError> {
        draft.validate()?;
        let req = self.authorized(Method::POST, "/properties").json(draft);
        let created: PropertyRecord = self.fetch_json(req).await?;
        tracing::info!(property_id = %created.id, "property created");
        Ok(created)
    }

    /// `PUT /properties/{id}`.
    pub async fn update_property(
        &self,
        property_id: PropertyId,
        draft: &PropertyDraft,
    ) -> Result<PropertyRecord, CatalogError> {
        draft.validate()?;
        let req = self
            .authorized(Method::PUT, &format!("/properties/{property_id}"))
            .json(draft);
        let updated: PropertyRecord = self.fetch_json(req).await?;
        tracing::info!(property_id = %property_id, "property updated");
        Ok(updated)
    }

    /// `DELETE /properties/{id}`.
    pub async fn delete_property(&self, property_id: PropertyId) -> Result<(), RemoteError> {
        let req = self.authorized(Method::DELETE, &format!("/properties/{property_id}"));
        self.send(req).await?;
        tracing::info!(property_id = %property_id, "property deleted");
        Ok(())
    }
}

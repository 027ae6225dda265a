//! REST client for the listing backend.
//!
//! One [`ApiClient`] serves every backend seam: [`AuthApi`], [`BookmarkApi`]
//! and [`PropertyApi`]. The bearer credential is read from the injected
//! [`SessionContext`] on every request, so a login or logout is picked up
//! without rebuilding the client.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use propfinder_auth::{AuthApi, SessionContext, authorization_header};
use propfinder_core::{
    BookmarkReference, Credentials, IdentityPayload, PropertyId, PropertyRecord, Registration,
    RemoteError, UserId,
};
use propfinder_favorites::{BookmarkApi, PropertyApi};

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionContext,
}

/// Body of `POST /bookmarks`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewBookmark {
    user_id: UserId,
    property_id: PropertyId,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: SessionContext,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Unauthenticated request (login, registration).
    pub(crate) fn anonymous(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(method = %method, path, "request");
        self.http.request(method, self.url(path))
    }

    /// Request carrying the current session's bearer header, if any.
    pub(crate) fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.anonymous(method, path);
        for (name, value) in authorization_header(&self.session) {
            req = req.header(name, value);
        }
        req
    }

    pub(crate) async fn send(&self, req: RequestBuilder) -> Result<Response, RemoteError> {
        let resp = req.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request failed");
            RemoteError::network(e.to_string())
        })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "non-success response");
        Err(RemoteError::from_status(status.as_u16(), body))
    }

    pub(crate) async fn fetch_json<T>(&self, req: RequestBuilder) -> Result<T, RemoteError>
    where
        T: DeserializeOwned,
    {
        let resp = self.send(req).await?;
        resp.json::<T>()
            .await
            .map_err(|e| RemoteError::decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<IdentityPayload, RemoteError> {
        let req = self.anonymous(Method::POST, "/users/login").json(credentials);
        self.fetch_json(req).await
    }

    async fn register(&self, registration: &Registration) -> Result<IdentityPayload, RemoteError> {
        let req = self.anonymous(Method::POST, "/users").json(registration);
        self.fetch_json(req).await
    }
}

#[async_trait::async_trait]
impl BookmarkApi for ApiClient {
    async fn list_bookmarks(&self, user_id: UserId) -> Result<Vec<BookmarkReference>, RemoteError> {
        let req = self.authorized(Method::GET, &format!("/bookmarks/user/{user_id}"));
        self.fetch_json(req).await
    }

    async fn add_bookmark(&self, user_id: UserId, property_id: PropertyId) -> Result<(), RemoteError> {
        let req = self
            .authorized(Method::POST, "/bookmarks")
            .json(&NewBookmark {
                user_id,
                property_id,
            });
        self.send(req).await.map(drop)
    }

    async fn remove_bookmark(&self, user_id: UserId, property_id: PropertyId) -> Result<(), RemoteError> {
        let req = self.authorized(
            Method::DELETE,
            &format!("/bookmarks/user/{user_id}/property/{property_id}"),
        );
        self.send(req).await.map(drop)
    }

    async fn is_bookmarked(&self, user_id: UserId, property_id: PropertyId) -> Result<bool, RemoteError> {
        let req = self.authorized(
            Method::GET,
            &format!("/bookmarks/check/{user_id}/{property_id}"),
        );
        self.fetch_json(req).await
    }
}

#[async_trait::async_trait]
impl PropertyApi for ApiClient {
    async fn get_property(&self, property_id: PropertyId) -> Result<PropertyRecord, RemoteError> {
        let req = self.authorized(Method::GET, &format!("/properties/{property_id}"));
        self.fetch_json(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let client = ApiClient::new(
            "http://localhost:8080/api/",
            Duration::from_secs(1),
            SessionContext::new(),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.url("/properties/1"), "http://localhost:8080/api/properties/1");
    }
}

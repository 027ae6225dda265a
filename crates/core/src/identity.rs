//! Authenticated principal and the credential shapes that produce it.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::UserId;

/// Wire shape of the `/users` and `/users/login` replies.
///
/// Every field is optional here; [`Identity::from_payload`] decides whether the
/// reply is a usable session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl IdentityPayload {
    /// Whether the reply carries a usable bearer credential.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// An authenticated principal held client-side.
///
/// Either fully present (id and non-empty token) or not constructed at all;
/// the only ways in are [`Identity::new`] and [`Identity::from_payload`], and
/// deserialization goes through the same check.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IdentityPayload", into = "IdentityPayload")]
pub struct Identity {
    id: UserId,
    email: String,
    token: String,
    first_name: Option<String>,
    last_name: Option<String>,
    phone_number: Option<String>,
    role: Option<String>,
}

impl Identity {
    pub fn new(id: UserId, email: impl Into<String>, token: impl Into<String>) -> DomainResult<Self> {
        Self::from_payload(IdentityPayload {
            id: Some(id),
            email: Some(email.into()),
            token: Some(token.into()),
            ..IdentityPayload::default()
        })
    }

    /// Validate a backend reply into an identity.
    pub fn from_payload(payload: IdentityPayload) -> DomainResult<Self> {
        let id = payload
            .id
            .ok_or_else(|| DomainError::invariant("identity without id"))?;
        let token = match payload.token {
            Some(token) if !token.trim().is_empty() => token,
            _ => return Err(DomainError::invariant("identity without token")),
        };

        Ok(Self {
            id,
            email: payload.email.unwrap_or_default(),
            token,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone_number: payload.phone_number,
            role: payload.role,
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// "First Last" when the profile carries names, otherwise the email.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect();

        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

impl core::fmt::Debug for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl TryFrom<IdentityPayload> for Identity {
    type Error = DomainError;

    fn try_from(value: IdentityPayload) -> Result<Self, Self::Error> {
        Self::from_payload(value)
    }
}

impl From<Identity> for IdentityPayload {
    fn from(value: Identity) -> Self {
        Self {
            id: Some(value.id),
            email: Some(value.email),
            token: Some(value.token),
            first_name: value.first_name,
            last_name: value.last_name,
            phone_number: value.phone_number,
            role: value.role,
        }
    }
}

/// Login body: `{email, password}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration body (profile fields posted to `/users`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl Registration {
    /// The login pair matching this registration.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

impl core::fmt::Debug for Registration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

//! `propfinder-core`: domain building blocks of the property finder client.
//!
//! This crate contains **pure domain** types (no HTTP, no storage). Transport
//! and persistence live in `propfinder-client` and `propfinder-auth`.

pub mod bookmark;
pub mod entity;
pub mod error;
pub mod id;
pub mod identity;
pub mod property;
pub mod remote;

pub use bookmark::BookmarkReference;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{PropertyId, UserId};
pub use identity::{Credentials, Identity, IdentityPayload, Registration};
pub use property::{
    ListingType, PropertyDraft, PropertyOwner, PropertyRecord, PropertyType, SearchFilters,
};
pub use remote::RemoteError;

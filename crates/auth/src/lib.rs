//! `propfinder-auth`: client-side session lifecycle.
//!
//! This crate is intentionally decoupled from HTTP: the backend is reached
//! through [`AuthApi`] and persistence through [`KeyValueStore`].

pub mod api;
pub mod context;
pub mod error;
pub mod session;
pub mod store;

pub use api::AuthApi;
pub use context::{SessionContext, authorization_header};
pub use error::AuthError;
pub use session::{SESSION_KEY, SessionManager};
pub use store::{FileStore, InMemoryStore, KeyValueStore, StoreError};

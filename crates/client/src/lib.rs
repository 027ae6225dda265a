//! `propfinder-client`
//!
//! HTTP implementation of the backend seams used by `propfinder-auth` and
//! `propfinder-favorites`, plus configuration and application wiring for the
//! `propfinder` binary.

pub mod app;
pub mod config;
pub mod http;
pub mod properties;

pub use app::{App, AppError};
pub use config::{ClientConfig, ConfigError};
pub use http::ApiClient;
pub use properties::CatalogError;

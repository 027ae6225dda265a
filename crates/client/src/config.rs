//! Client configuration, read once from the environment.

use std::path::PathBuf;
use std::time::Duration;

use propfinder_favorites::DEFAULT_MAX_IN_FLIGHT;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_URL_ENV: &str = "PROPFINDER_API_URL";
pub const SESSION_DIR_ENV: &str = "PROPFINDER_SESSION_DIR";
pub const MAX_IN_FLIGHT_ENV: &str = "PROPFINDER_MAX_IN_FLIGHT";
pub const TIMEOUT_ENV: &str = "PROPFINDER_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("failed to resolve OS app data directory; set {SESSION_DIR_ENV}")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to (no trailing slash).
    pub api_base_url: String,
    /// Directory holding the persisted session.
    pub session_dir: PathBuf,
    pub max_in_flight_hydrations: usize,
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Defaults with an explicit session directory.
    pub fn new(session_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            session_dir: session_dir.into(),
            max_in_flight_hydrations: DEFAULT_MAX_IN_FLIGHT,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = normalize_url(&url.into());
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = match get(API_URL_ENV) {
            Some(value) => parse_url(API_URL_ENV, &value)?,
            None => DEFAULT_API_URL.to_string(),
        };

        let session_dir = match get(SESSION_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => default_session_dir()?,
        };

        let max_in_flight_hydrations = match get(MAX_IN_FLIGHT_ENV) {
            Some(value) => parse_count(MAX_IN_FLIGHT_ENV, &value)?,
            None => DEFAULT_MAX_IN_FLIGHT,
        };

        let request_timeout = match get(TIMEOUT_ENV) {
            Some(value) => Duration::from_secs(parse_positive(TIMEOUT_ENV, &value)?),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_base_url,
            session_dir,
            max_in_flight_hydrations,
            request_timeout,
        })
    }
}

/// `{app_data_dir}/propfinder`.
fn default_session_dir() -> Result<PathBuf, ConfigError> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or(ConfigError::NoDataDir)?;
    dir.push("propfinder");
    Ok(dir)
}

fn parse_url(var: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(normalize_url(trimmed))
    } else {
        Err(ConfigError::InvalidUrl {
            var,
            value: value.to_string(),
        })
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        }),
    }
}

/// Positive integer that must also fit the platform's `usize`.
fn parse_count(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    let n = parse_positive(var, value)?;
    usize::try_from(n).map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[(SESSION_DIR_ENV, "/tmp/pf")])).unwrap();

        assert_eq!(config, ClientConfig::new("/tmp/pf"));
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.max_in_flight_hydrations, 8);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_URL_ENV, "https://api.example.com/api/"),
            (SESSION_DIR_ENV, "/tmp/pf"),
            (MAX_IN_FLIGHT_ENV, "3"),
            (TIMEOUT_ENV, "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://api.example.com/api");
        assert_eq!(config.max_in_flight_hydrations, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_invalid_values() {
        let err = ClientConfig::from_lookup(lookup(&[
            (SESSION_DIR_ENV, "/tmp/pf"),
            (MAX_IN_FLIGHT_ENV, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: MAX_IN_FLIGHT_ENV, .. }));

        let err = ClientConfig::from_lookup(lookup(&[
            (SESSION_DIR_ENV, "/tmp/pf"),
            (API_URL_ENV, "localhost:8080"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn blank_values_take_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (SESSION_DIR_ENV, "/tmp/pf"),
            (TIMEOUT_ENV, "  "),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn in_flight_limit_must_fit_usize() {
        let huge = u64::MAX.to_string();
        let result = ClientConfig::from_lookup(lookup(&[
            (SESSION_DIR_ENV, "/tmp/pf"),
            (MAX_IN_FLIGHT_ENV, huge.as_str()),
        ]));

        match usize::try_from(u64::MAX) {
            Ok(expected) => assert_eq!(result.unwrap().max_in_flight_hydrations, expected),
            Err(_) => assert!(matches!(
                result,
                Err(ConfigError::InvalidNumber { var: MAX_IN_FLIGHT_ENV, .. })
            )),
        }

        assert!(matches!(
            parse_count(MAX_IN_FLIGHT_ENV, "18446744073709551616"),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert_eq!(parse_count(MAX_IN_FLIGHT_ENV, "12"), Ok(12));
    }
}

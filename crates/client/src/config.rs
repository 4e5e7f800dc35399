//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `POCKETSHOP_API_URL` - Base URL of the remote API (default: <https://dummyjson.com>)
//! - `POCKETSHOP_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `POCKETSHOP_CACHE_TTL_SECS` - Catalog cache time-to-live (default: 300)
//! - `POCKETSHOP_CACHE_CAPACITY` - Maximum cached catalog responses (default: 1000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default remote API.
pub const DEFAULT_API_URL: &str = "https://dummyjson.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CACHE_CAPACITY: u64 = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every API path is resolved against.
    pub api_url: Url,
    /// Timeout applied to each HTTP request.
    pub request_timeout: Duration,
    /// How long catalog responses stay cached.
    pub cache_ttl: Duration,
    /// Maximum number of cached catalog responses.
    pub cache_capacity: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = parse_or_default(&lookup, "POCKETSHOP_API_URL", DEFAULT_API_URL)?;
        let timeout_secs = parse_or_default(
            &lookup,
            "POCKETSHOP_HTTP_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )?;
        let ttl_secs = parse_or_default(
            &lookup,
            "POCKETSHOP_CACHE_TTL_SECS",
            &DEFAULT_CACHE_TTL_SECS.to_string(),
        )?;
        let cache_capacity = parse_or_default(
            &lookup,
            "POCKETSHOP_CACHE_CAPACITY",
            &DEFAULT_CACHE_CAPACITY.to_string(),
        )?;

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            cache_ttl: Duration::from_secs(ttl_secs),
            cache_capacity,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }

    /// Configuration with defaults pointing at `api_url`.
    ///
    /// Handy for tests that run against a local mock server.
    #[must_use]
    pub fn with_api_url(api_url: Url) -> Self {
        Self {
            api_url,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when unset.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url.as_str(), "https://dummyjson.com/");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.cache_capacity, 1000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("POCKETSHOP_API_URL", "http://127.0.0.1:9999"),
            ("POCKETSHOP_HTTP_TIMEOUT_SECS", "5"),
            ("POCKETSHOP_CACHE_TTL_SECS", "0"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ]))
        .unwrap();

        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:9999/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.cache_ttl, Duration::ZERO);
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_invalid_timeout() {
        let err = ClientConfig::from_lookup(lookup_from(&[(
            "POCKETSHOP_HTTP_TIMEOUT_SECS",
            "soon",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "POCKETSHOP_HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn test_invalid_url() {
        let result = ClientConfig::from_lookup(lookup_from(&[("POCKETSHOP_API_URL", "not a url")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_sentry_dsn_is_ignored() {
        let config = ClientConfig::from_lookup(lookup_from(&[("SENTRY_DSN", "")])).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}

//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_API_BASE_URL` - Base URL of the storefront backend API
//!
//! ## Optional
//! - `STOREFRONT_API_TOKEN` - Bearer token for server-to-server calls
//! - `STOREFRONT_CART_DEBOUNCE_MS` - Cart write quiet period (default: 500)
//! - `STOREFRONT_SETTINGS_TTL_SECS` - Site-settings cache lifetime
//!   (default: 300, the announcement refresh window)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default quiet period before a cart mutation is written remotely.
const DEFAULT_CART_DEBOUNCE_MS: u64 = 500;

/// Default lifetime for cached site settings.
const DEFAULT_SETTINGS_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the storefront backend API.
    pub api_base_url: Url,
    /// Optional bearer token for authenticated server-to-server calls.
    pub api_token: Option<SecretString>,
    /// Quiet period the cart sync engine waits after a mutation before
    /// writing to the backend.
    pub cart_debounce: Duration,
    /// How long cached site settings stay fresh.
    pub settings_ttl: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("cart_debounce", &self.cart_debounce)
            .field("settings_ttl", &self.settings_ttl)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or fail to
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(
            "STOREFRONT_API_BASE_URL",
            &get_required_env("STOREFRONT_API_BASE_URL")?,
        )?;
        let api_token = get_optional_env("STOREFRONT_API_TOKEN").map(SecretString::from);
        let cart_debounce = Duration::from_millis(parse_u64(
            "STOREFRONT_CART_DEBOUNCE_MS",
            &get_env_or_default("STOREFRONT_CART_DEBOUNCE_MS", DEFAULT_CART_DEBOUNCE_MS),
        )?);
        let settings_ttl = Duration::from_secs(parse_u64(
            "STOREFRONT_SETTINGS_TTL_SECS",
            &get_env_or_default("STOREFRONT_SETTINGS_TTL_SECS", DEFAULT_SETTINGS_TTL_SECS),
        )?);

        Ok(Self {
            api_base_url,
            api_token,
            cart_debounce,
            settings_ttl,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a numeric default.
fn get_env_or_default(key: &str, default: u64) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a base URL, rejecting anything that cannot serve as a join base.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = value
        .parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    Ok(url)
}

/// Parse a non-negative integer environment value.
fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_valid() {
        let url = parse_base_url("TEST_VAR", "https://shop.example.com/api/").unwrap();
        assert_eq!(url.host_str(), Some("shop.example.com"));
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("TEST_VAR", "not a url").is_err());
    }

    #[test]
    fn test_parse_base_url_rejects_non_base() {
        // mailto: URLs have no path hierarchy to join against
        assert!(parse_base_url("TEST_VAR", "mailto:shop@example.com").is_err());
    }

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("TEST_VAR", "500").unwrap(), 500);
        assert!(parse_u64("TEST_VAR", "half a second").is_err());
        assert!(parse_u64("TEST_VAR", "-1").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig {
            api_base_url: "https://shop.example.com".parse().unwrap(),
            api_token: Some(SecretString::from("super_secret_token")),
            cart_debounce: Duration::from_millis(500),
            settings_ttl: Duration::from_secs(300),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("shop.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}

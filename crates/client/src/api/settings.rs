//! Site settings: announcement message and maintenance mode.
//!
//! Settings come from `GET /api/settings?keys=...` as a map of string
//! values; the maintenance flag is also exposed on a dedicated
//! `GET /api/check-maintenance` probe. Fetches are cached in a `moka`
//! future cache so the announcement bar can re-read them freely while the
//! backend only sees one request per TTL window.

use std::collections::BTreeMap;

use moka::future::Cache;
use serde::Deserialize;
use tracing::instrument;

use crate::config::ClientConfig;

use super::{ApiClient, ApiError};

/// Settings keys this client asks the backend for.
const SETTINGS_KEYS: &str = "announcement_bar_message,maintenance_mode";

/// Cache key for the single settings entry.
const CACHE_KEY: &str = "site-settings";

/// Site-wide settings relevant to the storefront chrome.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteSettings {
    /// Announcement bar message, trimmed; empty means "no announcement".
    pub announcement_message: String,
    /// Whether the site is in maintenance mode.
    pub maintenance_mode: bool,
}

/// Raw `GET /api/settings` payload.
#[derive(Debug, Deserialize)]
struct SettingsPayload {
    #[serde(default)]
    data: BTreeMap<String, serde_json::Value>,
}

/// Raw `GET /api/check-maintenance` payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MaintenancePayload {
    #[serde(default)]
    maintenance_mode: bool,
}

impl From<SettingsPayload> for SiteSettings {
    fn from(payload: SettingsPayload) -> Self {
        let announcement_message = payload
            .data
            .get("announcement_bar_message")
            .map(value_as_string)
            .unwrap_or_default()
            .trim()
            .to_string();
        let maintenance_mode = payload
            .data
            .get("maintenance_mode")
            .is_some_and(truthy);

        Self {
            announcement_message,
            maintenance_mode,
        }
    }
}

/// Settings values arrive as strings, but tolerate native booleans too.
fn truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn value_as_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Client for site settings and the maintenance probe.
#[derive(Clone)]
pub struct SettingsClient {
    api: ApiClient,
    cache: Cache<&'static str, SiteSettings>,
}

impl SettingsClient {
    /// Create a settings client with the configured cache TTL.
    #[must_use]
    pub fn new(api: ApiClient, config: &ClientConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.settings_ttl)
            .build();

        Self { api, cache }
    }

    /// Fetch site settings, served from cache within the TTL window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be
    /// parsed. Cached values are never served stale past the TTL.
    #[instrument(skip(self))]
    pub async fn site_settings(&self) -> Result<SiteSettings, ApiError> {
        if let Some(settings) = self.cache.get(CACHE_KEY).await {
            return Ok(settings);
        }

        let payload: SettingsPayload = self
            .api
            .get_json("api/settings", &[("keys", SETTINGS_KEYS)])
            .await?;
        let settings = SiteSettings::from(payload);

        self.cache.insert(CACHE_KEY, settings.clone()).await;
        Ok(settings)
    }

    /// Probe whether the site is in maintenance mode.
    ///
    /// Best effort: any failure is logged and reported as "not in
    /// maintenance" so an unreachable settings endpoint never locks
    /// visitors out of the store.
    #[instrument(skip(self))]
    pub async fn check_maintenance(&self) -> bool {
        match self
            .api
            .get_json::<MaintenancePayload>("api/check-maintenance", &[])
            .await
        {
            Ok(payload) => payload.maintenance_mode,
            Err(error) => {
                tracing::warn!(%error, "Failed to determine maintenance mode");
                false
            }
        }
    }
}

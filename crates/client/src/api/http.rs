//! Shared HTTP plumbing for the backend API clients.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;

use super::ApiError;

/// Shared client for the storefront backend API.
///
/// Cheap to clone; all per-endpoint clients hold one of these.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the configured
    /// token is not a valid header value.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.api_token {
            let auth_value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&auth_value).map_err(|_| {
                ApiError::InvalidInput("API token is not a valid header value".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_base_url.clone(),
            }),
        })
    }

    /// Resolve a relative API path against the configured base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Start building a GET request for an API path.
    pub(crate) fn get(&self, path: &str) -> Result<reqwest::RequestBuilder, ApiError> {
        Ok(self.inner.client.get(self.endpoint(path)?))
    }

    /// Start building a POST request for an API path.
    pub(crate) fn post(&self, path: &str) -> Result<reqwest::RequestBuilder, ApiError> {
        Ok(self.inner.client.post(self.endpoint(path)?))
    }

    /// Start building a PUT request for an API path.
    pub(crate) fn put(&self, path: &str) -> Result<reqwest::RequestBuilder, ApiError> {
        Ok(self.inner.client.put(self.endpoint(path)?))
    }

    /// GET a JSON payload from an API path.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self.get(path)?.query(query).send().await?;
        Self::read_json(response).await
    }

    /// PUT a JSON body to an API path, expecting only a success status back.
    pub(crate) async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self.put(path)?.json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }
        Ok(())
    }

    /// Read a response body as JSON, reporting the raw body on failure.
    pub(crate) async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }

        // Body as text first for better error diagnostics
        let response_text = response.text().await?;
        match serde_json::from_str(&response_text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %truncate(&response_text, 500),
                    "Failed to parse backend API response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    async fn status_error(status: reqwest::StatusCode, response: reqwest::Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %truncate(&body, 500),
            "Backend API returned non-success status"
        );
        ApiError::Status {
            status: status.as_u16(),
            message: truncate(&body, 200),
        }
    }
}

/// Truncate a response body for logs and error messages.
fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config() -> ClientConfig {
        ClientConfig {
            api_base_url: "https://shop.example.com/".parse().unwrap(),
            api_token: None,
            cart_debounce: Duration::from_millis(500),
            settings_ttl: Duration::from_secs(300),
        }
    }

    #[test]
    fn test_endpoint_joins_relative_paths() {
        let client = ApiClient::new(&test_config()).unwrap();
        let url = client.endpoint("api/cart").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/api/cart");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 10), "hi");
    }
}

//! HTTP clients for the storefront backend API.
//!
//! # Architecture
//!
//! - One shared [`ApiClient`] holds the `reqwest` client, base URL, and
//!   optional bearer token; per-endpoint clients wrap it.
//! - The backend is the source of truth for carts, settings, and orders -
//!   these clients hold no state of their own beyond short-lived caches.
//! - Failures map onto a single [`ApiError`] taxonomy so call sites decide
//!   whether to propagate (registration, tracking) or swallow (cart sync,
//!   maintenance probe).
//!
//! # Endpoints
//!
//! - `GET /api/cart`, `PUT /api/cart` - per-user cart store ([`cart`])
//! - `GET /api/settings`, `GET /api/check-maintenance` - site settings
//!   ([`settings`])
//! - `POST /api/orders/track` - guest order tracking ([`orders`])
//! - `POST /api/auth/register` - account registration ([`auth`])

pub mod auth;
pub mod cart;
pub mod http;
pub mod orders;
pub mod settings;

pub use auth::{RegistrationClient, RegistrationError, RegistrationForm, ValidationError};
pub use cart::{CartBackend, HttpCartBackend};
pub use http::ApiClient;
pub use orders::OrderTrackingClient;
pub use settings::{SettingsClient, SiteSettings};

use thiserror::Error;

/// Errors that can occur when talking to the storefront backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend responded with a non-success status.
    #[error("API error: {status} - {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for logging.
        message: String,
    },

    /// Response body could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend answered with a `success: false` envelope.
    #[error("{0}")]
    Rejected(String),

    /// Request input failed local validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A path could not be joined onto the configured base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

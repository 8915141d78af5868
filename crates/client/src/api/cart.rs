//! Remote cart store access.
//!
//! The sync engine talks to the cart store through the [`CartBackend`]
//! trait so tests can substitute an in-memory fake; [`HttpCartBackend`] is
//! the production implementation over the backend's `/api/cart` endpoint.

use std::future::Future;

use storefront_core::CartItem;
use tracing::instrument;

use super::{ApiClient, ApiError};

/// Remote per-user cart store.
///
/// Both calls operate on the whole cart: the fetch returns the full ordered
/// item list, and the write replaces the remote cart with the payload.
/// Futures are `Send` because the sync engine runs them on spawned tasks.
pub trait CartBackend {
    /// Fetch the full remote cart for the signed-in user.
    fn fetch_cart(&self) -> impl Future<Output = Result<Vec<CartItem>, ApiError>> + Send;

    /// Replace the remote cart with the given items.
    fn sync_cart(
        &self,
        items: &[CartItem],
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl<B: CartBackend + Sync> CartBackend for std::sync::Arc<B> {
    fn fetch_cart(&self) -> impl Future<Output = Result<Vec<CartItem>, ApiError>> + Send {
        (**self).fetch_cart()
    }

    fn sync_cart(&self, items: &[CartItem]) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).sync_cart(items)
    }
}

/// [`CartBackend`] over the storefront backend HTTP API.
///
/// Relies on the session cookie or bearer token carried by the underlying
/// [`ApiClient`] to scope the cart to the signed-in user.
#[derive(Clone)]
pub struct HttpCartBackend {
    api: ApiClient,
}

impl HttpCartBackend {
    /// Create a cart backend over an existing API client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl CartBackend for HttpCartBackend {
    #[instrument(skip(self))]
    async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        self.api.get_json("api/cart", &[]).await
    }

    #[instrument(skip(self, items), fields(item_count = items.len()))]
    async fn sync_cart(&self, items: &[CartItem]) -> Result<(), ApiError> {
        self.api.put_json("api/cart", items).await
    }
}

//! Guest order tracking.
//!
//! Order tracking is available without an account: the visitor supplies an
//! order number and the email it was placed under, and the backend answers
//! with a `{ success, message, data }` envelope.

use serde::{Deserialize, Serialize};
use storefront_core::{Email, TrackedOrder};
use tracing::instrument;

use super::{ApiClient, ApiError};

/// Fallback shown when the backend rejects a lookup without a message.
const NOT_FOUND_MESSAGE: &str = "Unable to find an order with those details.";

#[derive(Debug, Serialize)]
struct TrackOrderRequest<'a> {
    order_number: &'a str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct TrackOrderEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<TrackedOrder>,
}

/// Client for the order-tracking endpoint.
#[derive(Clone)]
pub struct OrderTrackingClient {
    api: ApiClient,
}

impl OrderTrackingClient {
    /// Create an order-tracking client over an existing API client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Look up an order by number and purchase email.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidInput`] if the order number is blank after
    ///   trimming
    /// - [`ApiError::Rejected`] with the backend's message (or a generic
    ///   fallback) when the lookup does not match an order
    /// - transport and parse errors for everything else
    #[instrument(skip(self, email), fields(order_number = %order_number.trim()))]
    pub async fn track_order(
        &self,
        order_number: &str,
        email: &Email,
    ) -> Result<TrackedOrder, ApiError> {
        let order_number = order_number.trim();
        if order_number.is_empty() {
            return Err(ApiError::InvalidInput(
                "Enter both order number and email to track your order.".to_string(),
            ));
        }

        let body = TrackOrderRequest {
            order_number,
            email: email.as_str(),
        };
        let response = self
            .api
            .post("api/orders/track")?
            .json(&body)
            .send()
            .await?;

        // The backend uses the envelope for "not found" even on non-2xx
        // statuses, so read the body before judging the status code.
        let status = response.status();
        let text = response.text().await?;
        let envelope: Option<TrackOrderEnvelope> = serde_json::from_str(&text).ok();

        match envelope {
            Some(envelope) if status.is_success() && envelope.success => {
                envelope.data.map_or_else(
                    || Err(ApiError::Rejected(NOT_FOUND_MESSAGE.to_string())),
                    Ok,
                )
            }
            Some(envelope) => Err(ApiError::Rejected(
                envelope
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()),
            )),
            None => Err(ApiError::Rejected(NOT_FOUND_MESSAGE.to_string())),
        }
    }
}

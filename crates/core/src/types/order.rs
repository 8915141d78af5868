//! Order tracking data returned by the storefront backend.
//!
//! These types mirror the `POST /api/orders/track` response shape. Money
//! amounts are decimal, never floats.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::OrderId;

/// Order fulfillment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Completed,
}

impl OrderStatus {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        }
    }
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
        }
    }
}

/// A line item on a tracked order.
///
/// The backend omits fields it no longer has (e.g. for deleted products),
/// so everything except the quantity is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedOrderItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Decimal>,
}

/// A tracked order as returned by the order-tracking endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedOrder {
    pub id: OrderId,
    pub order_number: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub subtotal: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<Decimal>,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub order_items: Vec<TrackedOrderItem>,
    /// Free-form delivery address; shape is owned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Shipped).unwrap(),
            "\"shipped\""
        );
        let status: PaymentStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(status, PaymentStatus::Refunded);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(OrderStatus::Processing.label(), "Processing");
        assert_eq!(PaymentStatus::Paid.label(), "Paid");
    }

    #[test]
    fn test_tracked_order_deserializes_minimal_payload() {
        let order: TrackedOrder = serde_json::from_str(
            r#"{
                "id": "ord_1001",
                "order_number": "1001",
                "status": "processing",
                "payment_status": "paid",
                "subtotal": "24.00",
                "total": "26.50",
                "created_at": "2026-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(order.order_number, "1001");
        assert!(order.order_items.is_empty());
        assert!(order.delivery_address.is_none());
        assert_eq!(order.total.to_string(), "26.50");
    }

    #[test]
    fn test_tracked_order_items_allow_missing_fields() {
        let item: TrackedOrderItem = serde_json::from_str(r#"{"quantity": 3}"#).unwrap();
        assert_eq!(item.quantity, 3);
        assert!(item.product_name.is_none());
        assert!(item.unit_price.is_none());
    }
}

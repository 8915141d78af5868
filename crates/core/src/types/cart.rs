//! Cart items and change-detection snapshots.
//!
//! A cart is an ordered `Vec<CartItem>`. The order carries no business
//! meaning but is preserved for display, and the snapshot fingerprint is
//! deliberately order-sensitive so that a reordered cart is treated as a
//! change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A single product selection in a cart.
///
/// `selected_variants` maps a variant axis name (e.g. `"size"`) to the
/// chosen option value (e.g. `"XL"`). It may be empty for products without
/// variants. A `BTreeMap` keeps serialization independent of insertion
/// order, so two items with the same selections always fingerprint
/// identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Quantity of the product. Always positive; a removal is expressed by
    /// dropping the item from the cart, not by a zero quantity.
    pub quantity: u32,
    /// Selected variant options, keyed by variant axis name.
    #[serde(default)]
    pub selected_variants: BTreeMap<String, String>,
}

impl CartItem {
    /// Create a cart item without variant selections.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
            selected_variants: BTreeMap::new(),
        }
    }

    /// Add a variant selection, builder-style.
    #[must_use]
    pub fn with_variant(mut self, axis: impl Into<String>, option: impl Into<String>) -> Self {
        self.selected_variants.insert(axis.into(), option.into());
        self
    }
}

/// An order-preserving fingerprint of a cart, used only for change
/// detection.
///
/// Two snapshots compare equal exactly when the carts they were taken from
/// contain the same items, with the same quantities and variant
/// selections, in the same sequence order. Snapshots are never persisted
/// remotely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartSnapshot(String);

impl CartSnapshot {
    /// Take a snapshot of a cart in its current sequence order.
    #[must_use]
    pub fn of(items: &[CartItem]) -> Self {
        // Serializing Vec<CartItem> cannot fail; the empty-string fallback
        // exists only to satisfy the non-panicking contract.
        Self(serde_json::to_string(items).unwrap_or_default())
    }

    /// The serialized form backing this snapshot. Useful for logging.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shirt() -> CartItem {
        CartItem::new("prod_shirt", 1)
            .with_variant("size", "M")
            .with_variant("color", "navy")
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let cart = vec![shirt(), CartItem::new("prod_mug", 2)];
        assert_eq!(CartSnapshot::of(&cart), CartSnapshot::of(&cart));
    }

    #[test]
    fn test_snapshot_is_order_sensitive() {
        let a = vec![shirt(), CartItem::new("prod_mug", 2)];
        let b = vec![CartItem::new("prod_mug", 2), shirt()];
        assert_ne!(CartSnapshot::of(&a), CartSnapshot::of(&b));
    }

    #[test]
    fn test_snapshot_ignores_variant_insertion_order() {
        let a = CartItem::new("prod_shirt", 1)
            .with_variant("size", "M")
            .with_variant("color", "navy");
        let b = CartItem::new("prod_shirt", 1)
            .with_variant("color", "navy")
            .with_variant("size", "M");
        assert_eq!(CartSnapshot::of(&[a]), CartSnapshot::of(&[b]));
    }

    #[test]
    fn test_snapshot_detects_quantity_change() {
        let before = vec![CartItem::new("prod_mug", 2)];
        let after = vec![CartItem::new("prod_mug", 3)];
        assert_ne!(CartSnapshot::of(&before), CartSnapshot::of(&after));
    }

    #[test]
    fn test_cart_item_deserializes_without_variants() {
        let item: CartItem = serde_json::from_str(r#"{"id":"prod_mug","quantity":2}"#).unwrap();
        assert!(item.selected_variants.is_empty());
        assert_eq!(item, CartItem::new("prod_mug", 2));
    }

    #[test]
    fn test_empty_cart_snapshot() {
        assert_eq!(CartSnapshot::of(&[]).as_str(), "[]");
    }
}

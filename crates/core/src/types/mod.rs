//! Core types for the storefront client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod order;
pub mod session;

pub use cart::{CartItem, CartSnapshot};
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{OrderStatus, PaymentStatus, TrackedOrder, TrackedOrderItem};
pub use session::SessionIdentity;

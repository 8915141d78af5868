//! Storefront client services.
//!
//! This crate is the networked half of the storefront client: thin HTTP
//! clients for the backend's cart, settings, order-tracking, and
//! registration endpoints, plus the cart synchronization engine that keeps
//! a signed-in user's remote cart consistent with local mutations.
//!
//! # Architecture
//!
//! - [`api`] - `reqwest`-based clients for the backend HTTP API
//! - [`sync`] - the debounced cart synchronization engine (tokio actor)
//! - [`announcements`] - announcement-bar visibility state
//! - [`config`] - environment-driven configuration
//!
//! Rendering and routing are someone else's problem; nothing in this crate
//! produces HTML or owns a server socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod announcements;
pub mod api;
pub mod config;
pub mod sync;

pub use api::ApiError;
pub use config::{ClientConfig, ConfigError};
pub use sync::{CartSyncEngine, CartSyncHandle};

//! Storefront Core - Shared types library.
//!
//! This crate provides common types used across the storefront client
//! components:
//! - `client` - HTTP API clients and the cart synchronization engine
//! - `integration-tests` - End-to-end scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Cart items and snapshots, type-safe IDs, emails, session
//!   identity, and order tracking data
//!
//! [`types`]: crate::types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

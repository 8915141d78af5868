//! Cart synchronization.
//!
//! Keeps a signed-in user's remote cart consistent with local mutations
//! while minimizing network traffic: one hydrating fetch per sign-in, and
//! debounced whole-cart writes that collapse bursts of mutations into a
//! single request. Synchronization is best effort - network failures are
//! logged and swallowed, and the local cart stays usable regardless.
//!
//! See [`engine::CartSyncEngine`] for the state machine.

mod engine;

pub use engine::{CartSyncEngine, CartSyncHandle};

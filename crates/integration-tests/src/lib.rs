//! Integration test support for the storefront client services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-integration-tests
//! ```
//!
//! The cart sync scenarios run on tokio's paused clock
//! (`#[tokio::test(start_paused = true)]`), so "waiting out" a debounce
//! window costs no wall time.
//!
//! # Contents
//!
//! - [`FakeCartBackend`] - in-memory cart store with scriptable failures
//!   and per-call latency, recording every write attempt
//! - [`init_tracing`] - opt-in log output for debugging test runs

// Test support code; unwraps on poisoned mutexes are fine here.
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use storefront_client::api::{ApiError, CartBackend};
use storefront_core::CartItem;

/// Install a tracing subscriber for test debugging. Idempotent.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_client=debug".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// In-memory stand-in for the remote cart store.
///
/// Fetches return the current `remote` contents; successful writes replace
/// them. Failures and artificial latency are scriptable per call, and
/// every write attempt (successful or not) is recorded in completion
/// order.
#[derive(Default)]
pub struct FakeCartBackend {
    remote: Mutex<Vec<CartItem>>,
    fail_fetches: AtomicBool,
    fail_writes: AtomicBool,
    fetch_delay: Mutex<Duration>,
    write_delays: Mutex<VecDeque<Duration>>,
    fetch_count: AtomicUsize,
    write_attempts: Mutex<Vec<Vec<CartItem>>>,
}

impl FakeCartBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the remote cart contents.
    pub fn set_remote(&self, items: Vec<CartItem>) {
        *self.remote.lock().unwrap() = items;
    }

    /// Current remote cart contents.
    #[must_use]
    pub fn remote(&self) -> Vec<CartItem> {
        self.remote.lock().unwrap().clone()
    }

    /// Make subsequent fetches fail.
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes fail (attempts are still recorded).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delay every subsequent fetch by `delay`.
    pub fn set_fetch_delay(&self, delay: Duration) {
        *self.fetch_delay.lock().unwrap() = delay;
    }

    /// Queue per-call write latencies, consumed in dispatch order.
    pub fn queue_write_delays(&self, delays: impl IntoIterator<Item = Duration>) {
        self.write_delays.lock().unwrap().extend(delays);
    }

    /// Number of fetches issued so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Every write payload attempted so far, in completion order.
    #[must_use]
    pub fn write_attempts(&self) -> Vec<Vec<CartItem>> {
        self.write_attempts.lock().unwrap().clone()
    }
}

impl CartBackend for FakeCartBackend {
    async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let delay = *self.fetch_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                message: "fetch failed".to_string(),
            });
        }
        Ok(self.remote())
    }

    async fn sync_cart(&self, items: &[CartItem]) -> Result<(), ApiError> {
        let delay = self
            .write_delays
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.write_attempts.lock().unwrap().push(items.to_vec());
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                message: "write failed".to_string(),
            });
        }
        *self.remote.lock().unwrap() = items.to_vec();
        Ok(())
    }
}

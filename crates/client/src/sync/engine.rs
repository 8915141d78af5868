//! The cart synchronization state machine.
//!
//! A single tokio task owns every piece of mutable sync state - the
//! fetch-in-progress flag, the last-synced baseline snapshot, and the
//! armed debounce deadline - so no locking is needed and multiple engines
//! (e.g. in tests) never interfere. Session transitions and cart
//! mutations arrive as events through a [`CartSyncHandle`]; network calls
//! run on spawned tasks and report back through an internal channel.
//!
//! # Baseline bookkeeping
//!
//! The baseline is "the fingerprint believed to match the remote cart".
//! Each write captures the snapshot it is sending together with a
//! dispatch sequence number; its completion updates the baseline only if
//! no later-dispatched write has been applied yet. A slow write can
//! therefore never clobber the baseline of a newer one, whatever order
//! the responses arrive in.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::{Duration, Instant, sleep_until};

use storefront_core::{CartItem, CartSnapshot, SessionIdentity, UserId};

use crate::api::{ApiError, CartBackend};

/// Events fed to the engine by the application.
enum Event {
    SessionStarted(UserId),
    SessionEnded,
    CartChanged(Vec<CartItem>),
}

/// Completions reported by spawned network calls.
enum TaskResult {
    FetchDone {
        generation: u64,
        result: Result<Vec<CartItem>, ApiError>,
    },
    WriteDone {
        generation: u64,
        dispatch: u64,
        snapshot: CartSnapshot,
        result: Result<(), ApiError>,
    },
}

/// A debounced write waiting for its quiet period to elapse.
struct PendingWrite {
    items: Vec<CartItem>,
    snapshot: CartSnapshot,
    deadline: Instant,
}

/// Handle for feeding session and cart events to a running engine.
///
/// Cheap to clone. All methods are fire-and-forget; a send to a stopped
/// engine is silently dropped, matching the engine's best-effort contract.
#[derive(Clone)]
pub struct CartSyncHandle {
    events: mpsc::UnboundedSender<Event>,
}

impl CartSyncHandle {
    /// The session became authenticated; hydrate the cart from remote.
    pub fn session_started(&self, user_id: UserId) {
        let _ = self.events.send(Event::SessionStarted(user_id));
    }

    /// The session ended; stop syncing and forget the baseline.
    pub fn session_ended(&self) {
        let _ = self.events.send(Event::SessionEnded);
    }

    /// The local cart changed; schedule a debounced remote write.
    pub fn cart_changed(&self, items: Vec<CartItem>) {
        let _ = self.events.send(Event::CartChanged(items));
    }

    /// Feed a session transition straight from a [`SessionIdentity`].
    pub fn session_changed(&self, identity: &SessionIdentity) {
        match identity.user_id() {
            Some(user_id) => self.session_started(user_id.clone()),
            None => self.session_ended(),
        }
    }
}

/// Cart synchronization engine.
///
/// Spawn one per cart store with [`CartSyncEngine::spawn`]; interact with
/// it through the returned [`CartSyncHandle`] and hydration receiver. The
/// engine stops when every handle has been dropped.
pub struct CartSyncEngine<B> {
    backend: Arc<B>,
    events: mpsc::UnboundedReceiver<Event>,
    tasks_tx: mpsc::UnboundedSender<TaskResult>,
    tasks_rx: mpsc::UnboundedReceiver<TaskResult>,
    hydrations: watch::Sender<Vec<CartItem>>,
    debounce: Duration,

    /// Signed-in user, if any. `None` disables all network I/O.
    session: Option<UserId>,
    /// A hydrating fetch is in flight; cart changes are ignored meanwhile.
    is_fetching: bool,
    /// Bumped on every session transition; stale fetch and write
    /// completions from a previous session are discarded by comparison.
    generation: u64,
    /// Fingerprint believed to match the remote cart.
    baseline: Option<CartSnapshot>,
    /// The debounced write currently waiting out its quiet period.
    pending: Option<PendingWrite>,
    /// Dispatch sequence for writes; later dispatches win baseline updates.
    next_dispatch: u64,
    applied_dispatch: u64,
}

impl<B> CartSyncEngine<B>
where
    B: CartBackend + Send + Sync + 'static,
{
    /// Spawn an engine over the given backend.
    ///
    /// Returns the event handle and a watch receiver that yields the cart
    /// whenever a sign-in hydration replaces local state. The receiver's
    /// initial value is an empty cart.
    #[must_use]
    pub fn spawn(backend: B, debounce: Duration) -> (CartSyncHandle, watch::Receiver<Vec<CartItem>>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (tasks_tx, tasks_rx) = mpsc::unbounded_channel();
        let (hydrations, hydration_rx) = watch::channel(Vec::new());

        let engine = Self {
            backend: Arc::new(backend),
            events: events_rx,
            tasks_tx,
            tasks_rx,
            hydrations,
            debounce,
            session: None,
            is_fetching: false,
            generation: 0,
            baseline: None,
            pending: None,
            next_dispatch: 0,
            applied_dispatch: 0,
        };
        tokio::spawn(engine.run());

        (CartSyncHandle { events: events_tx }, hydration_rx)
    }

    /// Event loop. Exits when all handles are dropped.
    async fn run(mut self) {
        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                Some(done) = self.tasks_rx.recv() => self.handle_task_result(done),
                () = deadline_elapsed(self.pending.as_ref().map(|p| p.deadline)) => {
                    self.dispatch_write();
                }
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::SessionStarted(user_id) => self.on_session_started(user_id),
            Event::SessionEnded => self.on_session_ended(),
            Event::CartChanged(items) => self.on_cart_changed(items),
        }
    }

    /// Sign-in: hydrate from remote, suppressing writes until it resolves.
    fn on_session_started(&mut self, user_id: UserId) {
        self.pending = None;
        self.baseline = None;
        self.generation += 1;
        self.is_fetching = true;
        self.session = Some(user_id);

        let backend = Arc::clone(&self.backend);
        let tasks = self.tasks_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = backend.fetch_cart().await;
            let _ = tasks.send(TaskResult::FetchDone { generation, result });
        });
    }

    /// Sign-out: forget the baseline and cancel the armed write. No flush.
    fn on_session_ended(&mut self) {
        self.session = None;
        self.is_fetching = false;
        self.baseline = None;
        self.pending = None;
        self.generation += 1;
    }

    /// Local mutation: schedule a debounced write unless nothing changed.
    fn on_cart_changed(&mut self, items: Vec<CartItem>) {
        if self.session.is_none() || self.is_fetching {
            return;
        }

        let snapshot = CartSnapshot::of(&items);
        if self.baseline.as_ref() == Some(&snapshot) {
            return;
        }

        // Re-arming replaces any earlier pending write: only the last
        // mutation inside a quiet window is ever sent.
        self.pending = Some(PendingWrite {
            deadline: Instant::now() + self.debounce,
            items,
            snapshot,
        });
    }

    /// Quiet period elapsed: send the pending cart to the backend.
    fn dispatch_write(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        self.next_dispatch += 1;
        let dispatch = self.next_dispatch;
        let generation = self.generation;
        let backend = Arc::clone(&self.backend);
        let tasks = self.tasks_tx.clone();
        tokio::spawn(async move {
            let result = backend.sync_cart(&pending.items).await;
            let _ = tasks.send(TaskResult::WriteDone {
                generation,
                dispatch,
                snapshot: pending.snapshot,
                result,
            });
        });
    }

    fn handle_task_result(&mut self, done: TaskResult) {
        match done {
            TaskResult::FetchDone { generation, result } => {
                if generation != self.generation {
                    // Session changed while the fetch was in flight.
                    return;
                }
                self.is_fetching = false;
                match result {
                    Ok(items) => {
                        self.baseline = Some(CartSnapshot::of(&items));
                        self.hydrations.send_replace(items);
                    }
                    Err(error) => {
                        // No baseline is recorded, so the next local
                        // mutation will attempt to write the then-current
                        // state. No automatic retry.
                        tracing::error!(%error, "Error loading cart from backend");
                    }
                }
            }
            TaskResult::WriteDone {
                generation,
                dispatch,
                snapshot,
                result,
            } => {
                if generation != self.generation {
                    return;
                }
                match result {
                    Ok(()) => {
                        if dispatch > self.applied_dispatch {
                            self.applied_dispatch = dispatch;
                            self.baseline = Some(snapshot);
                        }
                    }
                    Err(error) => {
                        // Baseline unchanged: an identical mutation later
                        // will still attempt a write.
                        tracing::error!(%error, "Error syncing cart to backend");
                    }
                }
            }
        }
    }
}

/// Resolve when the debounce deadline passes; never resolve without one.
async fn deadline_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

//! Single source of truth for the controller snapshot.

use crate::CancellationToken;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use log::debug;
use pd_core::ControllerState;
use tokio::sync::watch;

/// Holds the current [`ControllerState`] and publishes every replacement.
///
/// All writes go through the watch channel's write lock, so readers only
/// ever see whole snapshots. `loading` is owned by the store: it is derived
/// from the number of operations in flight on every write.
pub struct SessionStore {
    tx: watch::Sender<ControllerState>,
    in_flight: AtomicUsize,
    generation: AtomicU64,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ControllerState::initial());
        Self {
            tx,
            in_flight: AtomicUsize::new(0),
            generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> ControllerState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.tx.subscribe()
    }

    /// Operations currently between `begin` and `finish`.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Number of operations settled so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Replace the whole snapshot. Returns false if the write was discarded
    /// because the token is cancelled.
    pub fn commit(&self, token: &CancellationToken, next: ControllerState) -> bool {
        self.modify(token, move |state| *state = next)
    }

    /// Replace the whole snapshot unless an operation settled after
    /// `generation` was read. Returns false if the write was discarded.
    pub fn commit_since(
        &self,
        token: &CancellationToken,
        generation: u64,
        next: ControllerState,
    ) -> bool {
        let mut superseded = false;
        let committed = self.write(token, |state| {
            if self.generation() != generation {
                superseded = true;
                return false;
            }
            *state = next;
            true
        });

        if superseded {
            debug!("Discarded session change superseded by a settled operation");
        }
        committed && !superseded
    }

    /// Atomic read-modify-write. Subscribers are only notified when the
    /// snapshot actually changed.
    pub fn modify(&self, token: &CancellationToken, f: impl FnOnce(&mut ControllerState)) -> bool {
        self.write(token, |state| {
            f(state);
            true
        })
    }

    /// `f` returns false to leave the snapshot untouched.
    fn write(
        &self,
        token: &CancellationToken,
        f: impl FnOnce(&mut ControllerState) -> bool,
    ) -> bool {
        let mut committed = false;
        self.tx.send_if_modified(|state| {
            if token.is_cancelled() {
                return false;
            }
            committed = true;

            let before = state.clone();
            if !f(state) {
                return false;
            }
            state.loading = self.in_flight.load(Ordering::SeqCst) > 0;
            *state != before
        });

        if !committed {
            debug!("Discarded session store write after teardown");
        }
        committed
    }

    /// Mark an operation as started: `loading=true, error=None`.
    pub fn begin(self: &Arc<Self>, token: &CancellationToken) -> InFlight {
        self.tx.send_if_modified(|state| {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            if token.is_cancelled() {
                return false;
            }
            let changed = !state.loading || state.error.is_some();
            state.loading = true;
            state.error = None;
            changed
        });

        InFlight {
            store: Arc::clone(self),
            token: token.clone(),
            finished: false,
        }
    }

    fn settle(&self, token: &CancellationToken, f: impl FnOnce(&mut ControllerState)) -> bool {
        let mut committed = false;
        self.tx.send_if_modified(|state| {
            let remaining = self
                .in_flight
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                    Some(n.saturating_sub(1))
                })
                .map(|previous| previous.saturating_sub(1))
                .unwrap_or(0);
            self.generation.fetch_add(1, Ordering::SeqCst);

            if token.is_cancelled() {
                return false;
            }
            committed = true;

            let before = state.clone();
            f(state);
            state.loading = remaining > 0;
            *state != before
        });

        if !committed {
            debug!("Discarded settled operation result after teardown");
        }
        committed
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// One in-flight operation. Settling it (or dropping it unfinished) releases
/// its slot and recomputes `loading` in the same write.
pub struct InFlight {
    store: Arc<SessionStore>,
    token: CancellationToken,
    finished: bool,
}

impl InFlight {
    /// Apply the operation's final write.
    pub fn finish(mut self, f: impl FnOnce(&mut ControllerState)) -> bool {
        self.finished = true;
        self.store.settle(&self.token, f)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.finished {
            self.store.settle(&self.token, |_| {});
        }
    }
}

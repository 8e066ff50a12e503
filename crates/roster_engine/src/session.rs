use std::sync::Arc;

use roster_core::{StateStore, User};
use tokio::sync::watch;

use crate::coordinator::FetchHandle;
use crate::transport::UserTransport;

/// Presentation-facing façade: one fetch pipeline folded into one state
/// store.
///
/// The owner calls [`pump`](Session::pump) from its event loop, so every
/// `apply` happens on that one consumer thread and outcomes are folded in
/// arrival order. When refreshes overlap, whichever terminal outcome
/// arrives last determines the final state.
pub struct Session {
    handle: FetchHandle,
    store: StateStore,
}

impl Session {
    pub fn new(transport: Arc<dyn UserTransport>) -> Self {
        Self {
            handle: FetchHandle::new(transport),
            store: StateStore::new(),
        }
    }

    /// Starts a new fetch. Safe to call while one is still in flight; the
    /// stale fetch is not cancelled and its outcome is folded on arrival.
    pub fn refresh(&self) {
        self.handle.refresh();
    }

    /// Drains pending fetch events into the store. Returns the number of
    /// outcomes applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.handle.try_recv() {
            self.store.apply(event.outcome);
            applied += 1;
        }
        applied
    }

    /// Current and future item lists, replay-latest.
    pub fn items(&self) -> watch::Receiver<Vec<User>> {
        self.store.items()
    }

    /// Current and future error text, replay-latest.
    pub fn error_message(&self) -> watch::Receiver<Option<String>> {
        self.store.error_message()
    }

    /// Current and future loading flag, replay-latest.
    pub fn is_loading(&self) -> watch::Receiver<bool> {
        self.store.is_loading()
    }
}

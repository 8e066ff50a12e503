use tokio::sync::watch;

use crate::{Outcome, User, DEFAULT_ERROR_MESSAGE};

/// Latest materialized view state, derived from the most recent outcome
/// applied.
///
/// Each field lives in its own `watch` channel so a consumer can observe
/// items, error text, and the loading flag independently. A newly attached
/// receiver sees the current value immediately (replay-latest); a value is
/// published only when it differs from the previous one.
pub struct StateStore {
    items: watch::Sender<Vec<User>>,
    error_message: watch::Sender<Option<String>>,
    is_loading: watch::Sender<bool>,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            items: watch::channel(Vec::new()).0,
            error_message: watch::channel(None).0,
            is_loading: watch::channel(false).0,
        }
    }

    /// Folds one outcome into the materialized state.
    ///
    /// Total over the outcome union; never fails. Takes `&mut self` so
    /// applications cannot interleave: all callers funnel through the one
    /// consumer context that owns the store.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Loading => {
                // Items are left untouched: they may still hold the previous
                // fetch's data while the new one is in flight.
                set_if_changed(&self.is_loading, true);
                set_if_changed(&self.error_message, None);
            }
            Outcome::Success(users) => {
                set_if_changed(&self.is_loading, false);
                set_if_changed(&self.error_message, None);
                set_if_changed(&self.items, users);
            }
            Outcome::Error { message, .. } => {
                let message = if message.is_empty() {
                    DEFAULT_ERROR_MESSAGE.to_owned()
                } else {
                    message
                };
                set_if_changed(&self.is_loading, false);
                set_if_changed(&self.error_message, Some(message));
                // An error clears stale data rather than silently keeping
                // the previous list on screen.
                set_if_changed(&self.items, Vec::new());
            }
        }
    }

    /// Current and future item lists.
    pub fn items(&self) -> watch::Receiver<Vec<User>> {
        self.items.subscribe()
    }

    /// Current and future error text; `None` while no error is showing.
    pub fn error_message(&self) -> watch::Receiver<Option<String>> {
        self.error_message.subscribe()
    }

    /// Current and future loading flag.
    pub fn is_loading(&self) -> watch::Receiver<bool> {
        self.is_loading.subscribe()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

fn set_if_changed<T: PartialEq>(tx: &watch::Sender<T>, value: T) {
    tx.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}

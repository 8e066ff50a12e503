use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use roster_core::{Outcome, User, EMPTY_RESULT_MESSAGE};
use roster_logging::{roster_debug, roster_warn};

use crate::transport::UserTransport;
use crate::types::{FetchEvent, FetchId, TransportError};

enum FetchCommand {
    Fetch { fetch_id: FetchId },
}

/// Runs fetches off the consumer thread and hands their outcomes back
/// through a channel the consumer drains at its own pace.
///
/// Within one fetch the Loading event is on the channel before the network
/// task even starts, so it is always observed before the terminal outcome.
/// Across overlapping fetches no order is enforced; the consumer folds
/// events in arrival order.
pub struct FetchHandle {
    cmd_tx: mpsc::Sender<FetchCommand>,
    event_rx: mpsc::Receiver<FetchEvent>,
    next_fetch_id: AtomicU64,
}

impl FetchHandle {
    pub fn new(transport: Arc<dyn UserTransport>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<FetchEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(FetchCommand::Fetch { fetch_id }) = cmd_rx.recv() {
                let _ = event_tx.send(FetchEvent {
                    fetch_id,
                    outcome: Outcome::Loading,
                });
                let transport = transport.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    roster_debug!("fetch {fetch_id} started");
                    let outcome = fold_transport_result(transport.get_users().await);
                    if let Outcome::Error { message, .. } = &outcome {
                        roster_warn!("fetch {fetch_id} failed: {message}");
                    }
                    let _ = event_tx.send(FetchEvent { fetch_id, outcome });
                });
            }
        });

        Self {
            cmd_tx,
            event_rx,
            next_fetch_id: AtomicU64::new(1),
        }
    }

    /// Starts one fetch attempt and returns its id. Does not cancel
    /// attempts already in flight; their outcomes still arrive.
    pub fn refresh(&self) -> FetchId {
        let fetch_id = self.next_fetch_id.fetch_add(1, Ordering::Relaxed);
        let _ = self.cmd_tx.send(FetchCommand::Fetch { fetch_id });
        fetch_id
    }

    pub fn try_recv(&self) -> Option<FetchEvent> {
        self.event_rx.try_recv().ok()
    }
}

/// Converts one transport result into the terminal outcome for a fetch.
///
/// An empty payload is surfaced as an error so the view shows an explicit
/// empty state instead of a silently blank list. Transport failures become
/// error outcomes carrying the message and failure kind; nothing escapes
/// this boundary as a panic or `Err`.
pub fn fold_transport_result(result: Result<Vec<User>, TransportError>) -> Outcome {
    match result {
        Ok(users) if users.is_empty() => Outcome::error(EMPTY_RESULT_MESSAGE),
        Ok(users) => Outcome::Success(users),
        Err(TransportError { kind, message }) => Outcome::error_with_cause(message, kind),
    }
}

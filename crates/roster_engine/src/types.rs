use roster_core::{FailureKind, Outcome};
use thiserror::Error;

/// Monotonically increasing id for one fetch attempt, used to correlate a
/// Loading event with its terminal outcome in logs and tests.
pub type FetchId = u64;

/// Transport-level failure, before conversion into an error outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// One event published by the fetch coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchEvent {
    pub fetch_id: FetchId,
    pub outcome: Outcome,
}

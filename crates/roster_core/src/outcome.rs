use thiserror::Error;

use crate::User;

/// Message used when a fetch succeeds but returns zero users.
pub const EMPTY_RESULT_MESSAGE: &str = "No users found";

/// Fallback shown when an error outcome carries no message text.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// The state of one fetch attempt.
///
/// Each attempt produces exactly one `Loading` followed by exactly one
/// terminal variant, after which the value is folded into the
/// [`StateStore`](crate::StateStore) and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Loading,
    Success(Vec<User>),
    Error {
        message: String,
        cause: Option<FailureKind>,
    },
}

impl Outcome {
    pub fn error(message: impl Into<String>) -> Self {
        Outcome::Error {
            message: message.into(),
            cause: None,
        }
    }

    pub fn error_with_cause(message: impl Into<String>, cause: FailureKind) -> Self {
        Outcome::Error {
            message: message.into(),
            cause: Some(cause),
        }
    }

    /// True for `Success` and `Error`; false for `Loading`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Loading)
    }
}

/// Transport failure taxonomy, kept as plain data so outcomes stay
/// comparable and never carry a live error object across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("invalid url")]
    InvalidUrl,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("malformed response body")]
    Decode,
    #[error("network error")]
    Network,
}

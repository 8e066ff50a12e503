//! Roster core: fetch outcome model, materialized state, and list
//! reconciliation.
mod diff;
mod outcome;
mod record;
mod store;

pub use diff::{apply_edits, diff, EditOp};
pub use outcome::{FailureKind, Outcome, DEFAULT_ERROR_MESSAGE, EMPTY_RESULT_MESSAGE};
pub use record::User;
pub use store::StateStore;

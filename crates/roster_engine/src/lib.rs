//! Roster engine: HTTP transport and the asynchronous fetch pipeline.
mod coordinator;
mod session;
mod transport;
mod types;

pub use coordinator::{fold_transport_result, FetchHandle};
pub use session::Session;
pub use transport::{ReqwestTransport, TransportSettings, UserTransport};
pub use types::{FetchEvent, FetchId, TransportError};

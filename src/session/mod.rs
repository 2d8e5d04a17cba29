//! Cancellable request lifecycles for catalog access.
//!
//! The session layer turns query changes and selections into at-most-one
//! in-flight request per logical channel, reporting outcomes back to the
//! event loop over a message channel.
//!
//! # Modules
//!
//! - `messages`: outcome protocol between fetch tasks and the event loop
//! - `request`: single-outstanding-request slot with abort-on-supersession
//! - `search`: the search session owning both request channels

pub mod messages;
pub mod request;
pub mod search;

pub use messages::SessionOutcome;
pub use request::RequestSlot;
pub use search::{SearchSession, SessionConfig};

//! Outcome protocol between fetch tasks and the event loop.
//!
//! Every spawned request task reports exactly one terminal outcome over the
//! session's channel — unless it was aborted, in which case it reports
//! nothing at all. That silence is what keeps superseded requests from ever
//! touching shared state.

use crate::domain::{MovieDetails, MovieSummary};

/// Messages emitted by [`SearchSession`](crate::session::SearchSession) tasks.
///
/// `*Started` variants mark entry into the loading state for their channel;
/// the remaining variants are terminal and clear it. Cancellation has no
/// variant by design: an aborted request is not a user-visible event.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// A search request was issued for the current query.
    SearchStarted,

    /// The search completed and produced a fresh result set.
    SearchSucceeded {
        /// Summary records replacing the previous result set wholesale.
        movies: Vec<MovieSummary>,
    },

    /// The search failed, either at the transport or reported by the source.
    SearchFailed {
        /// User-facing message (generic for transport, verbatim for
        /// source-reported failures).
        message: String,
    },

    /// The query dropped below the minimum length; results were discarded
    /// and any in-flight request cancelled without issuing a new one.
    SearchCleared,

    /// A detail request was issued for the selected identifier.
    DetailStarted,

    /// The detail fetch completed for the selected movie.
    DetailLoaded {
        /// The full record for the selection that triggered the fetch.
        details: MovieDetails,
    },

    /// The detail fetch failed.
    DetailFailed {
        /// User-facing message.
        message: String,
    },
}

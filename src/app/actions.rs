//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event.
//! Actions bridge pure state transformations and effectful operations:
//! issuing catalog requests through the search session and updating the
//! window title. The runtime executes them in sequence.

/// Commands emitted by the event handler for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Drives the search session with the new query.
    ///
    /// The session applies the minimum-length threshold and the
    /// supersession rule; the handler emits this unconditionally on a
    /// changed query.
    Search {
        /// The query as entered.
        query: String,
    },

    /// Starts a detail fetch for the selected movie.
    Lookup {
        /// Catalog identifier of the selection.
        id: String,
    },

    /// Cancels the in-flight detail fetch, if any.
    ///
    /// Emitted whenever the selection is dismissed so a late-arriving
    /// response cannot touch state.
    CancelLookup,

    /// Sets the window title while a movie is selected.
    SetWindowTitle {
        /// Full title text.
        title: String,
    },

    /// Restores the application's default window title.
    ResetWindowTitle,
}

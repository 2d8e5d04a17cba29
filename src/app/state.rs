//! Application state container.
//!
//! [`AppState`] is the single source of truth for all transient state: the
//! current query, the search result set, the selection and its detail
//! record, per-channel loading flags and error slots, the draft rating, and
//! the in-memory view of the watched list. It is mutated only by the event
//! handler; the durable copy of the watched list is owned by the storage
//! backend and kept in lockstep by the handler.

use crate::domain::{MovieDetails, MovieSummary, WatchedEntry};
use crate::storage::{summarize, WatchedStats};

/// Central application state container.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Current free-text query as the user typed it.
    pub query: String,

    /// Current search result set; replaced wholesale on each successful
    /// search, emptied on failure or query clear.
    pub movies: Vec<MovieSummary>,

    /// Result count of the last successful search, `None` before the first.
    pub num_results: Option<usize>,

    /// In-memory watched list, mirroring the storage backend.
    pub watched: Vec<WatchedEntry>,

    /// Whether a search request is outstanding.
    pub is_loading: bool,

    /// Current search error, replacing any previous one; cleared on a new
    /// request and on query clear. Cancellation never populates this.
    pub error: Option<String>,

    /// Identifier of the selected movie, if any.
    pub selected_id: Option<String>,

    /// Detail record for the current selection, once loaded.
    pub detail: Option<MovieDetails>,

    /// Whether a detail request is outstanding.
    pub detail_loading: bool,

    /// Current detail-fetch error.
    pub detail_error: Option<String>,

    /// Rating chosen but not yet submitted, 0 when none is chosen.
    pub draft_rating: u8,
}

impl AppState {
    /// Creates application state seeded with the persisted watched list.
    #[must_use]
    pub fn new(watched: Vec<WatchedEntry>) -> Self {
        Self {
            watched,
            ..Self::default()
        }
    }

    /// Whether the given movie is already on the watched list.
    #[must_use]
    pub fn is_watched(&self, id: &str) -> bool {
        self.watched.iter().any(|e| e.imdb_id == id)
    }

    /// The previously stored user rating for a movie, if it is watched.
    ///
    /// Displayed in place of the rating input for already-watched movies.
    #[must_use]
    pub fn watched_rating(&self, id: &str) -> Option<u8> {
        self.watched
            .iter()
            .find(|e| e.imdb_id == id)
            .map(|e| e.user_rating)
    }

    /// Whether a rating submission is currently permitted.
    ///
    /// Requires a loaded detail record, a draft rating strictly greater
    /// than 0, and the movie not already being watched.
    #[must_use]
    pub fn can_submit_rating(&self) -> bool {
        self.draft_rating > 0
            && self
                .detail
                .as_ref()
                .is_some_and(|d| !self.is_watched(&d.imdb_id))
    }

    /// Aggregate statistics over the watched list.
    #[must_use]
    pub fn stats(&self) -> WatchedStats {
        summarize(&self.watched)
    }

    /// Clears the selection and everything scoped to it.
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
        self.detail = None;
        self.detail_loading = false;
        self.detail_error = None;
        self.draft_rating = 0;
    }
}

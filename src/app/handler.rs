//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input and
//! session outcomes, translating them into state changes, storage mutations,
//! and action sequences. It is the primary control flow coordinator.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the runtime or the search session
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur on `AppState`; watched-list mutations go through
//!    the storage backend first, so the durable copy always reflects memory
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Input**: `QueryChanged`, `SelectMovie`, `Back`, `Escape`
//! - **Rating**: `RateDraft`, `SubmitRating`, `DeleteWatched`
//! - **Session**: `Session` wrapping a [`SessionOutcome`]

use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::WatchedEntry;
use crate::session::SessionOutcome;
use crate::storage::Storage;

/// Default window title, restored whenever no movie is selected.
pub const DEFAULT_TITLE: &str = "RateMovie";

/// Events triggered by user input or session outcomes.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The search query text changed.
    QueryChanged(String),

    /// A search result was selected by identifier.
    SelectMovie(String),

    /// Explicit back action: dismiss the current selection.
    Back,

    /// Escape key: equivalent to [`Event::Back`] while a movie is selected,
    /// otherwise ignored.
    Escape,

    /// A rating was chosen (but not yet submitted) on the 1-10 scale.
    RateDraft(u8),

    /// Submit the draft rating for the selected movie.
    SubmitRating,

    /// Remove a movie from the watched list by identifier.
    DeleteWatched(String),

    /// An outcome arrived from the search session.
    Session(SessionOutcome),
}

/// Processes an event, mutates state and storage, and returns actions.
///
/// Returns `(render, actions)`: whether the display should refresh, and the
/// side effects for the runtime to execute in order.
///
/// # Errors
///
/// Returns errors from storage mutations; session and catalog failures
/// arrive as [`SessionOutcome`] variants and are absorbed into state instead.
#[allow(clippy::too_many_lines)]
pub fn handle_event(
    state: &mut AppState,
    storage: &mut dyn Storage,
    event: &Event,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::QueryChanged(query) => {
            if *query == state.query {
                tracing::trace!("query unchanged, skipping");
                return Ok((false, vec![]));
            }

            state.query.clone_from(query);
            Ok((
                true,
                vec![Action::Search {
                    query: query.clone(),
                }],
            ))
        }
        Event::SelectMovie(id) => {
            tracing::debug!(imdb_id = %id, "movie selected");

            state.error = None;
            state.clear_selection();
            state.selected_id = Some(id.clone());

            Ok((true, vec![Action::Lookup { id: id.clone() }]))
        }
        Event::Back => Ok(dismiss_selection(state)),
        Event::Escape => {
            if state.selected_id.is_none() {
                return Ok((false, vec![]));
            }
            Ok(dismiss_selection(state))
        }
        Event::RateDraft(rating) => {
            if !(1..=10).contains(rating) {
                tracing::debug!(rating = rating, "rating outside 1-10, ignoring");
                return Ok((false, vec![]));
            }

            state.draft_rating = *rating;
            Ok((true, vec![]))
        }
        Event::SubmitRating => {
            if !state.can_submit_rating() {
                tracing::debug!("rating submission not permitted");
                return Ok((false, vec![]));
            }

            // can_submit_rating guarantees the detail record is present.
            let Some(details) = state.detail.as_ref() else {
                return Ok((false, vec![]));
            };

            let entry = WatchedEntry::from_details(details, state.draft_rating);
            tracing::debug!(
                imdb_id = %entry.imdb_id,
                user_rating = entry.user_rating,
                "adding watched entry"
            );

            storage.add_entry(&entry)?;
            state.watched.push(entry);

            let (_, actions) = dismiss_selection(state);
            Ok((true, actions))
        }
        Event::DeleteWatched(id) => {
            tracing::debug!(imdb_id = %id, "removing watched entry");

            storage.remove_entry(id)?;
            state.watched.retain(|e| e.imdb_id != *id);

            Ok((true, vec![]))
        }
        Event::Session(outcome) => handle_session_outcome(state, outcome),
    }
}

/// Clears the selection and returns the teardown actions.
fn dismiss_selection(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.selected_id.is_none() {
        return (false, vec![]);
    }

    tracing::debug!("dismissing selection");
    state.clear_selection();
    (true, vec![Action::CancelLookup, Action::ResetWindowTitle])
}

/// Applies a session outcome to state.
fn handle_session_outcome(
    state: &mut AppState,
    outcome: &SessionOutcome,
) -> Result<(bool, Vec<Action>)> {
    match outcome {
        SessionOutcome::SearchStarted => {
            state.is_loading = true;
            state.error = None;
            Ok((true, vec![]))
        }
        SessionOutcome::SearchSucceeded { movies } => {
            tracing::debug!(count = movies.len(), "search results arrived");

            state.is_loading = false;
            state.error = None;
            state.movies.clone_from(movies);
            state.num_results = Some(movies.len());

            // New results dismiss any open selection.
            let (_, actions) = dismiss_selection(state);
            Ok((true, actions))
        }
        SessionOutcome::SearchFailed { message } => {
            tracing::debug!(error = %message, "search failed");

            state.is_loading = false;
            state.error = Some(message.clone());
            state.movies.clear();
            state.num_results = None;
            Ok((true, vec![]))
        }
        SessionOutcome::SearchCleared => {
            state.is_loading = false;
            state.error = None;
            state.movies.clear();
            state.num_results = None;

            let (_, actions) = dismiss_selection(state);
            Ok((true, actions))
        }
        SessionOutcome::DetailStarted => {
            state.detail_loading = true;
            state.detail_error = None;
            Ok((true, vec![]))
        }
        SessionOutcome::DetailLoaded { details } => {
            state.detail_loading = false;

            // A late response for a dismissed or replaced selection must
            // not touch state.
            if state.selected_id.as_deref() != Some(details.imdb_id.as_str()) {
                tracing::debug!(
                    imdb_id = %details.imdb_id,
                    "stale detail response, discarding"
                );
                return Ok((false, vec![]));
            }

            let title = format!("Movie: {}", details.title);
            state.detail = Some(details.clone());
            Ok((true, vec![Action::SetWindowTitle { title }]))
        }
        SessionOutcome::DetailFailed { message } => {
            tracing::debug!(error = %message, "detail fetch failed");

            state.detail_loading = false;
            if state.selected_id.is_some() {
                state.detail_error = Some(message.clone());
            }
            Ok((true, vec![]))
        }
    }
}

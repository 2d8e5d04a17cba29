//! Cancellable search and detail request lifecycles.
//!
//! [`SearchSession`] owns the two logical request channels of the
//! application: the query-driven search and the selection-driven detail
//! fetch. Each channel follows the same state machine — idle → loading →
//! {success | error | cancelled} → idle — with at most one request in flight,
//! enforced by [`RequestSlot`]. Outcomes are reported to the event loop over
//! an unbounded channel; an aborted request reports nothing, so a stale
//! response can never overwrite state once a newer request has begun.
//!
//! Tasks run on the current thread via `spawn_local`: scheduling is
//! cooperative, and the only suspension points are the debounce sleep and the
//! catalog await itself.

use crate::catalog::Catalog;
use crate::session::messages::SessionOutcome;
use crate::session::request::RequestSlot;
use futures_util::future::{Abortable, Aborted};
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Tunables for the search request lifecycle.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Minimum trimmed query length before a search is issued.
    pub min_query_len: usize,

    /// Delay between a query change and the network request. Superseded
    /// keystrokes are aborted during this window and never reach the network.
    pub debounce: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_query_len: 1,
            debounce: Duration::from_millis(300),
        }
    }
}

/// Owns the current query's search lifecycle and the selection's detail
/// lifecycle.
///
/// Generic over [`Catalog`] so tests can drive the full request state machine
/// with in-memory fakes. Methods must be called from within a
/// [`LocalSet`](tokio::task::LocalSet) context.
pub struct SearchSession<C> {
    catalog: Rc<C>,
    config: SessionConfig,
    search_slot: RequestSlot,
    detail_slot: RequestSlot,
    outcomes: UnboundedSender<SessionOutcome>,
}

impl<C: Catalog + 'static> SearchSession<C> {
    /// Creates a session reporting outcomes to the given channel.
    pub fn new(
        catalog: Rc<C>,
        config: SessionConfig,
        outcomes: UnboundedSender<SessionOutcome>,
    ) -> Self {
        Self {
            catalog,
            config,
            search_slot: RequestSlot::new(),
            detail_slot: RequestSlot::new(),
            outcomes,
        }
    }

    /// Reacts to a query change.
    ///
    /// A trimmed query below the minimum length cancels everything in flight
    /// and clears the result set without issuing a request. Otherwise the
    /// previous search is superseded and exactly one new request is spawned.
    pub fn set_query(&mut self, query: &str) {
        let trimmed = query.trim();

        if trimmed.chars().count() < self.config.min_query_len {
            tracing::debug!(query = %query, "query below threshold, clearing results");
            self.search_slot.cancel();
            self.detail_slot.cancel();
            let _ = self.outcomes.send(SessionOutcome::SearchCleared);
            return;
        }

        let registration = self.search_slot.begin();
        let _ = self.outcomes.send(SessionOutcome::SearchStarted);

        let catalog = Rc::clone(&self.catalog);
        let outcomes = self.outcomes.clone();
        let debounce = self.config.debounce;
        let query = trimmed.to_string();

        tokio::task::spawn_local(async move {
            let request = Abortable::new(
                async move {
                    if !debounce.is_zero() {
                        tokio::time::sleep(debounce).await;
                    }
                    catalog.search(&query).await
                },
                registration,
            );

            // Terminal step runs on every path except abort, which must
            // leave shared state untouched.
            match request.await {
                Ok(Ok(movies)) => {
                    let _ = outcomes.send(SessionOutcome::SearchSucceeded { movies });
                }
                Ok(Err(err)) => {
                    let _ = outcomes.send(SessionOutcome::SearchFailed {
                        message: err.to_string(),
                    });
                }
                Err(Aborted) => {
                    tracing::debug!("search superseded, discarding result");
                }
            }
        });
    }

    /// Starts a detail fetch for the selected identifier.
    ///
    /// Runs on its own channel with the same single-outstanding-request
    /// discipline as search; selecting a different movie supersedes the
    /// previous fetch.
    pub fn select(&mut self, id: &str) {
        let registration = self.detail_slot.begin();
        let _ = self.outcomes.send(SessionOutcome::DetailStarted);

        let catalog = Rc::clone(&self.catalog);
        let outcomes = self.outcomes.clone();
        let id = id.to_string();

        tokio::task::spawn_local(async move {
            let request = Abortable::new(
                async move { catalog.lookup(&id).await },
                registration,
            );

            match request.await {
                Ok(Ok(details)) => {
                    let _ = outcomes.send(SessionOutcome::DetailLoaded { details });
                }
                Ok(Err(err)) => {
                    let _ = outcomes.send(SessionOutcome::DetailFailed {
                        message: err.to_string(),
                    });
                }
                Err(Aborted) => {
                    tracing::debug!("detail fetch cancelled, discarding result");
                }
            }
        });
    }

    /// Discards the in-flight detail fetch, if any.
    ///
    /// Invoked when the selection is dismissed; cancellation is silent, so no
    /// outcome is emitted.
    pub fn cancel_selection(&mut self) {
        self.detail_slot.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{RateMovieError, Result};
    use crate::domain::{MovieDetails, MovieSummary};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
    use tokio::sync::oneshot;
    use tokio::task::LocalSet;

    fn summary(title: &str) -> MovieSummary {
        MovieSummary {
            imdb_id: format!("tt-{title}"),
            title: title.to_string(),
            year: "1977".to_string(),
            poster: "u".to_string(),
        }
    }

    fn details(id: &str) -> MovieDetails {
        MovieDetails {
            imdb_id: id.to_string(),
            title: "A".to_string(),
            year: "1977".to_string(),
            poster: "u".to_string(),
            runtime: "121 min".to_string(),
            imdb_rating: "8.6".to_string(),
            plot: String::new(),
            released: String::new(),
            actors: String::new(),
            director: String::new(),
            genre: String::new(),
        }
    }

    /// Catalog that records calls and answers immediately.
    #[derive(Default)]
    struct CountingCatalog {
        searches: RefCell<Vec<String>>,
    }

    impl Catalog for CountingCatalog {
        async fn search(&self, query: &str) -> Result<Vec<MovieSummary>> {
            self.searches.borrow_mut().push(query.to_string());
            Ok(vec![summary(query)])
        }

        async fn lookup(&self, id: &str) -> Result<MovieDetails> {
            Ok(details(id))
        }
    }

    /// Catalog that always reports a logical not-found.
    struct NotFoundCatalog;

    impl Catalog for NotFoundCatalog {
        async fn search(&self, _query: &str) -> Result<Vec<MovieSummary>> {
            Err(RateMovieError::NotFound("Movie not found!".to_string()))
        }

        async fn lookup(&self, _id: &str) -> Result<MovieDetails> {
            Err(RateMovieError::NotFound("Movie not found!".to_string()))
        }
    }

    /// Catalog whose requests block until the test releases a gate, so
    /// supersession can be exercised deterministically.
    #[derive(Default)]
    struct GatedCatalog {
        gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
    }

    impl GatedCatalog {
        fn add_gate(&self) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().push_back(rx);
            tx
        }
    }

    impl Catalog for GatedCatalog {
        async fn search(&self, query: &str) -> Result<Vec<MovieSummary>> {
            let gate = self.gates.borrow_mut().pop_front().expect("missing gate");
            let _ = gate.await;
            Ok(vec![summary(query)])
        }

        async fn lookup(&self, id: &str) -> Result<MovieDetails> {
            let gate = self.gates.borrow_mut().pop_front().expect("missing gate");
            let _ = gate.await;
            Ok(details(id))
        }
    }

    fn immediate_config() -> SessionConfig {
        SessionConfig {
            min_query_len: 1,
            debounce: Duration::ZERO,
        }
    }

    fn session<C: Catalog + 'static>(
        catalog: C,
        config: SessionConfig,
    ) -> (SearchSession<C>, UnboundedReceiver<SessionOutcome>) {
        let (tx, rx) = unbounded_channel();
        (SearchSession::new(Rc::new(catalog), config, tx), rx)
    }

    #[tokio::test]
    async fn sub_threshold_query_clears_without_network_call() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let catalog = Rc::new(CountingCatalog::default());
                let (tx, mut rx) = unbounded_channel();
                let mut session =
                    SearchSession::new(Rc::clone(&catalog), immediate_config(), tx);

                session.set_query("");
                session.set_query("   ");

                assert_eq!(rx.recv().await, Some(SessionOutcome::SearchCleared));
                assert_eq!(rx.recv().await, Some(SessionOutcome::SearchCleared));
                assert!(catalog.searches.borrow().is_empty());
            })
            .await;
    }

    #[tokio::test]
    async fn successful_search_reports_started_then_results() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let (mut session, mut rx) =
                    session(CountingCatalog::default(), immediate_config());

                session.set_query("star wars");

                assert_eq!(rx.recv().await, Some(SessionOutcome::SearchStarted));
                match rx.recv().await {
                    Some(SessionOutcome::SearchSucceeded { movies }) => {
                        assert_eq!(movies.len(), 1);
                        assert_eq!(movies[0].title, "star wars");
                    }
                    other => panic!("unexpected outcome: {other:?}"),
                }
            })
            .await;
    }

    #[tokio::test]
    async fn not_found_surfaces_source_reason() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let (mut session, mut rx) = session(NotFoundCatalog, immediate_config());

                session.set_query("zzzznotfound");

                assert_eq!(rx.recv().await, Some(SessionOutcome::SearchStarted));
                assert_eq!(
                    rx.recv().await,
                    Some(SessionOutcome::SearchFailed {
                        message: "Movie not found!".to_string(),
                    })
                );
            })
            .await;
    }

    #[tokio::test]
    async fn newer_query_supersedes_in_flight_request() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let catalog = Rc::new(GatedCatalog::default());
                let gate_q1 = catalog.add_gate();
                let gate_q2 = catalog.add_gate();

                let (tx, mut rx) = unbounded_channel();
                let mut session =
                    SearchSession::new(Rc::clone(&catalog), immediate_config(), tx);

                session.set_query("star");
                session.set_query("star wars");

                // Release both requests; only the second is still alive.
                let _ = gate_q1.send(());
                let _ = gate_q2.send(());

                assert_eq!(rx.recv().await, Some(SessionOutcome::SearchStarted));
                assert_eq!(rx.recv().await, Some(SessionOutcome::SearchStarted));
                match rx.recv().await {
                    Some(SessionOutcome::SearchSucceeded { movies }) => {
                        assert_eq!(movies[0].title, "star wars");
                    }
                    other => panic!("unexpected outcome: {other:?}"),
                }

                // The superseded request must not report anything.
                tokio::task::yield_now().await;
                assert!(rx.try_recv().is_err());
            })
            .await;
    }

    #[tokio::test]
    async fn detail_lifecycle_loads_selected_movie() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let (mut session, mut rx) =
                    session(CountingCatalog::default(), immediate_config());

                session.select("tt1");

                assert_eq!(rx.recv().await, Some(SessionOutcome::DetailStarted));
                match rx.recv().await {
                    Some(SessionOutcome::DetailLoaded { details }) => {
                        assert_eq!(details.imdb_id, "tt1");
                    }
                    other => panic!("unexpected outcome: {other:?}"),
                }
            })
            .await;
    }

    #[tokio::test]
    async fn cancelled_detail_fetch_reports_nothing() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let catalog = Rc::new(GatedCatalog::default());
                let gate = catalog.add_gate();

                let (tx, mut rx) = unbounded_channel();
                let mut session =
                    SearchSession::new(Rc::clone(&catalog), immediate_config(), tx);

                session.select("tt1");
                assert_eq!(rx.recv().await, Some(SessionOutcome::DetailStarted));

                session.cancel_selection();
                let _ = gate.send(());

                tokio::task::yield_now().await;
                tokio::task::yield_now().await;
                assert!(rx.try_recv().is_err());
            })
            .await;
    }
}

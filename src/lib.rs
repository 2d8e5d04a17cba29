//! RateMovie: a movie search-and-rating core.
//!
//! RateMovie lets a user search a public movie catalog, inspect a result,
//! rate it, and keep the rated movies in a persistent "watched list" with
//! aggregate statistics. The crate provides:
//! - Debounced, cancellable remote search with a strict supersession rule
//!   (a stale response can never overwrite a newer query's state)
//! - One-shot detail fetch per selection, independently cancellable
//! - A watched list persisted to a JSON file on every mutation
//! - Count and mean statistics over the watched list
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Shim (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and actions                       │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Session Layer │   │ Storage Layer │   │ Catalog Layer │
//! │ (session/)    │   │ (storage/)    │   │ (catalog/)    │
//! │ - Request     │   │ - JSON I/O    │   │ - HTTP client │
//! │   lifecycles  │   │ - Statistics  │   │ - Wire types  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types and movie models (domain/)           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`catalog`]: Remote catalog trait and HTTP implementation
//! - [`domain`]: Core domain types (movies, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`session`]: Cancellable request lifecycles
//! - [`storage`]: JSON file persistence and statistics
//! - `observability`: tracing setup (internal)
//!
//! # Concurrency Model
//!
//! Everything runs on one cooperative, single-threaded timeline: request
//! tasks are `spawn_local`ed onto a tokio `LocalSet`, and the only
//! suspension points are the network awaits. Supersession is enforced by
//! aborting the previous request when a new one begins; abort suppresses
//! both the success and error paths, so cancellation is never user-visible.

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod session;
pub mod storage;

pub use app::{handle_event, Action, AppState, Event, DEFAULT_TITLE};
pub use catalog::{Catalog, OmdbCatalog};
pub use domain::{MovieDetails, MovieSummary, RateMovieError, Result, WatchedEntry};
pub use session::{SearchSession, SessionConfig, SessionOutcome};
pub use storage::{JsonStorage, Storage, WatchedStats};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_min_query_len() -> usize {
    1
}

fn default_debounce_ms() -> u64 {
    300
}

/// Application configuration.
///
/// Loaded from a TOML file with an environment override for the API key;
/// the credential is injected into the catalog client rather than living as
/// a module-wide constant, so tests and key rotation need no code changes.
///
/// # Example
///
/// ```toml
/// # ~/.config/ratemovie/config.toml
/// api_key = "b8a2cdd0"
/// base_url = "https://www.omdbapi.com/"
/// trace_level = "debug"
/// min_query_len = 1
/// debounce_ms = 300
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// OMDb API key. Required for the HTTP catalog; may be supplied via
    /// the `RATEMOVIE_API_KEY` environment variable instead.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the catalog endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Data directory override for the watched list and log file.
    ///
    /// Tilde-expanded. Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Tracing level or `EnvFilter` directive. Default: `"info"`.
    #[serde(default)]
    pub trace_level: Option<String>,

    /// Minimum trimmed query length before a search is issued.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Debounce delay between a query change and the network request.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            data_dir: None,
            trace_level: None,
            min_query_len: default_min_query_len(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| RateMovieError::Config(format!("invalid config file: {e}")))
    }

    /// Loads configuration from the default location, falling back to
    /// defaults when no file exists, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load_default() -> Result<Self> {
        let path = infrastructure::config_file();
        let mut config = if path.exists() {
            Self::load(&path)?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var("RATEMOVIE_API_KEY") {
            if !key.is_empty() {
                config.api_key = key;
            }
        }

        Ok(config)
    }

    /// Resolves the effective data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(infrastructure::data_dir, infrastructure::expand_tilde)
    }

    /// Derives the search session tunables.
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            min_query_len: self.min_query_len,
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }
}

/// Initializes application state and storage from configuration.
///
/// Opens (or creates) the watched-list store under the configured data
/// directory and seeds [`AppState`] with the persisted entries. A missing or
/// corrupt store yields an empty watched list.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the store
/// file cannot be read.
pub fn initialize(config: &Config) -> Result<(AppState, JsonStorage)> {
    tracing::debug!("initializing ratemovie");

    let storage = JsonStorage::new(config.data_dir().join("watched.json"))?;
    let watched = storage.get_all()?;

    tracing::debug!(watched_count = watched.len(), "state initialized");
    Ok((AppState::new(watched), storage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parses_with_defaults() {
        let config: Config = toml::from_str(r#"api_key = "k""#).unwrap();

        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, "https://www.omdbapi.com/");
        assert_eq!(config.min_query_len, 1);
        assert_eq!(config.debounce_ms, 300);
        assert!(config.trace_level.is_none());
    }

    #[test]
    fn session_config_derived_from_settings() {
        let config = Config {
            min_query_len: 3,
            debounce_ms: 50,
            ..Config::default()
        };

        let session = config.session_config();
        assert_eq!(session.min_query_len, 3);
        assert_eq!(session.debounce, Duration::from_millis(50));
    }

    #[test]
    fn initialize_seeds_state_from_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_string_lossy().into_owned()),
            ..Config::default()
        };

        let (state, mut storage) = initialize(&config).unwrap();
        assert!(state.watched.is_empty());

        let entry = WatchedEntry {
            imdb_id: "tt1".to_string(),
            title: "t".to_string(),
            year: "2010".to_string(),
            poster: "u".to_string(),
            imdb_rating: 8.0,
            runtime: 120,
            user_rating: 9,
            added_at: 0,
        };
        storage.add_entry(&entry).unwrap();
        drop(storage);

        let (state, _storage) = initialize(&config).unwrap();
        assert_eq!(state.watched, vec![entry]);
    }
}

//! Movie domain models.
//!
//! Three representations of a movie exist at different lifetimes:
//! [`MovieSummary`] is the ephemeral search-result form, [`MovieDetails`] is
//! the full record fetched when a result is selected, and [`WatchedEntry`] is
//! the durable record created when the user rates a movie. All three share the
//! catalog's identifier space, which is how "already watched" status is
//! determined.

use serde::{Deserialize, Serialize};

/// Minimal search-result representation of a movie.
///
/// Produced by a catalog search and owned by the current result set; the whole
/// set is replaced on every successful search and discarded on query clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Unique identifier assigned by the remote catalog.
    pub imdb_id: String,

    /// Movie title.
    pub title: String,

    /// Release year as reported by the catalog (free text, e.g. "1977").
    pub year: String,

    /// Poster image URL.
    pub poster: String,
}

/// Full single-movie record fetched on selection.
///
/// Owned by the detail view for the lifetime of the current selection and
/// replaced when the selection changes. Free-text fields (`runtime`,
/// `imdb_rating`) are parsed only at the point a [`WatchedEntry`] is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,

    /// Free-text runtime, e.g. "148 min".
    pub runtime: String,

    /// Critic rating as a decimal string, e.g. "8.8".
    pub imdb_rating: String,

    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

/// A durable record of a movie the user has rated.
///
/// Created when the user submits a rating for a selected, not-yet-watched
/// movie; destroyed only by explicit removal. The full set of entries is the
/// unit of persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEntry {
    /// Catalog identifier, cross-referencing [`MovieSummary`]/[`MovieDetails`].
    pub imdb_id: String,

    pub title: String,
    pub year: String,
    pub poster: String,

    /// Critic rating parsed from the detail record's decimal string.
    pub imdb_rating: f64,

    /// Runtime in minutes, parsed from the leading integer token of the
    /// detail record's free-text runtime.
    pub runtime: u32,

    /// User-assigned rating on a 1-10 scale.
    pub user_rating: u8,

    /// Unix timestamp of when the rating was submitted.
    pub added_at: i64,
}

impl WatchedEntry {
    /// Builds a watched entry from a detail record and a user rating.
    ///
    /// Unparsable runtime or critic-rating strings (the catalog reports "N/A"
    /// for missing data) are stored as 0 rather than rejecting the entry.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ratemovie::domain::{MovieDetails, WatchedEntry};
    ///
    /// # let details: MovieDetails = unimplemented!();
    /// let entry = WatchedEntry::from_details(&details, 9);
    /// assert_eq!(entry.user_rating, 9);
    /// ```
    #[must_use]
    pub fn from_details(details: &MovieDetails, user_rating: u8) -> Self {
        Self {
            imdb_id: details.imdb_id.clone(),
            title: details.title.clone(),
            year: details.year.clone(),
            poster: details.poster.clone(),
            imdb_rating: parse_rating(&details.imdb_rating),
            runtime: parse_runtime_minutes(&details.runtime),
            user_rating,
            added_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Parses the leading integer token of a free-text runtime.
///
/// "148 min" parses to 148. Missing or non-numeric runtimes ("N/A", empty
/// string) parse to 0.
#[must_use]
pub fn parse_runtime_minutes(runtime: &str) -> u32 {
    runtime
        .split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .unwrap_or_else(|| {
            tracing::debug!(runtime = %runtime, "unparsable runtime, storing 0");
            0
        })
}

/// Parses a decimal critic-rating string, defaulting to 0 on failure.
#[must_use]
pub fn parse_rating(rating: &str) -> f64 {
    rating.parse().unwrap_or_else(|_| {
        tracing::debug!(rating = %rating, "unparsable rating, storing 0");
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_details() -> MovieDetails {
        MovieDetails {
            imdb_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster: "https://example.com/inception.jpg".to_string(),
            runtime: "148 min".to_string(),
            imdb_rating: "8.8".to_string(),
            plot: "A thief who steals corporate secrets.".to_string(),
            released: "16 Jul 2010".to_string(),
            actors: "Leonardo DiCaprio".to_string(),
            director: "Christopher Nolan".to_string(),
            genre: "Action, Sci-Fi".to_string(),
        }
    }

    #[test]
    fn parses_leading_runtime_token() {
        assert_eq!(parse_runtime_minutes("148 min"), 148);
        assert_eq!(parse_runtime_minutes("90 min"), 90);
    }

    #[test]
    fn unparsable_runtime_is_zero() {
        assert_eq!(parse_runtime_minutes("N/A"), 0);
        assert_eq!(parse_runtime_minutes(""), 0);
    }

    #[test]
    fn unparsable_rating_is_zero() {
        assert_eq!(parse_rating("N/A"), 0.0);
        assert_eq!(parse_rating(""), 0.0);
    }

    #[test]
    fn entry_built_from_details() {
        let entry = WatchedEntry::from_details(&sample_details(), 9);

        assert_eq!(entry.imdb_id, "tt1375666");
        assert_eq!(entry.title, "Inception");
        assert_eq!(entry.runtime, 148);
        assert_eq!(entry.imdb_rating, 8.8);
        assert_eq!(entry.user_rating, 9);
        assert!(entry.added_at > 0);
    }
}

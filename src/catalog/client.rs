//! Remote movie catalog client.
//!
//! The [`Catalog`] trait is the seam between the request lifecycle and the
//! actual data source: the session layer only ever talks to the trait, which
//! keeps the network out of tests. [`OmdbCatalog`] is the production
//! implementation over an OMDb-style HTTP API, with the credential injected
//! through [`Config`](crate::Config) rather than baked in as a constant.

use crate::catalog::wire::{DetailEnvelope, SearchEnvelope};
use crate::domain::error::{RateMovieError, Result};
use crate::domain::{MovieDetails, MovieSummary};
use crate::Config;

/// Generic message for transport-level search failures.
const SEARCH_FETCH_FAILED: &str = "Something went wrong with fetching movies";

/// Generic message for transport-level detail failures.
const DETAIL_FETCH_FAILED: &str = "Something went wrong.";

/// Read-only movie data source.
///
/// Implementations resolve a free-text query to summary records and an
/// identifier to a full detail record. The production implementation is
/// [`OmdbCatalog`]; tests substitute in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Searches the catalog for movies matching a free-text query.
    ///
    /// # Errors
    ///
    /// Returns [`RateMovieError::Fetch`] on transport failure and
    /// [`RateMovieError::NotFound`] when the source reports no results.
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>>;

    /// Fetches the full record for a single movie by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RateMovieError::Fetch`] on transport failure and
    /// [`RateMovieError::NotFound`] for an unknown identifier.
    async fn lookup(&self, id: &str) -> Result<MovieDetails>;
}

/// HTTP client for an OMDb-style movie catalog.
///
/// Issues GET requests against a single base URL with `apikey` plus either
/// `s` (search text) or `i` (identifier) query parameters. The API key and
/// base URL come from [`Config`], enabling test doubles and key rotation
/// without code changes.
#[derive(Debug)]
pub struct OmdbCatalog {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbCatalog {
    /// Creates a catalog client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RateMovieError::Config`] if the API key is empty.
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(RateMovieError::Config(
                "missing OMDb API key (set api_key in config.toml or RATEMOVIE_API_KEY)"
                    .to_string(),
            ));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl Catalog for OmdbCatalog {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>> {
        tracing::debug!(query = %query, "searching catalog");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("s", query)])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "search request failed");
                RateMovieError::Fetch(SEARCH_FETCH_FAILED.to_string())
            })?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "search returned non-success status");
            return Err(RateMovieError::Fetch(SEARCH_FETCH_FAILED.to_string()));
        }

        let envelope: SearchEnvelope = response.json().await.map_err(|e| {
            tracing::debug!(error = %e, "search response body unreadable");
            RateMovieError::Fetch(SEARCH_FETCH_FAILED.to_string())
        })?;

        let movies = envelope.into_summaries()?;
        tracing::debug!(count = movies.len(), "search completed");
        Ok(movies)
    }

    async fn lookup(&self, id: &str) -> Result<MovieDetails> {
        tracing::debug!(id = %id, "fetching movie details");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("i", id)])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "detail request failed");
                RateMovieError::Fetch(DETAIL_FETCH_FAILED.to_string())
            })?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "detail returned non-success status");
            return Err(RateMovieError::Fetch(DETAIL_FETCH_FAILED.to_string()));
        }

        let envelope: DetailEnvelope = response.json().await.map_err(|e| {
            tracing::debug!(error = %e, "detail response body unreadable");
            RateMovieError::Fetch(DETAIL_FETCH_FAILED.to_string())
        })?;

        envelope.into_details(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected() {
        let config = Config {
            api_key: "  ".to_string(),
            ..Config::default()
        };

        let err = OmdbCatalog::new(&config).unwrap_err();
        assert!(matches!(err, RateMovieError::Config(_)));
    }

    #[test]
    fn configured_key_is_accepted() {
        let config = Config {
            api_key: "b8a2cdd0".to_string(),
            ..Config::default()
        };

        assert!(OmdbCatalog::new(&config).is_ok());
    }
}

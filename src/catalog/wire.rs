//! Wire-format envelopes for the remote movie catalog.
//!
//! The catalog's JSON responses use PascalCase keys and signal logical
//! failures in-band via a `Response: "False"` flag plus an `Error` reason
//! string. These envelopes are deserialization-only; conversion into domain
//! types happens here so the client never leaks wire shapes upward.

use crate::domain::error::{RateMovieError, Result};
use crate::domain::{MovieDetails, MovieSummary};
use serde::Deserialize;

/// Response envelope for the search endpoint.
///
/// On success `response` is `"True"` and `search` holds the result records;
/// on logical failure `response` is `"False"` and `error` holds the reason.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    #[serde(rename = "Response")]
    response: String,

    #[serde(rename = "Search", default)]
    search: Vec<WireSummary>,

    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireSummary {
    #[serde(rename = "imdbID")]
    imdb_id: String,

    #[serde(rename = "Title")]
    title: String,

    #[serde(rename = "Year", default)]
    year: String,

    #[serde(rename = "Poster", default)]
    poster: String,
}

impl SearchEnvelope {
    /// Converts the envelope into domain summaries.
    ///
    /// # Errors
    ///
    /// Returns [`RateMovieError::NotFound`] with the source-provided reason
    /// when the catalog reports a logical failure.
    pub(crate) fn into_summaries(self) -> Result<Vec<MovieSummary>> {
        if self.response != "True" {
            let reason = self
                .error
                .unwrap_or_else(|| "Movie not found!".to_string());
            return Err(RateMovieError::NotFound(reason));
        }

        Ok(self
            .search
            .into_iter()
            .map(|record| MovieSummary {
                imdb_id: record.imdb_id,
                title: record.title,
                year: record.year,
                poster: record.poster,
            })
            .collect())
    }
}

/// Response envelope for the detail endpoint.
///
/// All fields default to empty strings; the catalog reports missing data as
/// "N/A" and omits nothing guaranteed, but defaults keep partial records
/// usable.
#[derive(Debug, Deserialize)]
pub(crate) struct DetailEnvelope {
    #[serde(rename = "Response", default)]
    response: String,

    #[serde(rename = "Error", default)]
    error: Option<String>,

    #[serde(rename = "imdbID", default)]
    imdb_id: String,

    #[serde(rename = "Title", default)]
    title: String,

    #[serde(rename = "Year", default)]
    year: String,

    #[serde(rename = "Poster", default)]
    poster: String,

    #[serde(rename = "Runtime", default)]
    runtime: String,

    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,

    #[serde(rename = "Plot", default)]
    plot: String,

    #[serde(rename = "Released", default)]
    released: String,

    #[serde(rename = "Actors", default)]
    actors: String,

    #[serde(rename = "Director", default)]
    director: String,

    #[serde(rename = "Genre", default)]
    genre: String,
}

impl DetailEnvelope {
    /// Converts the envelope into a domain detail record.
    ///
    /// `requested_id` is used when the response omits the identifier, keeping
    /// the record tied to the selection that triggered the fetch.
    ///
    /// # Errors
    ///
    /// Returns [`RateMovieError::NotFound`] when the catalog reports a
    /// logical failure for the identifier.
    pub(crate) fn into_details(self, requested_id: &str) -> Result<MovieDetails> {
        if self.response == "False" {
            let reason = self
                .error
                .unwrap_or_else(|| "Movie not found!".to_string());
            return Err(RateMovieError::NotFound(reason));
        }

        let imdb_id = if self.imdb_id.is_empty() {
            requested_id.to_string()
        } else {
            self.imdb_id
        };

        Ok(MovieDetails {
            imdb_id,
            title: self.title,
            year: self.year,
            poster: self.poster,
            runtime: self.runtime,
            imdb_rating: self.imdb_rating,
            plot: self.plot,
            released: self.released,
            actors: self.actors,
            director: self.director,
            genre: self.genre,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_search_envelope() {
        let json = r#"{
            "Response": "True",
            "Search": [
                {"imdbID": "tt1", "Title": "A", "Year": "1977", "Poster": "u"}
            ]
        }"#;

        let envelope: SearchEnvelope = serde_json::from_str(json).unwrap();
        let movies = envelope.into_summaries().unwrap();

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].imdb_id, "tt1");
        assert_eq!(movies[0].title, "A");
        assert_eq!(movies[0].year, "1977");
        assert_eq!(movies[0].poster, "u");
    }

    #[test]
    fn failed_search_envelope_carries_reason() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;

        let envelope: SearchEnvelope = serde_json::from_str(json).unwrap();
        let err = envelope.into_summaries().unwrap_err();

        assert_eq!(err.to_string(), "Movie not found!");
    }

    #[test]
    fn detail_envelope_maps_all_fields() {
        let json = r#"{
            "Response": "True",
            "imdbID": "tt1375666",
            "Title": "Inception",
            "Year": "2010",
            "Poster": "u",
            "Runtime": "148 min",
            "imdbRating": "8.8",
            "Plot": "p",
            "Released": "16 Jul 2010",
            "Actors": "a",
            "Director": "d",
            "Genre": "g"
        }"#;

        let envelope: DetailEnvelope = serde_json::from_str(json).unwrap();
        let details = envelope.into_details("tt1375666").unwrap();

        assert_eq!(details.imdb_id, "tt1375666");
        assert_eq!(details.runtime, "148 min");
        assert_eq!(details.imdb_rating, "8.8");
        assert_eq!(details.director, "d");
    }

    #[test]
    fn detail_envelope_falls_back_to_requested_id() {
        let json = r#"{"Response": "True", "Title": "Inception"}"#;

        let envelope: DetailEnvelope = serde_json::from_str(json).unwrap();
        let details = envelope.into_details("tt1375666").unwrap();

        assert_eq!(details.imdb_id, "tt1375666");
    }

    #[test]
    fn detail_envelope_logical_failure() {
        let json = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;

        let envelope: DetailEnvelope = serde_json::from_str(json).unwrap();
        let err = envelope.into_details("bogus").unwrap_err();

        assert_eq!(err.to_string(), "Incorrect IMDb ID.");
    }
}

//! Error types for the RateMovie core.
//!
//! This module defines the centralized error type [`RateMovieError`] and a type
//! alias [`Result`] for convenient error handling throughout the crate. All
//! errors are implemented using the `thiserror` crate.

use thiserror::Error;

/// The main error type for RateMovie operations.
///
/// This enum consolidates all error conditions that can occur during execution,
/// from catalog requests to storage operations and configuration issues.
///
/// The request-boundary kinds map directly to what the user sees:
/// [`Fetch`](RateMovieError::Fetch) carries a generic transport message,
/// [`NotFound`](RateMovieError::NotFound) carries the catalog's own reason
/// string verbatim, and cancellation never becomes an error at all — aborted
/// requests are discarded silently before they reach this type.
#[derive(Debug, Error)]
pub enum RateMovieError {
    /// Transport-level request failure.
    ///
    /// Covers connection errors, non-success HTTP statuses, and malformed
    /// response bodies. The string is the generic user-facing message; the
    /// underlying cause is logged at the request site.
    #[error("{0}")]
    Fetch(String),

    /// The catalog reported a logical failure for the query.
    ///
    /// The string is the reason provided by the data source (for example
    /// "Movie not found!") and is surfaced to the user verbatim.
    #[error("{0}")]
    NotFound(String),

    /// Storage operation failed.
    ///
    /// Occurs when writing the watched list to disk fails. The string
    /// contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically
    /// converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed,
    /// such as an empty API key. The string describes the specific problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for RateMovie operations.
///
/// This is a type alias for `std::result::Result<T, RateMovieError>` that
/// simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, RateMovieError>;

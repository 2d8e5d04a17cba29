//! Domain layer for the RateMovie core.
//!
//! This module contains the core domain types and business rules, independent
//! of HTTP, storage, or presentation concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie models at their three lifetimes (summary, detail, watched)

pub mod error;
pub mod movie;

pub use error::{RateMovieError, Result};
pub use movie::{parse_runtime_minutes, MovieDetails, MovieSummary, WatchedEntry};

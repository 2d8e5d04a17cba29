//! Storage layer for the persistent watched list.
//!
//! This module provides the storage abstraction for the user's rated movies:
//! loaded once at startup, rewritten wholesale on every mutation, with
//! display statistics derived on demand.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `stats`: aggregate statistics over the watched list

pub mod backend;
pub mod json;
pub mod stats;

pub use backend::Storage;
pub use json::JsonStorage;
pub use stats::{summarize, WatchedStats};

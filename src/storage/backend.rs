//! Storage backend abstraction for the watched list.
//!
//! The [`Storage`] trait is shaped by the application's actual operations —
//! load at startup, add on rating submission, remove on deletion — not a
//! generic ORM. The persistence contract is unconditional: after any
//! mutation returns, the durable copy reflects the in-memory list with no
//! partial-write state observable by subsequent reads.

use crate::domain::error::Result;
use crate::domain::WatchedEntry;

/// Abstraction over durable watched-list storage.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic
///   writes (default)
pub trait Storage {
    /// Returns the full watched list.
    ///
    /// Entries are returned in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get_all(&self) -> Result<Vec<WatchedEntry>>;

    /// Adds a watched entry and persists the updated list.
    ///
    /// If an entry with the same identifier exists, it is replaced — the
    /// watched list holds at most one entry per identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the write operation fails.
    fn add_entry(&mut self, entry: &WatchedEntry) -> Result<()>;

    /// Removes the entry with the matching identifier and persists the
    /// updated list.
    ///
    /// Returns `true` if an entry was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write operation fails.
    fn remove_entry(&mut self, id: &str) -> Result<bool>;
}

//! Aggregate statistics over the watched list.
//!
//! Pure derivation, recomputed from the entry list on demand. Means use the
//! sum-of-fractions form Σ(xᵢ / n): an empty list contributes no terms, so
//! every statistic degenerates cleanly to 0 rather than NaN.

use crate::domain::WatchedEntry;

/// Display statistics derived from the watched list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WatchedStats {
    /// Number of watched entries.
    pub count: usize,

    /// Arithmetic mean of critic ratings, 0 when the list is empty.
    pub avg_imdb_rating: f64,

    /// Arithmetic mean of user ratings, 0 when the list is empty.
    pub avg_user_rating: f64,

    /// Arithmetic mean of runtimes in minutes, 0 when the list is empty.
    pub avg_runtime: f64,
}

/// Computes watched-list statistics.
///
/// # Examples
///
/// ```
/// use ratemovie::storage::summarize;
///
/// let stats = summarize(&[]);
/// assert_eq!(stats.count, 0);
/// assert_eq!(stats.avg_user_rating, 0.0);
/// ```
#[must_use]
pub fn summarize(entries: &[WatchedEntry]) -> WatchedStats {
    WatchedStats {
        count: entries.len(),
        avg_imdb_rating: mean(entries.iter().map(|e| e.imdb_rating)),
        avg_user_rating: mean(entries.iter().map(|e| f64::from(e.user_rating))),
        avg_runtime: mean(entries.iter().map(|e| f64::from(e.runtime))),
    }
}

/// Mean as Σ(xᵢ / n); an empty iterator sums no terms and yields 0.
fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    values.map(|v| v / n).sum()
}

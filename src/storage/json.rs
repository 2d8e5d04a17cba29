//! JSON file-based storage backend.
//!
//! This module persists the watched list as a single human-readable JSON
//! file using atomic file writes (write-to-temp + rename) to prevent
//! corruption on crashes. The entire list is kept in memory and the durable
//! copy is rewritten wholesale on every mutation.
//!
//! Missing or unparsable files load as the empty list: a corrupt store must
//! never prevent startup, it only costs the previous ratings.

use crate::domain::error::{RateMovieError, Result};
use crate::domain::WatchedEntry;
use crate::storage::backend::Storage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// JSON storage container format.
///
/// Top-level structure serialized to disk. The watched list lives under a
/// named key with a format version for future migrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format.
    version: u32,

    /// All watched entries, in insertion order.
    #[serde(default)]
    watched: Vec<WatchedEntry>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            watched: Vec::new(),
        }
    }
}

/// JSON file storage backend for the watched list.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "watched": [
///     {
///       "imdb_id": "tt1375666",
///       "title": "Inception",
///       "year": "2010",
///       "poster": "https://...",
///       "imdb_rating": 8.8,
///       "runtime": 148,
///       "user_rating": 9,
///       "added_at": 1234567890
///     }
///   ]
/// }
/// ```
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data, loaded on creation.
    data: StorageData,

    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// If the file exists and parses, loads the existing list. A missing or
    /// corrupt file initializes an empty list (the corrupt case is logged).
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if parent directory creation fails or file
    /// permissions prevent reading an existing file.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no stored watched list, starting empty");
            StorageData::default()
        };

        tracing::debug!(watched_count = data.watched.len(), "storage initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Loads storage data from a JSON file.
    ///
    /// A file that exists but does not parse yields the empty list with a
    /// warning rather than an error; this is an explicit departure from
    /// treating corrupt data as fatal.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file cannot be read.
    fn load_from_file(path: &PathBuf) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;

        match serde_json::from_str::<StorageData>(&contents) {
            Ok(data) => {
                tracing::debug!(
                    version = data.version,
                    watched = data.watched.len(),
                    "loaded watched list"
                );
                Ok(data)
            }
            Err(e) => {
                tracing::warn!(
                    path = ?path,
                    error = %e,
                    "stored watched list is unparsable, starting empty"
                );
                Ok(StorageData::default())
            }
        }
    }

    /// Saves storage data to disk using atomic write.
    ///
    /// Writes to a temporary file first, then renames it to the target path,
    /// so the file is never left in a corrupt state even if the process
    /// crashes mid-write.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write, or the rename
    /// fails.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        tracing::debug!(path = ?self.file_path, "saving watched list");

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| RateMovieError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!("storage saved successfully");
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn get_all(&self) -> Result<Vec<WatchedEntry>> {
        Ok(self.data.watched.clone())
    }

    fn add_entry(&mut self, entry: &WatchedEntry) -> Result<()> {
        let _span = tracing::debug_span!("json_add_entry",
            imdb_id = %entry.imdb_id,
            title = %entry.title,
            user_rating = entry.user_rating
        )
        .entered();

        if let Some(existing) = self
            .data
            .watched
            .iter_mut()
            .find(|e| e.imdb_id == entry.imdb_id)
        {
            tracing::debug!("replacing existing watched entry");
            *existing = entry.clone();
        } else {
            self.data.watched.push(entry.clone());
        }

        self.dirty = true;
        self.save_to_file()?;

        tracing::debug!(watched_count = self.data.watched.len(), "entry added");
        Ok(())
    }

    fn remove_entry(&mut self, id: &str) -> Result<bool> {
        let _span = tracing::debug_span!("json_remove_entry", imdb_id = %id).entered();

        let before = self.data.watched.len();
        self.data.watched.retain(|e| e.imdb_id != id);
        let removed = self.data.watched.len() < before;

        if removed {
            self.dirty = true;
            self.save_to_file()?;
            tracing::debug!(watched_count = self.data.watched.len(), "entry removed");
        } else {
            tracing::debug!("no entry matched, nothing removed");
        }

        Ok(removed)
    }
}

impl Drop for JsonStorage {
    /// Ensures data is saved on drop if a save was somehow skipped.
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, user_rating: u8) -> WatchedEntry {
        WatchedEntry {
            imdb_id: id.to_string(),
            title: format!("Movie {id}"),
            year: "2010".to_string(),
            poster: "u".to_string(),
            imdb_rating: 8.8,
            runtime: 148,
            user_rating,
            added_at: 1_700_000_000,
        }
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("watched.json")).unwrap();

        assert!(storage.get_all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.json");
        std::fs::write(&path, "not json {{{").unwrap();

        let storage = JsonStorage::new(path).unwrap();
        assert!(storage.get_all().unwrap().is_empty());
    }

    #[test]
    fn add_then_remove_restores_prior_state_and_disk_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.json");

        let mut storage = JsonStorage::new(path.clone()).unwrap();
        let before = storage.get_all().unwrap();

        let e = entry("tt1", 9);
        storage.add_entry(&e).unwrap();
        assert_eq!(storage.get_all().unwrap(), vec![e.clone()]);

        // Durable copy reflects the list after the add.
        let reloaded = JsonStorage::new(path.clone()).unwrap();
        assert_eq!(reloaded.get_all().unwrap(), vec![e.clone()]);

        assert!(storage.remove_entry("tt1").unwrap());
        assert_eq!(storage.get_all().unwrap(), before);

        // And again after the remove.
        let reloaded = JsonStorage::new(path).unwrap();
        assert!(reloaded.get_all().unwrap().is_empty());
    }

    #[test]
    fn add_with_same_id_replaces_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path().join("watched.json")).unwrap();

        storage.add_entry(&entry("tt1", 6)).unwrap();
        storage.add_entry(&entry("tt1", 9)).unwrap();

        let all = storage.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].user_rating, 9);
    }

    #[test]
    fn remove_of_unknown_id_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path().join("watched.json")).unwrap();

        storage.add_entry(&entry("tt1", 9)).unwrap();
        assert!(!storage.remove_entry("tt2").unwrap());
        assert_eq!(storage.get_all().unwrap().len(), 1);
    }

    #[test]
    fn entries_survive_reopen_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.json");

        {
            let mut storage = JsonStorage::new(path.clone()).unwrap();
            storage.add_entry(&entry("tt1", 9)).unwrap();
            storage.add_entry(&entry("tt2", 7)).unwrap();
        }

        let storage = JsonStorage::new(path).unwrap();
        let all = storage.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].imdb_id, "tt1");
        assert_eq!(all[1].imdb_id, "tt2");
    }
}

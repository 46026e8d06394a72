//! JSON file-based history store.
//!
//! This module provides a simple, human-readable history store using JSON
//! serialization. It uses atomic file writes (write-to-temp + rename) so a
//! crash mid-write never leaves a truncated history file behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(n) - loads the whole file once at session start
//! - **Write**: O(n) - serializes and writes the whole list (at most a handful of entries)

use crate::domain::error::{PhotoscoutError, Result};
use crate::domain::Photo;
use crate::storage::backend::HistoryStore;
use crate::storage::models::{HistoryDocument, HistoryFile};
use std::path::{Path, PathBuf};

/// JSON file history store.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is owned by the session runtime
/// and only touched from its control loop.
///
/// # File Format
///
/// See [`HistoryFile`]. A bare JSON array of photos is also accepted on load.
#[derive(Debug)]
pub struct JsonHistoryStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonHistoryStore {
    /// Creates a store backed by `file_path`.
    ///
    /// Parent directories are created automatically. The file itself is not
    /// touched until the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use photoscout::storage::{HistoryStore, JsonHistoryStore};
    /// use std::path::PathBuf;
    ///
    /// let store = JsonHistoryStore::new(PathBuf::from("/tmp/photoscout/history.json"))?;
    /// let history = store.load()?;
    /// # Ok::<(), photoscout::PhotoscoutError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON history store");

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(Self { file_path })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load(&self) -> Result<Vec<Photo>> {
        let _span = tracing::debug_span!("json_history_load", path = ?self.file_path).entered();

        if !self.file_path.exists() {
            tracing::debug!("no history file yet");
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.file_path).map_err(|e| {
            PhotoscoutError::Persistence(format!("failed to read {}: {e}", self.file_path.display()))
        })?;

        let document: HistoryDocument = serde_json::from_str(&contents)
            .map_err(|e| PhotoscoutError::Persistence(format!("failed to parse JSON: {e}")))?;

        let entries = document.into_entries();
        tracing::debug!(entries = entries.len(), "history loaded");
        Ok(entries)
    }

    fn save(&mut self, history: &[Photo]) -> Result<()> {
        let _span = tracing::debug_span!("json_history_save",
            path = ?self.file_path,
            entries = history.len()
        ).entered();

        let json = serde_json::to_string_pretty(&HistoryFile::new(history.to_vec()))
            .map_err(|e| PhotoscoutError::Persistence(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json).map_err(|e| {
            PhotoscoutError::Persistence(format!("failed to write {}: {e}", tmp_path.display()))
        })?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path).map_err(|e| {
            PhotoscoutError::Persistence(format!("failed to replace {}: {e}", self.file_path.display()))
        })?;

        tracing::debug!("history saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonHistoryStore {
        JsonHistoryStore::new(dir.path().join("nested").join("history.json")).expect("store created")
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().expect("tempdir");
        let store = store_in(&dir);
        assert!(store.load().expect("load").is_empty());
        assert!(store.path().parent().is_some_and(Path::exists));
    }

    #[test]
    fn save_then_load_round_trips_in_order() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = store_in(&dir);
        let history = vec![
            Photo::new("b", Some("Bridge at dusk"), "Ana")
                .with_url("small", "https://img/b/s")
                .with_url("regular", "https://img/b/r"),
            Photo::new("a", None, "Bo"),
        ];

        store.save(&history).expect("save");
        let loaded = store.load().expect("load");

        assert_eq!(loaded.len(), 2);
        for (saved, restored) in history.iter().zip(&loaded) {
            assert_eq!(saved.id, restored.id);
            assert_eq!(saved.urls, restored.urls);
            assert_eq!(saved.description, restored.description);
            assert_eq!(saved.author_name(), restored.author_name());
        }
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn save_overwrites_previous_history() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = store_in(&dir);
        store.save(&[Photo::new("a", None, "Ana"), Photo::new("b", None, "Bo")]).expect("first save");
        store.save(&[Photo::new("c", None, "Cy")]).expect("second save");
        let ids: Vec<String> = store.load().expect("load").into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["c".to_string()]);
    }

    #[test]
    fn corrupt_file_is_a_persistence_error() {
        let dir = TempDir::new().expect("tempdir");
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").expect("write garbage");
        assert!(matches!(store.load(), Err(PhotoscoutError::Persistence(_))));
    }
}

//! In-process history store.
//!
//! Keeps the history in memory behind a shared handle, so a test can hold a
//! clone and observe what the session persisted.

use crate::domain::error::{PhotoscoutError, Result};
use crate::domain::Photo;
use crate::storage::backend::HistoryStore;
use std::sync::{Arc, Mutex};

/// Memory-backed [`HistoryStore`]. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    entries: Arc<Mutex<Vec<Photo>>>,
}

impl MemoryHistoryStore {
    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries(entries: Vec<Photo>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Returns a copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Photo> {
        self.entries.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Vec<Photo>> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| PhotoscoutError::Persistence("history lock poisoned".to_string()))
    }

    fn save(&mut self, history: &[Photo]) -> Result<()> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| PhotoscoutError::Persistence("history lock poisoned".to_string()))?;
        *guard = history.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_contents() {
        let store = MemoryHistoryStore::default();
        let mut writer = store.clone();
        writer.save(&[Photo::new("a", None, "Ana")]).expect("save");
        assert_eq!(store.snapshot().len(), 1);
        assert_eq!(store.load().expect("load")[0].id, "a");
    }
}

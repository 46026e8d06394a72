//! History storage abstraction.
//!
//! This module defines the [`HistoryStore`] trait that abstracts over where the
//! recent-history list is persisted. The session writes through on every
//! history mutation and reads once at startup.
//!
//! # Design Philosophy
//!
//! The trait is deliberately two operations wide: the session only ever needs
//! the whole list back, and only ever replaces the whole list.

use crate::domain::error::Result;
use crate::domain::Photo;

/// Abstraction over persistent history backends.
///
/// # Implementations
///
/// - [`JsonHistoryStore`](crate::storage::JsonHistoryStore): JSON file with atomic writes (default)
/// - [`MemoryHistoryStore`](crate::storage::MemoryHistoryStore): in-process, for tests and ephemeral sessions
///
/// # Examples
///
/// ```
/// use photoscout::storage::{HistoryStore, MemoryHistoryStore};
/// use photoscout::Photo;
///
/// let mut store = MemoryHistoryStore::default();
/// store.save(&[Photo::new("a", None, "Ana")])?;
/// assert_eq!(store.load()?.len(), 1);
/// # Ok::<(), photoscout::PhotoscoutError>(())
/// ```
pub trait HistoryStore: Send {
    /// Returns the stored history, most recent first.
    ///
    /// An absent store yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoscoutError::Persistence`](crate::PhotoscoutError::Persistence)
    /// if the stored data cannot be read or decoded.
    fn load(&self) -> Result<Vec<Photo>>;

    /// Replaces the stored history with `history`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. Callers treat this as non-fatal.
    fn save(&mut self, history: &[Photo]) -> Result<()>;
}

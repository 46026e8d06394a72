//! On-disk record models for the history file.
//!
//! These types are separate from the domain [`Photo`] list so the file can
//! carry a format version and a write timestamp without leaking either into
//! the session.

use crate::domain::Photo;
use serde::{Deserialize, Serialize};

/// Current version of the history file format.
pub const HISTORY_FORMAT_VERSION: u32 = 1;

/// Versioned history file envelope.
///
/// ```json
/// {
///   "version": 1,
///   "updated_at": 1725700000,
///   "entries": [
///     { "id": "x1", "urls": { "regular": "https://..." }, "description": null, "user": { "name": "Ana" } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFile {
    /// Version of the storage format for future migrations.
    pub version: u32,

    /// Unix timestamp of the last write.
    #[serde(default)]
    pub updated_at: i64,

    /// History entries, most recent first.
    #[serde(default)]
    pub entries: Vec<Photo>,
}

impl HistoryFile {
    /// Wraps `entries` in an envelope stamped with the current time.
    #[must_use]
    pub fn new(entries: Vec<Photo>) -> Self {
        Self {
            version: HISTORY_FORMAT_VERSION,
            updated_at: chrono::Utc::now().timestamp(),
            entries,
        }
    }
}

/// Any document accepted when reading the history file.
///
/// Besides the versioned envelope, a bare JSON array of photos is accepted,
/// which is what earlier clients wrote.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HistoryDocument {
    Versioned(HistoryFile),
    Bare(Vec<Photo>),
}

impl HistoryDocument {
    #[must_use]
    pub fn into_entries(self) -> Vec<Photo> {
        match self {
            Self::Versioned(file) => file.entries,
            Self::Bare(entries) => entries,
        }
    }
}

//! Worker message types for the request/response bridge.
//!
//! This module defines the protocol between the session's control loop and the
//! background search worker. Requests go out as [`WorkerMessage`]; completions
//! come back as [`WorkerResponse`] and are fed into the event handler as
//! events, so every state mutation happens on the control loop.
//!
//! Search requests and responses carry the session's request `generation`.
//! The handler only applies a response whose generation is still current.

use crate::app::modes::SortMode;
use crate::domain::Photo;

/// Requests sent from the session to the search worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Fetch one page of search results.
    Search {
        /// Generation of the session when the request was issued.
        generation: u64,
        query: String,
        sort: SortMode,
        /// 1-based page number.
        page: u32,
        /// Whether the response replaces (true) or extends (false) results.
        reset: bool,
    },

    /// Fetch the full record for one photo.
    FetchDetails {
        id: String,
    },
}

impl WorkerMessage {
    /// Creates a search request.
    ///
    /// # Examples
    ///
    /// ```
    /// use photoscout::app::SortMode;
    /// use photoscout::worker::WorkerMessage;
    ///
    /// let msg = WorkerMessage::search(3, "cats", SortMode::Date, 1, true);
    /// assert!(matches!(msg, WorkerMessage::Search { generation: 3, page: 1, .. }));
    /// ```
    #[must_use]
    pub fn search(generation: u64, query: impl Into<String>, sort: SortMode, page: u32, reset: bool) -> Self {
        Self::Search {
            generation,
            query: query.into(),
            sort,
            page,
            reset,
        }
    }

    /// Creates a detail fetch request.
    #[must_use]
    pub fn fetch_details(id: impl Into<String>) -> Self {
        Self::FetchDetails { id: id.into() }
    }
}

/// Completions sent from the search worker back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    /// A search page arrived.
    PageLoaded {
        generation: u64,
        page: u32,
        reset: bool,
        photos: Vec<Photo>,
    },

    /// A search request failed.
    SearchFailed {
        generation: u64,
        page: u32,
        reset: bool,
        /// Human-readable failure description.
        message: String,
    },

    /// A detail fetch succeeded.
    DetailsLoaded {
        photo: Photo,
    },

    /// A detail fetch failed.
    DetailsFailed {
        id: String,
        message: String,
    },
}

impl WorkerResponse {
    /// Generation tag of a search completion, `None` for detail responses.
    #[must_use]
    pub const fn generation(&self) -> Option<u64> {
        match self {
            Self::PageLoaded { generation, .. } | Self::SearchFailed { generation, .. } => Some(*generation),
            Self::DetailsLoaded { .. } | Self::DetailsFailed { .. } => None,
        }
    }
}

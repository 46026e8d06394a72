//! Search session state and its transitions.
//!
//! This module defines [`SessionState`], the single source of truth for one
//! search screen: query text, sort and layout modes, pagination cursor,
//! accumulated results, the bounded recent-history list and the current
//! [`ViewState`]. It also owns the bookkeeping that keeps at most one search
//! request in flight and rejects completions from superseded queries.
//!
//! # State Components
//!
//! - **Query**: text, sort mode, next page number and accumulated results
//! - **History**: up to `max_history` photos, most recent first, unique by id
//! - **Filtered History**: history entries matching the current query text
//! - **Request Tracking**: in-flight marker, generation counter, queued reset
//! - **Debounce Token**: identifies the latest scheduled search timer
//!
//! # Row Ordering
//!
//! Filtered history always precedes results. With `H` filtered history
//! entries, row `i < H` is `filtered_history[i]` and row `i >= H` is
//! `results[i - H]`. In history mode only the first `H` rows exist.
//!
//! # Example
//!
//! ```
//! use photoscout::app::{SessionState, ViewState};
//! use photoscout::Photo;
//!
//! let mut state = SessionState::new(5);
//! state.restore_history(vec![Photo::new("a", Some("Fox"), "Ana")]);
//! assert_eq!(state.view_state, ViewState::Content);
//! assert_eq!(state.row_count(), 1);
//! ```

use super::modes::{LayoutMode, ListMode, SortMode, ViewState};
use crate::domain::Photo;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, RowItem, RowOrigin, SearchBarInfo, SessionViewModel, StatusLine,
};
use crate::worker::WorkerMessage;
use std::collections::HashSet;
use std::time::Duration;

/// Default number of photos kept in the recent-history list.
pub const DEFAULT_MAX_HISTORY: usize = 5;

/// Default quiet period before a text change triggers a search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// The search request currently awaiting a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub generation: u64,
    pub page: u32,
    pub reset: bool,
}

/// Central state container for one search session.
///
/// Mutated only by the event handler on the session's control loop.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Current query text as last typed.
    pub query: String,

    /// Trimmed text of the last reset search. Page fetches continue this
    /// query, never text still waiting on the debounce timer.
    pub active_query: String,

    /// Ordering requested from the API.
    pub sort_mode: SortMode,

    /// Cosmetic column layout.
    pub layout_mode: LayoutMode,

    /// Next page to request for the active query. Starts at 1.
    pub page: u32,

    /// Accumulated results for the active query, in page order.
    pub results: Vec<Photo>,

    /// Recent history, most recent first, unique by id.
    pub history: Vec<Photo>,

    /// History entries visible for the current query text.
    pub filtered_history: Vec<Photo>,

    /// Whether rows show history only or history plus results.
    pub list_mode: ListMode,

    /// Search request awaiting completion, if any.
    pub in_flight: Option<InFlight>,

    /// Bumped whenever the active query is superseded.
    ///
    /// Completions tagged with an older generation are discarded.
    pub generation: u64,

    /// A reset search was requested while another request was in flight.
    pub queued_reset: bool,

    /// Token of the most recently scheduled debounce timer.
    pub debounce_token: u64,

    /// Photo id whose detail fetch is awaited. Other detail completions are
    /// stale.
    pub pending_detail: Option<String>,

    /// What the presentation layer renders.
    pub view_state: ViewState,

    /// Maximum number of history entries.
    pub max_history: usize,

    /// Debounce window for text changes.
    pub debounce: Duration,
}

impl SessionState {
    /// Creates a session in its initial `Loading` state with empty history.
    #[must_use]
    pub fn new(max_history: usize) -> Self {
        Self {
            query: String::new(),
            active_query: String::new(),
            sort_mode: SortMode::default(),
            layout_mode: LayoutMode::default(),
            page: 1,
            results: Vec::new(),
            history: Vec::new(),
            filtered_history: Vec::new(),
            list_mode: ListMode::History,
            in_flight: None,
            generation: 0,
            queued_reset: false,
            debounce_token: 0,
            pending_detail: None,
            view_state: ViewState::Loading,
            max_history: max_history.max(1),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Sets the debounce window.
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Whether the query text is usable for a search request.
    #[must_use]
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Whether the typed text differs from the query the results belong to.
    ///
    /// True during the debounce window after an edit.
    #[must_use]
    pub fn query_edited(&self) -> bool {
        self.query.trim() != self.active_query
    }

    /// Whether the view model currently lists rows.
    #[must_use]
    pub const fn rows_visible(&self) -> bool {
        matches!(self.view_state, ViewState::Content | ViewState::LoadingMore)
    }

    /// Installs the persisted history list at session start.
    ///
    /// Duplicate ids keep their first (most recent) occurrence and the list is
    /// truncated to `max_history`, so a hand-edited file cannot break the
    /// history invariants. Leaves the session in history mode with `Content`.
    pub fn restore_history(&mut self, history: Vec<Photo>) {
        let mut seen = HashSet::new();
        let mut sanitized: Vec<Photo> = history
            .into_iter()
            .filter(|photo| seen.insert(photo.id.clone()))
            .collect();
        sanitized.truncate(self.max_history);

        tracing::debug!(entries = sanitized.len(), "history restored");

        self.history = sanitized;
        self.filtered_history.clone_from(&self.history);
        self.list_mode = ListMode::History;
        self.view_state = ViewState::Content;
    }

    /// Recomputes `filtered_history` for the current query text.
    ///
    /// Empty text shows the whole history.
    pub fn apply_history_filter(&mut self) {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            self.filtered_history.clone_from(&self.history);
        } else {
            self.filtered_history = self
                .history
                .iter()
                .filter(|photo| photo.matches_lowercase(&needle))
                .cloned()
                .collect();
        }

        tracing::trace!(
            query_len = self.query.len(),
            filtered_count = self.filtered_history.len(),
            "history filter applied"
        );
    }

    /// Moves `photo` to the front of history.
    ///
    /// Any existing entry with the same id is removed first, then the list is
    /// truncated from the tail to `max_history`.
    pub fn record_selection(&mut self, photo: Photo) {
        self.history.retain(|entry| entry.id != photo.id);
        self.history.insert(0, photo);
        self.history.truncate(self.max_history);
        self.apply_history_filter();
    }

    /// Replaces the history entry with the same id by `photo`.
    ///
    /// Returns `true` if an entry was replaced. Order is kept.
    pub fn merge_details(&mut self, photo: &Photo) -> bool {
        let Some(entry) = self.history.iter_mut().find(|entry| entry.id == photo.id) else {
            return false;
        };
        entry.clone_from(photo);
        self.apply_history_filter();
        true
    }

    /// Drops accumulated results and restarts pagination.
    pub fn reset_query_results(&mut self) {
        self.page = 1;
        self.results.clear();
    }

    /// Marks the active query as superseded.
    pub fn supersede(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Issues the next debounce token.
    pub fn next_debounce_token(&mut self) -> u64 {
        self.debounce_token = self.debounce_token.wrapping_add(1);
        self.debounce_token
    }

    /// Prepares a search request for the current query.
    ///
    /// A reset search supersedes the active query: generation bump, page 1,
    /// results cleared, `Loading`, and the typed text becomes the active
    /// query. A pending detail fetch is abandoned. If a request is still in flight the reset is
    /// queued and issued when that request completes. A page fetch while a
    /// request is in flight is dropped.
    ///
    /// Returns the message to hand to the worker, if one should be sent now.
    pub fn start_search(&mut self, reset: bool) -> Option<WorkerMessage> {
        if reset {
            self.supersede();
            self.reset_query_results();
            self.active_query = self.query.trim().to_string();
            self.pending_detail = None;
            self.view_state = ViewState::Loading;

            if let Some(in_flight) = self.in_flight {
                tracing::debug!(
                    superseded_generation = in_flight.generation,
                    generation = self.generation,
                    "reset queued behind in-flight request"
                );
                self.queued_reset = true;
                return None;
            }
        } else if self.in_flight.is_some() {
            tracing::debug!("page fetch dropped, request already in flight");
            return None;
        } else {
            self.view_state = ViewState::LoadingMore;
        }

        self.queued_reset = false;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            page: self.page,
            reset,
        });

        tracing::debug!(
            query = %self.active_query,
            sort = %self.sort_mode,
            page = self.page,
            reset = reset,
            generation = self.generation,
            "search started"
        );

        Some(WorkerMessage::search(
            self.generation,
            self.active_query.as_str(),
            self.sort_mode,
            self.page,
            reset,
        ))
    }

    /// Clears the in-flight marker after a search completion.
    ///
    /// Returns `true` if the completion belongs to the current generation and
    /// should be applied.
    pub fn finish_request(&mut self, generation: u64) -> bool {
        self.in_flight = None;
        generation == self.generation
    }

    /// Applies a successful page for the current generation.
    pub fn apply_page(&mut self, page: u32, reset: bool, photos: Vec<Photo>) {
        if reset {
            self.results = photos;
        } else {
            self.results.extend(photos);
        }
        self.page = page.saturating_add(1);
        self.view_state = ViewState::Content;
    }

    /// Number of rows the presentation layer lists.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self.list_mode {
            ListMode::History => self.filtered_history.len(),
            ListMode::Results => self.filtered_history.len() + self.results.len(),
        }
    }

    /// Resolves a row index to the photo it shows.
    #[must_use]
    pub fn row_at(&self, row: usize) -> Option<(RowOrigin, &Photo)> {
        let history_rows = self.filtered_history.len();
        if row < history_rows {
            return self.filtered_history.get(row).map(|p| (RowOrigin::History, p));
        }
        match self.list_mode {
            ListMode::History => None,
            ListMode::Results => self.results.get(row - history_rows).map(|p| (RowOrigin::Result, p)),
        }
    }

    /// Computes a renderable view model from the current state.
    ///
    /// Rows are hidden while a fresh search is loading or after an error, the
    /// way the list is hidden behind a spinner or error message.
    #[must_use]
    pub fn compute_viewmodel(&self) -> SessionViewModel {
        let show_rows = self.rows_visible();

        let rows: Vec<RowItem> = if show_rows {
            (0..self.row_count())
                .filter_map(|index| self.row_at(index).map(|(origin, photo)| RowItem::new(index, origin, photo)))
                .collect()
        } else {
            Vec::new()
        };

        let status = match &self.view_state {
            ViewState::Loading => Some(StatusLine::loading("Searching...")),
            ViewState::LoadingMore => Some(StatusLine::loading("Loading more...")),
            ViewState::Error(message) => Some(StatusLine::error(message.clone())),
            ViewState::Content => None,
        };

        let empty_state = if show_rows && rows.is_empty() && status.is_none() {
            Some(self.compute_empty_state())
        } else {
            None
        };

        SessionViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.query.clone(),
            },
            status,
            rows,
            columns: self.layout_mode.columns(),
            empty_state,
            footer: Self::compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.list_mode {
            ListMode::History => format!(" Recent ({}) ", self.filtered_history.len()),
            ListMode::Results => format!(
                " Results for \"{}\" ({}) ",
                self.query.trim(),
                self.results.len()
            ),
        };
        HeaderInfo {
            title,
            subtitle: format!("sort: {}  layout: {} col", self.sort_mode, self.layout_mode.columns()),
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        match self.list_mode {
            ListMode::History => EmptyState {
                message: "No recent photos".to_string(),
                subtitle: "Type a query to search".to_string(),
            },
            ListMode::Results => EmptyState {
                message: "No photos found".to_string(),
                subtitle: "Try another query or sort order".to_string(),
            },
        }
    }

    fn compute_footer() -> FooterInfo {
        FooterInfo {
            keybindings: ":open N  :more  :sort popularity|date  :layout  :quit  (empty line clears)".to_string(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

//! View model types representing renderable session state.
//!
//! View models are computed from [`SessionState`](crate::app::SessionState)
//! via `compute_viewmodel()` and consumed by the renderer. They contain no
//! business logic, only display-ready data.
//!
//! # Example
//!
//! ```
//! use photoscout::app::SessionState;
//!
//! let state = SessionState::default();
//! let vm = state.compute_viewmodel();
//! assert!(vm.rows.is_empty());
//! assert!(vm.status.is_some()); // initial state is loading
//! ```

use crate::domain::{Photo, SIZE_SMALL};

/// Longest title shown for a row before truncation.
const MAX_TITLE_CHARS: usize = 48;

/// Complete view model for one frame.
#[derive(Debug, Clone)]
pub struct SessionViewModel {
    /// Header information (list title, sort and layout summary).
    pub header: HeaderInfo,

    /// The query as typed.
    pub search_bar: SearchBarInfo,

    /// Loading or error line, absent when content is up to date.
    pub status: Option<StatusLine>,

    /// Rows in display order; `index` is what result selection expects.
    pub rows: Vec<RowItem>,

    /// Number of grid columns requested by the layout mode.
    pub columns: usize,

    /// Optional empty state message (when there is nothing to list).
    pub empty_state: Option<EmptyState>,

    /// Footer information (command help).
    pub footer: FooterInfo,
}

/// Where a row's photo comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrigin {
    History,
    Result,
}

/// Display information for a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowItem {
    /// Row index in the session's row space.
    pub index: usize,
    pub origin: RowOrigin,
    /// Description, or a placeholder when the photo has none.
    pub title: String,
    pub author: String,
    /// Small-size URL used as a thumbnail, when available.
    pub thumbnail: Option<String>,
}

impl RowItem {
    #[must_use]
    pub fn new(index: usize, origin: RowOrigin, photo: &Photo) -> Self {
        let title = photo
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map_or_else(|| "(untitled)".to_string(), truncate_chars);

        Self {
            index,
            origin,
            title,
            author: photo.author_name().to_string(),
            thumbnail: photo.url(SIZE_SMALL).map(str::to_string),
        }
    }
}

fn truncate_chars(text: &str) -> String {
    if text.chars().count() > MAX_TITLE_CHARS {
        let kept: String = text.chars().take(MAX_TITLE_CHARS - 3).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
}

/// Status line shown above the rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
}

impl StatusLine {
    #[must_use]
    pub fn loading(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Loading,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
    /// Sort and layout summary.
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Command help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "No photos found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current query text.
    pub query: String,
}

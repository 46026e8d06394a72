//! Mode and view-state enums for the search session.
//!
//! These types determine what the list shows, how results are ordered by the
//! API, how many columns the presentation layer lays out, and which status the
//! presentation layer renders.
//!
//! # State Machine
//!
//! The list operates in one of two modes:
//! - **History**: Only the (filtered) recent-history entries are listed
//! - **Results**: Filtered history first, then accumulated search results
//!
//! The [`ViewState`] moves between `Loading`, `LoadingMore`, `Content` and
//! `Error` as requests start and complete.

use std::fmt;

/// Result ordering requested from the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Most popular photos first (API value `relevant`).
    #[default]
    Popularity,
    /// Newest photos first (API value `latest`).
    Date,
}

impl SortMode {
    /// The `order_by` value understood by the Unsplash search endpoint.
    #[must_use]
    pub const fn as_api_str(self) -> &'static str {
        match self {
            Self::Popularity => "relevant",
            Self::Date => "latest",
        }
    }

    /// Parses the user-facing name (`popularity` or `date`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "popularity" | "popular" | "relevant" => Some(Self::Popularity),
            "date" | "latest" | "newest" => Some(Self::Date),
            _ => None,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Popularity => f.write_str("popularity"),
            Self::Date => f.write_str("date"),
        }
    }
}

/// Grid layout of the result list. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    OneColumn,
    #[default]
    TwoColumns,
}

impl LayoutMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::OneColumn => Self::TwoColumns,
            Self::TwoColumns => Self::OneColumn,
        }
    }

    #[must_use]
    pub const fn columns(self) -> usize {
        match self {
            Self::OneColumn => 1,
            Self::TwoColumns => 2,
        }
    }
}

/// Whether the list is showing history only or history plus results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Query text is empty; rows are the filtered history.
    History,
    /// Query text is set; rows are filtered history followed by results.
    Results,
}

/// What the presentation layer should render.
///
/// The initial state is `Loading`; persisted history loading moves it to
/// `Content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// A fresh (page 1) search is running.
    Loading,
    /// A follow-up page is being fetched; existing rows stay visible.
    LoadingMore,
    /// Rows are up to date.
    Content,
    /// The last request failed; carries the message shown to the user.
    Error(String),
}

//! Search API abstraction.
//!
//! The session never talks HTTP directly. The worker holds a
//! [`SearchApi`] trait object, so tests can script responses and the
//! terminal front-end plugs in [`UnsplashClient`].

pub mod unsplash;

pub use unsplash::{parse_photo_body, parse_search_body, UnsplashClient, DEFAULT_API_BASE_URL};

use crate::app::SortMode;
use crate::domain::error::Result;
use crate::domain::Photo;

/// Number of results requested per page.
pub const PAGE_SIZE: u32 = 30;

/// Remote photo search service.
///
/// # Errors
///
/// Implementations report unreachable services and failure statuses as
/// [`PhotoscoutError::Transport`](crate::PhotoscoutError::Transport) and
/// malformed bodies as [`PhotoscoutError::Decode`](crate::PhotoscoutError::Decode).
#[async_trait::async_trait]
pub trait SearchApi: Send + Sync {
    /// Fetches one page of results for `query`, `page` being 1-based.
    async fn search(&self, query: &str, sort: SortMode, page: u32) -> Result<Vec<Photo>>;

    /// Fetches the full record for one photo.
    async fn fetch_details(&self, id: &str) -> Result<Photo>;
}

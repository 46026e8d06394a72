//! Unsplash HTTP client.
//!
//! Endpoints used:
//!
//! - `GET {base}/search/photos?query&order_by&page&per_page` returning `{ "results": [Photo] }`
//! - `GET {base}/photos/{id}` returning a single `Photo`
//!
//! Failure statuses carry `{ "errors": ["..."] }`, whose messages become the
//! user-visible error text.

use crate::api::{SearchApi, PAGE_SIZE};
use crate::app::SortMode;
use crate::domain::error::{PhotoscoutError, Result};
use crate::domain::Photo;
use serde::Deserialize;
use std::time::Duration;

/// Production API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.unsplash.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// Client for the Unsplash REST API.
pub struct UnsplashClient {
    http: reqwest::Client,
    base_url: String,
    access_key: String,
}

impl UnsplashClient {
    /// Builds a client with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoscoutError::Config`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, access_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PhotoscoutError::Config(format!("http client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
        })
    }

    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<(u16, String)> {
        let resp = self
            .http
            .get(url)
            .query(query)
            .header("Accept-Version", "v1")
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .send()
            .await
            .map_err(|e| PhotoscoutError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| PhotoscoutError::Transport(e.to_string()))?;
        Ok((status, body))
    }
}

#[async_trait::async_trait]
impl SearchApi for UnsplashClient {
    async fn search(&self, query: &str, sort: SortMode, page: u32) -> Result<Vec<Photo>> {
        let url = format!("{}/search/photos", self.base_url);
        tracing::debug!(%query, sort = sort.as_api_str(), page, "searching photos");

        let (status, body) = self
            .get(
                &url,
                &[
                    ("query", query.to_string()),
                    ("order_by", sort.as_api_str().to_string()),
                    ("page", page.to_string()),
                    ("per_page", PAGE_SIZE.to_string()),
                ],
            )
            .await?;
        parse_search_body(status, &body)
    }

    async fn fetch_details(&self, id: &str) -> Result<Photo> {
        let url = format!("{}/photos/{id}", self.base_url);
        tracing::debug!(%id, "fetching photo details");

        let (status, body) = self.get(&url, &[]).await?;
        parse_photo_body(status, &body)
    }
}

fn failure_from(status: u16, body: &str) -> PhotoscoutError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .filter(|b| !b.errors.is_empty())
        .map_or_else(|| format!("HTTP {status}"), |b| b.errors.join(", "));
    PhotoscoutError::Transport(message)
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Interprets a search response.
///
/// # Errors
///
/// Returns [`PhotoscoutError::Transport`] for non-2xx statuses and
/// [`PhotoscoutError::Decode`] for bodies without a usable `results` list.
///
/// # Examples
///
/// ```
/// use photoscout::api::parse_search_body;
///
/// let body = r#"{"total":1,"results":[{"id":"a","urls":{"small":"s"},"user":{"name":"Ana"}}]}"#;
/// let photos = parse_search_body(200, body)?;
/// assert_eq!(photos[0].id, "a");
/// # Ok::<(), photoscout::PhotoscoutError>(())
/// ```
pub fn parse_search_body(status: u16, body: &str) -> Result<Vec<Photo>> {
    if !is_success(status) {
        return Err(failure_from(status, body));
    }
    serde_json::from_str::<SearchResponse>(body)
        .map(|r| r.results)
        .map_err(|e| PhotoscoutError::Decode(e.to_string()))
}

/// Interprets a single-photo response.
///
/// # Errors
///
/// Same mapping as [`parse_search_body`].
pub fn parse_photo_body(status: u16, body: &str) -> Result<Photo> {
    if !is_success(status) {
        return Err(failure_from(status, body));
    }
    serde_json::from_str::<Photo>(body).map_err(|e| PhotoscoutError::Decode(e.to_string()))
}

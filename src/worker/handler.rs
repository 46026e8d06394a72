//! Search worker implementation.
//!
//! The worker turns a [`WorkerMessage`] into a single [`WorkerResponse`] by
//! calling the [`SearchApi`]. It never touches session state; the runtime
//! spawns each message on a tokio task and feeds the response back into the
//! event handler.

use crate::api::SearchApi;
use crate::app::SortMode;
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;

/// Stateless executor for worker messages.
///
/// Cheap to clone; clones share the API client.
#[derive(Clone)]
pub struct SearchWorker {
    api: Arc<dyn SearchApi>,
}

impl SearchWorker {
    #[must_use]
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        Self { api }
    }

    /// Standardizes logging for an API call and maps failures to a response.
    fn handle_api_result<T, F, E>(operation: &str, result: Result<T>, on_success: F, on_error: E) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
        E: FnOnce(String) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "api call successful");
                on_success(value)
            }
            Err(e) => {
                if e.is_user_visible() {
                    tracing::warn!(operation = operation, error = %e, "api call failed");
                } else {
                    tracing::error!(operation = operation, error = %e, "api call failed unexpectedly");
                }
                on_error(e.user_message())
            }
        }
    }

    async fn handle_search(&self, generation: u64, query: String, sort: SortMode, page: u32, reset: bool) -> WorkerResponse {
        Self::handle_api_result(
            "search",
            self.api.search(&query, sort, page).await,
            |photos| {
                tracing::debug!(generation, page, count = photos.len(), "page received");
                WorkerResponse::PageLoaded {
                    generation,
                    page,
                    reset,
                    photos,
                }
            },
            |message| WorkerResponse::SearchFailed {
                generation,
                page,
                reset,
                message,
            },
        )
    }

    async fn handle_fetch_details(&self, id: String) -> WorkerResponse {
        let result = self.api.fetch_details(&id).await;
        Self::handle_api_result(
            "fetch details",
            result,
            |photo| WorkerResponse::DetailsLoaded { photo },
            |message| WorkerResponse::DetailsFailed { id, message },
        )
    }

    /// Executes a message and returns its completion.
    ///
    /// Always produces exactly one response, failures included.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        match message {
            WorkerMessage::Search {
                generation,
                query,
                sort,
                page,
                reset,
            } => self.handle_search(generation, query, sort, page, reset).await,

            WorkerMessage::FetchDetails { id } => self.handle_fetch_details(id).await,
        }
    }
}

//! Background worker for search API calls.
//!
//! This module keeps network I/O off the session's control loop. The runtime
//! hands each outgoing request to the worker on its own tokio task and routes
//! the completion back as an event.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types tagged with the request generation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::SearchWorker;
pub use messages::{WorkerMessage, WorkerResponse};

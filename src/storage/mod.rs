//! Storage layer for the persisted recent-history list.
//!
//! # Modules
//!
//! - `backend`: [`HistoryStore`] trait abstraction for backend implementations
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: In-process implementation
//! - `models`: On-disk envelope types separate from domain models

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::HistoryStore;
pub use json::JsonHistoryStore;
pub use memory::MemoryHistoryStore;
pub use models::{HistoryDocument, HistoryFile, HISTORY_FORMAT_VERSION};

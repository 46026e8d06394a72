//! Domain layer for photoscout.
//!
//! This module contains the core domain types, independent of the HTTP
//! transport, the storage backend and the terminal front-end.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`photo`]: Photo record and detail payload

pub mod error;
pub mod photo;

pub use error::{PhotoscoutError, Result};
pub use photo::{Author, Photo, PhotoDetail, SIZE_REGULAR, SIZE_SMALL};

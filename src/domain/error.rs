//! Error types for photoscout.
//!
//! This module defines the centralized error type [`PhotoscoutError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! # Propagation
//!
//! - [`PhotoscoutError::Transport`] and [`PhotoscoutError::Decode`] reach the user as
//!   an error view state carrying [`PhotoscoutError::user_message`].
//! - [`PhotoscoutError::Persistence`] is logged and swallowed by the runtime.
//! - [`PhotoscoutError::Input`] means no request was issued for the event.

use thiserror::Error;

/// The main error type for photoscout operations.
///
/// # Examples
///
/// ```
/// use photoscout::PhotoscoutError;
///
/// let err = PhotoscoutError::Transport("connection reset".to_string());
/// assert_eq!(err.user_message(), "connection reset");
/// assert_eq!(err.to_string(), "Transport error: connection reset");
/// ```
#[derive(Debug, Error)]
pub enum PhotoscoutError {
    /// The search API could not be reached or answered with a failure status.
    ///
    /// The string is the human-readable description reported by the transport
    /// or by the API's `errors` payload.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The search API answered with a body that does not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Reading or writing the persisted history failed.
    ///
    /// Never fatal: the session degrades to empty or unsaved history.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// An event carried input the session cannot act on, such as a blank
    /// query or a row index past the end of the list.
    #[error("Input error: {0}")]
    Input(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PhotoscoutError {
    /// Returns the message shown to the user, without the variant prefix.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(msg)
            | Self::Decode(msg)
            | Self::Persistence(msg)
            | Self::Input(msg)
            | Self::Config(msg) => msg.clone(),
            Self::Io(e) => e.to_string(),
        }
    }

    /// Whether this error should be surfaced as an error view state.
    #[must_use]
    pub const fn is_user_visible(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }
}

/// A specialized `Result` type for photoscout operations.
pub type Result<T> = std::result::Result<T, PhotoscoutError>;

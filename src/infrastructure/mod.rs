//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves where photoscout keeps its history, traces and
//! configuration on the host.

pub mod paths;

pub use paths::{config_file, expand_tilde, get_data_dir, history_file, trace_file};

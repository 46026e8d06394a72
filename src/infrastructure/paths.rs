//! Filesystem locations used by photoscout.
//!
//! Data lives under the platform data directory (`~/.local/share/photoscout`
//! on Linux) and configuration under the platform config directory
//! (`~/.config/photoscout`). When the platform directory cannot be resolved,
//! paths fall back to the current directory.

use std::path::PathBuf;

const APP_DIR: &str = "photoscout";

/// Returns the data directory holding the history and trace files.
///
/// # Examples
///
/// ```
/// use photoscout::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("photoscout"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default location of the persisted history.
#[must_use]
pub fn history_file() -> PathBuf {
    get_data_dir().join("history.json")
}

/// Default location of the OTLP trace file.
#[must_use]
pub fn trace_file() -> PathBuf {
    get_data_dir().join("traces.jsonl")
}

/// Default location of the optional TOML config file.
#[must_use]
pub fn config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, or when no home directory is known, are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use photoscout::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

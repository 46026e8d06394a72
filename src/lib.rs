//! Photoscout: a search session controller for the Unsplash photo API.
//!
//! Photoscout turns a stream of keystrokes and scroll/selection events into
//! debounced, paginated photo searches, and keeps a short persisted list of
//! recently opened photos:
//! - Debounced querying with stale-response protection
//! - Incremental paging with at most one request in flight
//! - Popularity or date sort order
//! - A bounded, most-recent-first history saved to disk
//! - A line-oriented terminal front-end
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front-end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← Control loop
//! │  - Debounce timer                                   │
//! │  - Action execution                                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - JSON I/O    │   │ - API calls   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                  │
//!                                          ┌───────────────┐
//!                                          │ API (api/)    │
//!                                          │ - Unsplash    │
//!                                          └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Search API trait and the Unsplash HTTP client
//! - [`app`]: Session state machine with event/action model
//! - [`domain`]: Core domain types (Photo, errors)
//! - [`infrastructure`]: Platform paths
//! - [`runtime`]: Async control loop and debounce timer
//! - [`storage`]: History persistence
//! - [`worker`]: Background execution of API requests
//! - [`ui`]: View models and text rendering
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! Settings come from `~/.config/photoscout/config.toml` (all keys optional):
//!
//! ```toml
//! access_key = "..."
//! api_base_url = "https://api.unsplash.com"
//! history_file = "~/.local/share/photoscout/history.json"
//! debounce_ms = 300
//! max_history = 5
//! request_timeout_secs = 10
//! trace_level = "info"
//! ```
//!
//! The access key can also be given with `UNSPLASH_ACCESS_KEY`.
//!
//! # Example
//!
//! ```
//! use photoscout::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! handle_event(&mut state, &Event::HistoryLoaded(vec![]))?;
//! let (_, actions) = handle_event(&mut state, &Event::QueryTextChanged("fox".into()))?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), photoscout::PhotoscoutError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, Event, LayoutMode, ListMode, SessionState, SortMode, ViewState};
pub use domain::{Photo, PhotoDetail, PhotoscoutError, Result};
pub use runtime::{DispatchOutcome, SessionRuntime};

use api::{SearchApi, UnsplashClient, DEFAULT_API_BASE_URL};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::JsonHistoryStore;
use worker::SearchWorker;

/// Environment variable holding the Unsplash access key.
pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the search API. Default: `https://api.unsplash.com`
    pub api_base_url: String,

    /// Unsplash access key sent as `Authorization: Client-ID <key>`.
    pub access_key: Option<String>,

    /// Where the recent-history list is stored.
    pub history_file: PathBuf,

    /// Quiet period after the last keystroke before searching. Default: 300
    pub debounce_ms: u64,

    /// Maximum number of history entries. Default: 5
    pub max_history: usize,

    /// Per-request timeout. Default: 10
    pub request_timeout_secs: u64,

    /// Tracing level for exported spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            access_key: None,
            history_file: infrastructure::history_file(),
            debounce_ms: 300,
            max_history: app::DEFAULT_MAX_HISTORY,
            request_timeout_secs: 10,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a flat key/value map.
    ///
    /// Missing or unparsable values fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use photoscout::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "150".to_string());
    /// map.insert("max_history".to_string(), "not a number".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.debounce_ms, 150);
    /// assert_eq!(config.max_history, 5);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        Self {
            api_base_url: non_empty("api_base_url").map_or(defaults.api_base_url, str::to_string),
            access_key: non_empty("access_key").map(str::to_string),
            history_file: non_empty("history_file").map_or(defaults.history_file, infrastructure::expand_tilde),
            debounce_ms: non_empty("debounce_ms")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.debounce_ms),
            max_history: non_empty("max_history")
                .and_then(|s| s.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.max_history),
            request_timeout_secs: non_empty("request_timeout_secs")
                .and_then(|s| s.parse().ok())
                .filter(|n: &u64| *n > 0)
                .unwrap_or(defaults.request_timeout_secs),
            trace_level: non_empty("trace_level").map(str::to_string),
        }
    }

    /// Parses a TOML document, flattening top-level scalars into the map
    /// understood by [`from_map`](Self::from_map).
    ///
    /// # Errors
    ///
    /// Returns [`PhotoscoutError::Config`] if the document is not valid TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: toml::Table =
            toml::from_str(contents).map_err(|e| PhotoscoutError::Config(format!("invalid config: {e}")))?;

        let map = table
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    _ => return None,
                };
                Some((key, text))
            })
            .collect();

        Ok(Self::from_map(&map))
    }

    /// Loads the config file at `path`, or defaults if it does not exist,
    /// then applies the access key from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            tracing::debug!(path = ?path, "loading config file");
            Self::from_toml_str(&std::fs::read_to_string(path)?)?
        } else {
            Self::default()
        };
        Ok(config.with_env_access_key(std::env::var(ACCESS_KEY_ENV).ok()))
    }

    /// Overrides the access key with `key` when it is non-empty.
    #[must_use]
    pub fn with_env_access_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.access_key = Some(key);
        }
        self
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Creates the initial session state for `config`.
///
/// The state starts in `Loading` until the persisted history is delivered.
#[must_use]
pub fn initialize(config: &Config) -> SessionState {
    tracing::debug!(max_history = config.max_history, debounce_ms = config.debounce_ms, "initializing session");
    SessionState::new(config.max_history).with_debounce(config.debounce())
}

/// Wires a runtime with the given API client and the JSON history store.
///
/// # Errors
///
/// Returns an error if the history directory cannot be created.
pub fn build_runtime_with_api(config: &Config, api: Arc<dyn SearchApi>) -> Result<SessionRuntime> {
    let store = JsonHistoryStore::new(config.history_file.clone())?;
    Ok(SessionRuntime::new(initialize(config), Box::new(store), SearchWorker::new(api)))
}

/// Wires a runtime talking to Unsplash.
///
/// # Errors
///
/// Returns [`PhotoscoutError::Config`] without an access key or if the HTTP
/// client cannot be built, and I/O errors from the history store.
pub fn build_runtime(config: &Config) -> Result<SessionRuntime> {
    let key = config.access_key.as_deref().ok_or_else(|| {
        PhotoscoutError::Config(format!("no access key: set access_key in the config file or {ACCESS_KEY_ENV}"))
    })?;
    let client = UnsplashClient::new(&config.api_base_url, key, config.request_timeout())?;
    build_runtime_with_api(config, Arc::new(client))
}

//! Application layer coordinating session state, events, and actions.
//!
//! This module defines the search session controller, sitting between the
//! presentation layer (main.rs), the session runtime and the
//! domain/storage/worker layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Timer ticks / Worker Responses ┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Sort, layout, list and view-state types
//! - [`state`]: Session state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{LayoutMode, ListMode, SortMode, ViewState};
pub use state::{InFlight, SessionState, DEFAULT_DEBOUNCE, DEFAULT_MAX_HISTORY};

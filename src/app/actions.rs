//! Actions representing side effects to be executed by the session runtime.
//!
//! This module defines the [`Action`] type, the imperative commands produced by
//! the event handler after processing user input, timer ticks or worker
//! completions. Actions bridge pure state transitions and effectful operations
//! like scheduling the debounce timer, talking to the search API or writing
//! the history file.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, so
//! several side effects can be queued atomically. The runtime executes them in
//! order; completions re-enter the handler as events.
//!
//! # Example
//!
//! ```
//! use photoscout::app::{Action, SortMode};
//! use photoscout::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::CancelDebounce,
//!     Action::PostToWorker(WorkerMessage::search(1, "cats", SortMode::Popularity, 1, true)),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::domain::{Photo, PhotoDetail};
use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replaces the pending debounce timer with a new one.
    ///
    /// When `delay` elapses the runtime feeds `Event::DebounceElapsed { token }`
    /// back into the handler. Any earlier timer is cancelled first.
    ScheduleDebounce {
        /// Token identifying this timer; stale tokens are ignored.
        token: u64,
        /// Time to wait before firing.
        delay: Duration,
    },

    /// Cancels the pending debounce timer, if any.
    CancelDebounce,

    /// Hands a request to the background search worker.
    ///
    /// The worker's completion re-enters the handler as
    /// `Event::WorkerResponse`.
    PostToWorker(WorkerMessage),

    /// Overwrites the persisted history with the given list.
    ///
    /// Best-effort: the runtime logs failures and carries on.
    PersistHistory(Vec<Photo>),

    /// Asks the presentation layer to show the detail view for a photo.
    ShowDetail(PhotoDetail),
}

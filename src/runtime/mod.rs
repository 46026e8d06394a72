//! Async runtime around the session reducer.
//!
//! - `debounce`: single-slot cancelable timer
//! - `session`: control loop executing handler actions

pub mod debounce;
pub mod session;

pub use debounce::Debouncer;
pub use session::{DispatchOutcome, SessionRuntime};

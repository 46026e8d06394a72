//! Presentation layer: view models and their text rendering.
//!
//! ```text
//! SessionState → compute_viewmodel → SessionViewModel → render → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready types computed from session state
//! - [`renderer`]: Frame and detail rendering
//! - [`style`]: ANSI or plain styling
//! - [`input`]: Mapping of typed lines to session events

pub mod input;
pub mod renderer;
pub mod style;
pub mod viewmodel;

pub use input::{parse_line, Command};
pub use renderer::{render, render_detail};
pub use style::Style;
pub use viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, RowItem, RowOrigin, SearchBarInfo, SessionViewModel, StatusKind, StatusLine,
};

//! ANSI styling for terminal output.
//!
//! Rendering goes through a [`Style`] so the same renderer can produce
//! colored output for a terminal and plain text for pipes and tests.

/// Escape sequences used by the renderer.
const BOLD: &str = "\u{001b}[1m";
const DIM: &str = "\u{001b}[2m";
const RED: &str = "\u{001b}[31m";
const CYAN: &str = "\u{001b}[36m";
const RESET: &str = "\u{001b}[0m";

/// Output styling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    ansi: bool,
}

impl Style {
    /// Styling with ANSI escape sequences.
    #[must_use]
    pub const fn ansi() -> Self {
        Self { ansi: true }
    }

    /// No escape sequences at all.
    #[must_use]
    pub const fn plain() -> Self {
        Self { ansi: false }
    }

    fn wrap(self, code: &str, text: &str) -> String {
        if self.ansi {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    #[must_use]
    pub fn bold(self, text: &str) -> String {
        self.wrap(BOLD, text)
    }

    #[must_use]
    pub fn dim(self, text: &str) -> String {
        self.wrap(DIM, text)
    }

    #[must_use]
    pub fn error(self, text: &str) -> String {
        self.wrap(RED, text)
    }

    #[must_use]
    pub fn accent(self, text: &str) -> String {
        self.wrap(CYAN, text)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::ansi()
    }
}

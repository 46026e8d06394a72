//! Terminal front-end and entry point.
//!
//! A thin presentation layer over the session runtime: it reads lines from
//! stdin, maps them to events, and redraws the frame whenever the session
//! asks for it.
//!
//! # Commands
//!
//! - any text: search for it (debounced)
//! - empty line: clear the query and show recent photos
//! - `:sort popularity|date`: change the sort order
//! - `:more`: load the next page
//! - `:open N`: open row `N` (also adds it to recent photos)
//! - `:layout`: toggle one/two columns
//! - `:quit`: exit
//!
//! # Event Loop
//!
//! ```text
//! stdin lines ──┐
//!               ├─ select! ─→ SessionRuntime::dispatch ─→ render
//! runtime events┘            (debounce ticks, worker completions)
//! ```

#![allow(clippy::multiple_crate_versions)]

use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

use photoscout::infrastructure::paths;
use photoscout::ui::{self, Command, Style};
use photoscout::{build_runtime, Config, DispatchOutcome, Event, PhotoscoutError, SessionRuntime};

/// Fallback width when the terminal size is unknown.
const DEFAULT_WIDTH: usize = 100;

struct Frontend {
    style: Style,
    width: usize,
}

impl Frontend {
    fn from_env() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|c| c.parse().ok())
            .unwrap_or(DEFAULT_WIDTH);
        let style = if std::io::stdout().is_terminal() {
            Style::ansi()
        } else {
            Style::plain()
        };
        Self { style, width }
    }

    fn present(&self, runtime: &SessionRuntime, outcome: &DispatchOutcome) {
        let mut stdout = std::io::stdout().lock();
        if outcome.render {
            let frame = ui::render(&runtime.view_model(), self.style, self.width);
            let _ = writeln!(stdout, "\n{frame}");
        }
        for detail in &outcome.details {
            let _ = writeln!(stdout, "\n{}", ui::render_detail(detail, self.style));
        }
        let _ = stdout.flush();
    }

    fn report(&self, error: &PhotoscoutError) {
        let _ = writeln!(std::io::stdout().lock(), "{}", self.style.error(&error.user_message()));
    }

    fn handle(&self, runtime: &mut SessionRuntime, event: Event) {
        match runtime.dispatch(event) {
            Ok(outcome) => self.present(runtime, &outcome),
            Err(e) => {
                tracing::debug!(error = %e, "event rejected");
                self.report(&e);
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load(&paths::config_file()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("photoscout: {e}");
            return ExitCode::FAILURE;
        }
    };
    photoscout::observability::init_tracing(&config);

    tracing::info!(history_file = ?config.history_file, "session starting");

    let mut runtime = match build_runtime(&config) {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("photoscout: {e}");
            return ExitCode::FAILURE;
        }
    };

    let frontend = Frontend::from_env();
    match runtime.start() {
        Ok(outcome) => frontend.present(&runtime, &outcome),
        Err(e) => frontend.report(&e),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match ui::parse_line(&line) {
                    Command::Quit => break,
                    Command::Event(event) => frontend.handle(&mut runtime, event),
                    Command::Invalid(message) => frontend.report(&PhotoscoutError::Input(message)),
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read input");
                    break;
                }
            },
            processed = runtime.process_next() => match processed {
                Ok(Some(outcome)) => frontend.present(&runtime, &outcome),
                Ok(None) => break,
                Err(e) => frontend.report(&e),
            },
        }
    }

    tracing::info!("session ended");
    ExitCode::SUCCESS
}

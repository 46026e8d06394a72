//! Line-oriented input mapping for the terminal front-end.
//!
//! Every line the user enters is either a `:command` or the new query text.

use crate::app::{Event, SortMode};

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Feed this event to the session.
    Event(Event),
    /// Leave the program.
    Quit,
    /// Unrecognized or malformed command, with a message for the user.
    Invalid(String),
}

/// Maps one input line to a [`Command`].
///
/// # Examples
///
/// ```
/// use photoscout::app::{Event, SortMode};
/// use photoscout::ui::input::{parse_line, Command};
///
/// assert_eq!(parse_line("red fox"), Command::Event(Event::QueryTextChanged("red fox".into())));
/// assert_eq!(parse_line(":sort date"), Command::Event(Event::SortModeChanged(SortMode::Date)));
/// assert_eq!(parse_line(":open 2"), Command::Event(Event::ResultSelected(2)));
/// ```
#[must_use]
pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(command) = line.trim_start().strip_prefix(':') else {
        return Command::Event(Event::QueryTextChanged(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("q" | "quit"), None) => Command::Quit,
        (Some("more"), None) => Command::Event(Event::ScrolledNearBottom),
        (Some("layout"), None) => Command::Event(Event::ToggleLayout),
        (Some("sort"), Some(name)) => SortMode::parse(name).map_or_else(
            || Command::Invalid(format!("unknown sort order '{name}', use popularity or date")),
            |mode| Command::Event(Event::SortModeChanged(mode)),
        ),
        (Some("open"), Some(index)) => index.parse::<usize>().map_or_else(
            |_| Command::Invalid(format!("'{index}' is not a row number")),
            |row| Command::Event(Event::ResultSelected(row)),
        ),
        _ => Command::Invalid(format!("unknown command ':{command}'")),
    }
}

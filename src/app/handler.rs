//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input, timer
//! ticks and worker completions, translating them into state changes and
//! action sequences. It is the only place session state is mutated.
//!
//! # Architecture
//!
//! 1. Events arrive from the presentation layer, the debounce timer or the worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `SessionState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Input**: `QueryTextChanged`, `SortModeChanged`, `ScrolledNearBottom`,
//!   `ResultSelected`, `ToggleLayout`
//! - **Lifecycle**: `HistoryLoaded`
//! - **Timer**: `DebounceElapsed`
//! - **Worker**: `WorkerResponse` with typed completion variants
//!
//! # Example
//!
//! ```
//! use photoscout::app::{handle_event, Action, Event, SessionState};
//!
//! let mut state = SessionState::default();
//! let (render, actions) = handle_event(&mut state, &Event::QueryTextChanged("cats".into()))?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::ScheduleDebounce { .. }));
//! # Ok::<(), photoscout::PhotoscoutError>(())
//! ```

use super::modes::{ListMode, SortMode, ViewState};
use crate::app::{Action, SessionState};
use crate::domain::error::{PhotoscoutError, Result};
use crate::domain::Photo;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, timers or worker completions.
///
/// The handler processes these sequentially on the session's control loop,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The query text changed. Restarts the debounce window.
    QueryTextChanged(String),

    /// The debounce timer identified by `token` fired.
    DebounceElapsed {
        token: u64,
    },

    /// The user picked a different sort order.
    SortModeChanged(SortMode),

    /// The list was scrolled close to its end.
    ScrolledNearBottom,

    /// The user selected the row at this index.
    ResultSelected(usize),

    /// Switches between one- and two-column layout.
    ToggleLayout,

    /// Persisted history was read at session start.
    HistoryLoaded(Vec<Photo>),

    /// Wraps a completion from the background search worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates session state, and returns actions to execute.
///
/// Returns whether the presentation layer should re-render, plus the actions
/// to execute in order.
///
/// # Errors
///
/// Returns [`PhotoscoutError::Input`] when a selection refers to a row that
/// does not exist or is not shown (while loading a fresh search or after an
/// error). State is left untouched in that case.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut SessionState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::QueryTextChanged(text) => {
            state.query.clone_from(text);
            state.apply_history_filter();

            if state.has_query() {
                state.list_mode = ListMode::Results;
                let token = state.next_debounce_token();
                tracing::trace!(query = %state.query, token = token, "debounce restarted");
                Ok((true, vec![Action::ScheduleDebounce {
                    token,
                    delay: state.debounce,
                }]))
            } else {
                tracing::debug!("query cleared, showing history");
                state.next_debounce_token();
                state.supersede();
                state.queued_reset = false;
                state.reset_query_results();
                state.active_query.clear();
                state.pending_detail = None;
                state.list_mode = ListMode::History;
                state.view_state = ViewState::Content;
                Ok((true, vec![Action::CancelDebounce]))
            }
        }
        Event::DebounceElapsed { token } => {
            if *token != state.debounce_token {
                tracing::trace!(token = token, current = state.debounce_token, "stale debounce tick ignored");
                return Ok((false, vec![]));
            }
            if !state.has_query() {
                return Ok((false, vec![]));
            }
            let actions = state
                .start_search(true)
                .map(Action::PostToWorker)
                .into_iter()
                .collect();
            Ok((true, actions))
        }
        Event::SortModeChanged(mode) => {
            state.sort_mode = *mode;
            if !state.has_query() {
                tracing::debug!(sort = %mode, "sort changed without query, no request");
                return Ok((true, vec![]));
            }
            let actions = state
                .start_search(true)
                .map(Action::PostToWorker)
                .into_iter()
                .collect();
            Ok((true, actions))
        }
        Event::ScrolledNearBottom => {
            if state.list_mode == ListMode::History || state.in_flight.is_some() || !state.has_query() {
                return Ok((false, vec![]));
            }
            if state.query_edited() {
                tracing::trace!(query = %state.query, "scroll ignored, search for edited text pending");
                return Ok((false, vec![]));
            }
            let actions: Vec<Action> = state
                .start_search(false)
                .map(Action::PostToWorker)
                .into_iter()
                .collect();
            Ok((!actions.is_empty(), actions))
        }
        Event::ResultSelected(row) => {
            if !state.rows_visible() {
                return Err(PhotoscoutError::Input(format!("row {row} is not shown")));
            }
            let Some((_, photo)) = state.row_at(*row) else {
                return Err(PhotoscoutError::Input(format!(
                    "row {row} out of range ({} rows)",
                    state.row_count()
                )));
            };
            let photo = photo.clone();
            let detail = photo.detail();

            tracing::debug!(photo_id = %photo.id, row = row, "photo selected");

            state.record_selection(photo);

            let mut actions = vec![
                Action::PersistHistory(state.history.clone()),
                Action::ShowDetail(detail.clone()),
            ];
            state.pending_detail = None;
            if detail.image_url.is_none() {
                tracing::debug!(photo_id = %detail.id, "no regular url, fetching details");
                state.pending_detail = Some(detail.id.clone());
                actions.push(Action::PostToWorker(WorkerMessage::fetch_details(detail.id)));
            }
            Ok((true, actions))
        }
        Event::ToggleLayout => {
            state.layout_mode = state.layout_mode.toggled();
            Ok((true, vec![]))
        }
        Event::HistoryLoaded(history) => {
            state.restore_history(history.clone());
            Ok((true, vec![]))
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn handle_worker_response(state: &mut SessionState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::PageLoaded {
            generation,
            page,
            reset,
            photos,
        } => {
            if !state.finish_request(*generation) {
                return Ok(discard_stale(state, *generation));
            }
            tracing::debug!(page = page, count = photos.len(), reset = reset, "page applied");
            state.apply_page(*page, *reset, photos.clone());
            Ok((true, vec![]))
        }
        WorkerResponse::SearchFailed {
            generation,
            page,
            message,
            ..
        } => {
            if !state.finish_request(*generation) {
                return Ok(discard_stale(state, *generation));
            }
            tracing::warn!(page = page, error = %message, "search failed");
            state.view_state = ViewState::Error(message.clone());
            Ok((true, vec![]))
        }
        WorkerResponse::DetailsLoaded { photo } => {
            if !take_pending_detail(state, &photo.id) {
                return Ok((false, vec![]));
            }
            tracing::debug!(photo_id = %photo.id, "details loaded");

            let mut actions = vec![Action::ShowDetail(photo.detail())];
            let merged = state.merge_details(photo);
            if merged {
                actions.push(Action::PersistHistory(state.history.clone()));
            }
            Ok((merged, actions))
        }
        WorkerResponse::DetailsFailed { id, message } => {
            if !take_pending_detail(state, id) {
                return Ok((false, vec![]));
            }
            tracing::warn!(photo_id = %id, error = %message, "detail fetch failed");
            state.view_state = ViewState::Error(message.clone());
            Ok((true, vec![]))
        }
    }
}

/// Clears the awaited detail id if it is `id`.
///
/// Returns `false` for a completion the session no longer waits for.
fn take_pending_detail(state: &mut SessionState, id: &str) -> bool {
    if state.pending_detail.as_deref() != Some(id) {
        tracing::debug!(photo_id = %id, pending = ?state.pending_detail, "stale detail completion discarded");
        return false;
    }
    state.pending_detail = None;
    true
}

/// Drops a completion from a superseded query and issues a queued reset.
fn discard_stale(state: &mut SessionState, generation: u64) -> (bool, Vec<Action>) {
    tracing::debug!(
        stale_generation = generation,
        generation = state.generation,
        "stale completion discarded"
    );

    if state.queued_reset && state.has_query() {
        let actions: Vec<Action> = state
            .start_search(true)
            .map(Action::PostToWorker)
            .into_iter()
            .collect();
        return (true, actions);
    }
    state.queued_reset = false;
    (false, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::LayoutMode;
    use crate::domain::PhotoDetail;

    fn photo(id: &str) -> Photo {
        Photo::new(id, Some(id), "Ana").with_url("regular", format!("https://img/{id}"))
    }

    fn page(prefix: &str, count: usize) -> Vec<Photo> {
        (0..count).map(|i| photo(&format!("{prefix}{i}"))).collect()
    }

    fn handle(state: &mut SessionState, event: Event) -> Vec<Action> {
        handle_event(state, &event).expect("event handled").1
    }

    fn search_message(actions: &[Action]) -> WorkerMessage {
        actions
            .iter()
            .find_map(|a| match a {
                Action::PostToWorker(msg @ WorkerMessage::Search { .. }) => Some(msg.clone()),
                _ => None,
            })
            .expect("search posted")
    }

    fn loaded(state: &mut SessionState, msg: &WorkerMessage, photos: Vec<Photo>) -> Vec<Action> {
        let WorkerMessage::Search { generation, page, reset, .. } = msg else {
            panic!("expected search message");
        };
        handle(
            state,
            Event::WorkerResponse(WorkerResponse::PageLoaded {
                generation: *generation,
                page: *page,
                reset: *reset,
                photos,
            }),
        )
    }

    fn typed(state: &mut SessionState, text: &str) -> WorkerMessage {
        handle(state, Event::QueryTextChanged(text.to_string()));
        let token = state.debounce_token;
        search_message(&handle(state, Event::DebounceElapsed { token }))
    }

    #[test]
    fn only_last_text_in_burst_is_searched() {
        let mut state = SessionState::default();
        let mut tokens = Vec::new();
        for text in ["c", "ca", "cat", "cats"] {
            let actions = handle(&mut state, Event::QueryTextChanged(text.to_string()));
            match actions.as_slice() {
                [Action::ScheduleDebounce { token, .. }] => tokens.push(*token),
                other => panic!("unexpected actions {other:?}"),
            }
        }

        for stale in &tokens[..3] {
            assert!(handle(&mut state, Event::DebounceElapsed { token: *stale }).is_empty());
        }
        let msg = search_message(&handle(&mut state, Event::DebounceElapsed { token: tokens[3] }));
        assert!(matches!(msg, WorkerMessage::Search { ref query, page: 1, .. } if query == "cats"));
    }

    #[test]
    fn text_change_filters_history_immediately() {
        let mut state = SessionState::default();
        handle(
            &mut state,
            Event::HistoryLoaded(vec![Photo::new("1", Some("Black cat"), "Ana"), Photo::new("2", Some("Dog"), "Bo")]),
        );
        handle(&mut state, Event::QueryTextChanged("CAT".to_string()));
        assert_eq!(state.list_mode, ListMode::Results);
        assert_eq!(state.filtered_history.len(), 1);
        assert_eq!(state.filtered_history[0].id, "1");
    }

    #[test]
    fn cats_scenario_pages_through_results() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![]));

        let first = typed(&mut state, "cats");
        assert_eq!(state.view_state, ViewState::Loading);
        loaded(&mut state, &first, page("a", 30));
        assert_eq!(state.view_state, ViewState::Content);
        assert_eq!(state.row_count(), 30);

        let second = search_message(&handle(&mut state, Event::ScrolledNearBottom));
        assert!(matches!(second, WorkerMessage::Search { page: 2, reset: false, .. }));
        assert_eq!(state.view_state, ViewState::LoadingMore);

        loaded(&mut state, &second, page("b", 30));
        assert_eq!(state.row_count(), 60);
        assert_eq!(state.page, 3);
        assert_eq!(state.results[..30], page("a", 30)[..]);
    }

    #[test]
    fn failed_page_fetch_preserves_results() {
        let mut state = SessionState::default();
        let first = typed(&mut state, "cats");
        loaded(&mut state, &first, page("a", 30));

        let second = search_message(&handle(&mut state, Event::ScrolledNearBottom));
        let WorkerMessage::Search { generation, page, reset, .. } = second else {
            panic!("expected search");
        };
        handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::SearchFailed {
                generation,
                page,
                reset,
                message: "The Internet connection appears to be offline.".to_string(),
            }),
        );

        assert_eq!(state.results.len(), 30);
        assert_eq!(state.page, 2);
        assert!(state.in_flight.is_none());
        assert_eq!(
            state.view_state,
            ViewState::Error("The Internet connection appears to be offline.".to_string())
        );
    }

    #[test]
    fn failure_on_first_search_shows_no_rows() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![]));
        let first = typed(&mut state, "cats");
        let WorkerMessage::Search { generation, .. } = first else {
            panic!("expected search");
        };
        handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::SearchFailed {
                generation,
                page: 1,
                reset: true,
                message: "timed out".to_string(),
            }),
        );
        assert_eq!(state.view_state, ViewState::Error("timed out".to_string()));
        assert_eq!(state.row_count(), 0);
    }

    #[test]
    fn scroll_is_ignored_in_history_mode_and_while_loading() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![]));
        assert!(handle(&mut state, Event::ScrolledNearBottom).is_empty());

        typed(&mut state, "cats");
        assert!(handle(&mut state, Event::ScrolledNearBottom).is_empty());
    }

    #[test]
    fn stale_response_after_new_query_is_discarded_and_queued_reset_issued() {
        let mut state = SessionState::default();
        let cats = typed(&mut state, "cats");

        let dogs_actions = {
            handle(&mut state, Event::QueryTextChanged("dogs".to_string()));
            let token = state.debounce_token;
            handle(&mut state, Event::DebounceElapsed { token })
        };
        assert!(dogs_actions.is_empty(), "reset must wait for the in-flight request");

        let follow_up = loaded(&mut state, &cats, page("cat", 30));
        assert!(state.results.is_empty(), "stale cats page must not be applied");
        let dogs = search_message(&follow_up);
        assert!(matches!(dogs, WorkerMessage::Search { ref query, page: 1, reset: true, .. } if query == "dogs"));

        loaded(&mut state, &dogs, page("dog", 30));
        assert_eq!(state.results[0].id, "dog0");
    }

    #[test]
    fn clearing_query_shows_history_and_ignores_late_results() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![photo("h")]));
        let cats = typed(&mut state, "cats");

        let actions = handle(&mut state, Event::QueryTextChanged(String::new()));
        assert_eq!(actions, vec![Action::CancelDebounce]);
        assert_eq!(state.view_state, ViewState::Content);
        assert_eq!(state.list_mode, ListMode::History);

        loaded(&mut state, &cats, page("cat", 30));
        assert!(state.results.is_empty());
        assert_eq!(state.row_count(), 1);
        assert!(state.in_flight.is_none());
    }

    #[test]
    fn sort_change_restarts_search_from_page_one() {
        let mut state = SessionState::default();
        let first = typed(&mut state, "cats");
        loaded(&mut state, &first, page("a", 30));

        let msg = search_message(&handle(&mut state, Event::SortModeChanged(SortMode::Date)));
        assert!(matches!(msg, WorkerMessage::Search { sort: SortMode::Date, page: 1, reset: true, .. }));
        assert!(state.results.is_empty());
    }

    #[test]
    fn sort_change_without_query_issues_no_request() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![]));
        assert!(handle(&mut state, Event::SortModeChanged(SortMode::Date)).is_empty());
        assert_eq!(state.sort_mode, SortMode::Date);
    }

    #[test]
    fn selecting_result_persists_history_and_shows_detail() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![photo("h0")]));
        let first = typed(&mut state, "r");
        loaded(&mut state, &first, page("r", 3));

        // filtered history ("h0" does not match "r") is empty, so row 1 is results[1]
        let actions = handle(&mut state, Event::ResultSelected(1));
        assert_eq!(state.history[0].id, "r1");
        assert_eq!(
            actions,
            vec![
                Action::PersistHistory(state.history.clone()),
                Action::ShowDetail(PhotoDetail {
                    id: "r1".to_string(),
                    description: Some("r1".to_string()),
                    author_name: "Ana".to_string(),
                    image_url: Some("https://img/r1".to_string()),
                }),
            ]
        );
    }

    #[test]
    fn selecting_photo_without_regular_url_fetches_details() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![Photo::new("bare", None, "Ana")]));
        let actions = handle(&mut state, Event::ResultSelected(0));
        assert!(actions.contains(&Action::PostToWorker(WorkerMessage::fetch_details("bare"))));
    }

    #[test]
    fn scroll_before_debounce_tick_does_not_mix_queries() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![]));
        let cats = typed(&mut state, "cats");
        loaded(&mut state, &cats, page("cat", 30));

        handle(&mut state, Event::QueryTextChanged("dogs".to_string()));
        assert!(handle(&mut state, Event::ScrolledNearBottom).is_empty());
        assert!(state.in_flight.is_none());
        assert_eq!(state.results.len(), 30);

        let token = state.debounce_token;
        let dogs = search_message(&handle(&mut state, Event::DebounceElapsed { token }));
        assert!(matches!(dogs, WorkerMessage::Search { ref query, page: 1, reset: true, .. } if query == "dogs"));
        loaded(&mut state, &dogs, page("dog", 30));
        assert!(state.results.iter().all(|p| p.id.starts_with("dog")));
        assert_eq!(state.page, 2);
    }

    #[test]
    fn selection_before_debounce_tick_opens_shown_row() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![]));
        let cats = typed(&mut state, "cats");
        loaded(&mut state, &cats, page("cat", 3));

        handle(&mut state, Event::QueryTextChanged("dogs".to_string()));
        let actions = handle(&mut state, Event::ResultSelected(2));
        assert!(matches!(&actions[1], Action::ShowDetail(detail) if detail.id == "cat2"));
        assert_eq!(state.history[0].id, "cat2");
    }

    #[test]
    fn selection_is_rejected_while_rows_are_hidden() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![photo("h0")]));
        typed(&mut state, "h");
        assert_eq!(state.view_state, ViewState::Loading);

        let err = handle_event(&mut state, &Event::ResultSelected(0)).unwrap_err();
        assert!(matches!(err, PhotoscoutError::Input(_)));
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn superseded_detail_completions_are_dropped() {
        let mut state = SessionState::default();
        handle(
            &mut state,
            Event::HistoryLoaded(vec![Photo::new("a", None, "Ana"), Photo::new("b", None, "Bo")]),
        );
        handle(&mut state, Event::ResultSelected(0));
        // "a" moved to the front, so "b" is still row 1.
        handle(&mut state, Event::ResultSelected(1));
        assert_eq!(state.pending_detail.as_deref(), Some("b"));

        let late = Photo::new("a", None, "Ana").with_url("regular", "https://img/a");
        let (render, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::DetailsLoaded { photo: late }),
        )
        .expect("handled");
        assert!(!render);
        assert!(actions.is_empty());

        handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::DetailsFailed {
                id: "a".to_string(),
                message: "timed out".to_string(),
            }),
        );
        assert_eq!(state.view_state, ViewState::Content);
        assert_eq!(state.pending_detail.as_deref(), Some("b"));
    }

    #[test]
    fn detail_completion_after_new_search_is_dropped() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![Photo::new("a", None, "Ana")]));
        handle(&mut state, Event::ResultSelected(0));
        typed(&mut state, "cats");

        handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::DetailsFailed {
                id: "a".to_string(),
                message: "timed out".to_string(),
            }),
        );
        assert_eq!(state.view_state, ViewState::Loading);
    }

    #[test]
    fn loaded_details_update_and_persist_history() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![Photo::new("a", Some("Fox"), "Ana")]));
        handle(&mut state, Event::ResultSelected(0));

        let full = Photo::new("a", Some("Fox"), "Ana").with_url("regular", "https://img/a");
        let actions = handle(&mut state, Event::WorkerResponse(WorkerResponse::DetailsLoaded { photo: full }));

        assert_eq!(state.history[0].detail().image_url.as_deref(), Some("https://img/a"));
        assert_eq!(
            actions,
            vec![
                Action::ShowDetail(state.history[0].detail()),
                Action::PersistHistory(state.history.clone()),
            ]
        );
        assert!(state.pending_detail.is_none());

        // A second open needs no fetch.
        let reopened = handle(&mut state, Event::ResultSelected(0));
        assert!(!reopened.iter().any(|a| matches!(a, Action::PostToWorker(_))));
    }

    #[test]
    fn out_of_range_selection_is_input_error() {
        let mut state = SessionState::default();
        handle(&mut state, Event::HistoryLoaded(vec![]));
        let err = handle_event(&mut state, &Event::ResultSelected(4)).unwrap_err();
        assert!(matches!(err, PhotoscoutError::Input(_)));
    }

    #[test]
    fn toggle_layout_flips_columns() {
        let mut state = SessionState::default();
        handle(&mut state, Event::ToggleLayout);
        assert_eq!(state.layout_mode, LayoutMode::OneColumn);
    }
}

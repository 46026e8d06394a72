//! Session runtime: the control loop around the event handler.
//!
//! [`SessionRuntime`] owns the [`SessionState`] and executes the actions the
//! handler returns. Timer ticks and worker completions come back through one
//! unbounded channel and are dispatched in arrival order, so the state is only
//! ever mutated from the task that drives the runtime.

use crate::app::{handle_event, Action, Event, SessionState};
use crate::domain::error::Result;
use crate::domain::{Photo, PhotoDetail};
use crate::runtime::Debouncer;
use crate::storage::HistoryStore;
use crate::ui::SessionViewModel;
use crate::worker::{SearchWorker, WorkerMessage};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::Instrument;

/// What the presentation layer should do after one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The view model changed and should be re-rendered.
    pub render: bool,
    /// Detail views to present, in order.
    pub details: Vec<PhotoDetail>,
}

/// Drives one search session.
pub struct SessionRuntime {
    state: SessionState,
    store: Box<dyn HistoryStore>,
    worker: SearchWorker,
    debouncer: Debouncer,
    events_tx: UnboundedSender<Event>,
    events_rx: UnboundedReceiver<Event>,
}

impl SessionRuntime {
    #[must_use]
    pub fn new(state: SessionState, store: Box<dyn HistoryStore>, worker: SearchWorker) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state,
            store,
            worker,
            debouncer: Debouncer::default(),
            events_tx,
            events_rx,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current view model.
    #[must_use]
    pub fn view_model(&self) -> SessionViewModel {
        self.state.compute_viewmodel()
    }

    /// Loads persisted history and shows it.
    ///
    /// An unreadable store degrades to an empty history.
    ///
    /// # Errors
    ///
    /// Propagates handler errors, which `HistoryLoaded` never produces.
    pub fn start(&mut self) -> Result<DispatchOutcome> {
        let history = self.load_persisted_history();
        self.dispatch(Event::HistoryLoaded(history))
    }

    fn load_persisted_history(&self) -> Vec<Photo> {
        match self.store.load() {
            Ok(history) => {
                tracing::info!(entries = history.len(), "history restored");
                history
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load history, starting empty");
                Vec::new()
            }
        }
    }

    /// Feeds one event through the handler and executes the resulting actions.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoscoutError::Input`](crate::PhotoscoutError::Input) for
    /// selections of rows that do not exist. No actions run in that case.
    pub fn dispatch(&mut self, event: Event) -> Result<DispatchOutcome> {
        let (render, actions) = handle_event(&mut self.state, &event)?;
        let mut outcome = DispatchOutcome {
            render,
            details: Vec::new(),
        };
        for action in actions {
            self.execute(action, &mut outcome);
        }
        Ok(outcome)
    }

    fn execute(&mut self, action: Action, outcome: &mut DispatchOutcome) {
        match action {
            Action::ScheduleDebounce { token, delay } => {
                self.debouncer.schedule(token, delay, self.events_tx.clone());
            }
            Action::CancelDebounce => self.debouncer.cancel(),
            Action::PostToWorker(message) => self.post_to_worker(message),
            Action::PersistHistory(history) => {
                if let Err(e) = self.store.save(&history) {
                    tracing::warn!(error = %e, "failed to persist history");
                }
            }
            Action::ShowDetail(detail) => outcome.details.push(detail),
        }
    }

    fn post_to_worker(&self, message: WorkerMessage) {
        let worker = self.worker.clone();
        let events = self.events_tx.clone();
        let span = tracing::debug_span!("worker_task", message_type = ?message);

        tokio::spawn(
            async move {
                let response = worker.handle_message(message).await;
                tracing::debug!(generation = ?response.generation(), "worker completed");
                if events.send(Event::WorkerResponse(response)).is_err() {
                    tracing::debug!("session gone, worker response dropped");
                }
            }
            .instrument(span),
        );
    }

    /// Waits for the next timer tick or worker completion.
    ///
    /// The runtime holds a sender itself, so this only returns `None` if the
    /// channel is closed externally.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }

    /// Waits for the next internal event and dispatches it.
    ///
    /// # Errors
    ///
    /// Same as [`dispatch`](Self::dispatch).
    pub async fn process_next(&mut self) -> Result<Option<DispatchOutcome>> {
        match self.next_event().await {
            Some(event) => self.dispatch(event).map(Some),
            None => Ok(None),
        }
    }
}

//! Single-slot cancelable debounce timer.

use crate::app::Event;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Holds at most one pending timer.
///
/// Scheduling aborts the pending timer before arming the new one, so only the
/// most recent schedule can ever deliver `Event::DebounceElapsed`.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Arms a timer that sends `DebounceElapsed { token }` after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, token: u64, delay: Duration, events: UnboundedSender<Event>) {
        self.cancel();
        tracing::trace!(token, delay_ms = delay.as_millis() as u64, "debounce armed");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if events.send(Event::DebounceElapsed { token }).is_err() {
                tracing::trace!(token, "session gone, debounce tick dropped");
            }
        }));
    }

    /// Aborts the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::default();

        debouncer.schedule(1, Duration::from_millis(300), tx.clone());
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.schedule(2, Duration::from_millis(300), tx.clone());

        assert_eq!(rx.recv().await, Some(Event::DebounceElapsed { token: 2 }));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::default();

        debouncer.schedule(1, Duration::from_millis(300), tx);
        debouncer.cancel();
        assert!(debouncer.pending.is_none());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }
}

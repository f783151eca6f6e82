//! Cached-event dispatcher.
//!
//! Hands cached events from the completion worker to a single consumer loop
//! (the UI-equivalent). Posting never blocks and offers no acknowledgment;
//! events reach the sink in the order they were posted.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use lessoncache_core::{CachedEvent, CachedEventSink, NotificationPort};

/// Sending half of the dispatcher; cheap to clone.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    tx: mpsc::UnboundedSender<CachedEvent>,
}

impl NotificationDispatcher {
    /// Start the consumer loop on the current runtime.
    ///
    /// The loop exits once every dispatcher clone is dropped and the queue
    /// is drained; await the returned handle to wait for that.
    pub fn spawn(sink: Arc<dyn CachedEventSink>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<CachedEvent>();

        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                tracing::debug!(step_id = %event.step_id, lesson_id = %event.lesson.id, "Delivering cached event");
                sink.on_cached(event);
            }
            tracing::debug!("Notification loop drained");
        });

        (Self { tx }, handle)
    }
}

impl NotificationPort for NotificationDispatcher {
    fn post(&self, event: CachedEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::warn!(step_id = %e.0.step_id, "Notification loop closed, dropping cached event");
        }
    }
}

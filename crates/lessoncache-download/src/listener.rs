//! Completion intake.
//!
//! The listener is the thin entry point the download transport calls; it
//! never blocks. Valid signals are queued to a single sequential worker
//! that drives the coordinator one completion at a time, in arrival order.
//! Invalid signals go straight to the coordinator's rejection path, and
//! signals arriving after the worker stopped are reported as dropped.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use lessoncache_core::{CompletionEvent, ReferenceId};

use crate::coordinator::CompletionCoordinator;

/// Entry point for completion signals; cheap to clone and `Send`.
#[derive(Clone)]
pub struct CompletionListener {
    tx: mpsc::UnboundedSender<ReferenceId>,
    coordinator: Arc<CompletionCoordinator>,
}

impl CompletionListener {
    /// Receive a completion signal.
    ///
    /// Callable from any thread, inside or outside the runtime.
    pub fn on_completion(&self, event: CompletionEvent) {
        tracing::debug!(reference = event.reference_id, "Completion signal received");
        match event.reference() {
            Ok(reference) => {
                if self.tx.send(reference).is_err() {
                    self.coordinator.report_dropped(reference);
                }
            }
            Err(err) => self.coordinator.reject(&err),
        }
    }
}

/// The single sequential worker behind a listener.
pub struct CompletionWorker;

impl CompletionWorker {
    /// Spawn the worker loop and return the listener feeding it.
    ///
    /// The loop ends once every listener clone is dropped and the queue is
    /// drained.
    pub fn spawn(coordinator: Arc<CompletionCoordinator>) -> (CompletionListener, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<ReferenceId>();

        let worker_coordinator = Arc::clone(&coordinator);
        let handle = tokio::spawn(async move {
            while let Some(reference) = rx.recv().await {
                let run = AssertUnwindSafe(worker_coordinator.handle_completion(reference));
                if run.catch_unwind().await.is_err() {
                    tracing::error!(reference = %reference, "Completion handling panicked");
                }
            }
            tracing::debug!("Completion worker drained");
        });

        (CompletionListener { tx, coordinator }, handle)
    }
}

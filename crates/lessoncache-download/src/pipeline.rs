//! Pipeline assembly.
//!
//! Wires the listener, sequential worker, coordinator and notification
//! dispatcher from a bundle of ports, the way adapters are expected to
//! build completion handling.

use std::sync::Arc;

use tokio::task::JoinHandle;

use lessoncache_core::{
    CachedEventSink, CatalogStorePort, DownloadSubsystemPort, ErrorReporterPort, LessonStatePort,
    MediaRelocatorPort, StoragePreferencesPort,
};

use crate::cancellation::CancellationRegistry;
use crate::coordinator::{CompletionCoordinator, CoordinatorDeps};
use crate::dispatcher::NotificationDispatcher;
use crate::listener::{CompletionListener, CompletionWorker};
use crate::lock::DownloadDomainLock;
use crate::relocator::StorageRelocator;

/// Dependencies for creating a completion pipeline.
///
/// `lock` and `cancellations` are handed in rather than created so the
/// cancel path and other readers of the download domain share them.
pub struct CompletionPipelineDeps {
    /// Persisted catalog.
    pub store: Arc<dyn CatalogStorePort>,
    /// Lesson display-state recomputation.
    pub lesson_state: Arc<dyn LessonStatePort>,
    /// External download subsystem.
    pub subsystem: Arc<dyn DownloadSubsystemPort>,
    /// Storage preferences, read on every completion.
    pub preferences: Arc<dyn StoragePreferencesPort>,
    /// Error sink.
    pub reporter: Arc<dyn ErrorReporterPort>,
    /// Consumer of cached events.
    pub sink: Arc<dyn CachedEventSink>,
    /// Relocator override; the filesystem relocator when `None`.
    pub relocator: Option<Arc<dyn MediaRelocatorPort>>,
    /// Shared cancellation registry.
    pub cancellations: Arc<CancellationRegistry>,
    /// Shared download domain lock.
    pub lock: DownloadDomainLock,
}

/// A running completion pipeline.
pub struct CompletionPipeline {
    listener: CompletionListener,
    lock: DownloadDomainLock,
    cancellations: Arc<CancellationRegistry>,
    worker: JoinHandle<()>,
    dispatcher: JoinHandle<()>,
}

/// Build and start a completion pipeline on the current runtime.
pub fn build_completion_pipeline(deps: CompletionPipelineDeps) -> CompletionPipeline {
    let (dispatcher, dispatcher_handle) = NotificationDispatcher::spawn(deps.sink);

    let relocator = deps
        .relocator
        .unwrap_or_else(|| Arc::new(StorageRelocator::new()));

    let coordinator = Arc::new(CompletionCoordinator::new(CoordinatorDeps {
        store: deps.store,
        lesson_state: deps.lesson_state,
        subsystem: deps.subsystem,
        cancellations: deps.cancellations.clone(),
        relocator,
        preferences: deps.preferences,
        reporter: deps.reporter,
        notifier: Arc::new(dispatcher),
        lock: deps.lock.clone(),
    }));

    let (listener, worker_handle) = CompletionWorker::spawn(coordinator);

    tracing::info!("Completion pipeline started");

    CompletionPipeline {
        listener,
        lock: deps.lock,
        cancellations: deps.cancellations,
        worker: worker_handle,
        dispatcher: dispatcher_handle,
    }
}

impl CompletionPipeline {
    /// A listener handle for the download transport.
    pub fn listener(&self) -> CompletionListener {
        self.listener.clone()
    }

    /// The download domain lock completions are written under.
    pub const fn lock(&self) -> &DownloadDomainLock {
        &self.lock
    }

    /// The registry the cancel path marks steps in.
    pub const fn cancellations(&self) -> &Arc<CancellationRegistry> {
        &self.cancellations
    }

    /// Stop accepting signals, finish queued completions, then deliver the
    /// remaining cached events.
    ///
    /// Waits for every outstanding listener clone to be dropped.
    pub async fn shutdown(self) {
        drop(self.listener);

        if let Err(e) = self.worker.await {
            tracing::error!(error = %e, "Completion worker ended abnormally");
        }
        if let Err(e) = self.dispatcher.await {
            tracing::error!(error = %e, "Notification loop ended abnormally");
        }

        tracing::info!("Completion pipeline stopped");
    }
}

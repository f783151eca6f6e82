//! CLI-side implementations of the outer ports.
//!
//! There is no real download subsystem or UI behind the CLI, so discards
//! are logged and cached events are printed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use lessoncache_core::{
    CachedEvent, CachedEventSink, DownloadSubsystemPort, ErrorKind, ErrorReporterPort,
    ReferenceId, SubsystemError, TracingErrorReporter,
};

/// Download subsystem stand-in that records the references it was told to
/// forget.
#[derive(Debug, Default)]
pub struct LoggingDownloadSubsystem {
    discarded: Mutex<Vec<ReferenceId>>,
}

impl LoggingDownloadSubsystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discarded(&self) -> Vec<ReferenceId> {
        self.discarded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DownloadSubsystemPort for LoggingDownloadSubsystem {
    async fn discard_record(&self, reference: ReferenceId) -> Result<(), SubsystemError> {
        tracing::info!(reference = %reference, "Download discarded");
        self.discarded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(reference);
        Ok(())
    }
}

/// Prints every cached event as it is delivered.
#[derive(Debug, Default)]
pub struct PrintingEventSink {
    delivered: AtomicUsize,
}

impl PrintingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }
}

impl CachedEventSink for PrintingEventSink {
    fn on_cached(&self, event: CachedEvent) {
        self.delivered.fetch_add(1, Ordering::SeqCst);
        println!(
            "cached step {} of lesson {} ({}): {} [{}]",
            event.step_id,
            event.lesson.id,
            event.lesson.title,
            event.cached_media.path,
            event.cached_media.quality
        );
    }
}

/// Logs through `TracingErrorReporter` and keeps the kinds for the summary.
#[derive(Debug, Default)]
pub struct SummaryReporter {
    inner: TracingErrorReporter,
    kinds: Mutex<Vec<ErrorKind>>,
}

impl SummaryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.kinds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ErrorReporterPort for SummaryReporter {
    fn report(&self, kind: ErrorKind, detail: &str) {
        self.inner.report(kind, detail);
        self.kinds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(kind);
    }
}

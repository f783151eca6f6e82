//! Error reporting port.
//!
//! Completion handling never propagates errors to its caller. Instead each
//! failure is handed to an `ErrorReporterPort` at the point it is detected,
//! tagged with an [`ErrorKind`].

use crate::errors::ErrorKind;

/// Port for reporting non-fatal errors (analytics, crash reporting, logs).
///
/// Implementations must not block; they are called while the download
/// domain lock is held.
pub trait ErrorReporterPort: Send + Sync {
    fn report(&self, kind: ErrorKind, detail: &str);
}

/// Reporter that writes every error to the `tracing` log.
///
/// This is the default for the CLI and any context without an analytics
/// backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorReporter;

impl TracingErrorReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ErrorReporterPort for TracingErrorReporter {
    fn report(&self, kind: ErrorKind, detail: &str) {
        match kind {
            ErrorKind::OrphanCompletion | ErrorKind::MissingLesson => {
                tracing::warn!(target: "lessoncache.errors", kind = %kind, detail, "Completion issue");
            }
            _ => {
                tracing::error!(target: "lessoncache.errors", kind = %kind, detail, "Completion error");
            }
        }
    }
}

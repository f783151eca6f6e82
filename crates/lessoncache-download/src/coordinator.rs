//! Completion coordinator.
//!
//! Turns completion signals into serialized catalog transitions. Each
//! completion runs entirely under the write half of the download domain
//! lock:
//!
//! 1. Look up and delete the download record (redelivery becomes an orphan)
//! 2. If the step was canceled: discard the download, clear the mark, stop
//! 3. Look up the step; a missing step stops before any file move or
//!    cached media write
//! 4. Resolve the media location, relocating to the alternate volume when
//!    the user prefers one (default paths on any relocation failure)
//! 5. Persist the cached media, then flip the step to cached
//! 6. Recompute the lesson's state and post a cached event
//!
//! # Error Policy
//!
//! Nothing propagates out of [`CompletionCoordinator::handle_completion`].
//! Each failure is reported where it is detected; earlier steps are never
//! rolled back. The step is read before the cached media is written, so only
//! a failed step update (reported as a store failure) can leave a cached
//! media row whose step is not marked cached.

use std::sync::Arc;

use lessoncache_core::{
    CachedEvent, CachedMedia, CancellationPort, CatalogStorePort, CompletionEvent, DownloadRecord,
    DownloadSubsystemPort, ErrorKind, ErrorReporterPort, InvalidReference, LessonStatePort,
    MediaRelocatorPort, NotificationPort, ReferenceId, StepId, StoragePreferencesPort,
    media_file_name,
};

use crate::lock::DownloadDomainLock;

/// Collaborators the coordinator is built from.
#[derive(Clone)]
pub struct CoordinatorDeps {
    /// Persisted catalog (download records, cached media, steps, lessons).
    pub store: Arc<dyn CatalogStorePort>,
    /// Lesson display-state recomputation.
    pub lesson_state: Arc<dyn LessonStatePort>,
    /// External download subsystem.
    pub subsystem: Arc<dyn DownloadSubsystemPort>,
    /// Canceled step marks.
    pub cancellations: Arc<dyn CancellationPort>,
    /// Alternate-volume relocation.
    pub relocator: Arc<dyn MediaRelocatorPort>,
    /// Download folder and alternate-volume preference.
    pub preferences: Arc<dyn StoragePreferencesPort>,
    /// Error sink.
    pub reporter: Arc<dyn ErrorReporterPort>,
    /// Cached-event hand-off.
    pub notifier: Arc<dyn NotificationPort>,
    /// Download domain lock shared with other readers/writers.
    pub lock: DownloadDomainLock,
}

/// What a single completion amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Media cached and step updated.
    Cached {
        step_id: StepId,
        /// Media ended up on the alternate volume.
        relocated: bool,
        /// A cached event was posted.
        notified: bool,
    },
    /// The step was canceled; the download was discarded.
    Canceled { step_id: StepId },
    /// No download record matched (stray or redelivered signal).
    Orphan,
    /// Processing stopped after a reported error.
    Stopped { kind: ErrorKind },
}

/// Serializes completion handling for the download domain.
///
/// Intended to be driven one call at a time by the completion worker, but
/// safe to call concurrently: the domain lock is the correctness boundary.
pub struct CompletionCoordinator {
    store: Arc<dyn CatalogStorePort>,
    lesson_state: Arc<dyn LessonStatePort>,
    subsystem: Arc<dyn DownloadSubsystemPort>,
    cancellations: Arc<dyn CancellationPort>,
    relocator: Arc<dyn MediaRelocatorPort>,
    preferences: Arc<dyn StoragePreferencesPort>,
    reporter: Arc<dyn ErrorReporterPort>,
    notifier: Arc<dyn NotificationPort>,
    lock: DownloadDomainLock,
}

impl CompletionCoordinator {
    pub fn new(deps: CoordinatorDeps) -> Self {
        Self {
            store: deps.store,
            lesson_state: deps.lesson_state,
            subsystem: deps.subsystem,
            cancellations: deps.cancellations,
            relocator: deps.relocator,
            preferences: deps.preferences,
            reporter: deps.reporter,
            notifier: deps.notifier,
            lock: deps.lock,
        }
    }

    /// The domain lock this coordinator writes under.
    pub const fn lock(&self) -> &DownloadDomainLock {
        &self.lock
    }

    /// Report a signal whose reference id failed validation.
    ///
    /// No lookup and no state mutation happen for such a signal.
    pub fn reject(&self, err: &InvalidReference) {
        tracing::warn!(error = %err, "Rejected completion signal");
        self.reporter
            .report(ErrorKind::NegativeReference, &err.to_string());
    }

    /// Report a valid signal that could not be queued for handling.
    ///
    /// The download record is left in place for a later redelivery.
    pub fn report_dropped(&self, reference: ReferenceId) {
        tracing::warn!(reference = %reference, "Completion worker stopped, signal dropped");
        self.reporter.report(
            ErrorKind::DroppedCompletion,
            &format!("completion {reference} arrived after the worker stopped"),
        );
    }

    /// Validate a raw signal and handle it, or report it as invalid.
    pub async fn handle_event(&self, event: CompletionEvent) -> Option<CompletionOutcome> {
        match event.reference() {
            Ok(reference) => Some(self.handle_completion(reference).await),
            Err(err) => {
                self.reject(&err);
                None
            }
        }
    }

    /// Handle one completion signal.
    pub async fn handle_completion(&self, reference: ReferenceId) -> CompletionOutcome {
        let _guard = self.lock.write().await;
        tracing::debug!(reference = %reference, "Acquired download domain lock");

        let outcome = self.process(reference).await;

        tracing::info!(reference = %reference, outcome = ?outcome, "Completion handled");
        outcome
    }

    async fn process(&self, reference: ReferenceId) -> CompletionOutcome {
        let record = match self.store.find_download_record(reference).await {
            Ok(Some(record)) => record,
            Ok(None) => return self.discard_orphan(reference).await,
            Err(e) => {
                return self.stop(
                    ErrorKind::StoreFailure,
                    &format!("find download record {reference}: {e}"),
                );
            }
        };

        if let Err(e) = self.store.delete_download_record(reference).await {
            return self.stop(
                ErrorKind::StoreFailure,
                &format!("delete download record {reference}: {e}"),
            );
        }

        if self.cancellations.is_canceled(record.step_id).await {
            self.discard(reference).await;
            self.cancellations.clear(record.step_id).await;
            tracing::info!(
                reference = %reference,
                step_id = %record.step_id,
                "Download was canceled, discarded"
            );
            return CompletionOutcome::Canceled {
                step_id: record.step_id,
            };
        }

        self.cache(&record).await
    }

    async fn cache(&self, record: &DownloadRecord) -> CompletionOutcome {
        // Read the step first so a missing step leaves no cached media behind
        let mut step = match self.store.find_step(record.step_id).await {
            Ok(Some(step)) => step,
            Ok(None) => {
                return self.stop(
                    ErrorKind::MissingStep,
                    &format!(
                        "step {} of video {} not found",
                        record.step_id, record.video_id
                    ),
                );
            }
            Err(e) => {
                return self.stop(
                    ErrorKind::StoreFailure,
                    &format!("find step {}: {e}", record.step_id),
                );
            }
        };

        let (media, relocated) = self.resolve_media(record).await;

        if let Err(e) = self.store.insert_cached_media(&media).await {
            return self.stop(
                ErrorKind::StoreFailure,
                &format!("insert cached media for step {}: {e}", record.step_id),
            );
        }

        step.mark_cached();
        if let Err(e) = self.store.update_step_cached_loading(&step).await {
            return self.stop(
                ErrorKind::StoreFailure,
                &format!("update step {}: {e}", step.id),
            );
        }

        if let Err(e) = self.lesson_state.refresh_lesson_state(step.lesson_id).await {
            self.reporter.report(
                ErrorKind::StoreFailure,
                &format!("refresh lesson {} state: {e}", step.lesson_id),
            );
        }

        let notified = match self.store.find_lesson(step.lesson_id).await {
            Ok(Some(lesson)) => {
                self.notifier.post(CachedEvent {
                    step_id: step.id,
                    lesson,
                    cached_media: media,
                });
                true
            }
            Ok(None) => {
                self.reporter.report(
                    ErrorKind::MissingLesson,
                    &format!("lesson {} of step {} not found", step.lesson_id, step.id),
                );
                false
            }
            Err(e) => {
                self.reporter.report(
                    ErrorKind::StoreFailure,
                    &format!("find lesson {}: {e}", step.lesson_id),
                );
                false
            }
        };

        CompletionOutcome::Cached {
            step_id: step.id,
            relocated,
            notified,
        }
    }

    /// Final location of the record's media, relocating when preferred.
    async fn resolve_media(&self, record: &DownloadRecord) -> (CachedMedia, bool) {
        let folder = self.preferences.download_folder();
        let default_path = folder.join(media_file_name(record.video_id));

        let Some(target) = self.preferences.relocation_target() else {
            return (
                CachedMedia::from_record(record, &default_path, record.thumbnail.clone()),
                false,
            );
        };

        match self.relocator.relocate(record.video_id, &folder, &target).await {
            Ok(relocated) => {
                let thumbnail = relocated.thumbnail.to_string_lossy().into_owned();
                (
                    CachedMedia::from_record(record, &relocated.path, Some(thumbnail)),
                    true,
                )
            }
            Err(e) => {
                self.reporter
                    .report(ErrorKind::RelocationFailure, &e.to_string());
                (
                    CachedMedia::from_record(record, &default_path, record.thumbnail.clone()),
                    false,
                )
            }
        }
    }

    async fn discard_orphan(&self, reference: ReferenceId) -> CompletionOutcome {
        self.reporter.report(
            ErrorKind::OrphanCompletion,
            &format!("no download record for reference {reference}"),
        );
        self.discard(reference).await;
        CompletionOutcome::Orphan
    }

    async fn discard(&self, reference: ReferenceId) {
        if let Err(e) = self.subsystem.discard_record(reference).await {
            self.reporter
                .report(ErrorKind::DiscardFailure, &format!("discard {reference}: {e}"));
        }
    }

    fn stop(&self, kind: ErrorKind, detail: &str) -> CompletionOutcome {
        self.reporter.report(kind, detail);
        CompletionOutcome::Stopped { kind }
    }
}

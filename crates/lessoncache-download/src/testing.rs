//! In-memory fakes for exercising completion handling in isolation.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use lessoncache_core::{
    CachedEvent, CachedMedia, CatalogStorePort, DownloadRecord, DownloadSubsystemPort, ErrorKind,
    ErrorReporterPort, Lesson, LessonId, LessonStatePort, MediaRelocatorPort, NotificationPort,
    ReferenceId, RelocatedMedia, RelocationError, RepositoryError, Step, StepId, SubsystemError,
    VideoId,
};

/// Store calls that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreCall {
    FindRecord,
    DeleteRecord,
    InsertMedia,
    FindStep,
    UpdateStep,
    FindLesson,
    RefreshLesson,
}

/// A mutation observed by the store, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    DeleteRecord(ReferenceId),
    InsertMedia(StepId),
    UpdateStep(StepId),
    RefreshLesson(LessonId),
}

#[derive(Default)]
struct State {
    records: HashMap<ReferenceId, DownloadRecord>,
    cached: Vec<CachedMedia>,
    steps: HashMap<StepId, Step>,
    lessons: HashMap<LessonId, Lesson>,
    writes: Vec<StoreWrite>,
}

/// Catalog store kept in memory.
///
/// Every call yields to the scheduler before touching state so concurrent
/// callers without outer locking get a chance to interleave.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    failing: Mutex<HashSet<StoreCall>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&self, record: DownloadRecord) {
        self.state()
            .records
            .insert(record.reference_id, record);
    }

    pub fn add_step(&self, step: Step) {
        self.state().steps.insert(step.id, step);
    }

    pub fn add_lesson(&self, lesson: Lesson) {
        self.state().lessons.insert(lesson.id, lesson);
    }

    pub fn fail(&self, call: StoreCall) {
        self.failing.lock().unwrap().insert(call);
    }

    pub fn has_record(&self, reference: ReferenceId) -> bool {
        self.state().records.contains_key(&reference)
    }

    pub fn cached(&self) -> Vec<CachedMedia> {
        self.state().cached.clone()
    }

    pub fn step(&self, id: StepId) -> Option<Step> {
        self.state().steps.get(&id).cloned()
    }

    pub fn writes(&self) -> Vec<StoreWrite> {
        self.state().writes.clone()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    async fn enter(&self, call: StoreCall) -> Result<(), RepositoryError> {
        tokio::task::yield_now().await;
        if self.failing.lock().unwrap().contains(&call) {
            return Err(RepositoryError::Storage(format!("{call:?} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStorePort for InMemoryStore {
    async fn find_download_record(
        &self,
        reference: ReferenceId,
    ) -> Result<Option<DownloadRecord>, RepositoryError> {
        self.enter(StoreCall::FindRecord).await?;
        Ok(self.state().records.get(&reference).cloned())
    }

    async fn delete_download_record(&self, reference: ReferenceId) -> Result<(), RepositoryError> {
        self.enter(StoreCall::DeleteRecord).await?;
        let mut state = self.state();
        state.records.remove(&reference);
        state.writes.push(StoreWrite::DeleteRecord(reference));
        Ok(())
    }

    async fn insert_cached_media(&self, media: &CachedMedia) -> Result<(), RepositoryError> {
        self.enter(StoreCall::InsertMedia).await?;
        let mut state = self.state();
        state.cached.retain(|m| m.step_id != media.step_id);
        state.cached.push(media.clone());
        state.writes.push(StoreWrite::InsertMedia(media.step_id));
        Ok(())
    }

    async fn find_step(&self, id: StepId) -> Result<Option<Step>, RepositoryError> {
        self.enter(StoreCall::FindStep).await?;
        Ok(self.state().steps.get(&id).cloned())
    }

    async fn update_step_cached_loading(&self, step: &Step) -> Result<(), RepositoryError> {
        self.enter(StoreCall::UpdateStep).await?;
        let mut state = self.state();
        let Some(stored) = state.steps.get_mut(&step.id) else {
            return Err(RepositoryError::NotFound(format!("step {}", step.id)));
        };
        stored.is_cached = step.is_cached;
        stored.is_loading = step.is_loading;
        state.writes.push(StoreWrite::UpdateStep(step.id));
        Ok(())
    }

    async fn find_lesson(&self, id: LessonId) -> Result<Option<Lesson>, RepositoryError> {
        self.enter(StoreCall::FindLesson).await?;
        Ok(self.state().lessons.get(&id).cloned())
    }
}

#[async_trait]
impl LessonStatePort for InMemoryStore {
    async fn refresh_lesson_state(&self, id: LessonId) -> Result<(), RepositoryError> {
        self.enter(StoreCall::RefreshLesson).await?;
        self.state().writes.push(StoreWrite::RefreshLesson(id));
        Ok(())
    }
}

/// Reporter that remembers every report.
#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(ErrorKind, String)>>,
}

impl RecordingReporter {
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.reports.lock().unwrap().iter().map(|(k, _)| *k).collect()
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.kinds().into_iter().filter(|k| *k == kind).count()
    }
}

impl ErrorReporterPort for RecordingReporter {
    fn report(&self, kind: ErrorKind, detail: &str) {
        self.reports.lock().unwrap().push((kind, detail.to_string()));
    }
}

/// Download subsystem that remembers discarded references.
#[derive(Default)]
pub struct RecordingSubsystem {
    discarded: Mutex<Vec<ReferenceId>>,
    refuse: bool,
}

impl RecordingSubsystem {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    pub fn discarded(&self) -> Vec<ReferenceId> {
        self.discarded.lock().unwrap().clone()
    }
}

#[async_trait]
impl DownloadSubsystemPort for RecordingSubsystem {
    async fn discard_record(&self, reference: ReferenceId) -> Result<(), SubsystemError> {
        self.discarded.lock().unwrap().push(reference);
        if self.refuse {
            return Err(SubsystemError::Rejected(format!("unknown download {reference}")));
        }
        Ok(())
    }
}

/// Notifier that collects posted events synchronously.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<CachedEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<CachedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl NotificationPort for RecordingNotifier {
    fn post(&self, event: CachedEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Relocator that always fails with a media move error.
#[derive(Default)]
pub struct FailingRelocator;

#[async_trait]
impl MediaRelocatorPort for FailingRelocator {
    async fn relocate(
        &self,
        video_id: VideoId,
        source_folder: &Path,
        target_folder: &Path,
    ) -> Result<RelocatedMedia, RelocationError> {
        Err(RelocationError::MediaMove {
            from: source_folder.join(video_id.to_string()),
            to: target_folder.join(video_id.to_string()),
            message: "volume removed".to_string(),
        })
    }
}

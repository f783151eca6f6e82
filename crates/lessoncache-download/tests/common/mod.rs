//! Shared fixtures for the completion pipeline integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use lessoncache_core::{
    CachedEvent, CachedEventSink, DownloadRecord, DownloadSubsystemPort, ErrorKind,
    ErrorReporterPort, Lesson, LessonId, ReferenceId, Step, StepId, StorageSettings,
    SubsystemError, VideoId,
};
use lessoncache_db::{SqliteCatalogStore, setup_test_database};
use lessoncache_download::{
    CancellationRegistry, CompletionPipeline, CompletionPipelineDeps, DownloadDomainLock,
    build_completion_pipeline,
};

#[derive(Default)]
pub struct RecordingSubsystem {
    discarded: Mutex<Vec<ReferenceId>>,
}

impl RecordingSubsystem {
    pub fn discarded(&self) -> Vec<ReferenceId> {
        self.discarded.lock().unwrap().clone()
    }
}

#[async_trait]
impl DownloadSubsystemPort for RecordingSubsystem {
    async fn discard_record(&self, reference: ReferenceId) -> Result<(), SubsystemError> {
        self.discarded.lock().unwrap().push(reference);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    kinds: Mutex<Vec<ErrorKind>>,
}

impl RecordingReporter {
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.kinds.lock().unwrap().clone()
    }
}

impl ErrorReporterPort for RecordingReporter {
    fn report(&self, kind: ErrorKind, _detail: &str) {
        self.kinds.lock().unwrap().push(kind);
    }
}

#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<CachedEvent>>,
}

impl CollectingSink {
    pub fn events(&self) -> Vec<CachedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl CachedEventSink for CollectingSink {
    fn on_cached(&self, event: CachedEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// A catalog on in-memory sqlite plus recording collaborators and a
/// scratch directory for media files.
pub struct World {
    pub store: Arc<SqliteCatalogStore>,
    pub subsystem: Arc<RecordingSubsystem>,
    pub reporter: Arc<RecordingReporter>,
    pub sink: Arc<CollectingSink>,
    pub cancellations: Arc<CancellationRegistry>,
    pub lock: DownloadDomainLock,
    dir: TempDir,
}

impl World {
    pub async fn new() -> Self {
        let pool = setup_test_database().await.unwrap();
        Self {
            store: Arc::new(SqliteCatalogStore::new(pool)),
            subsystem: Arc::new(RecordingSubsystem::default()),
            reporter: Arc::new(RecordingReporter::default()),
            sink: Arc::new(CollectingSink::default()),
            cancellations: Arc::new(CancellationRegistry::new()),
            lock: DownloadDomainLock::new(),
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn download_folder(&self) -> PathBuf {
        self.dir.path().join("media")
    }

    pub fn settings(&self) -> StorageSettings {
        StorageSettings::new(self.download_folder())
    }

    /// Register a loading step in a lesson with an in-flight download.
    pub async fn seed(&self, reference: i64, video: i64, step: i64, lesson: i64) {
        self.store
            .upsert_lesson(&Lesson {
                id: LessonId(lesson),
                title: format!("Lesson {lesson}"),
                is_cached: false,
                is_loading: true,
            })
            .await
            .unwrap();
        self.store
            .upsert_step(&Step {
                id: StepId(step),
                lesson_id: LessonId(lesson),
                is_cached: false,
                is_loading: true,
            })
            .await
            .unwrap();
        self.store
            .track_download(&DownloadRecord {
                reference_id: ReferenceId::new(reference).unwrap(),
                video_id: VideoId(video),
                step_id: StepId(step),
                quality: "720p".to_string(),
                thumbnail: None,
            })
            .await
            .unwrap();
    }

    /// Write the media and thumbnail files the download subsystem would
    /// have left in the download folder.
    pub fn write_media(&self, video: i64) {
        let folder = self.download_folder();
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join(video.to_string()), b"video").unwrap();
        std::fs::write(folder.join(format!("{video}.png")), b"thumb").unwrap();
    }

    pub fn pipeline(&self, settings: StorageSettings) -> CompletionPipeline {
        build_completion_pipeline(CompletionPipelineDeps {
            store: self.store.clone(),
            lesson_state: self.store.clone(),
            subsystem: self.subsystem.clone(),
            preferences: Arc::new(settings),
            reporter: self.reporter.clone(),
            sink: self.sink.clone(),
            relocator: None,
            cancellations: Arc::clone(&self.cancellations),
            lock: self.lock.clone(),
        })
    }
}

pub fn reference(raw: i64) -> ReferenceId {
    ReferenceId::new(raw).unwrap()
}

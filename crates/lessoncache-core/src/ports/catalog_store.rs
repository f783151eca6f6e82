//! Persisted catalog port definitions.
//!
//! These ports cover the persisted store completion handling reads and
//! writes: in-flight download records, cached media, and the step/lesson
//! hierarchy. Implementations live in `lessoncache-db`.
//!
//! # Design
//!
//! - Intent-based methods, not generic CRUD
//! - Lookups return `Ok(None)` for a missing row; `Err` is reserved for
//!   backend failures

use async_trait::async_trait;

use crate::domain::{CachedMedia, DownloadRecord, Lesson, LessonId, ReferenceId, Step, StepId};
use crate::errors::RepositoryError;

/// Port for the persisted catalog touched by completion handling.
///
/// Callers serialize mutations through the download domain lock; the store
/// itself makes no ordering promises across calls.
///
/// # Usage
///
/// ```ignore
/// let store: Arc<dyn CatalogStorePort> = /* ... */;
/// if let Some(record) = store.find_download_record(reference).await? {
///     store.delete_download_record(reference).await?;
/// }
/// ```
#[async_trait]
pub trait CatalogStorePort: Send + Sync {
    /// Look up the in-flight download record for a reference id.
    async fn find_download_record(
        &self,
        reference: ReferenceId,
    ) -> Result<Option<DownloadRecord>, RepositoryError>;

    /// Delete the download record for a reference id.
    ///
    /// Deleting a record that does not exist is not an error.
    async fn delete_download_record(&self, reference: ReferenceId) -> Result<(), RepositoryError>;

    /// Persist a cached media row (replacing any row for the same step).
    async fn insert_cached_media(&self, media: &CachedMedia) -> Result<(), RepositoryError>;

    /// Look up a step by id.
    async fn find_step(&self, id: StepId) -> Result<Option<Step>, RepositoryError>;

    /// Persist only the cached and loading flags of a step, as one update.
    async fn update_step_cached_loading(&self, step: &Step) -> Result<(), RepositoryError>;

    /// Look up a lesson by id.
    async fn find_lesson(&self, id: LessonId) -> Result<Option<Lesson>, RepositoryError>;
}

/// Port for recomputing a lesson's aggregate display state after one of its
/// steps changed.
#[async_trait]
pub trait LessonStatePort: Send + Sync {
    async fn refresh_lesson_state(&self, id: LessonId) -> Result<(), RepositoryError>;
}

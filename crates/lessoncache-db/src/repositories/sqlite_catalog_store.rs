//! `SQLite` implementation of the `CatalogStorePort` and `LessonStatePort` traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use lessoncache_core::{
    CachedMedia, CatalogStorePort, DownloadRecord, Lesson, LessonId, LessonStatePort, ReferenceId,
    RepositoryError, Step, StepId,
};

use super::row_mappers::{
    CACHED_MEDIA_COLUMNS, DOWNLOAD_RECORD_COLUMNS, is_unique_violation, row_to_cached_media,
    row_to_download_record, row_to_lesson, row_to_step, row_to_tracked_download,
};

/// A download record together with the time it was registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedDownload {
    pub record: DownloadRecord,
    pub created_at: DateTime<Utc>,
}

/// A download to register, with the step and lesson it belongs to.
///
/// `title` replaces the lesson title when given; otherwise an existing
/// lesson keeps its title and a new one is named after its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRegistration {
    pub record: DownloadRecord,
    pub lesson_id: LessonId,
    pub title: Option<String>,
}

/// Cached iff the lesson has steps and all are cached; loading iff any
/// step is loading. A missing lesson is left alone.
const REFRESH_LESSON_SQL: &str = r#"
    UPDATE lessons SET
        is_cached = EXISTS(SELECT 1 FROM steps WHERE lesson_id = ?1)
            AND NOT EXISTS(SELECT 1 FROM steps WHERE lesson_id = ?1 AND is_cached = 0),
        is_loading = EXISTS(SELECT 1 FROM steps WHERE lesson_id = ?1 AND is_loading = 1)
    WHERE id = ?1
"#;

/// `SQLite` implementation of the catalog store.
///
/// Holds download records, cached media, steps and lessons. Every port
/// write is a single statement, so each port call is atomic on its own.
/// Registration spans several tables and runs in one transaction.
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    /// Create a new `SQLite` catalog store.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool (for testing only).
    #[cfg(test)]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Register an in-flight download.
    ///
    /// Fails with `AlreadyExists` if the reference id is already tracked.
    pub async fn track_download(&self, record: &DownloadRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO download_records (
                reference_id, video_id, step_id, quality, thumbnail, created_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.reference_id.get())
        .bind(record.video_id.get())
        .bind(record.step_id.get())
        .bind(&record.quality)
        .bind(&record.thumbnail)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepositoryError::AlreadyExists(format!("Download {}", record.reference_id))
            } else {
                RepositoryError::Storage(e.to_string())
            }
        })?;

        tracing::debug!(
            reference = %record.reference_id,
            step_id = %record.step_id,
            video_id = %record.video_id,
            "Download tracked"
        );
        Ok(())
    }

    /// Register a download and mark its step and lesson as loading.
    ///
    /// All or nothing: a reference id that is already tracked fails with
    /// `AlreadyExists` and leaves the catalog untouched. A step that was
    /// cached is downloaded again, so its cached media row is dropped.
    pub async fn register_download(
        &self,
        registration: &DownloadRegistration,
    ) -> Result<(), RepositoryError> {
        let record = &registration.record;
        let lesson_id = registration.lesson_id;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO download_records (
                reference_id, video_id, step_id, quality, thumbnail, created_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.reference_id.get())
        .bind(record.video_id.get())
        .bind(record.step_id.get())
        .bind(&record.quality)
        .bind(&record.thumbnail)
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepositoryError::AlreadyExists(format!("Download {}", record.reference_id))
            } else {
                RepositoryError::Storage(e.to_string())
            }
        })?;

        sqlx::query(
            r#"
            INSERT INTO lessons (id, title, is_cached, is_loading)
            VALUES (?1, COALESCE(?2, ?3), 0, 1)
            ON CONFLICT(id) DO UPDATE SET
                title = COALESCE(?2, lessons.title),
                is_loading = 1
            "#,
        )
        .bind(lesson_id.get())
        .bind(&registration.title)
        .bind(format!("Lesson {lesson_id}"))
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO steps (id, lesson_id, is_cached, is_loading)
            VALUES (?, ?, 0, 1)
            ON CONFLICT(id) DO UPDATE SET
                lesson_id = excluded.lesson_id,
                is_cached = 0,
                is_loading = 1
            "#,
        )
        .bind(record.step_id.get())
        .bind(lesson_id.get())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        let cleared = sqlx::query("DELETE FROM cached_media WHERE step_id = ?")
            .bind(record.step_id.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        sqlx::query(REFRESH_LESSON_SQL)
            .bind(lesson_id.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        tracing::debug!(
            reference = %record.reference_id,
            step_id = %record.step_id,
            lesson_id = %lesson_id,
            stale_media = cleared.rows_affected(),
            "Download registered"
        );
        Ok(())
    }

    /// All in-flight downloads, oldest first.
    pub async fn list_download_records(&self) -> Result<Vec<TrackedDownload>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {DOWNLOAD_RECORD_COLUMNS} FROM download_records ORDER BY created_at ASC, reference_id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_tracked_download).collect()
    }

    /// Insert or update a lesson.
    pub async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO lessons (id, title, is_cached, is_loading)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                is_cached = excluded.is_cached,
                is_loading = excluded.is_loading
            "#,
        )
        .bind(lesson.id.get())
        .bind(&lesson.title)
        .bind(lesson.is_cached)
        .bind(lesson.is_loading)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(())
    }

    /// Insert or update a step.
    pub async fn upsert_step(&self, step: &Step) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO steps (id, lesson_id, is_cached, is_loading)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                lesson_id = excluded.lesson_id,
                is_cached = excluded.is_cached,
                is_loading = excluded.is_loading
            "#,
        )
        .bind(step.id.get())
        .bind(step.lesson_id.get())
        .bind(step.is_cached)
        .bind(step.is_loading)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(())
    }

    /// All cached media, ordered by step.
    pub async fn list_cached_media(&self) -> Result<Vec<CachedMedia>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {CACHED_MEDIA_COLUMNS} FROM cached_media ORDER BY step_id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_cached_media).collect()
    }

    /// The cached media of a step, if any.
    pub async fn find_cached_media(
        &self,
        step_id: StepId,
    ) -> Result<Option<CachedMedia>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {CACHED_MEDIA_COLUMNS} FROM cached_media WHERE step_id = ?"
        ))
        .bind(step_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        row.as_ref().map(row_to_cached_media).transpose()
    }
}

#[async_trait]
impl CatalogStorePort for SqliteCatalogStore {
    async fn find_download_record(
        &self,
        reference: ReferenceId,
    ) -> Result<Option<DownloadRecord>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {DOWNLOAD_RECORD_COLUMNS} FROM download_records WHERE reference_id = ?"
        ))
        .bind(reference.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        row.as_ref().map(row_to_download_record).transpose()
    }

    async fn delete_download_record(&self, reference: ReferenceId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM download_records WHERE reference_id = ?")
            .bind(reference.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn insert_cached_media(&self, media: &CachedMedia) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO cached_media (step_id, video_id, path, thumbnail, quality, cached_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(step_id) DO UPDATE SET
                video_id = excluded.video_id,
                path = excluded.path,
                thumbnail = excluded.thumbnail,
                quality = excluded.quality,
                cached_at = excluded.cached_at
            "#,
        )
        .bind(media.step_id.get())
        .bind(media.video_id.get())
        .bind(&media.path)
        .bind(&media.thumbnail)
        .bind(&media.quality)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn find_step(&self, id: StepId) -> Result<Option<Step>, RepositoryError> {
        let row = sqlx::query("SELECT id, lesson_id, is_cached, is_loading FROM steps WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        row.as_ref().map(row_to_step).transpose()
    }

    async fn update_step_cached_loading(&self, step: &Step) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE steps SET is_cached = ?, is_loading = ? WHERE id = ?")
            .bind(step.is_cached)
            .bind(step.is_loading)
            .bind(step.id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Step {}", step.id)));
        }

        Ok(())
    }

    async fn find_lesson(&self, id: LessonId) -> Result<Option<Lesson>, RepositoryError> {
        let row =
            sqlx::query("SELECT id, title, is_cached, is_loading FROM lessons WHERE id = ?")
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        row.as_ref().map(row_to_lesson).transpose()
    }
}

#[async_trait]
impl LessonStatePort for SqliteCatalogStore {
    async fn refresh_lesson_state(&self, id: LessonId) -> Result<(), RepositoryError> {
        let result = sqlx::query(REFRESH_LESSON_SQL)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        tracing::debug!(lesson_id = %id, updated = result.rows_affected(), "Lesson state refreshed");
        Ok(())
    }
}

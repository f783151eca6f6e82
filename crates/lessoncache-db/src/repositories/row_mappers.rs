//! Row mapping helpers for `SQLite` queries.

use chrono::{DateTime, Utc};
use lessoncache_core::{
    CachedMedia, DownloadRecord, Lesson, LessonId, ReferenceId, RepositoryError, Step, StepId,
    VideoId,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::sqlite_catalog_store::TrackedDownload;

/// Shared SELECT column list for download record queries.
pub const DOWNLOAD_RECORD_COLUMNS: &str =
    "reference_id, video_id, step_id, quality, thumbnail, created_at";

/// Shared SELECT column list for cached media queries.
pub const CACHED_MEDIA_COLUMNS: &str = "step_id, video_id, path, thumbnail, quality";

/// Parse an RFC 3339 timestamp written by this crate.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

pub fn row_to_download_record(row: &SqliteRow) -> Result<DownloadRecord, RepositoryError> {
    let raw_reference: i64 = row.try_get("reference_id").map_err(map_column_error)?;
    let reference_id = ReferenceId::new(raw_reference)
        .map_err(|e| RepositoryError::Storage(format!("Stored reference is invalid: {e}")))?;

    Ok(DownloadRecord {
        reference_id,
        video_id: VideoId(row.try_get("video_id").map_err(map_column_error)?),
        step_id: StepId(row.try_get("step_id").map_err(map_column_error)?),
        quality: row.try_get("quality").map_err(map_column_error)?,
        thumbnail: row.try_get("thumbnail").map_err(map_column_error)?,
    })
}

pub fn row_to_tracked_download(row: &SqliteRow) -> Result<TrackedDownload, RepositoryError> {
    let created_at: String = row.try_get("created_at").map_err(map_column_error)?;

    Ok(TrackedDownload {
        record: row_to_download_record(row)?,
        created_at: parse_timestamp(&created_at).unwrap_or_else(Utc::now),
    })
}

pub fn row_to_cached_media(row: &SqliteRow) -> Result<CachedMedia, RepositoryError> {
    Ok(CachedMedia {
        step_id: StepId(row.try_get("step_id").map_err(map_column_error)?),
        video_id: VideoId(row.try_get("video_id").map_err(map_column_error)?),
        path: row.try_get("path").map_err(map_column_error)?,
        thumbnail: row.try_get("thumbnail").map_err(map_column_error)?,
        quality: row.try_get("quality").map_err(map_column_error)?,
    })
}

pub fn row_to_step(row: &SqliteRow) -> Result<Step, RepositoryError> {
    Ok(Step {
        id: StepId(row.try_get("id").map_err(map_column_error)?),
        lesson_id: LessonId(row.try_get("lesson_id").map_err(map_column_error)?),
        is_cached: row.try_get("is_cached").map_err(map_column_error)?,
        is_loading: row.try_get("is_loading").map_err(map_column_error)?,
    })
}

pub fn row_to_lesson(row: &SqliteRow) -> Result<Lesson, RepositoryError> {
    Ok(Lesson {
        id: LessonId(row.try_get("id").map_err(map_column_error)?),
        title: row.try_get("title").map_err(map_column_error)?,
        is_cached: row.try_get("is_cached").map_err(map_column_error)?,
        is_loading: row.try_get("is_loading").map_err(map_column_error)?,
    })
}

pub fn map_column_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(format!("Column read error: {e}"))
}

/// Whether a query failed on a UNIQUE or PRIMARY KEY constraint.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

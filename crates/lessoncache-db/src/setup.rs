//! Database setup and initialization.
//!
//! This module provides the `setup_database()` function for initializing
//! the `SQLite` database with full schema. Entry points call this with the
//! resolved database path.

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::Path;

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// Creates the database file (and its parent directory) if missing, then
/// creates all tables and indexes.
///
/// # Example
///
/// ```rust,no_run
/// use lessoncache_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("/path/to/lessoncache.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true),
    )
    .await?;

    create_schema(&pool).await?;

    tracing::debug!(path = %db_path.display(), "Database ready");
    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// Limited to a single connection: every connection to `sqlite::memory:`
/// opens its own empty database.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// Safe to call multiple times as all operations use IF NOT EXISTS.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lessons (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL DEFAULT '',
            is_cached INTEGER NOT NULL DEFAULT 0,
            is_loading INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS steps (
            id INTEGER PRIMARY KEY,
            lesson_id INTEGER NOT NULL,
            is_cached INTEGER NOT NULL DEFAULT 0,
            is_loading INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_steps_lesson_id ON steps(lesson_id)")
        .execute(pool)
        .await?;

    // One row per in-flight download, keyed by the subsystem's handle
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS download_records (
            reference_id INTEGER PRIMARY KEY,
            video_id INTEGER NOT NULL,
            step_id INTEGER NOT NULL,
            quality TEXT NOT NULL,
            thumbnail TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One cached media file per step
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cached_media (
            step_id INTEGER PRIMARY KEY,
            video_id INTEGER NOT NULL,
            path TEXT NOT NULL,
            thumbnail TEXT,
            quality TEXT NOT NULL,
            cached_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cached_media_video_id ON cached_media(video_id)")
        .execute(pool)
        .await?;

    Ok(())
}

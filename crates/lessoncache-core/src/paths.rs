//! Path utilities for lessoncache data directories.
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "LESSONCACHE_DATA_DIR";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// An empty path was provided.
    #[error("Path cannot be empty")]
    EmptyPath,
}

/// Get the root directory for application data (database, media).
///
/// Resolution order:
/// 1. `LESSONCACHE_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/lessoncache`)
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if dir.trim().is_empty() {
            return Err(PathError::EmptyPath);
        }
        return Ok(PathBuf::from(dir));
    }

    dirs::data_dir()
        .map(|d| d.join("lessoncache"))
        .ok_or(PathError::NoDataDir)
}

/// Location of the catalog database.
pub fn database_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("lessoncache.db"))
}

/// Default folder finished downloads are written to.
pub fn default_download_folder() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("media"))
}

//! Storage settings and validation.
//!
//! Where finished downloads land and whether they should be moved to an
//! alternate volume (e.g. a removable card). Pure domain types with no
//! infrastructure dependencies.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for reading the user's storage preferences.
///
/// Read once per completion, so a preference change applies to the next
/// completion without rebuilding the pipeline.
pub trait StoragePreferencesPort: Send + Sync {
    /// Folder the download subsystem writes finished files into.
    fn download_folder(&self) -> PathBuf;

    /// Folder finished files should be moved to, if the user chose one and
    /// it is available.
    fn relocation_target(&self) -> Option<PathBuf>;
}

/// Storage settings structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageSettings {
    /// Default folder for finished downloads.
    pub download_folder: PathBuf,

    /// Alternate volume folder, when one is mounted.
    pub alternate_folder: Option<PathBuf>,

    /// Whether the user prefers the alternate volume.
    pub use_alternate: bool,
}

impl StorageSettings {
    /// Settings that keep everything in `download_folder`.
    pub fn new(download_folder: impl Into<PathBuf>) -> Self {
        Self {
            download_folder: download_folder.into(),
            alternate_folder: None,
            use_alternate: false,
        }
    }

    /// Prefer moving finished files to `folder`.
    #[must_use]
    pub fn with_alternate(mut self, folder: impl Into<PathBuf>) -> Self {
        self.alternate_folder = Some(folder.into());
        self.use_alternate = true;
        self
    }

    /// The alternate folder, only when the user prefers it.
    ///
    /// A preference without a configured folder (volume unmounted) yields
    /// `None` and files stay in the download folder.
    pub fn effective_alternate(&self) -> Option<&Path> {
        if self.use_alternate {
            self.alternate_folder.as_deref()
        } else {
            None
        }
    }
}

impl StoragePreferencesPort for StorageSettings {
    fn download_folder(&self) -> PathBuf {
        self.download_folder.clone()
    }

    fn relocation_target(&self) -> Option<PathBuf> {
        self.effective_alternate().map(Path::to_path_buf)
    }
}

/// Storage settings validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Download folder cannot be empty")]
    EmptyDownloadFolder,

    #[error("Alternate folder cannot be empty")]
    EmptyAlternateFolder,

    #[error("Alternate folder {0} is the download folder")]
    AlternateIsDownloadFolder(PathBuf),
}

/// Validate storage settings.
pub fn validate_storage_settings(settings: &StorageSettings) -> Result<(), SettingsError> {
    if settings.download_folder.as_os_str().is_empty() {
        return Err(SettingsError::EmptyDownloadFolder);
    }

    if let Some(alternate) = &settings.alternate_folder {
        if alternate.as_os_str().is_empty() {
            return Err(SettingsError::EmptyAlternateFolder);
        }
        if alternate == &settings.download_folder {
            return Err(SettingsError::AlternateIsDownloadFolder(alternate.clone()));
        }
    }

    Ok(())
}

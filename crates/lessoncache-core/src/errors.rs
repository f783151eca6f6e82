//! Error types shared across the workspace.
//!
//! None of these ever escape completion handling: the coordinator catches
//! each one where it happens and hands it to the error reporter tagged with
//! an [`ErrorKind`].

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A completion signal carried an unusable reference id.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvalidReference {
    #[error("reference id was {raw}")]
    Negative { raw: i64 },
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// so the coordinator can report storage failures without knowing the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),
}

/// The external download subsystem refused a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubsystemError {
    #[error("Download subsystem rejected request: {0}")]
    Rejected(String),
}

/// Why moving media to the alternate volume failed.
///
/// The two file moves are independent; a failure in either tags the whole
/// relocation as failed and the caller keeps the default paths.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelocationError {
    /// The target folder could not be created or is not a directory.
    #[error("Target folder {} unavailable: {message}", .target.display())]
    TargetUnavailable { target: PathBuf, message: String },

    /// Moving the media file failed.
    #[error("Failed to move media {} to {}: {message}", .from.display(), .to.display())]
    MediaMove {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },

    /// Moving the thumbnail file failed.
    #[error("Failed to move thumbnail {} to {}: {message}", .from.display(), .to.display())]
    ThumbnailMove {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },
}

impl RelocationError {
    /// Build a media-move failure from an I/O error.
    pub fn media(from: PathBuf, to: PathBuf, err: &std::io::Error) -> Self {
        Self::MediaMove {
            from,
            to,
            message: err.to_string(),
        }
    }

    /// Build a thumbnail-move failure from an I/O error.
    pub fn thumbnail(from: PathBuf, to: PathBuf, err: &std::io::Error) -> Self {
        Self::ThumbnailMove {
            from,
            to,
            message: err.to_string(),
        }
    }
}

/// Reporting taxonomy for completion handling.
///
/// Every variant is non-fatal: the coordinator reports it and either stops
/// processing the current completion or carries on, but never unwinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Malformed signal with a negative reference id.
    NegativeReference,
    /// No download record for a non-negative reference id.
    OrphanCompletion,
    /// Moving media to the alternate volume failed; default path kept.
    RelocationFailure,
    /// Lesson lookup failed after caching; notification suppressed.
    MissingLesson,
    /// Step row missing; nothing is cached for the completion.
    MissingStep,
    /// A persisted-store call failed.
    StoreFailure,
    /// The download subsystem failed to discard a record.
    DiscardFailure,
    /// A valid signal arrived after the completion worker stopped.
    DroppedCompletion,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NegativeReference => "NEGATIVE_REFERENCE",
            Self::OrphanCompletion => "ORPHAN_COMPLETION",
            Self::RelocationFailure => "RELOCATION_FAILURE",
            Self::MissingLesson => "MISSING_LESSON",
            Self::MissingStep => "MISSING_STEP",
            Self::StoreFailure => "STORE_FAILURE",
            Self::DiscardFailure => "DISCARD_FAILURE",
            Self::DroppedCompletion => "DROPPED_COMPLETION",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

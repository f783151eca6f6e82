//! Core domain types and port definitions for lessoncache.
//!
//! lessoncache reconciles completion signals from an external download
//! subsystem with the persisted catalog of media cached for offline lessons.
//! This crate holds the pieces every adapter shares:
//!
//! - `domain` - identifiers, catalog records, completion and cached events
//! - `errors` - error types and the `ErrorKind` reporting taxonomy
//! - `ports` - traits for the store, download subsystem, relocation,
//!   cancellation, error reporting and notification
//! - `settings` - storage preferences
//! - `paths` - data directory resolution
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod errors;
pub mod paths;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    CachedEvent, CachedMedia, CompletionEvent, DownloadRecord, Lesson, LessonId,
    MEDIA_THUMBNAIL_SUFFIX, ReferenceId, Step, StepId, VideoId, media_file_name,
    thumbnail_file_name,
};
pub use errors::{ErrorKind, InvalidReference, RelocationError, RepositoryError, SubsystemError};
pub use paths::{PathError, data_root, database_path, default_download_folder};
pub use ports::{
    CachedEventSink, CancellationPort, CatalogStorePort, DownloadSubsystemPort, ErrorReporterPort,
    LessonStatePort, MediaRelocatorPort, NotificationPort, RelocatedMedia,
    TracingErrorReporter,
};
pub use settings::{
    SettingsError, StoragePreferencesPort, StorageSettings, validate_storage_settings,
};

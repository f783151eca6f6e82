//! Domain types for offline media caching.
//!
//! Pure data: identifiers, catalog records and the events exchanged with the
//! download transport and the UI. No I/O lives here.

pub mod catalog;
pub mod events;
pub mod ids;

pub use catalog::{
    CachedMedia, DownloadRecord, Lesson, MEDIA_THUMBNAIL_SUFFIX, Step, media_file_name,
    thumbnail_file_name,
};
pub use events::{CachedEvent, CompletionEvent};
pub use ids::{LessonId, ReferenceId, StepId, VideoId};

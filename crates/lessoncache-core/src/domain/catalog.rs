//! Catalog records touched by completion handling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ids::{LessonId, ReferenceId, StepId, VideoId};

/// Suffix appended to a video id to name its thumbnail file.
pub const MEDIA_THUMBNAIL_SUFFIX: &str = ".png";

/// File name of the media file for a video.
pub fn media_file_name(video_id: VideoId) -> String {
    video_id.to_string()
}

/// File name of the thumbnail companion for a video.
pub fn thumbnail_file_name(video_id: VideoId) -> String {
    format!("{video_id}{MEDIA_THUMBNAIL_SUFFIX}")
}

/// An in-flight download tracked until its completion signal arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    /// Handle assigned by the download subsystem.
    pub reference_id: ReferenceId,
    /// Video being downloaded.
    pub video_id: VideoId,
    /// Step the video belongs to.
    pub step_id: StepId,
    /// Requested quality label (e.g. "720p").
    pub quality: String,
    /// Thumbnail location at the default storage folder, if any.
    pub thumbnail: Option<String>,
}

/// A media file that finished downloading and is available offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedMedia {
    pub step_id: StepId,
    pub video_id: VideoId,
    /// Final on-disk location of the media file.
    pub path: String,
    /// Final on-disk location of the thumbnail, if any.
    pub thumbnail: Option<String>,
    pub quality: String,
}

impl CachedMedia {
    /// Build the cached row for a completed download at its final location.
    pub fn from_record(record: &DownloadRecord, path: &Path, thumbnail: Option<String>) -> Self {
        Self {
            step_id: record.step_id,
            video_id: record.video_id,
            path: path.to_string_lossy().into_owned(),
            thumbnail,
            quality: record.quality.clone(),
        }
    }
}

/// A lesson step as far as offline availability is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub lesson_id: LessonId,
    pub is_cached: bool,
    pub is_loading: bool,
}

impl Step {
    /// Flip the step into its cached state: cached and no longer loading.
    pub const fn mark_cached(&mut self) {
        self.is_cached = true;
        self.is_loading = false;
    }
}

/// A lesson grouping several steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    /// Every step of the lesson is cached.
    pub is_cached: bool,
    /// At least one step of the lesson is still loading.
    pub is_loading: bool,
}

//! Track command handler.
//!
//! Registers a lesson and step as loading, plus the in-flight download
//! record the completion signal will later be matched against. The
//! registration is all or nothing; tracking a cached step again starts a
//! fresh download of it.

use lessoncache_core::{DownloadRecord, LessonId, ReferenceId, StepId, VideoId};
use lessoncache_db::DownloadRegistration;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// A download to register.
#[derive(Debug, Clone)]
pub struct TrackRequest {
    pub reference: i64,
    pub video: i64,
    pub step: i64,
    pub lesson: i64,
    pub quality: String,
    pub thumbnail: Option<String>,
    pub title: Option<String>,
}

/// Execute the track command.
pub async fn execute(ctx: &CliContext, request: TrackRequest) -> Result<(), CliError> {
    let reference = ReferenceId::new(request.reference)?;
    let lesson_id = LessonId(request.lesson);
    let step_id = StepId(request.step);

    ctx.store
        .register_download(&DownloadRegistration {
            record: DownloadRecord {
                reference_id: reference,
                video_id: VideoId(request.video),
                step_id,
                quality: request.quality,
                thumbnail: request.thumbnail,
            },
            lesson_id,
            title: request.title,
        })
        .await?;

    println!("Tracking download {reference} for step {step_id} of lesson {lesson_id}");
    Ok(())
}

//! Storage relocation for finished downloads.
//!
//! Moves a video's media file and its thumbnail from the default download
//! folder to the alternate volume the user chose. File names are fixed by
//! the video id (see [`media_file_name`] and [`thumbnail_file_name`]).

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use lessoncache_core::{
    MediaRelocatorPort, RelocatedMedia, RelocationError, VideoId, media_file_name,
    thumbnail_file_name,
};

/// Filesystem-backed relocator.
///
/// The two moves are independent and not rolled back: if the thumbnail move
/// fails the media file stays at the target. Callers treat any error as
/// "keep the default paths".
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageRelocator;

impl StorageRelocator {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaRelocatorPort for StorageRelocator {
    async fn relocate(
        &self,
        video_id: VideoId,
        source_folder: &Path,
        target_folder: &Path,
    ) -> Result<RelocatedMedia, RelocationError> {
        tokio::fs::create_dir_all(target_folder)
            .await
            .map_err(|e| RelocationError::TargetUnavailable {
                target: target_folder.to_path_buf(),
                message: e.to_string(),
            })?;

        let media_name = media_file_name(video_id);
        let (from, to) = (source_folder.join(&media_name), target_folder.join(&media_name));
        move_file(&from, &to)
            .await
            .map_err(|e| RelocationError::media(from.clone(), to.clone(), &e))?;
        let path = to;

        let thumb_name = thumbnail_file_name(video_id);
        let (from, to) = (source_folder.join(&thumb_name), target_folder.join(&thumb_name));
        move_file(&from, &to)
            .await
            .map_err(|e| RelocationError::thumbnail(from.clone(), to.clone(), &e))?;

        tracing::debug!(
            video_id = %video_id,
            target = %target_folder.display(),
            "Relocated media and thumbnail"
        );

        Ok(RelocatedMedia {
            path,
            thumbnail: to,
        })
    }
}

/// Move a file, falling back to copy-then-delete when a rename is not
/// possible (e.g. across volumes).
async fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if tokio::fs::rename(from, to).await.is_ok() {
        return Ok(());
    }

    tokio::fs::copy(from, to).await?;
    if let Err(e) = tokio::fs::remove_file(from).await {
        // The copy is complete; a leftover source only wastes space.
        tracing::warn!(path = %from.display(), error = %e, "Failed to remove source after copy");
    }
    Ok(())
}

/// Paths a video's files occupy in `folder`.
pub fn media_paths(folder: &Path, video_id: VideoId) -> (PathBuf, PathBuf) {
    (
        folder.join(media_file_name(video_id)),
        folder.join(thumbnail_file_name(video_id)),
    )
}

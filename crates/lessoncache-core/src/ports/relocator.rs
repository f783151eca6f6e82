//! Media relocation port.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::VideoId;
use crate::errors::RelocationError;

/// Final locations of a media file and its thumbnail after relocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocatedMedia {
    pub path: PathBuf,
    pub thumbnail: PathBuf,
}

/// Port for moving a video's media and thumbnail to another folder.
///
/// Not transactional: if the thumbnail move fails after the media moved,
/// the media stays moved and the error is returned. Callers fall back to
/// the default paths on any error.
#[async_trait]
pub trait MediaRelocatorPort: Send + Sync {
    async fn relocate(
        &self,
        video_id: VideoId,
        source_folder: &Path,
        target_folder: &Path,
    ) -> Result<RelocatedMedia, RelocationError>;
}

//! Download subsystem and cancellation ports.

use async_trait::async_trait;

use crate::domain::{ReferenceId, StepId};
use crate::errors::SubsystemError;

/// Port for the external download subsystem that issued the download.
#[async_trait]
pub trait DownloadSubsystemPort: Send + Sync {
    /// Ask the subsystem to forget a download (and any artifact or
    /// notification it still holds for it).
    async fn discard_record(&self, reference: ReferenceId) -> Result<(), SubsystemError>;
}

/// Port for the set of steps whose pending download was canceled.
///
/// Marks are written by the cancel path and consumed by completion handling,
/// which reads and clears a mark at most once per canceled completion.
#[async_trait]
pub trait CancellationPort: Send + Sync {
    async fn is_canceled(&self, step: StepId) -> bool;

    async fn clear(&self, step: StepId);
}

//! List command handler.
//!
//! Displays cached media and the downloads still in flight.

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the list command.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let cached = ctx.store.list_cached_media().await?;
    let pending = ctx.store.list_download_records().await?;

    if cached.is_empty() {
        println!("No cached media.");
    } else {
        println!("Found {} cached media file(s):\n", cached.len());
        println!("{:<8} {:<8} {:<8} Path", "Step", "Video", "Quality");
        for media in &cached {
            println!(
                "{:<8} {:<8} {:<8} {}",
                media.step_id, media.video_id, media.quality, media.path
            );
        }
    }

    if !pending.is_empty() {
        println!("\n{} download(s) in flight:\n", pending.len());
        println!("{:<10} {:<8} {:<8} Since", "Reference", "Step", "Video");
        for tracked in &pending {
            println!(
                "{:<10} {:<8} {:<8} {}",
                tracked.record.reference_id,
                tracked.record.step_id,
                tracked.record.video_id,
                tracked.created_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
    }

    Ok(())
}

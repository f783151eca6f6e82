//! Subcommand definitions.

use clap::Subcommand;

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a lesson step and its in-flight download
    Track {
        /// Reference id assigned by the download subsystem
        #[arg(long)]
        reference: i64,
        /// Video being downloaded
        #[arg(long)]
        video: i64,
        /// Step the video belongs to
        #[arg(long)]
        step: i64,
        /// Lesson the step belongs to
        #[arg(long)]
        lesson: i64,
        /// Requested quality label
        #[arg(long, default_value = "720p")]
        quality: String,
        /// Thumbnail location in the download folder
        #[arg(long)]
        thumbnail: Option<String>,
        /// Lesson title (kept from an earlier registration when omitted)
        #[arg(long)]
        title: Option<String>,
    },

    /// Deliver completion signals for finished downloads
    Complete {
        /// Reference ids reported by the download subsystem
        #[arg(required = true, allow_negative_numbers = true)]
        references: Vec<i64>,
        /// Steps whose download was canceled before completing
        #[arg(long = "cancel")]
        cancel: Vec<i64>,
        /// Number of threads delivering the signals
        #[arg(long, default_value_t = 4)]
        threads: usize,
    },

    /// List cached media
    List,

    /// Show resolved paths
    Paths,
}

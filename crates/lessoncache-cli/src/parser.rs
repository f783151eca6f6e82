//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the offline lesson media cache.
#[derive(Debug, Parser)]
#[command(name = "lessoncache")]
#[command(about = "Track lesson media downloads and cache them for offline use")]
#[command(version)]
pub struct Cli {
    /// Database file (defaults to the data directory)
    #[arg(long = "db", env = "LESSONCACHE_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Folder the download subsystem writes finished files into
    #[arg(long = "download-dir", env = "LESSONCACHE_DOWNLOAD_DIR", global = true)]
    pub download_dir: Option<PathBuf>,

    /// Alternate volume folder finished files can be moved to
    #[arg(long = "alternate-dir", env = "LESSONCACHE_ALTERNATE_DIR", global = true)]
    pub alternate_dir: Option<PathBuf>,

    /// Prefer the alternate volume for finished files
    #[arg(long = "use-alternate", env = "LESSONCACHE_USE_ALTERNATE", global = true)]
    pub use_alternate: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

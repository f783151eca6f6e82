//! Command-line adapter for lessoncache.
//!
//! Registers in-flight downloads, feeds completion signals through the
//! completion pipeline and inspects the cached catalog.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary
use dotenvy as _;
use tracing_subscriber as _;

pub mod adapters;
pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;

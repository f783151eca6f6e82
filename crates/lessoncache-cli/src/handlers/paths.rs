//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics.

use lessoncache_core::paths::data_root;

use crate::bootstrap::CliConfig;
use crate::error::CliError;

/// Execute the paths command in `key = value` format.
pub fn execute(config: &CliConfig) -> Result<(), CliError> {
    println!("data_root = {}", data_root()?.display());
    println!("database = {}", config.database_path.display());
    println!(
        "download_folder = {}",
        config.storage.download_folder.display()
    );
    match config.storage.effective_alternate() {
        Some(alternate) => println!("relocation_target = {}", alternate.display()),
        None => println!("relocation_target = (none)"),
    }
    Ok(())
}

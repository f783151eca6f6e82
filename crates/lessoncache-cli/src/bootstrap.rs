//! CLI bootstrap - the composition root.
//!
//! Resolves configuration from flags and environment, opens the database
//! and hands command handlers a ready `CliContext`.

use std::path::PathBuf;
use std::sync::Arc;

use lessoncache_core::paths::{database_path, default_download_folder};
use lessoncache_core::{StorageSettings, validate_storage_settings};
use lessoncache_db::{SqliteCatalogStore, setup_database};

use crate::error::CliError;
use crate::parser::Cli;

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Catalog database file.
    pub database_path: PathBuf,
    /// Storage preferences handed to the completion pipeline.
    pub storage: StorageSettings,
}

impl CliConfig {
    /// Resolve configuration, falling back to the data directory for
    /// anything not given on the command line or in the environment.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let database_path = match &cli.db {
            Some(path) => path.clone(),
            None => database_path()?,
        };
        let download_folder = match &cli.download_dir {
            Some(path) => path.clone(),
            None => default_download_folder()?,
        };

        // An alternate preference with no folder keeps files where they are
        let storage = StorageSettings {
            download_folder,
            alternate_folder: cli.alternate_dir.clone(),
            use_alternate: cli.use_alternate,
        };
        validate_storage_settings(&storage)?;

        Ok(Self {
            database_path,
            storage,
        })
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    pub config: CliConfig,
    pub store: Arc<SqliteCatalogStore>,
}

/// Open the database and build the command context.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let pool = setup_database(&config.database_path)
        .await
        .map_err(|e: anyhow::Error| CliError::Database(format!("{e:#}")))?;

    tracing::debug!(
        database = %config.database_path.display(),
        download_folder = %config.storage.download_folder.display(),
        "CLI bootstrapped"
    );

    Ok(CliContext {
        config,
        store: Arc::new(SqliteCatalogStore::new(pool)),
    })
}

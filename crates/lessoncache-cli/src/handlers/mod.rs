//! Command handlers.
//!
//! Each handler receives the composed `CliContext` (or the resolved
//! configuration) and reports failures as `CliError`.

pub mod complete;
pub mod list;
pub mod paths;
pub mod track;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use lessoncache_core::StorageSettings;
    use lessoncache_db::{SqliteCatalogStore, setup_test_database};

    use crate::bootstrap::{CliConfig, CliContext};

    pub async fn context(storage: StorageSettings) -> CliContext {
        let pool = setup_test_database().await.unwrap();
        CliContext {
            config: CliConfig {
                database_path: ":memory:".into(),
                storage,
            },
            store: Arc::new(SqliteCatalogStore::new(pool)),
        }
    }
}

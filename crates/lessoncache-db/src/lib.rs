//! `SQLite` persistence for lessoncache.
//!
//! Provides the schema setup and `SqliteCatalogStore`, the adapter behind
//! the catalog and lesson-state ports.
#![deny(unsafe_code)]

pub mod repositories;
pub mod setup;

// Re-export repository implementations
pub use repositories::{DownloadRegistration, SqliteCatalogStore, TrackedDownload};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;

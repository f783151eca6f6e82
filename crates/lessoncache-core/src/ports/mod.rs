//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces completion handling expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Async methods for anything that touches storage or another process
//! - Sync, non-blocking methods for reporting and notification

pub mod catalog_store;
pub mod download_subsystem;
pub mod error_reporter;
pub mod notification;
pub mod relocator;

pub use catalog_store::{CatalogStorePort, LessonStatePort};
pub use download_subsystem::{CancellationPort, DownloadSubsystemPort};
pub use error_reporter::{ErrorReporterPort, TracingErrorReporter};
pub use notification::{CachedEventSink, NotificationPort};
pub use relocator::{MediaRelocatorPort, RelocatedMedia};

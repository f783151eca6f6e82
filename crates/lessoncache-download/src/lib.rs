//! Download completion handling for lessoncache.
//!
//! Reconciles completion signals from the external download subsystem with
//! the persisted catalog: deletes the in-flight record, honours pending
//! cancellations, relocates media to the alternate volume when preferred,
//! caches the media, marks the step cached and tells the UI.
//!
//! # Architecture
//!
//! - **Listener**: non-blocking entry point, queues valid signals
//! - **Worker**: single task draining the queue, one completion at a time
//! - **Coordinator**: the state transitions, under the download domain lock
//! - **Dispatcher**: single loop delivering cached events to the UI sink
//!
//! # Concurrency Model
//!
//! The worker gives FIFO order; the domain lock gives correctness. The
//! coordinator stays correct when called from several tasks at once, and
//! excludes anything else holding the read half of the same lock.

// Internal modules (pub(crate) to keep implementation private)
mod cancellation;
mod coordinator;
mod dispatcher;
mod listener;
mod lock;
mod pipeline;
mod relocator;

#[cfg(test)]
mod testing;

pub use cancellation::CancellationRegistry;
pub use coordinator::{CompletionCoordinator, CompletionOutcome, CoordinatorDeps};
pub use dispatcher::NotificationDispatcher;
pub use listener::{CompletionListener, CompletionWorker};
pub use lock::DownloadDomainLock;
pub use pipeline::{CompletionPipeline, CompletionPipelineDeps, build_completion_pipeline};
pub use relocator::{StorageRelocator, media_paths};

//! Download domain lock.
//!
//! One read/write lock guards everything that reads or writes the download
//! domain (download records, cached media, step cache flags). Completion
//! handling holds the write half for its whole critical section; other
//! subsystems that inspect the same rows take the read half.
//!
//! The handle is injected rather than global, so every collaborator that
//! must exclude completion handling is handed the same instance.

use std::sync::Arc;

use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

/// Cloneable handle to the shared download domain lock.
///
/// Acquisition blocks without a timeout. Guards release on drop, so every
/// exit path of a critical section (early return, error, unwinding panic)
/// releases the lock.
#[derive(Debug, Clone, Default)]
pub struct DownloadDomainLock {
    inner: Arc<RwLock<()>>,
}

impl DownloadDomainLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the exclusive (write) half.
    pub async fn write(&self) -> OwnedRwLockWriteGuard<()> {
        Arc::clone(&self.inner).write_owned().await
    }

    /// Acquire the shared (read) half.
    pub async fn read(&self) -> OwnedRwLockReadGuard<()> {
        Arc::clone(&self.inner).read_owned().await
    }
}

//! Cancellation registry.
//!
//! A set of step ids whose pending download was canceled before it
//! finished. The cancel path marks a step; completion handling reads the
//! mark inside the download domain lock and clears it once.
//!
//! The cancel path is not required to hold the domain lock while marking,
//! so a mark landing after completion handling has read the registry is
//! missed and that completion still caches its media.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lessoncache_core::{CancellationPort, StepId};

/// In-memory set of canceled step ids.
#[derive(Debug, Default)]
pub struct CancellationRegistry {
    canceled: Mutex<HashSet<StepId>>,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a step's pending download as canceled.
    pub async fn mark(&self, step: StepId) {
        let inserted = self.canceled.lock().await.insert(step);
        tracing::debug!(step_id = %step, already_marked = !inserted, "Marked step as canceled");
    }

    /// Steps still marked, in ascending order.
    ///
    /// A mark outlives a run when no completion for its step arrived.
    pub async fn pending(&self) -> Vec<StepId> {
        let mut steps: Vec<StepId> = self.canceled.lock().await.iter().copied().collect();
        steps.sort_unstable();
        steps
    }
}

#[async_trait]
impl CancellationPort for CancellationRegistry {
    async fn is_canceled(&self, step: StepId) -> bool {
        self.canceled.lock().await.contains(&step)
    }

    async fn clear(&self, step: StepId) {
        self.canceled.lock().await.remove(&step);
    }
}

//! Signals flowing into and out of completion handling.

use serde::{Deserialize, Serialize};

use super::catalog::{CachedMedia, Lesson};
use super::ids::{ReferenceId, StepId};
use crate::errors::InvalidReference;

/// Raw completion signal as delivered by the download transport.
///
/// The reference id is unvalidated; negative values are a sentinel for a
/// malformed signal and must still be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub reference_id: i64,
}

impl CompletionEvent {
    pub const fn new(reference_id: i64) -> Self {
        Self { reference_id }
    }

    /// Validate the carried reference id.
    pub const fn reference(&self) -> Result<ReferenceId, InvalidReference> {
        ReferenceId::new(self.reference_id)
    }
}

/// Posted once a step's media is cached and its lesson is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedEvent {
    pub step_id: StepId,
    pub lesson: Lesson,
    pub cached_media: CachedMedia,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_event_validates_reference() {
        assert!(CompletionEvent::new(5).reference().is_ok());
        assert_eq!(
            CompletionEvent::new(-1).reference(),
            Err(InvalidReference::Negative { raw: -1 })
        );
    }
}

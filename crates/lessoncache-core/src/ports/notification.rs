//! Cached-event notification ports.
//!
//! Two sides of the same hand-off: completion handling posts through a
//! `NotificationPort` without waiting, and a single consumer loop delivers
//! each event to a `CachedEventSink` (the UI-equivalent).

use crate::domain::CachedEvent;

/// Port for posting cached events.
///
/// `post` must not block and gives no delivery confirmation. Events posted
/// from one thread are delivered in the order they were posted.
pub trait NotificationPort: Send + Sync {
    fn post(&self, event: CachedEvent);
}

/// The single consumer of cached events.
pub trait CachedEventSink: Send + Sync {
    fn on_cached(&self, event: CachedEvent);
}

//! # Event Recorder
//!
//! In-memory event sink that records everything published. Production
//! deployments would forward to a bus or log pipeline instead.

use crate::events::MarketEvent;
use crate::ports::outbound::EventSink;
use async_trait::async_trait;
use std::sync::RwLock;
use tracing::debug;

/// Records published events in order.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: RwLock<Vec<MarketEvent>>,
}

impl RecordingEventSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far, in order.
    #[must_use]
    pub fn recorded(&self) -> Vec<MarketEvent> {
        self.events.read().unwrap().clone()
    }

    /// Number of events published so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().unwrap().len()
    }

    /// Returns true if nothing has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().unwrap().is_empty()
    }
}

#[async_trait]
impl EventSink for RecordingEventSink {
    async fn publish(&self, event: MarketEvent) {
        debug!(topic = event.topic(), "Recording market event");
        self.events.write().unwrap().push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

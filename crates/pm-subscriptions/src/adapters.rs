//! # Adapters
//!
//! Concrete port implementations: wall-clock and manually-driven clocks, an
//! in-memory funds vault, and an event recorder.

use crate::errors::TransferError;
use crate::events::SubscriptionEvent;
use crate::ports::{Clock, EventSink, FundsTransfer};
use async_trait::async_trait;
use primitive_types::U256;
use shared_types::{Identity, Timestamp};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

// =============================================================================
// CLOCKS
// =============================================================================

/// Wall-clock time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Timestamp::from_secs(secs)
    }
}

/// Manually-driven clock for tests. Starts at the epoch and only moves when
/// told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_secs: AtomicU64,
}

impl ManualClock {
    /// Creates a clock stopped at the epoch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the absolute time.
    pub fn set(&self, now: Timestamp) {
        self.now_secs.store(now.as_secs(), Ordering::SeqCst);
    }

    /// Advances the clock by `secs`.
    pub fn advance_secs(&self, secs: u64) {
        self.now_secs.fetch_add(secs, Ordering::SeqCst);
    }

    /// Advances the clock by whole days.
    pub fn advance_days(&self, days: u64) {
        self.advance_secs(days * 24 * 60 * 60);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_secs(self.now_secs.load(Ordering::SeqCst))
    }
}

// =============================================================================
// FUNDS VAULT
// =============================================================================

/// In-memory transfer backend. Records what each identity has received and
/// lets tests mark recipients as refusing funds.
#[derive(Debug, Default)]
pub struct InMemoryVault {
    received: RwLock<HashMap<Identity, U256>>,
    refusing: RwLock<HashSet<Identity>>,
}

impl InMemoryVault {
    /// Creates an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total delivered to an identity so far.
    #[must_use]
    pub fn received_by(&self, identity: Identity) -> U256 {
        self.received
            .read()
            .unwrap()
            .get(&identity)
            .copied()
            .unwrap_or_else(U256::zero)
    }

    /// Marks a recipient as refusing funds.
    pub fn refuse(&self, identity: Identity) {
        self.refusing.write().unwrap().insert(identity);
    }

    /// Clears a refusal.
    pub fn accept(&self, identity: Identity) {
        self.refusing.write().unwrap().remove(&identity);
    }
}

#[async_trait]
impl FundsTransfer for InMemoryVault {
    async fn transfer(&self, to: Identity, amount: U256) -> Result<(), TransferError> {
        if self.refusing.read().unwrap().contains(&to) {
            return Err(TransferError::RecipientUnavailable(to));
        }
        let mut received = self.received.write().unwrap();
        let total = received.entry(to).or_insert_with(U256::zero);
        *total = total.saturating_add(amount);
        Ok(())
    }
}

// =============================================================================
// EVENT RECORDER
// =============================================================================

/// Records published events in order.
#[derive(Debug, Default)]
pub struct RecordingEvents {
    events: RwLock<Vec<SubscriptionEvent>>,
}

impl RecordingEvents {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far.
    #[must_use]
    pub fn recorded(&self) -> Vec<SubscriptionEvent> {
        self.events.read().unwrap().clone()
    }

    /// Returns true if nothing has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().unwrap().is_empty()
    }
}

#[async_trait]
impl EventSink for RecordingEvents {
    async fn publish(&self, event: SubscriptionEvent) {
        debug!(topic = event.topic(), "Recording subscription event");
        self.events.write().unwrap().push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

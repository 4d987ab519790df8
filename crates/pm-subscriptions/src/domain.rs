//! # Subscription Domain
//!
//! The per-identity subscription record and its validity rule. Validity is
//! derived lazily from the last payment time; nothing in this crate runs on
//! a timer.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{Identity, Timestamp};

/// How long a payment keeps a subscription valid, in seconds (30 days).
pub const VALIDITY_WINDOW_SECS: u64 = 30 * 24 * 60 * 60;

/// One identity's subscription record.
///
/// The stored `active` flag and derived validity are distinct: a
/// subscription stays flagged active after its payment window lapses, and
/// only an explicit cancel clears the flag. [`Subscription::is_current`]
/// is the check callers actually want.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// The subscribing identity.
    pub subscriber: Identity,
    /// Price per billing period, in value units. Renewals must match it.
    pub price: U256,
    /// When the most recent payment (subscribe or renew) landed.
    pub last_payment: Timestamp,
    /// Whether the subscription has been cancelled. Does not expire on its
    /// own.
    pub active: bool,
}

impl Subscription {
    /// Opens a subscription paid for at `now`.
    #[must_use]
    pub fn new(subscriber: Identity, price: U256, now: Timestamp) -> Self {
        Self {
            subscriber,
            price,
            last_payment: now,
            active: true,
        }
    }

    /// Derived validity: flagged active and paid within the window.
    #[must_use]
    pub fn is_current(&self, now: Timestamp) -> bool {
        self.active && now.secs_since(self.last_payment) <= VALIDITY_WINDOW_SECS
    }
}

// =============================================================================
// TESTS
// =============================================================================

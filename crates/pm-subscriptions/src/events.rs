//! # Subscription Events
//!
//! Lifecycle notifications published after each successful operation.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{Identity, Timestamp};

/// Published when an identity opens (or reopens) a subscription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribedPayload {
    /// The subscribing identity.
    pub subscriber: Identity,
    /// Price per billing period.
    pub price: U256,
    /// Payment time.
    pub paid_at: Timestamp,
}

/// Published when a subscription is renewed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewedPayload {
    /// The renewing identity.
    pub subscriber: Identity,
    /// Payment time; the validity window restarts here.
    pub paid_at: Timestamp,
}

/// Published when a subscription is cancelled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelledPayload {
    /// The cancelling identity.
    pub subscriber: Identity,
}

/// Published when the operator sweeps the pooled balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawnPayload {
    /// The operator the pool was swept to.
    pub operator: Identity,
    /// Amount swept.
    pub amount: U256,
}

/// All subscription lifecycle events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionEvent {
    /// Subscription opened.
    Subscribed(SubscribedPayload),
    /// Subscription renewed.
    Renewed(RenewedPayload),
    /// Subscription cancelled.
    Cancelled(CancelledPayload),
    /// Pool swept to the operator.
    Withdrawn(WithdrawnPayload),
}

impl SubscriptionEvent {
    /// The topic string this event publishes under.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Subscribed(_) => topics::SUBSCRIBED,
            Self::Renewed(_) => topics::RENEWED,
            Self::Cancelled(_) => topics::CANCELLED,
            Self::Withdrawn(_) => topics::WITHDRAWN,
        }
    }
}

/// Topic constants.
pub mod topics {
    /// Subscription opened.
    pub const SUBSCRIBED: &str = "subscriptions.subscribed";
    /// Subscription renewed.
    pub const RENEWED: &str = "subscriptions.renewed";
    /// Subscription cancelled.
    pub const CANCELLED: &str = "subscriptions.cancelled";
    /// Pool swept to the operator.
    pub const WITHDRAWN: &str = "subscriptions.withdrawn";
}

// =============================================================================
// TESTS
// =============================================================================

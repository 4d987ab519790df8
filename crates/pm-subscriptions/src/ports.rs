//! # Ports
//!
//! Inbound API and outbound capability traits. The ledger depends only on
//! these traits; adapters supply concrete clocks, transfer backends, and
//! event sinks.

use crate::errors::{SubscriptionError, TransferError};
use crate::events::SubscriptionEvent;
use async_trait::async_trait;
use primitive_types::U256;
use shared_types::{Identity, Timestamp};

// =============================================================================
// INBOUND
// =============================================================================

/// Public subscription ledger API.
///
/// Callers arrive with an already-verified `caller` identity; no
/// authentication happens here.
#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    /// Opens (or reopens) a subscription at `price` per period.
    ///
    /// # Errors
    ///
    /// - [`SubscriptionError::IncorrectPayment`] unless `paid == price`.
    async fn subscribe(
        &self,
        caller: Identity,
        price: U256,
        paid: U256,
    ) -> Result<(), SubscriptionError>;

    /// Renews the caller's subscription, restarting its validity window.
    ///
    /// # Errors
    ///
    /// - [`SubscriptionError::NoActiveSubscription`] if the caller has no
    ///   active-flagged subscription.
    /// - [`SubscriptionError::IncorrectPayment`] unless `paid` matches the
    ///   subscription's stored price.
    async fn renew(&self, caller: Identity, paid: U256) -> Result<(), SubscriptionError>;

    /// Cancels the caller's subscription, clearing its active flag.
    ///
    /// # Errors
    ///
    /// - [`SubscriptionError::NoActiveSubscription`] if there is nothing
    ///   active to cancel.
    async fn cancel(&self, caller: Identity) -> Result<(), SubscriptionError>;

    /// Derived validity: active-flagged and paid within the window, as of
    /// the clock's current time.
    async fn is_valid(&self, identity: Identity) -> bool;

    /// Sweeps the full pooled balance to the operator.
    ///
    /// # Errors
    ///
    /// - [`SubscriptionError::NotOperator`] if `caller` is not the operator.
    /// - [`SubscriptionError::TransferFailed`] if the sweep could not be
    ///   delivered; the pool is retained.
    async fn withdraw(&self, caller: Identity) -> Result<U256, SubscriptionError>;
}

// =============================================================================
// OUTBOUND
// =============================================================================

/// Time source. Validity is computed lazily against `now()`; there are no
/// background timers or expiry sweeps.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now(&self) -> Timestamp;
}

/// Destination for swept funds. Transfers may fail for some recipients.
#[async_trait]
pub trait FundsTransfer: Send + Sync {
    /// Delivers `amount` value units to `to`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] if the recipient cannot accept the funds.
    async fn transfer(&self, to: Identity, amount: U256) -> Result<(), TransferError>;
}

/// Event publication. Fire-and-forget.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publishes a lifecycle event.
    async fn publish(&self, event: SubscriptionEvent);
}

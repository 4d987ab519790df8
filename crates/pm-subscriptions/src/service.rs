//! # Subscription Service
//!
//! The subscription ledger: one record per identity plus a single pooled
//! balance. Operations run serially behind one write lock; validity is
//! always computed fresh against the clock, never cached.

use crate::adapters::{InMemoryVault, ManualClock, RecordingEvents};
use crate::domain::Subscription;
use crate::errors::SubscriptionError;
use crate::events::{
    CancelledPayload, RenewedPayload, SubscribedPayload, SubscriptionEvent, WithdrawnPayload,
};
use crate::ports::{Clock, EventSink, FundsTransfer, SubscriptionApi};

use async_trait::async_trait;
use primitive_types::U256;
use shared_types::Identity;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Subscription records and the pooled balance, locked together.
#[derive(Debug, Default)]
struct SubscriptionTable {
    subscriptions: HashMap<Identity, Subscription>,
    pool: U256,
}

/// The subscription ledger service.
///
/// Generic over its outbound ports: a [`Clock`] for lazy validity checks, a
/// [`FundsTransfer`] backend for the operator sweep, and an [`EventSink`].
pub struct SubscriptionService<C: Clock, F: FundsTransfer, E: EventSink> {
    operator: Identity,
    clock: C,
    transfers: Arc<F>,
    events: Arc<E>,
    table: Arc<RwLock<SubscriptionTable>>,
}

impl<C: Clock, F: FundsTransfer, E: EventSink> SubscriptionService<C, F, E> {
    /// Creates an empty ledger swept to `operator`.
    pub fn new(operator: Identity, clock: C, transfers: F, events: E) -> Self {
        Self {
            operator,
            clock,
            transfers: Arc::new(transfers),
            events: Arc::new(events),
            table: Arc::new(RwLock::new(SubscriptionTable::default())),
        }
    }

    /// The clock driving validity checks.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Handle on the transfer backend, mainly for inspection in tests.
    #[must_use]
    pub fn transfer_backend(&self) -> Arc<F> {
        Arc::clone(&self.transfers)
    }

    /// Handle on the event sink, mainly for inspection in tests.
    #[must_use]
    pub fn event_sink(&self) -> Arc<E> {
        Arc::clone(&self.events)
    }

    /// The stored record for an identity, if any.
    pub async fn subscription_of(&self, identity: Identity) -> Option<Subscription> {
        self.table.read().await.subscriptions.get(&identity).cloned()
    }

    /// Current pooled balance awaiting withdrawal.
    pub async fn pool_balance(&self) -> U256 {
        self.table.read().await.pool
    }

    /// Opens (or reopens) a subscription, overwriting any prior record.
    #[instrument(skip(self), fields(subscriber = %caller))]
    pub async fn subscribe(
        &self,
        caller: Identity,
        price: U256,
        paid: U256,
    ) -> Result<(), SubscriptionError> {
        if paid != price {
            return Err(SubscriptionError::IncorrectPayment {
                expected: price,
                paid,
            });
        }

        let now = self.clock.now();
        let mut table = self.table.write().await;
        table
            .subscriptions
            .insert(caller, Subscription::new(caller, price, now));
        table.pool = table.pool.saturating_add(paid);

        info!(%price, "Subscription opened");
        self.events
            .publish(SubscriptionEvent::Subscribed(SubscribedPayload {
                subscriber: caller,
                price,
                paid_at: now,
            }))
            .await;
        Ok(())
    }

    /// Renews the caller's subscription, restarting its validity window.
    /// A lapsed-but-uncancelled subscription can still be renewed.
    #[instrument(skip(self), fields(subscriber = %caller))]
    pub async fn renew(&self, caller: Identity, paid: U256) -> Result<(), SubscriptionError> {
        let now = self.clock.now();
        let mut table = self.table.write().await;

        let subscription = table
            .subscriptions
            .get_mut(&caller)
            .filter(|sub| sub.active)
            .ok_or(SubscriptionError::NoActiveSubscription(caller))?;
        if paid != subscription.price {
            return Err(SubscriptionError::IncorrectPayment {
                expected: subscription.price,
                paid,
            });
        }

        subscription.last_payment = now;
        table.pool = table.pool.saturating_add(paid);

        debug!("Subscription renewed");
        self.events
            .publish(SubscriptionEvent::Renewed(RenewedPayload {
                subscriber: caller,
                paid_at: now,
            }))
            .await;
        Ok(())
    }

    /// Cancels the caller's subscription. No refund; the pool keeps every
    /// payment already made.
    #[instrument(skip(self), fields(subscriber = %caller))]
    pub async fn cancel(&self, caller: Identity) -> Result<(), SubscriptionError> {
        let mut table = self.table.write().await;
        let subscription = table
            .subscriptions
            .get_mut(&caller)
            .filter(|sub| sub.active)
            .ok_or(SubscriptionError::NoActiveSubscription(caller))?;
        subscription.active = false;

        info!("Subscription cancelled");
        self.events
            .publish(SubscriptionEvent::Cancelled(CancelledPayload {
                subscriber: caller,
            }))
            .await;
        Ok(())
    }

    /// Derived validity as of now.
    pub async fn is_valid(&self, identity: Identity) -> bool {
        let now = self.clock.now();
        self.table
            .read()
            .await
            .subscriptions
            .get(&identity)
            .is_some_and(|sub| sub.is_current(now))
    }

    /// Sweeps the full pooled balance to the operator and returns the
    /// amount swept. The pool is cleared only after the transfer lands.
    #[instrument(skip(self), fields(caller = %caller))]
    pub async fn withdraw(&self, caller: Identity) -> Result<U256, SubscriptionError> {
        if caller != self.operator {
            warn!("Withdrawal rejected: caller is not the operator");
            return Err(SubscriptionError::NotOperator { caller });
        }

        let mut table = self.table.write().await;
        let amount = table.pool;
        self.transfers.transfer(self.operator, amount).await?;
        table.pool = U256::zero();

        info!(%amount, "Pool swept to operator");
        self.events
            .publish(SubscriptionEvent::Withdrawn(WithdrawnPayload {
                operator: self.operator,
                amount,
            }))
            .await;
        Ok(amount)
    }
}

/// Create a service with a manual clock and in-memory adapters (for
/// testing).
#[must_use]
pub fn create_test_service(
    operator: Identity,
) -> SubscriptionService<ManualClock, InMemoryVault, RecordingEvents> {
    SubscriptionService::new(
        operator,
        ManualClock::new(),
        InMemoryVault::new(),
        RecordingEvents::new(),
    )
}

// =============================================================================
// SubscriptionApi Implementation
// =============================================================================

#[async_trait]
impl<C: Clock, F: FundsTransfer, E: EventSink> SubscriptionApi for SubscriptionService<C, F, E> {
    async fn subscribe(
        &self,
        caller: Identity,
        price: U256,
        paid: U256,
    ) -> Result<(), SubscriptionError> {
        Self::subscribe(self, caller, price, paid).await
    }

    async fn renew(&self, caller: Identity, paid: U256) -> Result<(), SubscriptionError> {
        Self::renew(self, caller, paid).await
    }

    async fn cancel(&self, caller: Identity) -> Result<(), SubscriptionError> {
        Self::cancel(self, caller).await
    }

    async fn is_valid(&self, identity: Identity) -> bool {
        Self::is_valid(self, identity).await
    }

    async fn withdraw(&self, caller: Identity) -> Result<U256, SubscriptionError> {
        Self::withdraw(self, caller).await
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the marketplace ledger depends on. Adapters implement these
//! traits to provide:
//! - Ownership record storage (swappable backend)
//! - Fund disbursement (payouts may fail)
//! - Event publication
//!
//! Dependencies point inward: adapters implement these traits; the domain
//! never names an adapter.

use crate::domain::value_objects::{AssetId, Identity, U256};
use crate::errors::{OwnershipError, PayoutError};
use crate::events::MarketEvent;
use async_trait::async_trait;

// =============================================================================
// OWNERSHIP STORE
// =============================================================================

/// Capability interface over the `AssetId -> Identity` ownership table.
///
/// Only two call sites mutate ownership: mint (first owner) and settlement
/// (sale transfer). Keeping the table behind this trait lets the backing
/// store change (in-memory map, persistent store) without touching the
/// settlement engine.
#[async_trait]
pub trait OwnershipStore: Send + Sync {
    /// Records the first owner of a freshly minted asset.
    ///
    /// # Errors
    ///
    /// * [`OwnershipError::AlreadyMinted`] - an owner is already recorded
    async fn record_mint(&self, asset_id: AssetId, owner: Identity) -> Result<(), OwnershipError>;

    /// Reassigns ownership from `from` to `to`, adjusting both owners'
    /// counts.
    ///
    /// # Errors
    ///
    /// * [`OwnershipError::UnknownAsset`] - no owner recorded for the asset
    /// * [`OwnershipError::NotCurrentOwner`] - `from` is not the recorded owner
    async fn transfer_ownership(
        &self,
        asset_id: AssetId,
        from: Identity,
        to: Identity,
    ) -> Result<(), OwnershipError>;

    /// The current owner of an asset, or None if never minted.
    async fn owner_of(&self, asset_id: AssetId) -> Option<Identity>;

    /// Number of assets currently owned by an identity.
    async fn balance_of(&self, owner: Identity) -> u64;

    /// Total number of ownership records (equals the number of minted assets).
    async fn minted_total(&self) -> u64;
}

// =============================================================================
// PAYOUT SINK
// =============================================================================

/// A single credit of value units to a recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    /// Who receives the funds.
    pub recipient: Identity,
    /// How much, in value units.
    pub amount: U256,
}

impl Payout {
    /// Creates a payout instruction.
    #[must_use]
    pub fn new(recipient: Identity, amount: U256) -> Self {
        Self { recipient, amount }
    }
}

/// Interface for disbursing sale proceeds.
///
/// A payout can fail for reasons outside the ledger's control (a recipient
/// that cannot accept funds). The sink contract is all-or-nothing: either
/// every credit in the batch is applied, in order, or none is and an error
/// is returned. Settlement relies on this to keep the three-way split
/// atomic.
#[async_trait]
pub trait PayoutSink: Send + Sync {
    /// Applies all credits in order, atomically.
    ///
    /// # Errors
    ///
    /// * [`PayoutError::RecipientUnavailable`] - some recipient refuses funds;
    ///   no credit in the batch was applied
    /// * [`PayoutError::Sink`] - sink-specific failure; no credit was applied
    async fn disburse(&self, credits: &[Payout]) -> Result<(), PayoutError>;

    /// Convenience for a single credit.
    ///
    /// # Errors
    ///
    /// Same as [`PayoutSink::disburse`].
    async fn credit(&self, recipient: Identity, amount: U256) -> Result<(), PayoutError> {
        self.disburse(&[Payout::new(recipient, amount)]).await
    }
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Interface for publishing ledger events.
///
/// Publication is fire-and-forget: a sink may buffer, drop, or forward
/// events, but it can never fail an operation that already committed.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publishes one event.
    async fn publish(&self, event: MarketEvent);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mock sink that applies nothing and records the batch sizes it saw
    struct CountingSink {
        batches: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl PayoutSink for CountingSink {
        async fn disburse(&self, credits: &[Payout]) -> Result<(), PayoutError> {
            self.batches.lock().unwrap().push(credits.len());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_credit_delegates_to_disburse() {
        let sink = CountingSink {
            batches: Mutex::new(Vec::new()),
        };
        sink.credit(Identity::new([1u8; 20]), U256::from(5))
            .await
            .unwrap();
        assert_eq!(*sink.batches.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_payout_construction() {
        let p = Payout::new(Identity::ZERO, U256::from(10));
        assert_eq!(p.amount, U256::from(10));
    }
}

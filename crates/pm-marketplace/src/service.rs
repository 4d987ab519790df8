//! # Marketplace Service
//!
//! The settlement engine and coordinating component. Owns the state
//! aggregate and the ownership store behind a single write lock, so every
//! public operation runs as one serial transaction: it either completes in
//! full or leaves no trace.

use crate::domain::entities::{Asset, Listing, SettlementReceipt};
use crate::domain::invariants::check_all_settlement_invariants;
use crate::domain::services::{
    compute_fee_split, validate_marketplace_fee, validate_price, validate_royalty,
};
use crate::domain::state::MarketplaceState;
use crate::domain::value_objects::{AssetId, BasisPoints, Identity, U256};
use crate::errors::MarketError;
use crate::events::{
    AssetListedPayload, AssetMintedPayload, AssetSoldPayload, AssetUnlistedPayload, MarketEvent,
    MarketplaceFeeUpdatedPayload,
};
use crate::ports::inbound::MarketplaceApi;
use crate::ports::outbound::{EventSink, OwnershipStore, Payout, PayoutSink};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// =============================================================================
// CONFIGURATION & STATISTICS
// =============================================================================

/// Marketplace service configuration.
#[derive(Debug, Clone, Copy)]
pub struct ServiceConfig {
    /// The platform operator: sole identity allowed to change the fee
    /// policy, and recipient of the marketplace fee on every sale.
    pub operator: Identity,
    /// Marketplace fee at construction.
    pub initial_fee: BasisPoints,
}

impl ServiceConfig {
    /// Creates a configuration.
    #[must_use]
    pub fn new(operator: Identity, initial_fee: BasisPoints) -> Self {
        Self {
            operator,
            initial_fee,
        }
    }
}

/// Statistics for the marketplace service.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Total assets minted.
    pub assets_minted: u64,
    /// Purchases settled in full.
    pub sales_settled: u64,
    /// Purchases that failed for any reason (all rolled back).
    pub failed_settlements: u64,
    /// Fee changes rejected for lack of authorization.
    pub rejected_fee_updates: u64,
    /// Total value units settled across all sales.
    pub total_volume: U256,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The state aggregate and ownership store, locked together.
///
/// Bundling them under one lock is what makes the serial-transaction model
/// structural: no operation can see the listing book and the ownership
/// table out of step.
struct Ledger<O> {
    state: MarketplaceState,
    ownership: O,
}

/// The marketplace ledger service.
///
/// Generic over its three outbound ports:
/// - `O`: ownership record backend
/// - `P`: payout sink (may fail; settlement rolls back)
/// - `E`: event sink (fire-and-forget)
pub struct MarketplaceService<O: OwnershipStore, P: PayoutSink, E: EventSink> {
    config: ServiceConfig,
    ledger: Arc<RwLock<Ledger<O>>>,
    payouts: Arc<P>,
    events: Arc<E>,
    stats: Arc<RwLock<ServiceStats>>,
}

impl<O: OwnershipStore, P: PayoutSink, E: EventSink> MarketplaceService<O, P, E> {
    /// Creates a new marketplace service.
    pub fn new(ownership: O, payouts: P, events: E, config: ServiceConfig) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(Ledger {
                state: MarketplaceState::new(config.initial_fee),
                ownership,
            })),
            payouts: Arc::new(payouts),
            events: Arc::new(events),
            stats: Arc::new(RwLock::new(ServiceStats::default())),
            config,
        }
    }

    /// Current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Handle on the payout sink, mainly for inspection in tests.
    #[must_use]
    pub fn payout_sink(&self) -> Arc<P> {
        Arc::clone(&self.payouts)
    }

    /// Handle on the event sink, mainly for inspection in tests.
    #[must_use]
    pub fn event_sink(&self) -> Arc<E> {
        Arc::clone(&self.events)
    }

    // =========================================================================
    // MINT
    // =========================================================================

    /// Mints a new asset owned and created by `caller`.
    #[instrument(skip(self, metadata_uri), fields(caller = %caller))]
    pub async fn mint(
        &self,
        caller: Identity,
        metadata_uri: String,
        royalty_rate_bps: u16,
    ) -> Result<AssetId, MarketError> {
        let royalty_rate = validate_royalty(royalty_rate_bps)?;

        let mut ledger = self.ledger.write().await;
        let asset_id = ledger
            .state
            .record_asset(caller, metadata_uri.clone(), royalty_rate);

        // Mint is all-or-nothing: unwind the registry record if the
        // ownership store rejects the write. Ids are not reused either way.
        if let Err(err) = ledger.ownership.record_mint(asset_id, caller).await {
            ledger.state.discard_asset(asset_id);
            return Err(err.into());
        }

        self.stats.write().await.assets_minted += 1;
        info!(%asset_id, "Asset minted");
        self.events
            .publish(MarketEvent::AssetMinted(AssetMintedPayload {
                asset_id,
                creator: caller,
                metadata_uri,
            }))
            .await;
        Ok(asset_id)
    }

    // =========================================================================
    // LIST / UNLIST
    // =========================================================================

    /// Lists an asset for sale, overwriting any prior listing for it.
    #[instrument(skip(self), fields(caller = %caller, %asset_id))]
    pub async fn list(
        &self,
        caller: Identity,
        asset_id: AssetId,
        price: U256,
    ) -> Result<(), MarketError> {
        let mut ledger = self.ledger.write().await;
        if ledger.state.asset(asset_id).is_none() {
            return Err(MarketError::AssetNotFound(asset_id));
        }
        if ledger.ownership.owner_of(asset_id).await != Some(caller) {
            return Err(MarketError::NotOwner { caller, asset_id });
        }
        let price = validate_price(price)?;

        ledger.state.put_listing(Listing::new(asset_id, caller, price));
        debug!(%price, "Asset listed");
        self.events
            .publish(MarketEvent::AssetListed(AssetListedPayload {
                asset_id,
                seller: caller,
                price,
            }))
            .await;
        Ok(())
    }

    /// Withdraws a listing. Authorized against the recorded seller, not the
    /// live owner; idempotent on an already-inactive listing.
    #[instrument(skip(self), fields(caller = %caller, %asset_id))]
    pub async fn unlist(&self, caller: Identity, asset_id: AssetId) -> Result<(), MarketError> {
        let mut ledger = self.ledger.write().await;
        let recorded_seller = ledger
            .state
            .listing(asset_id)
            .map(|l| l.seller)
            .ok_or(MarketError::ListingNotFound(asset_id))?;
        if recorded_seller != caller {
            return Err(MarketError::NotSeller { caller, asset_id });
        }

        ledger.state.deactivate_listing(asset_id)?;
        debug!("Asset unlisted");
        self.events
            .publish(MarketEvent::AssetUnlisted(AssetUnlistedPayload {
                asset_id,
                seller: caller,
            }))
            .await;
        Ok(())
    }

    // =========================================================================
    // PURCHASE (SETTLEMENT)
    // =========================================================================

    /// Purchases a listed asset with an exact payment.
    #[instrument(skip(self), fields(buyer = %caller, %asset_id))]
    pub async fn purchase(
        &self,
        caller: Identity,
        asset_id: AssetId,
        paid: U256,
    ) -> Result<SettlementReceipt, MarketError> {
        let result = self.settle(caller, asset_id, paid).await;

        let mut stats = self.stats.write().await;
        match &result {
            Ok(receipt) => {
                stats.sales_settled += 1;
                stats.total_volume = stats.total_volume.saturating_add(receipt.price);
            }
            Err(err) => {
                stats.failed_settlements += 1;
                warn!(error = %err, "Purchase failed");
            }
        }
        result
    }

    /// The settlement transaction proper. Runs entirely under the write
    /// lock; on any error every mutation made here has been undone.
    async fn settle(
        &self,
        buyer: Identity,
        asset_id: AssetId,
        paid: U256,
    ) -> Result<SettlementReceipt, MarketError> {
        let mut ledger = self.ledger.write().await;

        let listing = ledger
            .state
            .active_listing(asset_id)
            .cloned()
            .ok_or(MarketError::NotForSale(asset_id))?;
        if paid != listing.price {
            return Err(MarketError::IncorrectPayment {
                expected: listing.price,
                paid,
            });
        }

        let asset = ledger
            .state
            .asset(asset_id)
            .cloned()
            .ok_or(MarketError::AssetNotFound(asset_id))?;
        let fee_rate = ledger.state.fee_policy().marketplace_fee;
        let split = compute_fee_split(listing.price, fee_rate, asset.royalty_rate)?;

        // The recorded seller is both the transfer source and the payee;
        // current ownership is not consulted beyond the transfer itself.
        let seller = listing.seller;

        ledger
            .ownership
            .transfer_ownership(asset_id, seller, buyer)
            .await?;
        ledger.state.deactivate_listing(asset_id)?;

        let credits = [
            Payout::new(seller, split.seller_amount),
            Payout::new(asset.creator, split.royalty_fee),
            Payout::new(self.config.operator, split.market_fee),
        ];
        if let Err(payout_err) = self.payouts.disburse(&credits).await {
            // Payout failure is fatal to the whole operation: undo the
            // ownership transfer and restore the listing before reporting.
            if let Err(undo_err) = ledger
                .ownership
                .transfer_ownership(asset_id, buyer, seller)
                .await
            {
                error!(error = %undo_err, "Settlement rollback could not restore ownership");
            }
            if let Err(undo_err) = ledger.state.reactivate_listing(asset_id) {
                error!(error = %undo_err, "Settlement rollback could not restore listing");
            }
            return Err(MarketError::PayoutFailed(payout_err));
        }

        // Post-settlement audit. A violation here is a bug in this engine,
        // not a caller error; it is logged loudly rather than surfaced.
        let listing_after = ledger
            .state
            .listing(asset_id)
            .cloned()
            .unwrap_or(listing.clone());
        let owner_after = ledger.ownership.owner_of(asset_id).await;
        let audit = check_all_settlement_invariants(
            &split,
            listing.price,
            &listing_after,
            owner_after,
            buyer,
        );
        if !audit.is_valid() {
            error!(?audit, "Settlement invariant violated");
        }

        let receipt = SettlementReceipt {
            settlement_id: Uuid::new_v4(),
            asset_id,
            buyer,
            seller,
            price: listing.price,
            split,
        };
        info!(
            settlement_id = %receipt.settlement_id,
            %seller,
            price = %receipt.price,
            "Sale settled"
        );
        self.events
            .publish(MarketEvent::AssetSold(AssetSoldPayload {
                settlement_id: receipt.settlement_id,
                asset_id,
                buyer,
                seller,
                price: receipt.price,
                split,
            }))
            .await;
        Ok(receipt)
    }

    // =========================================================================
    // FEE POLICY
    // =========================================================================

    /// Replaces the marketplace fee rate. Operator only.
    #[instrument(skip(self), fields(caller = %caller))]
    pub async fn set_marketplace_fee(
        &self,
        caller: Identity,
        new_fee_bps: u16,
    ) -> Result<(), MarketError> {
        if caller != self.config.operator {
            self.stats.write().await.rejected_fee_updates += 1;
            warn!("Fee update rejected: caller is not the operator");
            return Err(MarketError::NotOperator { caller });
        }
        let new_rate = validate_marketplace_fee(new_fee_bps)?;

        let mut ledger = self.ledger.write().await;
        let old_fee_bps = ledger.state.fee_policy().marketplace_fee.as_bps();
        ledger.state.set_marketplace_fee(new_rate);
        info!(old_fee_bps, new_fee_bps, "Marketplace fee updated");
        self.events
            .publish(MarketEvent::MarketplaceFeeUpdated(
                MarketplaceFeeUpdatedPayload {
                    old_fee_bps,
                    new_fee_bps,
                },
            ))
            .await;
        Ok(())
    }

    // =========================================================================
    // READ ACCESSORS
    // =========================================================================

    /// The asset record, or None if never minted.
    pub async fn asset_of(&self, asset_id: AssetId) -> Option<Asset> {
        self.ledger.read().await.state.asset(asset_id).cloned()
    }

    /// The current owner, or None if never minted.
    pub async fn owner_of(&self, asset_id: AssetId) -> Option<Identity> {
        self.ledger.read().await.ownership.owner_of(asset_id).await
    }

    /// Number of assets currently owned by an identity.
    pub async fn balance_of(&self, owner: Identity) -> u64 {
        self.ledger.read().await.ownership.balance_of(owner).await
    }

    /// The listing record for an asset (active or not), or None.
    pub async fn listing_of(&self, asset_id: AssetId) -> Option<Listing> {
        self.ledger.read().await.state.listing(asset_id).cloned()
    }

    /// The current marketplace fee in basis points.
    pub async fn marketplace_fee_bps(&self) -> u16 {
        self.ledger
            .read()
            .await
            .state
            .fee_policy()
            .marketplace_fee
            .as_bps()
    }
}

/// Create a service with in-memory adapters (for testing).
#[must_use]
pub fn create_test_service(
    operator: Identity,
) -> MarketplaceService<
    crate::adapters::InMemoryOwnership,
    crate::adapters::InMemoryTreasury,
    crate::adapters::RecordingEventSink,
> {
    MarketplaceService::new(
        crate::adapters::InMemoryOwnership::new(),
        crate::adapters::InMemoryTreasury::new(),
        crate::adapters::RecordingEventSink::new(),
        ServiceConfig::new(operator, BasisPoints::new(250).expect("250 bps is under the cap")),
    )
}

// =============================================================================
// MarketplaceApi Implementation
// =============================================================================

#[async_trait]
impl<O: OwnershipStore, P: PayoutSink, E: EventSink> MarketplaceApi
    for MarketplaceService<O, P, E>
{
    async fn mint(
        &self,
        caller: Identity,
        metadata_uri: String,
        royalty_rate_bps: u16,
    ) -> Result<AssetId, MarketError> {
        Self::mint(self, caller, metadata_uri, royalty_rate_bps).await
    }

    async fn list(
        &self,
        caller: Identity,
        asset_id: AssetId,
        price: U256,
    ) -> Result<(), MarketError> {
        Self::list(self, caller, asset_id, price).await
    }

    async fn unlist(&self, caller: Identity, asset_id: AssetId) -> Result<(), MarketError> {
        Self::unlist(self, caller, asset_id).await
    }

    async fn purchase(
        &self,
        caller: Identity,
        asset_id: AssetId,
        paid: U256,
    ) -> Result<SettlementReceipt, MarketError> {
        Self::purchase(self, caller, asset_id, paid).await
    }

    async fn set_marketplace_fee(
        &self,
        caller: Identity,
        new_fee_bps: u16,
    ) -> Result<(), MarketError> {
        Self::set_marketplace_fee(self, caller, new_fee_bps).await
    }

    async fn asset_of(&self, asset_id: AssetId) -> Option<Asset> {
        Self::asset_of(self, asset_id).await
    }

    async fn owner_of(&self, asset_id: AssetId) -> Option<Identity> {
        Self::owner_of(self, asset_id).await
    }

    async fn balance_of(&self, owner: Identity) -> u64 {
        Self::balance_of(self, owner).await
    }

    async fn listing_of(&self, asset_id: AssetId) -> Option<Listing> {
        Self::listing_of(self, asset_id).await
    }

    async fn marketplace_fee_bps(&self) -> u16 {
        Self::marketplace_fee_bps(self).await
    }
}

// =============================================================================
// TESTS
// =============================================================================

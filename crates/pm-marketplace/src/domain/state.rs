//! # Marketplace State Aggregate
//!
//! One cohesive aggregate owning the asset table, the id counter, the
//! listing table, and the fee policy. Every mutation path is a method here,
//! so the one-writer-at-a-time rule is enforced by structure: whoever holds
//! the aggregate holds all of it.
//!
//! Ownership records deliberately live elsewhere, behind the
//! [`crate::ports::outbound::OwnershipStore`] capability, so the backing
//! table is swappable without touching settlement.

use crate::domain::entities::{Asset, FeePolicy, Listing};
use crate::domain::value_objects::{AssetId, BasisPoints, Identity};
use crate::errors::MarketError;
use std::collections::HashMap;

/// The mutable ledger state shared by registry, listing book, and fee policy.
#[derive(Debug)]
pub struct MarketplaceState {
    /// Asset table keyed by id. Records are immutable once inserted.
    assets: HashMap<AssetId, Asset>,
    /// The id the next mint will receive. Starts at 1, never reused.
    next_id: AssetId,
    /// Listing table keyed by asset id. At most one listing per asset;
    /// relisting overwrites.
    listings: HashMap<AssetId, Listing>,
    /// Process-wide fee policy singleton.
    fee_policy: FeePolicy,
}

impl MarketplaceState {
    /// Creates empty state with the given initial marketplace fee.
    #[must_use]
    pub fn new(initial_fee: BasisPoints) -> Self {
        Self {
            assets: HashMap::new(),
            next_id: AssetId::first(),
            listings: HashMap::new(),
            fee_policy: FeePolicy::new(initial_fee),
        }
    }

    // =========================================================================
    // ASSET REGISTRY
    // =========================================================================

    /// Records a newly minted asset and returns its id.
    ///
    /// The royalty rate is already validated by construction of
    /// [`BasisPoints`]; this method cannot fail.
    pub fn record_asset(
        &mut self,
        creator: Identity,
        metadata_uri: String,
        royalty_rate: BasisPoints,
    ) -> AssetId {
        let id = self.next_id;
        self.next_id = self.next_id.next();
        self.assets
            .insert(id, Asset::new(id, creator, metadata_uri, royalty_rate));
        id
    }

    /// Removes an asset recorded earlier in the same operation.
    ///
    /// Used only to unwind a mint whose ownership record could not be
    /// written, keeping mint all-or-nothing. The id counter is not rewound;
    /// ids are never reused.
    pub fn discard_asset(&mut self, id: AssetId) {
        self.assets.remove(&id);
    }

    /// Looks up an asset by id. Returns None for ids never minted.
    #[must_use]
    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(&id)
    }

    /// Number of assets minted so far.
    #[must_use]
    pub fn minted_count(&self) -> u64 {
        self.assets.len() as u64
    }

    /// The id the next successful mint will receive.
    #[must_use]
    pub fn peek_next_id(&self) -> AssetId {
        self.next_id
    }

    // =========================================================================
    // LISTING BOOK
    // =========================================================================

    /// Writes or overwrites the listing for an asset.
    ///
    /// Overwriting a prior active listing silently discards it; no explicit
    /// cancel is required before relisting.
    pub fn put_listing(&mut self, listing: Listing) {
        self.listings.insert(listing.asset_id, listing);
    }

    /// Looks up the listing record for an asset, active or not.
    #[must_use]
    pub fn listing(&self, asset_id: AssetId) -> Option<&Listing> {
        self.listings.get(&asset_id)
    }

    /// The active listing for an asset, if any.
    #[must_use]
    pub fn active_listing(&self, asset_id: AssetId) -> Option<&Listing> {
        self.listings.get(&asset_id).filter(|l| l.active)
    }

    /// Deactivates the listing for an asset.
    ///
    /// Idempotent: deactivating an already-inactive listing succeeds.
    ///
    /// # Errors
    ///
    /// * [`MarketError::ListingNotFound`] - no listing record exists
    pub fn deactivate_listing(&mut self, asset_id: AssetId) -> Result<(), MarketError> {
        match self.listings.get_mut(&asset_id) {
            Some(listing) => {
                listing.active = false;
                Ok(())
            }
            None => Err(MarketError::ListingNotFound(asset_id)),
        }
    }

    /// Reactivates the listing for an asset.
    ///
    /// Only used to unwind a settlement whose payouts failed; the record was
    /// deactivated moments earlier in the same operation.
    ///
    /// # Errors
    ///
    /// * [`MarketError::ListingNotFound`] - no listing record exists
    pub fn reactivate_listing(&mut self, asset_id: AssetId) -> Result<(), MarketError> {
        match self.listings.get_mut(&asset_id) {
            Some(listing) => {
                listing.active = true;
                Ok(())
            }
            None => Err(MarketError::ListingNotFound(asset_id)),
        }
    }

    // =========================================================================
    // FEE POLICY
    // =========================================================================

    /// The current fee policy.
    #[must_use]
    pub fn fee_policy(&self) -> FeePolicy {
        self.fee_policy
    }

    /// Replaces the marketplace fee rate. Authorization is the service's
    /// responsibility; the aggregate stores whatever validated rate it is
    /// handed.
    pub fn set_marketplace_fee(&mut self, rate: BasisPoints) {
        self.fee_policy = FeePolicy::new(rate);
    }
}

impl Default for MarketplaceState {
    fn default() -> Self {
        Self::new(BasisPoints::ZERO)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::U256;

    fn bps(v: u16) -> BasisPoints {
        BasisPoints::new(v).unwrap()
    }

    #[test]
    fn test_ids_increase_by_one_and_never_reuse() {
        let mut state = MarketplaceState::new(bps(250));
        let creator = Identity::new([1u8; 20]);

        let a = state.record_asset(creator, "uri-a".into(), bps(0));
        let b = state.record_asset(creator, "uri-b".into(), bps(0));
        assert_eq!(a, AssetId::from(1u64));
        assert_eq!(b, AssetId::from(2u64));

        // Discarding does not rewind the counter
        state.discard_asset(b);
        let c = state.record_asset(creator, "uri-c".into(), bps(0));
        assert_eq!(c, AssetId::from(3u64));
    }

    #[test]
    fn test_asset_lookup_unminted() {
        let state = MarketplaceState::default();
        assert!(state.asset(AssetId::from(1u64)).is_none());
        assert!(state.asset(AssetId::new(U256::zero())).is_none());
    }

    #[test]
    fn test_relisting_overwrites() {
        let mut state = MarketplaceState::default();
        let seller = Identity::new([2u8; 20]);
        let id = state.record_asset(seller, "uri".into(), bps(0));

        state.put_listing(Listing::new(id, seller, U256::from(100)));
        state.put_listing(Listing::new(id, seller, U256::from(200)));

        let listing = state.listing(id).unwrap();
        assert_eq!(listing.price, U256::from(200));
        assert!(listing.active);
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let mut state = MarketplaceState::default();
        let seller = Identity::new([2u8; 20]);
        let id = state.record_asset(seller, "uri".into(), bps(0));
        state.put_listing(Listing::new(id, seller, U256::from(100)));

        assert!(state.deactivate_listing(id).is_ok());
        assert!(state.deactivate_listing(id).is_ok()); // no error second time
        assert!(state.active_listing(id).is_none());
        assert!(state.listing(id).is_some()); // record survives
    }

    #[test]
    fn test_deactivate_missing_listing() {
        let mut state = MarketplaceState::default();
        assert_eq!(
            state.deactivate_listing(AssetId::from(9u64)),
            Err(MarketError::ListingNotFound(AssetId::from(9u64)))
        );
    }

    #[test]
    fn test_fee_policy_replacement() {
        let mut state = MarketplaceState::new(bps(250));
        assert_eq!(state.fee_policy().marketplace_fee.as_bps(), 250);
        state.set_marketplace_fee(bps(1000));
        assert_eq!(state.fee_policy().marketplace_fee.as_bps(), 1000);
    }
}

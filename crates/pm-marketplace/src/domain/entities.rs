//! # Core Domain Entities
//!
//! Main business entities of the marketplace ledger: assets, listings,
//! the fee policy, and settlement outputs.

use crate::domain::value_objects::{AssetId, BasisPoints, Identity, U256};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ASSET
// =============================================================================

/// A uniquely identified digital asset.
///
/// Immutable after mint: the creator and royalty rate never change, and the
/// registry keeps the record for the process lifetime (no deletion).
/// Ownership is tracked separately and does change hands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique id, assigned sequentially at mint.
    pub id: AssetId,
    /// The identity that minted the asset. Receives royalties on every sale.
    pub creator: Identity,
    /// Opaque metadata reference. Never validated or dereferenced here.
    pub metadata_uri: String,
    /// Royalty routed to the creator on each sale.
    pub royalty_rate: BasisPoints,
}

impl Asset {
    /// Creates a new asset record.
    #[must_use]
    pub fn new(
        id: AssetId,
        creator: Identity,
        metadata_uri: String,
        royalty_rate: BasisPoints,
    ) -> Self {
        Self {
            id,
            creator,
            metadata_uri,
            royalty_rate,
        }
    }
}

// =============================================================================
// LISTING
// =============================================================================

/// A seller's standing offer to sell one asset at a fixed price.
///
/// The `seller` field records who created the listing. Settlement pays out to
/// and transfers from this recorded seller; it is never re-derived from
/// current ownership. Listings and ownership mutate together in the same
/// operation, which is what keeps the two from diverging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// The asset offered for sale.
    pub asset_id: AssetId,
    /// The identity that created the listing.
    pub seller: Identity,
    /// Asking price in value units. Always greater than zero.
    pub price: U256,
    /// Whether the offer is currently open.
    pub active: bool,
}

impl Listing {
    /// Creates a new active listing.
    #[must_use]
    pub fn new(asset_id: AssetId, seller: Identity, price: U256) -> Self {
        Self {
            asset_id,
            seller,
            price,
            active: true,
        }
    }
}

// =============================================================================
// FEE POLICY
// =============================================================================

/// Process-wide marketplace fee configuration.
///
/// Mutable only by the designated operator identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeePolicy {
    /// Fraction of every sale routed to the platform operator.
    pub marketplace_fee: BasisPoints,
}

impl FeePolicy {
    /// Creates a fee policy with the given rate.
    #[must_use]
    pub fn new(marketplace_fee: BasisPoints) -> Self {
        Self { marketplace_fee }
    }
}

// =============================================================================
// FEE SPLIT
// =============================================================================

/// The exact three-way division of a sale price.
///
/// ## Invariants
/// - `seller_amount + royalty_fee + market_fee == price` (value conservation)
/// - All components computed with integer floor arithmetic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    /// Remainder paid to the listing's recorded seller.
    pub seller_amount: U256,
    /// Amount routed to the asset's creator.
    pub royalty_fee: U256,
    /// Amount routed to the platform operator.
    pub market_fee: U256,
}

impl FeeSplit {
    /// Total of all three components.
    ///
    /// Saturates rather than panics; by construction the sum equals the sale
    /// price and cannot overflow, which the conservation invariant asserts.
    #[must_use]
    pub fn total(&self) -> U256 {
        self.seller_amount
            .saturating_add(self.royalty_fee)
            .saturating_add(self.market_fee)
    }
}

// =============================================================================
// SETTLEMENT RECEIPT
// =============================================================================

/// Receipt returned to the buyer after a successful purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    /// Unique id of this settlement, for correlation in logs and events.
    pub settlement_id: Uuid,
    /// The asset that changed hands.
    pub asset_id: AssetId,
    /// The new owner.
    pub buyer: Identity,
    /// The recorded seller that was paid out.
    pub seller: Identity,
    /// The sale price, equal to the exact payment supplied.
    pub price: U256,
    /// How the price was divided.
    pub split: FeeSplit,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_starts_active() {
        let listing = Listing::new(AssetId::from(1u64), Identity::new([1u8; 20]), U256::from(10));
        assert!(listing.active);
        assert_eq!(listing.price, U256::from(10));
    }

    #[test]
    fn test_fee_split_total() {
        let split = FeeSplit {
            seller_amount: U256::from(925),
            royalty_fee: U256::from(50),
            market_fee: U256::from(25),
        };
        assert_eq!(split.total(), U256::from(1000));
    }

    #[test]
    fn test_asset_serde_roundtrip() {
        let asset = Asset::new(
            AssetId::from(7u64),
            Identity::new([3u8; 20]),
            "ipfs://QmExample".to_string(),
            BasisPoints::new(500).unwrap(),
        );
        let json = serde_json::to_string(&asset).unwrap();
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(asset, back);
    }
}

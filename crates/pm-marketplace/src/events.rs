//! # Event Schema
//!
//! Payloads published after each successful ledger mutation. Events are
//! observability output only: the ledger never reads them back, and a sink
//! that drops them cannot affect settlement outcomes.

use crate::domain::entities::FeeSplit;
use crate::domain::value_objects::{AssetId, Identity, U256};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// EVENT PAYLOADS
// =============================================================================

/// A new asset was minted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMintedPayload {
    /// The id assigned to the asset.
    pub asset_id: AssetId,
    /// The minting identity, recorded as creator and first owner.
    pub creator: Identity,
    /// Opaque metadata reference supplied at mint.
    pub metadata_uri: String,
}

/// An asset was listed for sale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetListedPayload {
    /// The listed asset.
    pub asset_id: AssetId,
    /// The owner that created the listing.
    pub seller: Identity,
    /// Asking price in value units.
    pub price: U256,
}

/// A listing was withdrawn by its seller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUnlistedPayload {
    /// The unlisted asset.
    pub asset_id: AssetId,
    /// The recorded seller that withdrew the listing.
    pub seller: Identity,
}

/// A purchase settled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSoldPayload {
    /// Correlates with the buyer's [`crate::domain::entities::SettlementReceipt`].
    pub settlement_id: Uuid,
    /// The asset that changed hands.
    pub asset_id: AssetId,
    /// The new owner.
    pub buyer: Identity,
    /// The recorded seller that was paid out.
    pub seller: Identity,
    /// The sale price.
    pub price: U256,
    /// How the price was divided.
    pub split: FeeSplit,
}

/// The operator changed the marketplace fee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceFeeUpdatedPayload {
    /// The rate being replaced, in basis points.
    pub old_fee_bps: u16,
    /// The new rate, in basis points.
    pub new_fee_bps: u16,
}

// =============================================================================
// EVENT ENVELOPE
// =============================================================================

/// Every event the marketplace ledger can publish.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// A new asset was minted.
    AssetMinted(AssetMintedPayload),
    /// An asset was listed for sale.
    AssetListed(AssetListedPayload),
    /// A listing was withdrawn.
    AssetUnlisted(AssetUnlistedPayload),
    /// A purchase settled.
    AssetSold(AssetSoldPayload),
    /// The marketplace fee changed.
    MarketplaceFeeUpdated(MarketplaceFeeUpdatedPayload),
}

impl MarketEvent {
    /// The topic string this event is published under.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::AssetMinted(_) => topics::ASSET_MINTED,
            Self::AssetListed(_) => topics::ASSET_LISTED,
            Self::AssetUnlisted(_) => topics::ASSET_UNLISTED,
            Self::AssetSold(_) => topics::ASSET_SOLD,
            Self::MarketplaceFeeUpdated(_) => topics::FEE_UPDATED,
        }
    }
}

// =============================================================================
// TOPICS
// =============================================================================

/// Topic strings for marketplace events.
pub mod topics {
    /// A new asset was minted.
    pub const ASSET_MINTED: &str = "marketplace.asset.minted";

    /// An asset was listed for sale.
    pub const ASSET_LISTED: &str = "marketplace.asset.listed";

    /// A listing was withdrawn.
    pub const ASSET_UNLISTED: &str = "marketplace.asset.unlisted";

    /// A purchase settled.
    pub const ASSET_SOLD: &str = "marketplace.asset.sold";

    /// The marketplace fee changed.
    pub const FEE_UPDATED: &str = "marketplace.fee.updated";
}

// =============================================================================
// TESTS
// =============================================================================

//! # Driving Ports (API - Inbound)
//!
//! The public API of the marketplace ledger. The transport layer (out of
//! scope here) supplies every call with a `caller` identity it has already
//! authenticated; the ledger performs authorization only.

use crate::domain::entities::{Asset, Listing, SettlementReceipt};
use crate::domain::value_objects::{AssetId, Identity, U256};
use crate::errors::MarketError;
use async_trait::async_trait;

/// Primary API for the marketplace ledger.
///
/// Every operation runs to completion with no interleaving: the
/// implementation serializes all calls behind a single writer boundary, so
/// no caller can observe a partially applied settlement.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Mints a new asset owned and created by `caller`.
    ///
    /// # Errors
    ///
    /// * [`MarketError::InvalidRoyalty`] - royalty rate above 1000 bps
    async fn mint(
        &self,
        caller: Identity,
        metadata_uri: String,
        royalty_rate_bps: u16,
    ) -> Result<AssetId, MarketError>;

    /// Lists an asset for sale at a fixed price, overwriting any prior
    /// listing for the same asset.
    ///
    /// # Errors
    ///
    /// * [`MarketError::AssetNotFound`] - asset was never minted
    /// * [`MarketError::NotOwner`] - caller does not currently own the asset
    /// * [`MarketError::InvalidPrice`] - price is zero
    async fn list(
        &self,
        caller: Identity,
        asset_id: AssetId,
        price: U256,
    ) -> Result<(), MarketError>;

    /// Withdraws a listing. Authorized against the listing's recorded
    /// seller, not the current owner. Idempotent on an already-inactive
    /// listing.
    ///
    /// # Errors
    ///
    /// * [`MarketError::ListingNotFound`] - no listing record exists
    /// * [`MarketError::NotSeller`] - caller is not the recorded seller
    async fn unlist(&self, caller: Identity, asset_id: AssetId) -> Result<(), MarketError>;

    /// Purchases a listed asset with an exact payment, settling the
    /// three-way fee split atomically.
    ///
    /// # Errors
    ///
    /// * [`MarketError::NotForSale`] - no active listing for the asset
    /// * [`MarketError::IncorrectPayment`] - payment differs from the price
    /// * [`MarketError::FeeOverflow`] - combined fees would exceed the price
    /// * [`MarketError::PayoutFailed`] - a payout could not complete; all
    ///   mutations were rolled back
    async fn purchase(
        &self,
        caller: Identity,
        asset_id: AssetId,
        paid: U256,
    ) -> Result<SettlementReceipt, MarketError>;

    /// Replaces the marketplace fee rate. Operator only.
    ///
    /// # Errors
    ///
    /// * [`MarketError::NotOperator`] - caller is not the operator
    /// * [`MarketError::FeeTooHigh`] - new rate above 1000 bps
    async fn set_marketplace_fee(
        &self,
        caller: Identity,
        new_fee_bps: u16,
    ) -> Result<(), MarketError>;

    // =========================================================================
    // READ ACCESSORS
    // =========================================================================

    /// The asset record, or None if never minted.
    async fn asset_of(&self, asset_id: AssetId) -> Option<Asset>;

    /// The current owner, or None if never minted.
    async fn owner_of(&self, asset_id: AssetId) -> Option<Identity>;

    /// Number of assets currently owned by an identity.
    async fn balance_of(&self, owner: Identity) -> u64;

    /// The listing record for an asset (active or not), or None.
    async fn listing_of(&self, asset_id: AssetId) -> Option<Listing>;

    /// The current marketplace fee in basis points.
    async fn marketplace_fee_bps(&self) -> u16;
}

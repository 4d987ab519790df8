//! # Error Types
//!
//! All error types for the marketplace ledger. Every failure is synchronous,
//! reported to the caller, and leaves ledger state unchanged.

use crate::domain::value_objects::{AssetId, Identity, U256};
use thiserror::Error;

// =============================================================================
// MARKET ERRORS
// =============================================================================

/// Errors that can occur in marketplace operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// Royalty rate above the 1000 bps cap at mint.
    #[error("invalid royalty rate: {bps} bps exceeds cap of 1000")]
    InvalidRoyalty {
        /// The rejected rate.
        bps: u16,
    },

    /// Listing price of zero.
    #[error("invalid price: listings require a price greater than zero")]
    InvalidPrice,

    /// Caller is not the current owner of the asset.
    #[error("not owner: {caller} does not own asset {asset_id}")]
    NotOwner {
        /// The rejected caller.
        caller: Identity,
        /// The asset in question.
        asset_id: AssetId,
    },

    /// Caller is not the listing's recorded seller.
    #[error("not seller: {caller} is not the recorded seller of the listing for asset {asset_id}")]
    NotSeller {
        /// The rejected caller.
        caller: Identity,
        /// The asset in question.
        asset_id: AssetId,
    },

    /// Caller is not the designated platform operator.
    #[error("not operator: {caller} may not change the fee policy")]
    NotOperator {
        /// The rejected caller.
        caller: Identity,
    },

    /// New marketplace fee above the 1000 bps cap.
    #[error("fee too high: {bps} bps exceeds cap of 1000")]
    FeeTooHigh {
        /// The rejected rate.
        bps: u16,
    },

    /// Operation referenced an asset that was never minted.
    #[error("asset not found: {0}")]
    AssetNotFound(AssetId),

    /// No listing record exists for the asset.
    #[error("listing not found for asset {0}")]
    ListingNotFound(AssetId),

    /// No active listing exists for the asset.
    #[error("asset {0} is not for sale")]
    NotForSale(AssetId),

    /// Payment did not exactly match the listing price.
    #[error("incorrect payment: expected exactly {expected}, got {paid}")]
    IncorrectPayment {
        /// The listing price.
        expected: U256,
        /// The amount actually supplied.
        paid: U256,
    },

    /// The combined fees would exceed the sale price.
    #[error("fee overflow: combined fees exceed the sale price")]
    FeeOverflow,

    /// A payout could not be completed; the whole settlement was rolled back.
    #[error("payout failed: {0}")]
    PayoutFailed(#[from] PayoutError),

    /// Ownership store rejected a mutation.
    #[error("ownership error: {0}")]
    Ownership(#[from] OwnershipError),
}

/// Coarse classification of marketplace failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input: prices, rates, payment mismatches.
    Validation,
    /// Caller lacks the required role.
    Authorization,
    /// Referenced asset or listing does not exist.
    NotFound,
    /// Ledger state does not permit the operation.
    State,
}

impl MarketError {
    /// Classifies this error into the coarse taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRoyalty { .. }
            | Self::InvalidPrice
            | Self::FeeTooHigh { .. }
            | Self::IncorrectPayment { .. }
            | Self::FeeOverflow => ErrorKind::Validation,
            Self::NotOwner { .. } | Self::NotSeller { .. } | Self::NotOperator { .. } => {
                ErrorKind::Authorization
            }
            Self::AssetNotFound(_) | Self::ListingNotFound(_) | Self::NotForSale(_) => {
                ErrorKind::NotFound
            }
            Self::PayoutFailed(_) | Self::Ownership(_) => ErrorKind::State,
        }
    }

    /// Returns true if the caller can retry after correcting its input
    /// (e.g. resending the exact payment). Authorization failures are not
    /// retryable by the same caller.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Authorization)
    }
}

// =============================================================================
// OWNERSHIP ERRORS
// =============================================================================

/// Errors from the ownership store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OwnershipError {
    /// No owner recorded for the asset.
    #[error("no owner recorded for asset {0}")]
    UnknownAsset(AssetId),

    /// Transfer source does not match the recorded owner.
    #[error("transfer from {from} rejected: asset {asset_id} is owned by {actual}")]
    NotCurrentOwner {
        /// The asset in question.
        asset_id: AssetId,
        /// The claimed source of the transfer.
        from: Identity,
        /// The actual recorded owner.
        actual: Identity,
    },

    /// Mint attempted for an id that already has an owner.
    #[error("asset {0} already has an owner")]
    AlreadyMinted(AssetId),
}

// =============================================================================
// PAYOUT ERRORS
// =============================================================================

/// Errors from the payout sink.
///
/// A payout may fail for reasons outside this ledger's control, e.g. a
/// recipient that cannot accept funds. Settlement treats any payout failure
/// as fatal to the whole operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayoutError {
    /// The recipient cannot accept funds.
    #[error("recipient {0} cannot accept funds")]
    RecipientUnavailable(Identity),

    /// Sink-specific failure.
    #[error("payout sink error: {0}")]
    Sink(String),
}

// =============================================================================
// TESTS
// =============================================================================

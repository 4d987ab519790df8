//! # Domain Invariants
//!
//! Critical invariants that MUST hold across ledger operations. Checked at
//! runtime after settlement to catch accounting bugs before they compound.
//!
//! | ID | Invariant |
//! |----|-----------|
//! | Value Conservation | seller + royalty + market payouts equal the price exactly |
//! | Ownership Totals | sum of per-owner counts equals the number of minted assets |
//! | Settlement Coupling | a settled listing is inactive and the buyer owns the asset |

use crate::domain::entities::{FeeSplit, Listing};
use crate::domain::value_objects::{Identity, U256};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Value Conservation.
///
/// No value units are created or destroyed by a settlement: the three
/// payouts sum to the sale price exactly.
#[must_use]
pub fn check_value_conservation(split: &FeeSplit, price: U256) -> bool {
    split.total() == price
}

/// Ownership Totals.
///
/// Every minted asset has exactly one owner, so the per-owner counts must
/// sum to the number of minted assets.
#[must_use]
pub fn check_ownership_totals(owner_counts: &[u64], minted: u64) -> bool {
    owner_counts.iter().copied().sum::<u64>() == minted
}

/// Settlement Coupling.
///
/// Ownership and the listing book mutate together: after a successful
/// purchase the listing is inactive and the buyer is the recorded owner.
/// This coupling is what prevents the recorded seller and the live owner
/// from ever diverging.
#[must_use]
pub fn check_settlement_coupling(
    listing: &Listing,
    owner_after: Option<Identity>,
    buyer: Identity,
) -> bool {
    !listing.active && owner_after == Some(buyer)
}

/// Check all settlement invariants at once.
#[must_use]
pub fn check_all_settlement_invariants(
    split: &FeeSplit,
    price: U256,
    listing: &Listing,
    owner_after: Option<Identity>,
    buyer: Identity,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_value_conservation(split, price) {
        violations.push(InvariantViolation::ValueNotConserved {
            paid_out: split.total(),
            price,
        });
    }

    if !check_settlement_coupling(listing, owner_after, buyer) {
        violations.push(InvariantViolation::SettlementDecoupled {
            listing_active: listing.active,
            owner_is_buyer: owner_after == Some(buyer),
        });
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking settlement invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Payouts do not sum to the price.
    ValueNotConserved {
        /// Sum of the three payouts.
        paid_out: U256,
        /// The sale price.
        price: U256,
    },
    /// Listing deactivation and ownership transfer came apart.
    SettlementDecoupled {
        /// Whether the listing is still active.
        listing_active: bool,
        /// Whether the buyer ended up as owner.
        owner_is_buyer: bool,
    },
    /// Per-owner counts disagree with the minted total.
    OwnershipTotalsMismatch {
        /// Sum of per-owner counts.
        counted: u64,
        /// Number of minted assets.
        minted: u64,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValueNotConserved { paid_out, price } => {
                write!(f, "value not conserved: paid out {paid_out} of price {price}")
            }
            Self::SettlementDecoupled {
                listing_active,
                owner_is_buyer,
            } => {
                write!(
                    f,
                    "settlement decoupled: listing_active={listing_active}, owner_is_buyer={owner_is_buyer}"
                )
            }
            Self::OwnershipTotalsMismatch { counted, minted } => {
                write!(
                    f,
                    "ownership totals mismatch: counted {counted}, minted {minted}"
                )
            }
        }
    }
}

// =============================================================================
// RATE LIMIT CONSTANTS
// =============================================================================

/// Hard limits on rate fields.
pub mod limits {
    /// Maximum royalty rate in basis points (10%).
    pub const MAX_ROYALTY_BPS: u16 = 1000;

    /// Maximum marketplace fee in basis points (10%).
    pub const MAX_MARKETPLACE_FEE_BPS: u16 = 1000;

    /// Basis points in one whole.
    pub const BPS_SCALE: u64 = 10_000;
}

// =============================================================================
// TESTS
// =============================================================================

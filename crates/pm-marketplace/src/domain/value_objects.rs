//! # Value Objects
//!
//! Immutable domain primitives for the marketplace ledger.
//! These types represent concepts defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for 256-bit arithmetic
pub use primitive_types::U256;

// Re-export the shared caller identity for convenience
pub use shared_types::Identity;

// =============================================================================
// ASSET ID (u256, monotonic from 1)
// =============================================================================

/// Unique identifier of a minted asset.
///
/// Ids are assigned sequentially starting at 1 and are never reused.
/// Id 0 is never valid.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct AssetId(pub U256);

impl AssetId {
    /// The first id ever assigned.
    #[must_use]
    pub fn first() -> Self {
        Self(U256::one())
    }

    /// Creates an id from a raw value. Does not validate the range;
    /// lookups against unminted ids simply return not-found.
    #[must_use]
    pub fn new(raw: U256) -> Self {
        Self(raw)
    }

    /// The raw 256-bit value.
    #[must_use]
    pub fn raw(&self) -> U256 {
        self.0
    }

    /// The id that follows this one.
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(U256::one()))
    }

    /// Returns true for the never-valid zero id.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self.0)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for AssetId {
    fn from(raw: u64) -> Self {
        Self(U256::from(raw))
    }
}

impl From<U256> for AssetId {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

// =============================================================================
// BASIS POINTS (rate fields, capped at 1000 bps = 10%)
// =============================================================================

/// A fee or royalty rate in basis points (1/10000 of a whole).
///
/// ## Invariants
/// - Value is at most [`BasisPoints::CAP`] (1000 bps = 10%)
/// - Applied with floor division; no floating point anywhere
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// Maximum permitted rate: 1000 bps (10%).
    pub const CAP: u16 = 1000;

    /// One whole in basis points.
    pub const SCALE: u64 = 10_000;

    /// The zero rate.
    pub const ZERO: Self = Self(0);

    /// Creates a rate, rejecting values above the cap.
    #[must_use]
    pub fn new(bps: u16) -> Option<Self> {
        if bps <= Self::CAP {
            Some(Self(bps))
        } else {
            None
        }
    }

    /// The raw basis-point value.
    #[must_use]
    pub const fn as_bps(&self) -> u16 {
        self.0
    }

    /// Applies this rate to an amount: `floor(amount * bps / 10000)`.
    ///
    /// Returns None only if the intermediate product overflows 256 bits.
    #[must_use]
    pub fn apply_to(&self, amount: U256) -> Option<U256> {
        amount
            .checked_mul(U256::from(self.0))
            .map(|scaled| scaled / U256::from(Self::SCALE))
    }
}

impl fmt::Debug for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================

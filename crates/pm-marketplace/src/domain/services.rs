//! # Domain Services
//!
//! Pure, stateless settlement arithmetic. Everything here is deterministic
//! integer math; the mutable ledger lives in [`crate::domain::state`].

use crate::domain::entities::FeeSplit;
use crate::domain::value_objects::{BasisPoints, U256};
use crate::errors::MarketError;

/// Computes the exact three-way division of a sale price.
///
/// `market_fee = floor(price * market_rate / 10000)`,
/// `royalty_fee = floor(price * royalty_rate / 10000)`,
/// `seller_amount = price - market_fee - royalty_fee`.
///
/// With both rates capped at 1000 bps the fees can never exceed 20% of the
/// price, but the subtraction is still checked: should a future policy allow
/// a fee sum above the price, this fails with [`MarketError::FeeOverflow`]
/// instead of underflowing.
///
/// # Errors
///
/// * [`MarketError::FeeOverflow`] - fee computation overflowed, or the
///   combined fees exceed the price
pub fn compute_fee_split(
    price: U256,
    market_rate: BasisPoints,
    royalty_rate: BasisPoints,
) -> Result<FeeSplit, MarketError> {
    let market_fee = market_rate
        .apply_to(price)
        .ok_or(MarketError::FeeOverflow)?;
    let royalty_fee = royalty_rate
        .apply_to(price)
        .ok_or(MarketError::FeeOverflow)?;

    let fees = market_fee
        .checked_add(royalty_fee)
        .ok_or(MarketError::FeeOverflow)?;
    let seller_amount = price.checked_sub(fees).ok_or(MarketError::FeeOverflow)?;

    Ok(FeeSplit {
        seller_amount,
        royalty_fee,
        market_fee,
    })
}

/// Validates a royalty rate supplied at mint.
///
/// # Errors
///
/// * [`MarketError::InvalidRoyalty`] - rate exceeds the 1000 bps cap
pub fn validate_royalty(bps: u16) -> Result<BasisPoints, MarketError> {
    BasisPoints::new(bps).ok_or(MarketError::InvalidRoyalty { bps })
}

/// Validates a new marketplace fee rate.
///
/// # Errors
///
/// * [`MarketError::FeeTooHigh`] - rate exceeds the 1000 bps cap
pub fn validate_marketplace_fee(bps: u16) -> Result<BasisPoints, MarketError> {
    BasisPoints::new(bps).ok_or(MarketError::FeeTooHigh { bps })
}

/// Validates a listing price.
///
/// # Errors
///
/// * [`MarketError::InvalidPrice`] - price is zero
pub fn validate_price(price: U256) -> Result<U256, MarketError> {
    if price.is_zero() {
        Err(MarketError::InvalidPrice)
    } else {
        Ok(price)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bps(v: u16) -> BasisPoints {
        BasisPoints::new(v).unwrap()
    }

    #[test]
    fn test_fee_split_reference_scenario() {
        // price 1000, marketplace fee 250 bps, royalty 500 bps
        let split = compute_fee_split(U256::from(1000), bps(250), bps(500)).unwrap();
        assert_eq!(split.market_fee, U256::from(25));
        assert_eq!(split.royalty_fee, U256::from(50));
        assert_eq!(split.seller_amount, U256::from(925));
        assert_eq!(split.total(), U256::from(1000));
    }

    #[test]
    fn test_fee_split_conserves_value() {
        for price in [1u64, 3, 99, 1000, 12_345, u64::MAX] {
            let price = U256::from(price);
            let split = compute_fee_split(price, bps(1000), bps(1000)).unwrap();
            assert_eq!(split.total(), price, "value created or destroyed");
        }
    }

    #[test]
    fn test_fee_split_zero_rates() {
        let split = compute_fee_split(U256::from(777), bps(0), bps(0)).unwrap();
        assert_eq!(split.seller_amount, U256::from(777));
        assert_eq!(split.royalty_fee, U256::zero());
        assert_eq!(split.market_fee, U256::zero());
    }

    #[test]
    fn test_fee_split_floors_small_prices() {
        // 250 bps of 3 floors to 0; seller gets everything
        let split = compute_fee_split(U256::from(3), bps(250), bps(500)).unwrap();
        assert_eq!(split.market_fee, U256::zero());
        assert_eq!(split.royalty_fee, U256::zero());
        assert_eq!(split.seller_amount, U256::from(3));
    }

    #[test]
    fn test_fee_split_overflow_guard() {
        // A price large enough that price * bps overflows 256 bits
        assert_eq!(
            compute_fee_split(U256::MAX, bps(1000), bps(0)),
            Err(MarketError::FeeOverflow)
        );
    }

    #[test]
    fn test_validators() {
        assert!(validate_royalty(1000).is_ok());
        assert_eq!(
            validate_royalty(1001),
            Err(MarketError::InvalidRoyalty { bps: 1001 })
        );
        assert!(validate_marketplace_fee(1000).is_ok());
        assert_eq!(
            validate_marketplace_fee(1001),
            Err(MarketError::FeeTooHigh { bps: 1001 })
        );
        assert!(validate_price(U256::one()).is_ok());
        assert_eq!(validate_price(U256::zero()), Err(MarketError::InvalidPrice));
    }
}

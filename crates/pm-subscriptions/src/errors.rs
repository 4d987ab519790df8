//! # Subscription Errors
//!
//! Every failure is reported synchronously to the caller and leaves the
//! ledger unchanged.

use primitive_types::U256;
use shared_types::Identity;
use thiserror::Error;

/// Errors surfaced by subscription operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Payment does not match the required amount exactly.
    #[error("incorrect payment: expected {expected} value units, got {paid}")]
    IncorrectPayment {
        /// Exact amount required.
        expected: U256,
        /// Amount actually supplied.
        paid: U256,
    },

    /// The identity has no active subscription to renew or cancel.
    #[error("no active subscription for {0}")]
    NoActiveSubscription(Identity),

    /// Caller is not the platform operator.
    #[error("caller {caller} is not the operator")]
    NotOperator {
        /// The unauthorized caller.
        caller: Identity,
    },

    /// The pooled-balance sweep could not be delivered.
    #[error("withdrawal transfer failed: {0}")]
    TransferFailed(#[from] TransferError),
}

/// Broad classification, mirroring the marketplace error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied invalid input.
    Validation,
    /// Caller lacks the required role.
    Authorization,
    /// Operation is not possible in the current subscription state.
    State,
}

impl SubscriptionError {
    /// The broad class this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IncorrectPayment { .. } => ErrorKind::Validation,
            Self::NotOperator { .. } => ErrorKind::Authorization,
            Self::NoActiveSubscription(_) | Self::TransferFailed(_) => ErrorKind::State,
        }
    }
}

/// Errors from the outbound funds-transfer port.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// The recipient cannot accept funds right now.
    #[error("recipient {0} cannot accept funds")]
    RecipientUnavailable(Identity),

    /// Backend-specific transfer failure.
    #[error("transfer backend error: {0}")]
    Backend(String),
}

// =============================================================================
// TESTS
// =============================================================================

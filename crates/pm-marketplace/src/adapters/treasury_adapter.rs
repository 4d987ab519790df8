//! # Treasury Adapter
//!
//! In-memory payout sink. Tracks credited balances per identity and lets
//! tests mark recipients as refusing funds, to exercise the settlement
//! rollback path.

use crate::domain::value_objects::{Identity, U256};
use crate::errors::PayoutError;
use crate::ports::outbound::{Payout, PayoutSink};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// In-memory treasury.
#[derive(Debug, Default)]
pub struct InMemoryTreasury {
    /// Credited balances per identity.
    balances: RwLock<HashMap<Identity, U256>>,
    /// Recipients that refuse any credit, including zero-amount ones.
    refusing: RwLock<HashSet<Identity>>,
}

impl InMemoryTreasury {
    /// Creates an empty treasury.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total credited to an identity so far.
    #[must_use]
    pub fn balance_of(&self, identity: Identity) -> U256 {
        self.balances
            .read()
            .unwrap()
            .get(&identity)
            .copied()
            .unwrap_or_else(U256::zero)
    }

    /// Marks a recipient as refusing funds. Any batch naming it fails whole.
    pub fn refuse(&self, identity: Identity) {
        self.refusing.write().unwrap().insert(identity);
    }

    /// Clears a refusal.
    pub fn accept(&self, identity: Identity) {
        self.refusing.write().unwrap().remove(&identity);
    }
}

#[async_trait]
impl PayoutSink for InMemoryTreasury {
    async fn disburse(&self, credits: &[Payout]) -> Result<(), PayoutError> {
        // Validate the whole batch before touching any balance: the sink
        // contract is all-or-nothing.
        {
            let refusing = self.refusing.read().unwrap();
            for credit in credits {
                if refusing.contains(&credit.recipient) {
                    return Err(PayoutError::RecipientUnavailable(credit.recipient));
                }
            }
        }

        let mut balances = self.balances.write().unwrap();
        for credit in credits {
            let balance = balances
                .entry(credit.recipient)
                .or_insert_with(U256::zero);
            *balance = balance.saturating_add(credit.amount);
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

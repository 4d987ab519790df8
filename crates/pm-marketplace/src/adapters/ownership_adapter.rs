//! # Ownership Adapter
//!
//! In-memory implementation of the ownership capability. A persistent
//! backend would implement the same trait against its own tables.

use crate::domain::value_objects::{AssetId, Identity};
use crate::errors::OwnershipError;
use crate::ports::outbound::OwnershipStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory ownership table.
#[derive(Debug, Default)]
pub struct InMemoryOwnership {
    inner: RwLock<OwnershipTables>,
}

#[derive(Debug, Default)]
struct OwnershipTables {
    /// owner-of table keyed by asset id.
    owner_of: HashMap<AssetId, Identity>,
    /// owner-count table keyed by identity.
    counts: HashMap<Identity, u64>,
}

impl InMemoryOwnership {
    /// Creates an empty ownership table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-owner counts snapshot, for invariant auditing.
    #[must_use]
    pub fn owner_counts(&self) -> Vec<u64> {
        self.inner
            .read()
            .unwrap()
            .counts
            .values()
            .copied()
            .collect()
    }
}

#[async_trait]
impl OwnershipStore for InMemoryOwnership {
    async fn record_mint(&self, asset_id: AssetId, owner: Identity) -> Result<(), OwnershipError> {
        let mut tables = self.inner.write().unwrap();
        if tables.owner_of.contains_key(&asset_id) {
            return Err(OwnershipError::AlreadyMinted(asset_id));
        }
        tables.owner_of.insert(asset_id, owner);
        *tables.counts.entry(owner).or_insert(0) += 1;
        Ok(())
    }

    async fn transfer_ownership(
        &self,
        asset_id: AssetId,
        from: Identity,
        to: Identity,
    ) -> Result<(), OwnershipError> {
        let mut tables = self.inner.write().unwrap();
        let actual = *tables
            .owner_of
            .get(&asset_id)
            .ok_or(OwnershipError::UnknownAsset(asset_id))?;
        if actual != from {
            return Err(OwnershipError::NotCurrentOwner {
                asset_id,
                from,
                actual,
            });
        }

        tables.owner_of.insert(asset_id, to);
        if let Some(count) = tables.counts.get_mut(&from) {
            *count = count.saturating_sub(1);
        }
        *tables.counts.entry(to).or_insert(0) += 1;
        Ok(())
    }

    async fn owner_of(&self, asset_id: AssetId) -> Option<Identity> {
        self.inner.read().unwrap().owner_of.get(&asset_id).copied()
    }

    async fn balance_of(&self, owner: Identity) -> u64 {
        self.inner
            .read()
            .unwrap()
            .counts
            .get(&owner)
            .copied()
            .unwrap_or(0)
    }

    async fn minted_total(&self) -> u64 {
        self.inner.read().unwrap().owner_of.len() as u64
    }
}

// =============================================================================
// TESTS
// =============================================================================

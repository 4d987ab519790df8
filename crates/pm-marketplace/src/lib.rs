//! # PM-Marketplace - Ledger & Settlement Subsystem
//!
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Deterministic ledger and settlement engine for unique digital assets.
//! Tracks minted assets and their ownership, maintains a listing book, and
//! settles purchases with an atomic three-way split of the sale price
//! between seller, creator, and platform operator.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Value Conservation (payouts sum to price) | `domain/invariants.rs` - `check_value_conservation()` |
//! | INVARIANT-2 | Unique Ownership (one owner per asset) | `adapters/ownership_adapter.rs` - single owner-of table |
//! | INVARIANT-3 | Ownership Totals (counts sum to minted total) | `domain/invariants.rs` - `check_ownership_totals()` |
//! | INVARIANT-4 | Settlement Coupling (transfer + deactivation + payout, or none) | `service.rs` - `settle()` rollback path |
//! | INVARIANT-5 | Monotonic Asset Ids (never reused) | `domain/state.rs` - `record_asset()` / `discard_asset()` |
//! | INVARIANT-6 | Rate Cap (royalty and fee at most 1000 bps) | `domain/value_objects.rs` - `BasisPoints::new()` |
//!
//! ## Execution Model
//!
//! Single-writer. Every mutating operation takes one write lock over the
//! combined state aggregate and ownership store and runs to completion
//! before the next begins. There is no partially-applied state to observe.
//!
//! ## Outbound Dependencies
//!
//! | Concern | Trait | Purpose |
//! |---------|-------|---------|
//! | Ownership records | `OwnershipStore` | Mint and transfer owner-of entries |
//! | Funds | `PayoutSink` | Credit settlement proceeds (may fail) |
//! | Notifications | `EventSink` | Publish lifecycle events |
//!
//! ## Usage Example
//!
//! ```ignore
//! use pm_marketplace::prelude::*;
//!
//! let svc = create_test_service(operator);
//! let asset_id = svc.mint(alice, "ipfs://art".into(), 500).await?;
//! svc.list(alice, asset_id, U256::from(1000)).await?;
//! let receipt = svc.purchase(bob, asset_id, U256::from(1000)).await?;
//! assert_eq!(receipt.split.total(), receipt.price);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{Asset, FeePolicy, FeeSplit, Listing, SettlementReceipt};

    // Value objects
    pub use crate::domain::value_objects::{AssetId, BasisPoints, Identity, U256};

    // Domain services
    pub use crate::domain::services::{
        compute_fee_split, validate_marketplace_fee, validate_price, validate_royalty,
    };

    // Invariants
    pub use crate::domain::invariants::{
        check_all_settlement_invariants, limits, InvariantCheckResult, InvariantViolation,
    };

    // State aggregate
    pub use crate::domain::state::MarketplaceState;

    // Ports
    pub use crate::ports::inbound::MarketplaceApi;
    pub use crate::ports::outbound::{EventSink, OwnershipStore, Payout, PayoutSink};

    // Events
    pub use crate::events::{
        topics, AssetListedPayload, AssetMintedPayload, AssetSoldPayload, AssetUnlistedPayload,
        MarketEvent, MarketplaceFeeUpdatedPayload,
    };

    // Errors
    pub use crate::errors::{ErrorKind, MarketError, OwnershipError, PayoutError};

    // Adapters
    pub use crate::adapters::{InMemoryOwnership, InMemoryTreasury, RecordingEventSink};

    // Service
    pub use crate::service::{
        create_test_service, MarketplaceService, ServiceConfig, ServiceStats,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Marketplace Ledger";

// =============================================================================
// TESTS
// =============================================================================

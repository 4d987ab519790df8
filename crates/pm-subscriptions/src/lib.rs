//! # PM-Subscriptions - Recurring-Payment Ledger
//!
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Companion ledger tracking time-windowed subscription validity. One
//! record per identity, exact-payment enforcement, and a pooled balance
//! the platform operator sweeps on demand. Independent of the marketplace
//! ledger.
//!
//! ## Execution Model
//!
//! Serial, like the marketplace: each operation completes under one write
//! lock. Expiry is computed lazily on read from the last payment time;
//! there are no background timers or sweeps.
//!
//! ## Usage Example
//!
//! ```ignore
//! use pm_subscriptions::prelude::*;
//!
//! let svc = create_test_service(operator);
//! svc.subscribe(alice, U256::from(100), U256::from(100)).await?;
//! assert!(svc.is_valid(alice).await);
//! svc.clock().advance_days(31);
//! assert!(!svc.is_valid(alice).await); // lapsed, but not cancelled
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

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
    pub use crate::adapters::{InMemoryVault, ManualClock, RecordingEvents, SystemClock};
    pub use crate::domain::{Subscription, VALIDITY_WINDOW_SECS};
    pub use crate::errors::{ErrorKind, SubscriptionError, TransferError};
    pub use crate::events::{topics, SubscriptionEvent};
    pub use crate::ports::{Clock, EventSink, FundsTransfer, SubscriptionApi};
    pub use crate::service::{create_test_service, SubscriptionService};

    pub use primitive_types::U256;
    pub use shared_types::{Identity, Timestamp};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Subscription Ledger";

// =============================================================================
// TESTS
// =============================================================================

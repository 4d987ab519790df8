//! # Shared Types Crate
//!
//! Primitive domain types shared by the marketplace and subscription ledgers.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Cross-crate types are defined here once.
//! - **Opaque Identity**: Callers are identified by a 20-byte [`Identity`]
//!   supplied, already verified, by the transport/auth layer. This crate
//!   attaches no meaning to the bytes.
//! - **Integer Time**: All timestamps are unix seconds; validity windows are
//!   computed lazily on read, never by background timers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entities;

pub use entities::{Identity, Timestamp};

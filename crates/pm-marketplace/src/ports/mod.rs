//! # Ports
//!
//! Hexagonal architecture boundaries:
//! - `inbound`: the API this ledger exposes to callers
//! - `outbound`: the capabilities this ledger requires from adapters

pub mod inbound;
pub mod outbound;

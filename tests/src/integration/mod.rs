//! # Integration Tests
//!
//! Full-lifecycle flows through the public APIs, with in-memory adapters
//! behind every outbound port.

pub mod marketplace_flows;
pub mod subscription_flows;

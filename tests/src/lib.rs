//! # Provenance-Market Test Suite
//!
//! Unified test crate exercising the public APIs of the marketplace and
//! subscription ledgers end to end.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── marketplace_flows.rs   # mint → list → purchase lifecycles
//!     └── subscription_flows.rs  # subscribe → lapse → renew lifecycles
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p pm-tests
//!
//! # By category
//! cargo test -p pm-tests integration::marketplace_flows::
//! cargo test -p pm-tests integration::subscription_flows::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;

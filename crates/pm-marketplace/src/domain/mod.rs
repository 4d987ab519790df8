//! # Domain Layer
//!
//! Core business logic of the marketplace ledger: value objects, entities,
//! the state aggregate, pure settlement arithmetic, and runtime invariants.
//! Everything in this module is synchronous and deterministic.

pub mod entities;
pub mod invariants;
pub mod services;
pub mod state;
pub mod value_objects;

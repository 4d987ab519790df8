//! # Adapters
//!
//! In-memory implementations of the outbound ports. These back the core in
//! tests and in deployments that keep the whole ledger in process memory.

pub mod event_recorder;
pub mod ownership_adapter;
pub mod treasury_adapter;

pub use event_recorder::RecordingEventSink;
pub use ownership_adapter::InMemoryOwnership;
pub use treasury_adapter::InMemoryTreasury;

#![forbid(unsafe_code)]

//! Deterministic warehouse fulfilment simulation engine.
//!
//! Customers place orders; collectors and drivers move them through
//! Pending → Collecting → Delivering → Completed one tick at a time.

/// Engine state format version. Bound into every canonical hash.
pub const ENGINE_VERSION: u32 = 1;

pub mod actions;
pub mod domain;
pub mod engine;
pub mod error;
pub mod hashing;
pub mod invariants;
pub mod report;
pub mod snapshot;
pub mod state;
pub mod transitions;
pub mod volunteer;

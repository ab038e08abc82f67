//! # Adapters Layer
//!
//! In-memory implementations of the outbound ports, used by tests and by
//! embedders without a real substrate.

pub mod in_memory;

pub use in_memory::{
    InMemoryAccessControl, InMemoryEnvironment, InMemoryLedger, InMemoryProxyRegistry,
    ManualClock, SystemClock,
};

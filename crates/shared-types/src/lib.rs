//! # Shared Types Crate
//!
//! Value objects and wire encodings shared by every data feed crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers, feed values and records are
//!   defined once here and reused by the verifier and the server.
//! - **Derived Identity**: nothing in this crate holds a reference to another
//!   entity; relationships are expressed through `Hash` identifiers.

pub mod abi;
pub mod entities;

pub use entities::*;

//! # Signature Verification (DFA-01)
//!
//! Recovers the signer of an off-chain data feed signature and matches it
//! against the claimed source account.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure cryptographic logic, no I/O
//! - **Ports Layer** (`ports/`): The `SignatureVerifier` trait
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Malformed vs. Mismatch**: callers can tell a broken encoding apart from a
//!   valid signature by the wrong key via `SignatureError::is_malformed`

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::ecdsa::{
    address_from_pubkey, eth_signed_message_hash, keccak256, recover_address, verify_signer,
    EcdsaVerifier,
};
pub use domain::entities::{EcdsaSignature, SIGNATURE_LENGTH};
pub use domain::errors::SignatureError;
pub use ports::inbound::SignatureVerifier;

#[cfg(any(test, feature = "test-helpers"))]
pub use domain::ecdsa::test_helpers;

//! # Signature Errors
//!
//! Error types for signature verification operations.

use shared_types::Address;
use thiserror::Error;

/// Errors that can occur during signature verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// Encoded signature is not `r || s || v` (65 bytes)
    #[error("Invalid signature length: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    /// R or S is outside `[1, n-1]`
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 27 or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// No public key could be recovered from the signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovered signer does not match expected signer
    #[error("Signer mismatch: expected {expected:?}, got {actual:?}")]
    SignerMismatch { expected: Address, actual: Address },
}

impl SignatureError {
    /// True for every failure caused by the encoding itself, as opposed to a
    /// well-formed signature produced by some other key.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::SignerMismatch { .. })
    }
}

//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this crate.

use crate::domain::errors::SignatureError;
use shared_types::{Address, Hash};

/// Primary Signature Verification API.
///
/// A pure hash-in, result-out boundary: implementations hold no state that a
/// verification could observe or change. Implementations must be thread-safe
/// (`Send + Sync`).
pub trait SignatureVerifier: Send + Sync {
    /// Check that `signature` (65-byte `r || s || v`) over the EIP-191
    /// wrapping of `message_hash` recovers to `expected`.
    ///
    /// # Errors
    /// * `SignatureError::SignerMismatch` - well-formed, but signed by another key
    /// * any other variant - the signature encoding itself is malformed
    fn verify_signer(
        &self,
        message_hash: &Hash,
        signature: &[u8],
        expected: Address,
    ) -> Result<(), SignatureError>;
}

//! # Signature Verification Service
//!
//! Wires the `SignatureVerifier` inbound port to the domain layer.

use crate::domain::ecdsa::{self, EcdsaVerifier};
use crate::domain::errors::SignatureError;
use crate::ports::inbound::SignatureVerifier;
use shared_types::{Address, Hash};

impl SignatureVerifier for EcdsaVerifier {
    fn verify_signer(
        &self,
        message_hash: &Hash,
        signature: &[u8],
        expected: Address,
    ) -> Result<(), SignatureError> {
        ecdsa::verify_signer(message_hash, signature, expected)
    }
}

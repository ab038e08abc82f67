//! Fuzz target for signed data verification.
//!
//! Arbitrary signature bytes must never panic the verifier, and the
//! malformed/mismatch classification must be stable across calls.
//!
//! ## Running
//!
//! ```bash
//! cd crates/dfa-01-signature-verification
//! cargo +nightly fuzz run fuzz_verify_signer
//! ```

#![no_main]

use dfa_01_signature_verification::{EcdsaVerifier, SignatureVerifier};
use libfuzzer_sys::fuzz_target;
use shared_types::{Address, Hash};

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    message_hash: [u8; 32],
    claimed_signer: [u8; 20],
    signature: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let verifier = EcdsaVerifier;
    let message_hash = Hash::new(input.message_hash);
    let expected = Address::new(input.claimed_signer);

    let first = verifier.verify_signer(&message_hash, &input.signature, expected);
    let second = verifier.verify_signer(&message_hash, &input.signature, expected);
    assert_eq!(first, second);

    if input.signature.len() != 65 {
        assert!(first.as_ref().is_err_and(|e| e.is_malformed()));
    }
});

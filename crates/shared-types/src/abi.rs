//! # ABI Encoding
//!
//! The two encodings the signed message formats depend on:
//!
//! - **Packed** (`abi.encodePacked`): fields concatenated at their natural width.
//! - **Standard** (`abi.encode`) of a single dynamic `bytes32[]`, used to derive
//!   Beacon set IDs.

use crate::entities::{Address, Hash, U256};

/// Incremental `abi.encodePacked` builder.
///
/// ```
/// use shared_types::{Hash, abi::PackedEncoder};
///
/// let packed = PackedEncoder::new()
///     .bytes32(&Hash::ZERO)
///     .uint256(7u32.into())
///     .finish();
/// assert_eq!(packed.len(), 64);
/// ```
#[derive(Debug, Default, Clone)]
pub struct PackedEncoder {
    buf: Vec<u8>,
}

impl PackedEncoder {
    /// Creates an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `bytes32`.
    #[must_use]
    pub fn bytes32(mut self, value: &Hash) -> Self {
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    /// Appends an `address` (20 bytes, unpadded).
    #[must_use]
    pub fn address(mut self, value: &Address) -> Self {
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    /// Appends a `uint256` (32 bytes, big-endian).
    #[must_use]
    pub fn uint256(mut self, value: U256) -> Self {
        let mut word = [0u8; 32];
        value.to_big_endian(&mut word);
        self.buf.extend_from_slice(&word);
        self
    }

    /// Appends dynamic `bytes` verbatim.
    #[must_use]
    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.buf.extend_from_slice(value);
        self
    }

    /// Returns the packed buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// `abi.encode(bytes32[])`: head offset, length word, then the elements.
#[must_use]
pub fn encode_bytes32_array(values: &[Hash]) -> Vec<u8> {
    let mut out = Vec::with_capacity(64 + values.len() * 32);
    let mut word = [0u8; 32];

    U256::from(32u8).to_big_endian(&mut word);
    out.extend_from_slice(&word);

    U256::from(values.len()).to_big_endian(&mut word);
    out.extend_from_slice(&word);

    for value in values {
        out.extend_from_slice(value.as_bytes());
    }
    out
}

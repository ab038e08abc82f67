//! # Fixed-Point Codec
//!
//! Signed payloads carry a single ABI-encoded `int256`. Feeds store `int224`,
//! so decoding is a length check followed by a range check.

use crate::errors::{DataFeedError, DataFeedResult};
use shared_types::{FeedValue, U256};

/// Exact payload length: one ABI word.
pub const PAYLOAD_LENGTH: usize = 32;

/// Decode a signed payload into a feed value.
///
/// # Errors
/// * `DataLengthInvalid` - payload is not exactly 32 bytes
/// * `ValueOutOfRange` - decoded `int256` is outside `[-2^223, 2^223 - 1]`
pub fn decode_fixed_point(payload: &[u8]) -> DataFeedResult<FeedValue> {
    if payload.len() != PAYLOAD_LENGTH {
        return Err(DataFeedError::DataLengthInvalid(payload.len()));
    }
    let word = U256::from_big_endian(payload);
    FeedValue::from_twos_complement(word).ok_or(DataFeedError::ValueOutOfRange)
}

/// Encode a feed value as the payload a source would sign.
#[must_use]
pub fn encode_fixed_point(value: FeedValue) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

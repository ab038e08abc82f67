//! # Core Domain Entities
//!
//! Value objects shared by every data feed crate.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Hash`
//! - **Feed Data**: `FeedValue`, `DataFeedRecord`

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 20-byte Ethereum-style account identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 20]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

/// A 32-byte Keccak-256 digest or identifier (Beacon ID, template ID, name hash).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The zero hash.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates a hash from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a hash from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if this is the zero hash.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[28..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Hash> for [u8; 32] {
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

// =============================================================================
// CLUSTER B: FEED DATA
// =============================================================================

/// Bit 255 of a two's-complement word.
const SIGN_BIT: U256 = U256([0, 0, 0, 0x8000_0000_0000_0000]);

/// `2^223 - 1`, the largest int224.
const INT224_MAX: U256 = U256([u64::MAX, u64::MAX, u64::MAX, 0x0000_0000_7FFF_FFFF]);

/// `-2^223` in two's complement, the smallest int224.
const INT224_MIN: U256 = U256([0, 0, 0, 0xFFFF_FFFF_8000_0000]);

/// A signed 224-bit feed value.
///
/// Stored as a 256-bit two's-complement word so that it can be compared with
/// and hashed into ABI-encoded payloads without conversion. Every constructor
/// keeps the word inside `[-2^223, 2^223 - 1]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "U256", into = "U256")]
pub struct FeedValue(U256);

impl FeedValue {
    /// Zero.
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// `2^223 - 1`.
    pub const MAX: Self = Self(INT224_MAX);

    /// `-2^223`.
    pub const MIN: Self = Self(INT224_MIN);

    /// Interprets a 256-bit two's-complement word.
    ///
    /// Returns `None` when the signed value does not fit in 224 bits.
    #[must_use]
    pub fn from_twos_complement(word: U256) -> Option<Self> {
        let fits = if word & SIGN_BIT == U256::zero() {
            word <= INT224_MAX
        } else {
            word >= INT224_MIN
        };
        fits.then_some(Self(word))
    }

    /// Builds a value from a native integer. `i128` always fits in 224 bits.
    #[must_use]
    pub fn from_i128(value: i128) -> Self {
        let magnitude = U256::from(value.unsigned_abs());
        if value < 0 {
            Self(negate(magnitude))
        } else {
            Self(magnitude)
        }
    }

    /// Narrows the value to `i128`, if it fits.
    #[must_use]
    pub fn to_i128(&self) -> Option<i128> {
        if self.is_negative() {
            let magnitude = negate(self.0);
            if magnitude > U256::from(i128::MAX as u128) + U256::one() {
                return None;
            }
            // |MIN| wraps back onto i128::MIN
            Some((magnitude.low_u128() as i128).wrapping_neg())
        } else if self.0 > U256::from(i128::MAX as u128) {
            None
        } else {
            Some(self.0.low_u128() as i128)
        }
    }

    /// Returns the raw two's-complement word.
    #[must_use]
    pub const fn to_twos_complement(&self) -> U256 {
        self.0
    }

    /// Big-endian 32-byte encoding (ABI `int256`).
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.0.to_big_endian(&mut bytes);
        bytes
    }

    /// Returns true for values below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 & SIGN_BIT != U256::zero()
    }

    /// Arithmetic mean of two values, truncated toward zero.
    ///
    /// The sum of two int224 values always fits in an int256 word.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        let (sum, _) = self.0.overflowing_add(other.0);
        if sum & SIGN_BIT == U256::zero() {
            Self(sum >> 1)
        } else {
            Self(negate(negate(sum) >> 1))
        }
    }
}

/// Two's-complement negation.
fn negate(word: U256) -> U256 {
    (!word).overflowing_add(U256::one()).0
}

impl Ord for FeedValue {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.0 ^ SIGN_BIT).cmp(&(other.0 ^ SIGN_BIT))
    }
}

impl PartialOrd for FeedValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for FeedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedValue({self})")
    }
}

impl fmt::Display for FeedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}", negate(self.0))
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl TryFrom<U256> for FeedValue {
    type Error = OutOfRange;

    fn try_from(word: U256) -> Result<Self, Self::Error> {
        Self::from_twos_complement(word).ok_or(OutOfRange(word))
    }
}

impl From<FeedValue> for U256 {
    fn from(value: FeedValue) -> Self {
        value.0
    }
}

/// A 256-bit word whose signed value does not fit in 224 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange(pub U256);

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x} is outside the int224 range", self.0)
    }
}

impl std::error::Error for OutOfRange {}

impl From<i64> for FeedValue {
    fn from(value: i64) -> Self {
        Self::from_i128(i128::from(value))
    }
}

/// A single `(value, timestamp)` pair held by a keyed feed store.
///
/// `(0, 0)` is the uninitialized record; a record with a non-zero timestamp
/// was written by a successful update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DataFeedRecord {
    /// Signed 224-bit value.
    pub value: FeedValue,
    /// Seconds since the Unix epoch, as signed by the source.
    pub timestamp: u32,
}

impl DataFeedRecord {
    /// The uninitialized record.
    pub const EMPTY: Self = Self {
        value: FeedValue::ZERO,
        timestamp: 0,
    };

    /// Creates a record.
    #[must_use]
    pub const fn new(value: FeedValue, timestamp: u32) -> Self {
        Self { value, timestamp }
    }

    /// Returns true once the record has been written.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.timestamp != 0
    }
}

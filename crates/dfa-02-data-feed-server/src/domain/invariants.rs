//! # Update Invariants
//!
//! Rules every write must satisfy before it touches state.

use crate::errors::{DataFeedError, DataFeedResult};
use shared_types::DataFeedRecord;

/// The clock reading and skew an update timestamp is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampWindow {
    pub now: u32,
    pub max_future_skew: u32,
}

impl TimestampWindow {
    #[must_use]
    pub fn new(now: u32, max_future_skew: u32) -> Self {
        Self {
            now,
            max_future_skew,
        }
    }

    /// See [`validate_timestamp`].
    pub fn check(&self, timestamp: u32) -> DataFeedResult<()> {
        validate_timestamp(timestamp, self.now, self.max_future_skew)
    }
}

/// Timestamp must be non-zero and at most `max_future_skew` seconds ahead of `now`.
pub fn validate_timestamp(timestamp: u32, now: u32, max_future_skew: u32) -> DataFeedResult<()> {
    let limit = u64::from(now) + u64::from(max_future_skew);
    if timestamp == 0 || u64::from(timestamp) > limit {
        return Err(DataFeedError::TimestampInvalid { timestamp, now });
    }
    Ok(())
}

/// Anti-replay: a write must carry a strictly newer timestamp than the stored one.
pub fn require_newer(stored: &DataFeedRecord, submitted: u32) -> DataFeedResult<()> {
    if submitted <= stored.timestamp {
        return Err(DataFeedError::StaleUpdate {
            stored: stored.timestamp,
            submitted,
        });
    }
    Ok(())
}

/// Minimum number of valid signatures out of `constituents`: a strict majority.
#[must_use]
pub fn quorum_threshold(constituents: usize) -> usize {
    constituents / 2 + 1
}

/// Whether the overlay record replaces the base one for a proxy read.
///
/// The overlay must be strictly fresher; on equal timestamps the base record wins.
#[must_use]
pub fn overlay_is_fresher(base: &DataFeedRecord, overlay: &DataFeedRecord) -> bool {
    overlay.timestamp > base.timestamp
}

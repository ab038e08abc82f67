//! # Beacon Set Aggregator
//!
//! A Beacon set is the median of its members, stored under the hash of the
//! ordered member list in the same store as Beacons.

use super::entities::FeedWrite;
use super::identifiers::derive_beacon_set_id;
use super::median::median;
use super::state::FeedState;
use crate::errors::{DataFeedError, DataFeedResult};
use crate::events::FeedEvent;
use shared_types::{DataFeedRecord, FeedValue, Hash};

/// Smallest Beacon set.
pub const MIN_BEACON_SET_SIZE: usize = 2;

/// Median value and median timestamp over the current member records.
///
/// Members that were never written contribute `(0, 0)`.
pub fn aggregate_beacons(state: &FeedState, beacon_ids: &[Hash]) -> DataFeedResult<DataFeedRecord> {
    if beacon_ids.len() < MIN_BEACON_SET_SIZE {
        return Err(DataFeedError::InsufficientMembers(beacon_ids.len()));
    }

    let (mut values, mut timestamps): (Vec<FeedValue>, Vec<u32>) = beacon_ids
        .iter()
        .map(|id| {
            let record = state.data_feed(id);
            (record.value, record.timestamp)
        })
        .unzip();

    let value = median(&mut values).ok_or(DataFeedError::InsufficientMembers(0))?;
    let timestamp = median(&mut timestamps).ok_or(DataFeedError::InsufficientMembers(0))?;
    Ok(DataFeedRecord::new(value, timestamp))
}

/// Recompute and store a Beacon set.
///
/// The stored pair must change in at least one field; the timestamp may move
/// backwards when the value changes with it.
pub fn update_beacon_set_with_beacons(
    state: &mut FeedState,
    beacon_ids: &[Hash],
) -> DataFeedResult<FeedWrite> {
    let record = aggregate_beacons(state, beacon_ids)?;
    let beacon_set_id = derive_beacon_set_id(beacon_ids);

    if state.data_feed(&beacon_set_id) == record {
        return Err(DataFeedError::NoChange);
    }
    state.set_data_feed(beacon_set_id, record);

    Ok(FeedWrite {
        data_feed_id: beacon_set_id,
        record,
        event: FeedEvent::UpdatedBeaconSetWithBeacons {
            beacon_set_id,
            value: record.value,
            timestamp: record.timestamp,
        },
    })
}

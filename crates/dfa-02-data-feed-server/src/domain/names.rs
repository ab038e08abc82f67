//! # dAPI Name Registry
//!
//! Human-readable names pointing at feeds. Permission is checked by the
//! caller; this module only validates and records.

use super::identifiers::dapi_name_hash;
use super::state::FeedState;
use crate::errors::{DataFeedError, DataFeedResult};
use crate::events::FeedEvent;
use shared_types::{Address, Hash};

/// A dAPI name must be non-zero.
pub fn validate_dapi_name(dapi_name: &Hash) -> DataFeedResult<()> {
    if dapi_name.is_zero() {
        return Err(DataFeedError::DapiNameZero);
    }
    Ok(())
}

/// Point `dapi_name` at `data_feed_id`, or clear it with a zero ID.
pub fn set_dapi_name(
    state: &mut FeedState,
    sender: Address,
    dapi_name: Hash,
    data_feed_id: Hash,
) -> DataFeedResult<FeedEvent> {
    validate_dapi_name(&dapi_name)?;
    state.set_dapi_name_hash(dapi_name_hash(&dapi_name), data_feed_id);
    Ok(FeedEvent::SetDapiName {
        data_feed_id,
        dapi_name,
        sender,
    })
}

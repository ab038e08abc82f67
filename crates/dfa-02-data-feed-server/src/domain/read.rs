//! # Read Path
//!
//! Plain reads return the base record. Proxy reads merge the base record with
//! the proxy's OEV override and return whichever is fresher. Name-based reads
//! resolve through the dAPI name map first.

use super::identifiers::dapi_name_hash;
use super::invariants::overlay_is_fresher;
use super::state::FeedState;
use crate::errors::{DataFeedError, DataFeedResult};
use shared_types::{Address, DataFeedRecord, Hash};

/// Feed ID a dAPI name hash resolves to.
pub fn resolve_dapi_name_hash(state: &FeedState, dapi_name_hash: &Hash) -> DataFeedResult<Hash> {
    let data_feed_id = state.dapi_name_hash_to_data_feed_id(dapi_name_hash);
    if data_feed_id.is_zero() {
        return Err(DataFeedError::NameNotSet);
    }
    Ok(data_feed_id)
}

/// Feed ID a plain dAPI name resolves to, zero if unset.
#[must_use]
pub fn dapi_name_to_data_feed_id(state: &FeedState, dapi_name: &Hash) -> Hash {
    state.dapi_name_hash_to_data_feed_id(&dapi_name_hash(dapi_name))
}

/// Base record of a feed.
pub fn read_data_feed_with_id(
    state: &FeedState,
    data_feed_id: &Hash,
) -> DataFeedResult<DataFeedRecord> {
    require_initialized(state.data_feed(data_feed_id))
}

/// Fresher of the base record and `proxy`'s override.
pub fn read_data_feed_with_id_as_oev_proxy(
    state: &FeedState,
    proxy: &Address,
    data_feed_id: &Hash,
) -> DataFeedResult<DataFeedRecord> {
    let base = state.data_feed(data_feed_id);
    let overlay = state.oev_proxy_data_feed(proxy, data_feed_id);
    if overlay_is_fresher(&base, &overlay) {
        Ok(overlay)
    } else {
        require_initialized(base)
    }
}

/// Base record of the feed a dAPI name hash points at.
pub fn read_data_feed_with_dapi_name_hash(
    state: &FeedState,
    dapi_name_hash: &Hash,
) -> DataFeedResult<DataFeedRecord> {
    let data_feed_id = resolve_dapi_name_hash(state, dapi_name_hash)?;
    read_data_feed_with_id(state, &data_feed_id)
}

/// Proxy read of the feed a dAPI name hash points at.
pub fn read_data_feed_with_dapi_name_hash_as_oev_proxy(
    state: &FeedState,
    proxy: &Address,
    dapi_name_hash: &Hash,
) -> DataFeedResult<DataFeedRecord> {
    let data_feed_id = resolve_dapi_name_hash(state, dapi_name_hash)?;
    read_data_feed_with_id_as_oev_proxy(state, proxy, &data_feed_id)
}

fn require_initialized(record: DataFeedRecord) -> DataFeedResult<DataFeedRecord> {
    if record.is_initialized() {
        Ok(record)
    } else {
        Err(DataFeedError::FeedUninitialized)
    }
}

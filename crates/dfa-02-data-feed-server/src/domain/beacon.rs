//! # Beacon Store
//!
//! Single-source feeds. A Beacon exists from its first accepted update and
//! only ever moves forward in time.

use super::codec::decode_fixed_point;
use super::entities::{FeedWrite, SignedBeaconUpdate};
use super::identifiers::signed_data_message_hash;
use super::invariants::{require_newer, TimestampWindow};
use super::state::FeedState;
use crate::errors::{DataFeedError, DataFeedResult};
use crate::events::FeedEvent;
use dfa_01_signature_verification::SignatureVerifier;
use shared_types::DataFeedRecord;

/// Apply a signed Beacon update.
///
/// Checks run in order: timestamp window, signature, payload, freshness.
/// State is written only after every check passed.
pub fn update_beacon_with_signed_data(
    state: &mut FeedState,
    verifier: &dyn SignatureVerifier,
    window: TimestampWindow,
    update: &SignedBeaconUpdate,
) -> DataFeedResult<FeedWrite> {
    window.check(update.timestamp)?;

    let message = signed_data_message_hash(&update.template_id, update.timestamp, &update.data);
    verifier
        .verify_signer(&message, &update.signature, update.airnode)
        .map_err(|e| DataFeedError::from_signature(update.airnode, e))?;

    let value = decode_fixed_point(&update.data)?;

    let beacon_id = update.beacon_id();
    require_newer(&state.data_feed(&beacon_id), update.timestamp)?;

    let record = DataFeedRecord::new(value, update.timestamp);
    state.set_data_feed(beacon_id, record);

    Ok(FeedWrite {
        data_feed_id: beacon_id,
        record,
        event: FeedEvent::UpdatedBeaconWithSignedData {
            beacon_id,
            value,
            timestamp: update.timestamp,
        },
    })
}

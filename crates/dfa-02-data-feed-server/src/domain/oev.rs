//! # OEV Overlay
//!
//! Per-proxy overrides of Beacons and Beacon sets, written by auction winners
//! with signatures from a majority of the feed's sources. Every write credits
//! the bid to the proxy.

use super::codec::decode_fixed_point;
use super::entities::{FeedWrite, OevUpdateRequest, SignedOevEntry};
use super::identifiers::{
    derive_beacon_set_id, oev_signature_message_hash, oev_update_hash, OevUpdateContext,
};
use super::invariants::{quorum_threshold, require_newer, TimestampWindow};
use super::state::FeedState;
use crate::errors::{DataFeedError, DataFeedResult, FeedKind};
use crate::events::FeedEvent;
use dfa_01_signature_verification::SignatureVerifier;
use shared_types::{Address, DataFeedRecord, Hash};

/// Chain and server identity bound into every OEV update hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub chain_id: u64,
    pub server_address: Address,
}

/// Check the signature bundle of an OEV update against `data_feed_id`.
///
/// One entry addresses a Beacon and must be signed. More entries address a
/// Beacon set: every signed entry must verify and a strict majority must be
/// signed.
pub fn verify_oev_signatures(
    verifier: &dyn SignatureVerifier,
    update_hash: &Hash,
    data_feed_id: &Hash,
    entries: &[SignedOevEntry],
) -> DataFeedResult<FeedKind> {
    match entries {
        [] => Err(DataFeedError::MissingSignature),
        [entry] => {
            if entry.is_unsigned() {
                return Err(DataFeedError::MissingSignature);
            }
            let derived = entry.beacon_id();
            if derived != *data_feed_id {
                return Err(DataFeedError::FeedIdMismatch {
                    kind: FeedKind::Beacon,
                    expected: *data_feed_id,
                    derived,
                });
            }
            verify_entry(verifier, update_hash, entry)?;
            Ok(FeedKind::Beacon)
        }
        _ => {
            let beacon_ids: Vec<Hash> = entries.iter().map(SignedOevEntry::beacon_id).collect();
            let derived = derive_beacon_set_id(&beacon_ids);
            if derived != *data_feed_id {
                return Err(DataFeedError::FeedIdMismatch {
                    kind: FeedKind::BeaconSet,
                    expected: *data_feed_id,
                    derived,
                });
            }

            let mut valid = 0usize;
            for entry in entries.iter().filter(|e| !e.is_unsigned()) {
                verify_entry(verifier, update_hash, entry)?;
                valid += 1;
            }

            let required = quorum_threshold(entries.len());
            if valid < required {
                return Err(DataFeedError::QuorumNotMet { valid, required });
            }
            Ok(FeedKind::BeaconSet)
        }
    }
}

fn verify_entry(
    verifier: &dyn SignatureVerifier,
    update_hash: &Hash,
    entry: &SignedOevEntry,
) -> DataFeedResult<()> {
    let message = oev_signature_message_hash(update_hash, &entry.template_id);
    verifier
        .verify_signer(&message, &entry.signature, entry.airnode)
        .map_err(|e| DataFeedError::from_signature(entry.airnode, e))
}

/// Apply an OEV update paid for by `updater`.
///
/// Checks run in order: timestamp window, payload, signatures, freshness
/// against the existing override, balance headroom. The override and the
/// credited balance are written together.
pub fn update_oev_proxy_data_feed_with_signed_data(
    state: &mut FeedState,
    verifier: &dyn SignatureVerifier,
    window: TimestampWindow,
    deployment: Deployment,
    updater: Address,
    request: &OevUpdateRequest,
) -> DataFeedResult<FeedWrite> {
    window.check(request.timestamp)?;
    let value = decode_fixed_point(&request.data)?;

    let update_hash = oev_update_hash(&OevUpdateContext {
        chain_id: deployment.chain_id,
        server_address: deployment.server_address,
        proxy: request.proxy,
        data_feed_id: request.data_feed_id,
        update_id: request.update_id,
        timestamp: request.timestamp,
        data: &request.data,
        updater,
        bid_amount: request.bid_amount,
    });
    let kind = verify_oev_signatures(
        verifier,
        &update_hash,
        &request.data_feed_id,
        &request.signatures,
    )?;

    require_newer(
        &state.oev_proxy_data_feed(&request.proxy, &request.data_feed_id),
        request.timestamp,
    )?;

    let balance = state
        .credited_balance(&request.proxy, request.bid_amount)
        .ok_or(DataFeedError::BalanceOverflow)?;

    let record = DataFeedRecord::new(value, request.timestamp);
    state.set_oev_proxy_data_feed(request.proxy, request.data_feed_id, record);
    state.set_oev_proxy_balance(request.proxy, balance);

    let event = match kind {
        FeedKind::Beacon => FeedEvent::UpdatedOevProxyBeaconWithSignedData {
            beacon_id: request.data_feed_id,
            proxy: request.proxy,
            update_id: request.update_id,
            value,
            timestamp: request.timestamp,
        },
        FeedKind::BeaconSet => FeedEvent::UpdatedOevProxyBeaconSetWithSignedData {
            beacon_set_id: request.data_feed_id,
            proxy: request.proxy,
            update_id: request.update_id,
            value,
            timestamp: request.timestamp,
        },
    };

    Ok(FeedWrite {
        data_feed_id: request.data_feed_id,
        record,
        event,
    })
}

//! # Batched Calls
//!
//! `multicall` applies a list of writes atomically: the first failure rolls
//! back everything the batch did. `try_multicall` applies each call on its
//! own and reports every outcome.
//!
//! Withdrawals move value through an external collaborator and cannot be
//! rolled back, so they are not batchable.

use crate::domain::entities::{OevUpdateRequest, SignedBeaconUpdate};
use crate::errors::{DataFeedError, DataFeedResult};
use crate::ports::inbound::DataFeedServerApi;
use crate::service::{DataFeedServer, ServerStats};
use dfa_01_signature_verification::SignatureVerifier;
use shared_types::{Address, Hash};
use thiserror::Error;
use tracing::{debug, warn};

/// A batchable write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCall {
    UpdateBeaconWithSignedData(SignedBeaconUpdate),
    UpdateBeaconSetWithBeacons(Vec<Hash>),
    UpdateOevProxyDataFeedWithSignedData {
        updater: Address,
        request: OevUpdateRequest,
    },
    SetDapiName {
        sender: Address,
        dapi_name: Hash,
        data_feed_id: Hash,
    },
}

/// Result of one successful call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutput {
    /// ID of the Beacon or Beacon set written.
    DataFeedId(Hash),
    Unit,
}

/// The call that aborted a `multicall`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Multicall aborted at call {index}: {error}")]
pub struct BatchError {
    pub index: usize,
    pub error: DataFeedError,
}

struct Checkpoint {
    events_len: usize,
    stats: ServerStats,
}

impl<V: SignatureVerifier> DataFeedServer<V> {
    /// Apply `calls` in order, all or nothing.
    pub fn multicall(&mut self, calls: Vec<FeedCall>) -> Result<Vec<CallOutput>, BatchError> {
        let checkpoint = self.checkpoint();
        let mut outputs = Vec::with_capacity(calls.len());

        for (index, call) in calls.into_iter().enumerate() {
            match self.dispatch(call) {
                Ok(output) => outputs.push(output),
                Err(error) => {
                    warn!(index, %error, "Multicall aborted, rolling back");
                    self.rollback(checkpoint);
                    return Err(BatchError { index, error });
                }
            }
        }
        self.state.commit_journal();
        debug!(calls = outputs.len(), "Multicall committed");
        Ok(outputs)
    }

    /// Apply each of `calls` independently and report every outcome.
    pub fn try_multicall(&mut self, calls: Vec<FeedCall>) -> Vec<DataFeedResult<CallOutput>> {
        calls.into_iter().map(|call| self.dispatch(call)).collect()
    }

    fn dispatch(&mut self, call: FeedCall) -> DataFeedResult<CallOutput> {
        match call {
            FeedCall::UpdateBeaconWithSignedData(update) => self
                .update_beacon_with_signed_data(update)
                .map(CallOutput::DataFeedId),
            FeedCall::UpdateBeaconSetWithBeacons(beacon_ids) => self
                .update_beacon_set_with_beacons(&beacon_ids)
                .map(CallOutput::DataFeedId),
            FeedCall::UpdateOevProxyDataFeedWithSignedData { updater, request } => self
                .update_oev_proxy_data_feed_with_signed_data(updater, request)
                .map(|()| CallOutput::Unit),
            FeedCall::SetDapiName {
                sender,
                dapi_name,
                data_feed_id,
            } => self
                .set_dapi_name(sender, dapi_name, data_feed_id)
                .map(|()| CallOutput::Unit),
        }
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.state.begin_journal();
        Checkpoint {
            events_len: self.events.len(),
            stats: self.stats.clone(),
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        self.state.rollback_journal();
        self.events.truncate(checkpoint.events_len);
        self.stats = checkpoint.stats;
    }
}

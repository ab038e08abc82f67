//! # Feed Events
//!
//! Log entries appended by successful writes. A failed call appends nothing.

use serde::{Deserialize, Serialize};
use shared_types::{Address, FeedValue, Hash, U256};

/// Event emitted by a committed write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum FeedEvent {
    /// A Beacon accepted a signed update.
    UpdatedBeaconWithSignedData {
        beacon_id: Hash,
        value: FeedValue,
        timestamp: u32,
    },

    /// A Beacon set was re-aggregated from its members.
    UpdatedBeaconSetWithBeacons {
        beacon_set_id: Hash,
        value: FeedValue,
        timestamp: u32,
    },

    /// An OEV override was written for a single Beacon.
    UpdatedOevProxyBeaconWithSignedData {
        beacon_id: Hash,
        proxy: Address,
        update_id: Hash,
        value: FeedValue,
        timestamp: u32,
    },

    /// An OEV override was written for a Beacon set.
    UpdatedOevProxyBeaconSetWithSignedData {
        beacon_set_id: Hash,
        proxy: Address,
        update_id: Hash,
        value: FeedValue,
        timestamp: u32,
    },

    /// Accrued auction proceeds were paid out.
    Withdrew {
        oev_proxy: Address,
        oev_beneficiary: Address,
        amount: U256,
    },

    /// A dAPI name was pointed at a data feed (zero id clears it).
    SetDapiName {
        data_feed_id: Hash,
        dapi_name: Hash,
        sender: Address,
    },
}

impl FeedEvent {
    /// Event name as it appears in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdatedBeaconWithSignedData { .. } => "UpdatedBeaconWithSignedData",
            Self::UpdatedBeaconSetWithBeacons { .. } => "UpdatedBeaconSetWithBeacons",
            Self::UpdatedOevProxyBeaconWithSignedData { .. } => {
                "UpdatedOevProxyBeaconWithSignedData"
            }
            Self::UpdatedOevProxyBeaconSetWithSignedData { .. } => {
                "UpdatedOevProxyBeaconSetWithSignedData"
            }
            Self::Withdrew { .. } => "Withdrew",
            Self::SetDapiName { .. } => "SetDapiName",
        }
    }
}

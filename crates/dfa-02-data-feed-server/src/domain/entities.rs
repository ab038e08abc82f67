//! # Domain Entities
//!
//! Signed requests as they arrive at the server.

use super::identifiers::derive_beacon_id;
use crate::events::FeedEvent;
use serde::{Deserialize, Serialize};
use shared_types::{Address, DataFeedRecord, Hash, U256};

/// A value signed by one Airnode for one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBeaconUpdate {
    /// Source account that signed the data.
    pub airnode: Address,
    /// Template the data answers.
    pub template_id: Hash,
    /// Timestamp the source attached to the data.
    pub timestamp: u32,
    /// ABI-encoded `int256`.
    pub data: Vec<u8>,
    /// 65-byte `r || s || v` signature.
    pub signature: Vec<u8>,
}

impl SignedBeaconUpdate {
    /// ID of the Beacon this update targets.
    #[must_use]
    pub fn beacon_id(&self) -> Hash {
        derive_beacon_id(&self.airnode, &self.template_id)
    }
}

/// One constituent's endorsement of an OEV update.
///
/// An empty signature marks a constituent that did not sign; it still takes
/// part in feed ID derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOevEntry {
    pub airnode: Address,
    pub template_id: Hash,
    pub signature: Vec<u8>,
}

impl SignedOevEntry {
    /// Entry carrying a signature.
    #[must_use]
    pub fn signed(airnode: Address, template_id: Hash, signature: Vec<u8>) -> Self {
        Self {
            airnode,
            template_id,
            signature,
        }
    }

    /// Entry for a constituent that did not sign.
    #[must_use]
    pub fn unsigned(airnode: Address, template_id: Hash) -> Self {
        Self::signed(airnode, template_id, Vec::new())
    }

    /// True when the constituent did not sign.
    #[must_use]
    pub fn is_unsigned(&self) -> bool {
        self.signature.is_empty()
    }

    /// ID of the constituent Beacon.
    #[must_use]
    pub fn beacon_id(&self) -> Hash {
        derive_beacon_id(&self.airnode, &self.template_id)
    }
}

/// An auction winner's request to override a feed for one proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OevUpdateRequest {
    /// Proxy whose reads see the override.
    pub proxy: Address,
    /// Beacon or Beacon set being overridden.
    pub data_feed_id: Hash,
    /// Auction-assigned identifier, bound into signatures but never stored.
    pub update_id: Hash,
    pub timestamp: u32,
    /// ABI-encoded `int256`.
    pub data: Vec<u8>,
    /// One entry per constituent Beacon, in feed derivation order.
    pub signatures: Vec<SignedOevEntry>,
    /// Amount paid with the update, credited to the proxy.
    pub bid_amount: U256,
}

/// A committed write to a feed store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedWrite {
    /// Beacon or Beacon set that was written.
    pub data_feed_id: Hash,
    /// Record now stored.
    pub record: DataFeedRecord,
    /// Event describing the write.
    pub event: FeedEvent,
}

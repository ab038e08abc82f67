//! # Fixtures
//!
//! Airnode sources that sign like off-chain nodes, and a server wired to
//! in-memory collaborators.

use dfa_01_signature_verification::test_helpers::{address_of, generate_keypair, sign_message};
use dfa_02_data_feed_server::prelude::*;
use k256::ecdsa::SigningKey;

/// Clock reading every fixture starts at.
pub const NOW: u32 = 1_700_000_000;

pub const CHAIN_ID: u64 = 31337;
pub const SERVER: Address = Address::new([0x5E; 20]);
pub const MANAGER: Address = Address::new([0x11; 20]);
pub const PROXY: Address = Address::new([0xB0; 20]);
pub const BENEFICIARY: Address = Address::new([0xBE; 20]);
pub const SEARCHER: Address = Address::new([0x5C; 20]);

/// An Airnode serving one template.
pub struct Airnode {
    key: SigningKey,
    pub address: Address,
    pub template_id: Hash,
}

impl Airnode {
    pub fn new(endpoint_byte: u8) -> Self {
        let (key, _) = generate_keypair();
        Self {
            address: address_of(&key),
            template_id: derive_template_id(&Hash::new([endpoint_byte; 32]), b"ETH/USD"),
            key,
        }
    }

    pub fn beacon_id(&self) -> Hash {
        derive_beacon_id(&self.address, &self.template_id)
    }

    /// Signed Beacon update carrying `value` at `timestamp`.
    pub fn sign(&self, value: i64, timestamp: u32) -> SignedBeaconUpdate {
        self.sign_raw(encode_fixed_point(FeedValue::from(value)), timestamp)
    }

    /// Signed Beacon update carrying an arbitrary payload.
    pub fn sign_raw(&self, data: Vec<u8>, timestamp: u32) -> SignedBeaconUpdate {
        let message = signed_data_message_hash(&self.template_id, timestamp, &data);
        SignedBeaconUpdate {
            airnode: self.address,
            template_id: self.template_id,
            timestamp,
            data,
            signature: sign_message(&message, &self.key),
        }
    }

    /// Endorsement of an OEV update.
    pub fn endorse(&self, oev_update_hash: &Hash) -> SignedOevEntry {
        let message = oev_signature_message_hash(oev_update_hash, &self.template_id);
        SignedOevEntry::signed(self.address, self.template_id, sign_message(&message, &self.key))
    }

    /// Placeholder for a source that did not sign.
    pub fn abstain(&self) -> SignedOevEntry {
        SignedOevEntry::unsigned(self.address, self.template_id)
    }
}

/// Beacon set ID of `airnodes`, in order.
pub fn beacon_set_id(airnodes: &[&Airnode]) -> Hash {
    let ids: Vec<Hash> = airnodes.iter().map(|a| a.beacon_id()).collect();
    derive_beacon_set_id(&ids)
}

/// An OEV bid awaiting endorsement.
pub struct OevBid {
    pub data_feed_id: Hash,
    pub update_id: Hash,
    pub timestamp: u32,
    pub value: i64,
    pub bid_amount: u64,
    pub updater: Address,
}

impl OevBid {
    pub fn new(data_feed_id: Hash, value: i64, timestamp: u32, bid_amount: u64) -> Self {
        Self {
            data_feed_id,
            update_id: Hash::new([0x01; 32]),
            timestamp,
            value,
            bid_amount,
            updater: SEARCHER,
        }
    }

    fn data(&self) -> Vec<u8> {
        encode_fixed_point(FeedValue::from(self.value))
    }

    /// Hash every source endorses.
    pub fn update_hash(&self) -> Hash {
        let data = self.data();
        oev_update_hash(&OevUpdateContext {
            chain_id: CHAIN_ID,
            server_address: SERVER,
            proxy: PROXY,
            data_feed_id: self.data_feed_id,
            update_id: self.update_id,
            timestamp: self.timestamp,
            data: &data,
            updater: self.updater,
            bid_amount: U256::from(self.bid_amount),
        })
    }

    /// Request carrying `signatures`.
    pub fn request(&self, signatures: Vec<SignedOevEntry>) -> OevUpdateRequest {
        OevUpdateRequest {
            proxy: PROXY,
            data_feed_id: self.data_feed_id,
            update_id: self.update_id,
            timestamp: self.timestamp,
            data: self.data(),
            signatures,
            bid_amount: U256::from(self.bid_amount),
        }
    }
}

/// A server plus typed handles on its collaborators.
pub struct World {
    pub server: DataFeedServer,
    pub env: InMemoryEnvironment,
}

impl World {
    pub fn new() -> Self {
        let env = InMemoryEnvironment::new(NOW);
        env.proxies.set_beneficiary(PROXY, BENEFICIARY);
        let config = ServerConfig::new(CHAIN_ID, SERVER, MANAGER);
        let server = match DataFeedServer::new(config, env.collaborators()) {
            Ok(server) => server,
            Err(e) => panic!("fixture config rejected: {e}"),
        };
        Self { server, env }
    }

    /// Submit a signed update and panic if it is rejected.
    pub fn push(&mut self, airnode: &Airnode, value: i64, timestamp: u32) -> Hash {
        match self.server.update_beacon_with_signed_data(airnode.sign(value, timestamp)) {
            Ok(id) => id,
            Err(e) => panic!("beacon update rejected: {e}"),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

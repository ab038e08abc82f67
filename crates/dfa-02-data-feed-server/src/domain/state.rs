//! # Feed State
//!
//! The four persisted maps. Absent entries read as their zero value so that
//! callers never distinguish "missing" from "uninitialized".
//!
//! While a journal is open every write records the entry's prior value, so a
//! batch can be undone in time proportional to what it wrote.

use shared_types::{Address, DataFeedRecord, Hash, U256};
use std::collections::HashMap;

/// Prior value of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Undo {
    DataFeed(Hash, Option<DataFeedRecord>),
    OevProxyDataFeed((Address, Hash), Option<DataFeedRecord>),
    DapiName(Hash, Option<Hash>),
    OevProxyBalance(Address, Option<U256>),
}

/// All state owned by a data feed server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    /// Beacon and Beacon set records, keyed by feed ID.
    data_feeds: HashMap<Hash, DataFeedRecord>,
    /// OEV overrides, keyed by `(proxy, feedId)`.
    oev_proxy_data_feeds: HashMap<(Address, Hash), DataFeedRecord>,
    /// `keccak256(dapiName) -> feedId`.
    dapi_name_hash_to_data_feed_id: HashMap<Hash, Hash>,
    /// Accrued bid amounts per proxy.
    oev_proxy_balances: HashMap<Address, U256>,
    /// Open write journal, newest last.
    journal: Option<Vec<Undo>>,
}

impl FeedState {
    /// Empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base record of a feed; `(0, 0)` if never written.
    #[must_use]
    pub fn data_feed(&self, data_feed_id: &Hash) -> DataFeedRecord {
        self.data_feeds
            .get(data_feed_id)
            .copied()
            .unwrap_or(DataFeedRecord::EMPTY)
    }

    pub fn set_data_feed(&mut self, data_feed_id: Hash, record: DataFeedRecord) {
        let prior = self.data_feeds.insert(data_feed_id, record);
        self.record_undo(Undo::DataFeed(data_feed_id, prior));
    }

    /// OEV override of a feed for a proxy; `(0, 0)` if never written.
    #[must_use]
    pub fn oev_proxy_data_feed(&self, proxy: &Address, data_feed_id: &Hash) -> DataFeedRecord {
        self.oev_proxy_data_feeds
            .get(&(*proxy, *data_feed_id))
            .copied()
            .unwrap_or(DataFeedRecord::EMPTY)
    }

    pub fn set_oev_proxy_data_feed(
        &mut self,
        proxy: Address,
        data_feed_id: Hash,
        record: DataFeedRecord,
    ) {
        let prior = self
            .oev_proxy_data_feeds
            .insert((proxy, data_feed_id), record);
        self.record_undo(Undo::OevProxyDataFeed((proxy, data_feed_id), prior));
    }

    /// Feed ID a dAPI name hash points at; zero if unset.
    #[must_use]
    pub fn dapi_name_hash_to_data_feed_id(&self, dapi_name_hash: &Hash) -> Hash {
        self.dapi_name_hash_to_data_feed_id
            .get(dapi_name_hash)
            .copied()
            .unwrap_or(Hash::ZERO)
    }

    /// Point a dAPI name hash at a feed. A zero feed ID clears the mapping.
    pub fn set_dapi_name_hash(&mut self, dapi_name_hash: Hash, data_feed_id: Hash) {
        let prior = if data_feed_id.is_zero() {
            self.dapi_name_hash_to_data_feed_id.remove(&dapi_name_hash)
        } else {
            self.dapi_name_hash_to_data_feed_id
                .insert(dapi_name_hash, data_feed_id)
        };
        self.record_undo(Undo::DapiName(dapi_name_hash, prior));
    }

    /// Accrued balance of a proxy.
    #[must_use]
    pub fn oev_proxy_balance(&self, proxy: &Address) -> U256 {
        self.oev_proxy_balances
            .get(proxy)
            .copied()
            .unwrap_or_default()
    }

    /// Balance after crediting `amount`, or `None` on overflow. Does not write.
    #[must_use]
    pub fn credited_balance(&self, proxy: &Address, amount: U256) -> Option<U256> {
        self.oev_proxy_balance(proxy).checked_add(amount)
    }

    pub fn set_oev_proxy_balance(&mut self, proxy: Address, balance: U256) {
        let prior = if balance.is_zero() {
            self.oev_proxy_balances.remove(&proxy)
        } else {
            self.oev_proxy_balances.insert(proxy, balance)
        };
        self.record_undo(Undo::OevProxyBalance(proxy, prior));
    }

    /// Number of feeds with a base record.
    #[must_use]
    pub fn data_feed_count(&self) -> usize {
        self.data_feeds.len()
    }

    /// Start recording the prior value of every write.
    pub fn begin_journal(&mut self) {
        self.journal = Some(Vec::new());
    }

    /// Close the journal and keep every write made since it was opened.
    pub fn commit_journal(&mut self) {
        self.journal = None;
    }

    /// Close the journal and undo every write made since it was opened.
    pub fn rollback_journal(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };
        for undo in journal.into_iter().rev() {
            match undo {
                Undo::DataFeed(key, prior) => restore(&mut self.data_feeds, key, prior),
                Undo::OevProxyDataFeed(key, prior) => {
                    restore(&mut self.oev_proxy_data_feeds, key, prior);
                }
                Undo::DapiName(key, prior) => {
                    restore(&mut self.dapi_name_hash_to_data_feed_id, key, prior);
                }
                Undo::OevProxyBalance(key, prior) => {
                    restore(&mut self.oev_proxy_balances, key, prior);
                }
            }
        }
    }

    fn record_undo(&mut self, undo: Undo) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(undo);
        }
    }
}

fn restore<K: Eq + std::hash::Hash, V>(map: &mut HashMap<K, V>, key: K, prior: Option<V>) {
    match prior {
        Some(value) => {
            map.insert(key, value);
        }
        None => {
            map.remove(&key);
        }
    }
}

//! # Data Feed Server Service
//!
//! Wires the domain rules to the outbound ports and exposes them through
//! `DataFeedServerApi`.
//!
//! ## Call Model
//!
//! Every write runs to completion against `&mut self`. Domain functions only
//! touch state after all of their checks passed, and the service appends the
//! resulting event last, so a rejected call leaves state, balances and the
//! event log as they were.

use crate::config::{ConfigError, ServerConfig};
use crate::domain::entities::{FeedWrite, OevUpdateRequest, SignedBeaconUpdate};
use crate::domain::identifiers::dapi_name_setter_role;
use crate::domain::invariants::TimestampWindow;
use crate::domain::oev::Deployment;
use crate::domain::state::FeedState;
use crate::domain::{beacon, beacon_set, names, oev, read, settlement};
use crate::errors::{DataFeedError, DataFeedResult};
use crate::events::FeedEvent;
use crate::ports::inbound::DataFeedServerApi;
use crate::ports::outbound::Collaborators;

use dfa_01_signature_verification::{EcdsaVerifier, SignatureVerifier};
use dfa_telemetry::{
    metric_inc, BEACON_SET_UPDATES, BEACON_UPDATES, DAPI_NAMES_SET, OEV_UPDATES, OEV_WITHDRAWALS,
    REJECTED_CALLS,
};
use shared_types::{Address, DataFeedRecord, Hash, U256};
use tracing::{debug, info, instrument, warn};

/// Write entry points, used to label statistics and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    UpdateBeacon,
    UpdateBeaconSet,
    UpdateOevProxyDataFeed,
    Withdraw,
    SetDapiName,
}

impl Operation {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpdateBeacon => "update_beacon_with_signed_data",
            Self::UpdateBeaconSet => "update_beacon_set_with_beacons",
            Self::UpdateOevProxyDataFeed => "update_oev_proxy_data_feed_with_signed_data",
            Self::Withdraw => "withdraw",
            Self::SetDapiName => "set_dapi_name",
        }
    }
}

/// Accepted and rejected calls of one entry point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub accepted: u64,
    pub rejected: u64,
}

/// Statistics for the data feed server.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServerStats {
    pub beacon_updates: CallCounts,
    pub beacon_set_updates: CallCounts,
    pub oev_updates: CallCounts,
    pub withdrawals: CallCounts,
    pub dapi_name_updates: CallCounts,
    /// Total amount paid out to beneficiaries.
    pub total_withdrawn: U256,
}

impl ServerStats {
    /// Counters for `operation`.
    #[must_use]
    pub fn calls(&self, operation: Operation) -> CallCounts {
        match operation {
            Operation::UpdateBeacon => self.beacon_updates,
            Operation::UpdateBeaconSet => self.beacon_set_updates,
            Operation::UpdateOevProxyDataFeed => self.oev_updates,
            Operation::Withdraw => self.withdrawals,
            Operation::SetDapiName => self.dapi_name_updates,
        }
    }

    fn calls_mut(&mut self, operation: Operation) -> &mut CallCounts {
        match operation {
            Operation::UpdateBeacon => &mut self.beacon_updates,
            Operation::UpdateBeaconSet => &mut self.beacon_set_updates,
            Operation::UpdateOevProxyDataFeed => &mut self.oev_updates,
            Operation::Withdraw => &mut self.withdrawals,
            Operation::SetDapiName => &mut self.dapi_name_updates,
        }
    }
}

/// The signed data feed aggregation engine.
///
/// Owns all feed state; consults the proxy registry, access control, ledger
/// and clock through `Collaborators`.
pub struct DataFeedServer<V: SignatureVerifier = EcdsaVerifier> {
    pub(crate) config: ServerConfig,
    pub(crate) verifier: V,
    pub(crate) collaborators: Collaborators,
    pub(crate) state: FeedState,
    pub(crate) events: Vec<FeedEvent>,
    pub(crate) stats: ServerStats,
    dapi_name_setter_role: Hash,
}

impl DataFeedServer<EcdsaVerifier> {
    /// Server using the secp256k1 verifier.
    pub fn new(config: ServerConfig, collaborators: Collaborators) -> Result<Self, ConfigError> {
        Self::with_verifier(config, EcdsaVerifier::new(), collaborators)
    }
}

impl<V: SignatureVerifier> DataFeedServer<V> {
    /// Server using a custom verifier.
    pub fn with_verifier(
        config: ServerConfig,
        verifier: V,
        collaborators: Collaborators,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let dapi_name_setter_role = dapi_name_setter_role(
            &config.manager,
            &config.admin_role_description,
            &config.dapi_name_setter_role_description,
        );
        info!(
            chain_id = config.chain_id,
            server = %config.server_address,
            manager = %config.manager,
            "Data feed server initialized"
        );
        Ok(Self {
            config,
            verifier,
            collaborators,
            state: FeedState::new(),
            events: Vec::new(),
            stats: ServerStats::default(),
            dapi_name_setter_role,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> &ServerStats {
        &self.stats
    }

    /// Read-only view of all feed state.
    #[must_use]
    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Role whose holders may set dAPI names.
    #[must_use]
    pub fn dapi_name_setter_role(&self) -> Hash {
        self.dapi_name_setter_role
    }

    /// Events appended since the last drain.
    #[must_use]
    pub fn events(&self) -> &[FeedEvent] {
        &self.events
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<FeedEvent> {
        std::mem::take(&mut self.events)
    }

    fn window(&self) -> TimestampWindow {
        TimestampWindow::new(
            self.collaborators.clock.now(),
            self.config.max_future_skew_secs,
        )
    }

    fn deployment(&self) -> Deployment {
        Deployment {
            chain_id: self.config.chain_id,
            server_address: self.config.server_address,
        }
    }

    /// The manager, or any holder of the dAPI name setter role.
    fn check_permission(&self, account: &Address) -> DataFeedResult<()> {
        if *account == self.config.manager
            || self
                .collaborators
                .access_control
                .has_role(&self.dapi_name_setter_role, account)
        {
            return Ok(());
        }
        Err(DataFeedError::PermissionDenied { account: *account })
    }

    fn commit(&mut self, write: FeedWrite) -> Hash {
        debug!(
            event = write.event.name(),
            data_feed_id = %write.data_feed_id,
            value = %write.record.value,
            timestamp = write.record.timestamp,
            "Data feed written"
        );
        self.events.push(write.event);
        write.data_feed_id
    }

    /// Count the outcome of a write in stats and metrics.
    fn record<T>(&mut self, operation: Operation, result: DataFeedResult<T>) -> DataFeedResult<T> {
        let counts = self.stats.calls_mut(operation);
        match &result {
            Ok(_) => {
                counts.accepted += 1;
                match operation {
                    Operation::UpdateBeacon => metric_inc!(BEACON_UPDATES),
                    Operation::UpdateBeaconSet => metric_inc!(BEACON_SET_UPDATES),
                    Operation::UpdateOevProxyDataFeed => metric_inc!(OEV_UPDATES),
                    Operation::Withdraw => metric_inc!(OEV_WITHDRAWALS),
                    Operation::SetDapiName => metric_inc!(DAPI_NAMES_SET),
                }
            }
            Err(e) => {
                counts.rejected += 1;
                metric_inc!(REJECTED_CALLS, &[operation.as_str(), e.label()]);
                warn!(
                    operation = operation.as_str(),
                    category = ?e.category(),
                    error = %e,
                    "Call rejected"
                );
            }
        }
        result
    }

    fn try_withdraw(&mut self, oev_proxy: Address) -> DataFeedResult<U256> {
        let beneficiary = self.collaborators.proxies.oev_beneficiary(&oev_proxy);
        let withdrawal = settlement::claim_oev_proxy_balance(&mut self.state, oev_proxy, beneficiary)?;

        if let Err(reason) = self
            .collaborators
            .ledger
            .transfer(&withdrawal.oev_beneficiary, withdrawal.amount)
        {
            settlement::restore_claim(&mut self.state, &withdrawal);
            return Err(DataFeedError::TransferReverted {
                beneficiary: withdrawal.oev_beneficiary,
                reason,
            });
        }

        self.stats.total_withdrawn = self.stats.total_withdrawn.saturating_add(withdrawal.amount);
        info!(
            oev_proxy = %withdrawal.oev_proxy,
            oev_beneficiary = %withdrawal.oev_beneficiary,
            amount = %withdrawal.amount,
            "OEV proceeds withdrawn"
        );
        self.events.push(withdrawal.event());
        Ok(withdrawal.amount)
    }

    fn try_set_dapi_name(
        &mut self,
        sender: Address,
        dapi_name: Hash,
        data_feed_id: Hash,
    ) -> DataFeedResult<()> {
        names::validate_dapi_name(&dapi_name)?;
        self.check_permission(&sender)?;
        let event = names::set_dapi_name(&mut self.state, sender, dapi_name, data_feed_id)?;
        info!(%dapi_name, %data_feed_id, %sender, "dAPI name set");
        self.events.push(event);
        Ok(())
    }
}

impl<V: SignatureVerifier> DataFeedServerApi for DataFeedServer<V> {
    #[instrument(skip_all, fields(airnode = %update.airnode, timestamp = update.timestamp))]
    fn update_beacon_with_signed_data(
        &mut self,
        update: SignedBeaconUpdate,
    ) -> DataFeedResult<Hash> {
        let window = self.window();
        let result =
            beacon::update_beacon_with_signed_data(&mut self.state, &self.verifier, window, &update)
                .map(|write| self.commit(write));
        self.record(Operation::UpdateBeacon, result)
    }

    #[instrument(skip_all, fields(members = beacon_ids.len()))]
    fn update_beacon_set_with_beacons(&mut self, beacon_ids: &[Hash]) -> DataFeedResult<Hash> {
        let result = beacon_set::update_beacon_set_with_beacons(&mut self.state, beacon_ids)
            .map(|write| self.commit(write));
        self.record(Operation::UpdateBeaconSet, result)
    }

    #[instrument(
        skip_all,
        fields(%updater, proxy = %request.proxy, data_feed_id = %request.data_feed_id)
    )]
    fn update_oev_proxy_data_feed_with_signed_data(
        &mut self,
        updater: Address,
        request: OevUpdateRequest,
    ) -> DataFeedResult<()> {
        let window = self.window();
        let deployment = self.deployment();
        let result = oev::update_oev_proxy_data_feed_with_signed_data(
            &mut self.state,
            &self.verifier,
            window,
            deployment,
            updater,
            &request,
        )
        .map(|write| {
            self.commit(write);
        });
        self.record(Operation::UpdateOevProxyDataFeed, result)
    }

    #[instrument(skip_all, fields(%oev_proxy))]
    fn withdraw(&mut self, oev_proxy: Address) -> DataFeedResult<U256> {
        let result = self.try_withdraw(oev_proxy);
        self.record(Operation::Withdraw, result)
    }

    #[instrument(skip_all, fields(%sender, %dapi_name))]
    fn set_dapi_name(
        &mut self,
        sender: Address,
        dapi_name: Hash,
        data_feed_id: Hash,
    ) -> DataFeedResult<()> {
        let result = self.try_set_dapi_name(sender, dapi_name, data_feed_id);
        self.record(Operation::SetDapiName, result)
    }

    fn read_data_feed_with_id(&self, data_feed_id: &Hash) -> DataFeedResult<DataFeedRecord> {
        read::read_data_feed_with_id(&self.state, data_feed_id)
    }

    fn read_data_feed_with_dapi_name_hash(
        &self,
        dapi_name_hash: &Hash,
    ) -> DataFeedResult<DataFeedRecord> {
        read::read_data_feed_with_dapi_name_hash(&self.state, dapi_name_hash)
    }

    fn read_data_feed_with_id_as_oev_proxy(
        &self,
        proxy: &Address,
        data_feed_id: &Hash,
    ) -> DataFeedResult<DataFeedRecord> {
        read::read_data_feed_with_id_as_oev_proxy(&self.state, proxy, data_feed_id)
    }

    fn read_data_feed_with_dapi_name_hash_as_oev_proxy(
        &self,
        proxy: &Address,
        dapi_name_hash: &Hash,
    ) -> DataFeedResult<DataFeedRecord> {
        read::read_data_feed_with_dapi_name_hash_as_oev_proxy(&self.state, proxy, dapi_name_hash)
    }

    fn data_feed(&self, data_feed_id: &Hash) -> DataFeedRecord {
        self.state.data_feed(data_feed_id)
    }

    fn oev_proxy_data_feed(&self, proxy: &Address, data_feed_id: &Hash) -> DataFeedRecord {
        self.state.oev_proxy_data_feed(proxy, data_feed_id)
    }

    fn oev_proxy_balance(&self, proxy: &Address) -> U256 {
        self.state.oev_proxy_balance(proxy)
    }

    fn dapi_name_to_data_feed_id(&self, dapi_name: &Hash) -> Hash {
        read::dapi_name_to_data_feed_id(&self.state, dapi_name)
    }

    fn dapi_name_hash_to_data_feed_id(&self, dapi_name_hash: &Hash) -> Hash {
        self.state.dapi_name_hash_to_data_feed_id(dapi_name_hash)
    }
}

impl<V: SignatureVerifier> std::fmt::Debug for DataFeedServer<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataFeedServer")
            .field("config", &self.config)
            .field("feeds", &self.state.data_feed_count())
            .field("pending_events", &self.events.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

//! # Driving Ports (API - Inbound)
//!
//! The entry points of a data feed server. Writes take `&mut self` and either
//! commit completely or leave the server untouched.

use crate::errors::DataFeedResult;
use shared_types::{Address, DataFeedRecord, Hash, U256};

pub use crate::domain::entities::{OevUpdateRequest, SignedBeaconUpdate, SignedOevEntry};

/// Public API of the data feed server.
pub trait DataFeedServerApi {
    // =========================================================================
    // WRITES
    // =========================================================================

    /// Apply a signed update to a Beacon. Returns the Beacon ID.
    ///
    /// # Errors
    /// * `TimestampInvalid` - zero, or more than the skew ahead of now
    /// * `SignatureMismatch` / `MalformedSignature` - not signed by `airnode`
    /// * `DataLengthInvalid` / `ValueOutOfRange` - payload is not an int224
    /// * `StaleUpdate` - not newer than the stored record
    fn update_beacon_with_signed_data(&mut self, update: SignedBeaconUpdate)
        -> DataFeedResult<Hash>;

    /// Aggregate Beacons into a Beacon set. Returns the Beacon set ID.
    ///
    /// # Errors
    /// * `InsufficientMembers` - fewer than two Beacons
    /// * `NoChange` - aggregate equals the stored record
    fn update_beacon_set_with_beacons(&mut self, beacon_ids: &[Hash]) -> DataFeedResult<Hash>;

    /// Write an OEV override on behalf of `updater`, the auction winner.
    ///
    /// # Errors
    /// As for Beacon updates, plus `MissingSignature`, `FeedIdMismatch` and
    /// `QuorumNotMet` for the signature bundle.
    fn update_oev_proxy_data_feed_with_signed_data(
        &mut self,
        updater: Address,
        request: OevUpdateRequest,
    ) -> DataFeedResult<()>;

    /// Pay the accrued balance of `oev_proxy` to its beneficiary.
    ///
    /// # Errors
    /// * `BeneficiaryZero` - proxy reports no beneficiary
    /// * `BalanceZero` - nothing accrued
    /// * `TransferReverted` - payout refused; balance kept
    fn withdraw(&mut self, oev_proxy: Address) -> DataFeedResult<U256>;

    /// Point `dapi_name` at `data_feed_id` (zero clears).
    ///
    /// # Errors
    /// * `DapiNameZero` - name is zero
    /// * `PermissionDenied` - sender is neither manager nor setter
    fn set_dapi_name(
        &mut self,
        sender: Address,
        dapi_name: Hash,
        data_feed_id: Hash,
    ) -> DataFeedResult<()>;

    // =========================================================================
    // READS
    // =========================================================================

    fn read_data_feed_with_id(&self, data_feed_id: &Hash) -> DataFeedResult<DataFeedRecord>;

    fn read_data_feed_with_dapi_name_hash(
        &self,
        dapi_name_hash: &Hash,
    ) -> DataFeedResult<DataFeedRecord>;

    /// Fresher of the base record and the override held for `proxy`.
    fn read_data_feed_with_id_as_oev_proxy(
        &self,
        proxy: &Address,
        data_feed_id: &Hash,
    ) -> DataFeedResult<DataFeedRecord>;

    fn read_data_feed_with_dapi_name_hash_as_oev_proxy(
        &self,
        proxy: &Address,
        dapi_name_hash: &Hash,
    ) -> DataFeedResult<DataFeedRecord>;

    // =========================================================================
    // RAW VIEWS
    // =========================================================================

    /// Stored record, `(0, 0)` when absent.
    fn data_feed(&self, data_feed_id: &Hash) -> DataFeedRecord;

    /// Stored override, `(0, 0)` when absent.
    fn oev_proxy_data_feed(&self, proxy: &Address, data_feed_id: &Hash) -> DataFeedRecord;

    fn oev_proxy_balance(&self, proxy: &Address) -> U256;

    /// Feed ID of a plain dAPI name, zero when unset.
    fn dapi_name_to_data_feed_id(&self, dapi_name: &Hash) -> Hash;

    /// Feed ID of a dAPI name hash, zero when unset.
    fn dapi_name_hash_to_data_feed_id(&self, dapi_name_hash: &Hash) -> Hash;
}

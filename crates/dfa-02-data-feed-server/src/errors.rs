//! # Data Feed Errors
//!
//! Every rejected call maps to exactly one `DataFeedError`. A rejected call
//! leaves no trace in state, events or balances.

use dfa_01_signature_verification::SignatureError;
use shared_types::{Address, Hash};
use std::fmt;
use thiserror::Error;

/// Whether a feed id refers to a single Beacon or a Beacon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FeedKind {
    Beacon,
    BeaconSet,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beacon => write!(f, "Beacon"),
            Self::BeaconSet => write!(f, "Beacon set"),
        }
    }
}

/// Coarse grouping of failures, used for metrics and callers that only need
/// to know who is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Input is malformed regardless of state.
    Validation,
    /// Caller or signer lacks the right to perform the write.
    Authorization,
    /// Input is valid but conflicts with stored state.
    State,
    /// Settlement could not move funds.
    Economic,
}

/// Refusal reported by the value transfer collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("Recipient refused transfer")]
    Refused,

    #[error("Insufficient funds held by server")]
    InsufficientFunds,
}

/// Errors returned by data feed server operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataFeedError {
    // =========================================================================
    // VALIDATION
    // =========================================================================
    #[error("Timestamp not valid: {timestamp} (now {now})")]
    TimestampInvalid { timestamp: u32, now: u32 },

    #[error("Data length not correct: expected 32 bytes, got {0}")]
    DataLengthInvalid(usize),

    #[error("Value typecasting error")]
    ValueOutOfRange,

    #[error("Specified less than two Beacons: got {0}")]
    InsufficientMembers(usize),

    #[error("dAPI name zero")]
    DapiNameZero,

    // =========================================================================
    // AUTHORIZATION
    // =========================================================================
    #[error("Signature mismatch for signer {signer}")]
    SignatureMismatch { signer: Address },

    #[error("Malformed signature for signer {signer}: {reason}")]
    MalformedSignature {
        signer: Address,
        reason: SignatureError,
    },

    #[error("Not enough signatures: {valid} valid, {required} required")]
    QuorumNotMet { valid: usize, required: usize },

    #[error("Missing signature")]
    MissingSignature,

    #[error("{kind} ID mismatch: expected {expected}, derived {derived}")]
    FeedIdMismatch {
        kind: FeedKind,
        expected: Hash,
        derived: Hash,
    },

    #[error("Sender cannot set dAPI name: {account}")]
    PermissionDenied { account: Address },

    // =========================================================================
    // STATE
    // =========================================================================
    #[error("Does not update timestamp: stored {stored}, submitted {submitted}")]
    StaleUpdate { stored: u32, submitted: u32 },

    #[error("Does not update Beacon set")]
    NoChange,

    #[error("Data feed not initialized")]
    FeedUninitialized,

    #[error("dAPI name not set")]
    NameNotSet,

    // =========================================================================
    // ECONOMIC
    // =========================================================================
    #[error("Beneficiary address zero")]
    BeneficiaryZero,

    #[error("OEV proxy balance zero")]
    BalanceZero,

    #[error("Withdrawal reverted: {reason}")]
    TransferReverted {
        beneficiary: Address,
        reason: TransferError,
    },

    #[error("OEV proxy balance overflow")]
    BalanceOverflow,
}

impl DataFeedError {
    /// Map a verifier failure for `signer` onto the server taxonomy.
    #[must_use]
    pub fn from_signature(signer: Address, error: SignatureError) -> Self {
        if error.is_malformed() {
            Self::MalformedSignature {
                signer,
                reason: error,
            }
        } else {
            Self::SignatureMismatch { signer }
        }
    }

    /// Category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TimestampInvalid { .. }
            | Self::DataLengthInvalid(_)
            | Self::ValueOutOfRange
            | Self::InsufficientMembers(_)
            | Self::DapiNameZero => ErrorCategory::Validation,

            Self::SignatureMismatch { .. }
            | Self::MalformedSignature { .. }
            | Self::QuorumNotMet { .. }
            | Self::MissingSignature
            | Self::FeedIdMismatch { .. }
            | Self::PermissionDenied { .. } => ErrorCategory::Authorization,

            Self::StaleUpdate { .. }
            | Self::NoChange
            | Self::FeedUninitialized
            | Self::NameNotSet => ErrorCategory::State,

            Self::BeneficiaryZero
            | Self::BalanceZero
            | Self::TransferReverted { .. }
            | Self::BalanceOverflow => ErrorCategory::Economic,
        }
    }

    /// Stable snake_case label, used as the `reason` metric label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::TimestampInvalid { .. } => "timestamp_invalid",
            Self::DataLengthInvalid(_) => "data_length_invalid",
            Self::ValueOutOfRange => "value_out_of_range",
            Self::InsufficientMembers(_) => "insufficient_members",
            Self::DapiNameZero => "dapi_name_zero",
            Self::SignatureMismatch { .. } => "signature_mismatch",
            Self::MalformedSignature { .. } => "malformed_signature",
            Self::QuorumNotMet { .. } => "quorum_not_met",
            Self::MissingSignature => "missing_signature",
            Self::FeedIdMismatch { .. } => "feed_id_mismatch",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::StaleUpdate { .. } => "stale_update",
            Self::NoChange => "no_change",
            Self::FeedUninitialized => "feed_uninitialized",
            Self::NameNotSet => "name_not_set",
            Self::BeneficiaryZero => "beneficiary_zero",
            Self::BalanceZero => "balance_zero",
            Self::TransferReverted { .. } => "transfer_reverted",
            Self::BalanceOverflow => "balance_overflow",
        }
    }
}

/// Result type for data feed server operations.
pub type DataFeedResult<T> = Result<T, DataFeedError>;

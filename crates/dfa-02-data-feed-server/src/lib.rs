//! # Data Feed Server (DFA-02)
//!
//! Aggregation and freshness arbitration for signed oracle data.
//!
//! ## Responsibilities
//!
//! - **Beacons**: single-source feeds updated with signed data, strictly
//!   forward in time
//! - **Beacon sets**: median of member Beacons, stored under the hash of the
//!   ordered member list
//! - **OEV overlay**: per-proxy overrides written by auction winners with a
//!   majority of source signatures; proxy reads return the fresher record
//! - **dAPI names**: human-readable names pointing at feeds, set by the
//!   manager or a dAPI name setter
//! - **Settlement**: bids accrue per proxy and are withdrawn to its beneficiary
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): update and read rules over `FeedState`
//! - **Ports Layer** (`ports/`): `DataFeedServerApi` in, collaborators out
//! - **Adapters Layer** (`adapters/`): in-memory collaborators
//! - **Service Layer** (`service.rs`, `batch.rs`): the engine and batched calls
//!
//! ## Example
//!
//! ```rust,ignore
//! use dfa_02_data_feed_server::prelude::*;
//!
//! let env = InMemoryEnvironment::new(1_700_000_000);
//! let mut server = DataFeedServer::new(config, env.collaborators())?;
//!
//! let beacon_id = server.update_beacon_with_signed_data(update)?;
//! let record = server.read_data_feed_with_id(&beacon_id)?;
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod batch;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;


// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigError, ServerConfig};

    // Domain
    pub use crate::domain::codec::{decode_fixed_point, encode_fixed_point};
    pub use crate::domain::entities::{OevUpdateRequest, SignedBeaconUpdate, SignedOevEntry};
    pub use crate::domain::identifiers::{
        dapi_name_hash, dapi_name_setter_role, derive_beacon_id, derive_beacon_set_id, derive_role,
        derive_template_id, oev_signature_message_hash, oev_update_hash, root_role,
        signed_data_message_hash, OevUpdateContext,
    };
    pub use crate::domain::state::FeedState;

    // Ports
    pub use crate::ports::inbound::DataFeedServerApi;
    pub use crate::ports::outbound::{
        AccessControlRegistry, Clock, Collaborators, OevProxyRegistry, ValueTransfer,
    };

    // Adapters
    pub use crate::adapters::{
        InMemoryAccessControl, InMemoryEnvironment, InMemoryLedger, InMemoryProxyRegistry,
        ManualClock, SystemClock,
    };

    // Service
    pub use crate::batch::{BatchError, CallOutput, FeedCall};
    pub use crate::service::{CallCounts, DataFeedServer, Operation, ServerStats};

    // Errors and events
    pub use crate::errors::{DataFeedError, DataFeedResult, ErrorCategory, FeedKind, TransferError};
    pub use crate::events::FeedEvent;

    // Shared types
    pub use shared_types::{Address, DataFeedRecord, FeedValue, Hash, U256};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

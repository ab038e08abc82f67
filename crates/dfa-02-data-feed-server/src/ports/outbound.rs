//! # Driven Ports (SPI - Outbound)
//!
//! Collaborators the server consults but does not own: proxy metadata, role
//! membership, the value ledger and block time.

use crate::errors::TransferError;
use shared_types::{Address, Hash, U256};
use std::sync::Arc;

/// Proxy metadata.
pub trait OevProxyRegistry: Send + Sync {
    /// Beneficiary of a proxy's auction proceeds, `None` for unknown proxies.
    fn oev_beneficiary(&self, proxy: &Address) -> Option<Address>;
}

/// Role membership. The manager is checked separately by the server.
pub trait AccessControlRegistry: Send + Sync {
    fn has_role(&self, role: &Hash, account: &Address) -> bool;
}

/// Moves value held by the server to an account.
pub trait ValueTransfer: Send + Sync {
    /// Transfer `amount` to `to`. A refusal leaves the ledger unchanged.
    fn transfer(&self, to: &Address, amount: U256) -> Result<(), TransferError>;
}

/// Block time of the substrate the server runs on.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now(&self) -> u32;
}

/// The set of collaborators a server is wired with.
#[derive(Clone)]
pub struct Collaborators {
    pub proxies: Arc<dyn OevProxyRegistry>,
    pub access_control: Arc<dyn AccessControlRegistry>,
    pub ledger: Arc<dyn ValueTransfer>,
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

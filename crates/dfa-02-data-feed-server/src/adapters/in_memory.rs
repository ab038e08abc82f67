//! # In-Memory Collaborators
//!
//! Thread-safe, lock-backed stand-ins for the proxy registry, access control,
//! value ledger and clock.

use crate::errors::TransferError;
use crate::ports::outbound::{
    AccessControlRegistry, Clock, Collaborators, OevProxyRegistry, ValueTransfer,
};
use parking_lot::RwLock;
use shared_types::{Address, Hash, U256};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

// =============================================================================
// PROXY REGISTRY
// =============================================================================

/// Proxy to beneficiary map.
#[derive(Debug, Default)]
pub struct InMemoryProxyRegistry {
    beneficiaries: RwLock<HashMap<Address, Address>>,
}

impl InMemoryProxyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_beneficiary(&self, proxy: Address, beneficiary: Address) {
        self.beneficiaries.write().insert(proxy, beneficiary);
    }
}

impl OevProxyRegistry for InMemoryProxyRegistry {
    fn oev_beneficiary(&self, proxy: &Address) -> Option<Address> {
        self.beneficiaries.read().get(proxy).copied()
    }
}

// =============================================================================
// ACCESS CONTROL
// =============================================================================

/// Flat set of `(role, account)` grants.
#[derive(Debug, Default)]
pub struct InMemoryAccessControl {
    grants: RwLock<HashSet<(Hash, Address)>>,
}

impl InMemoryAccessControl {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant_role(&self, role: Hash, account: Address) {
        self.grants.write().insert((role, account));
    }

    pub fn revoke_role(&self, role: &Hash, account: &Address) {
        self.grants.write().remove(&(*role, *account));
    }
}

impl AccessControlRegistry for InMemoryAccessControl {
    fn has_role(&self, role: &Hash, account: &Address) -> bool {
        self.grants.read().contains(&(*role, *account))
    }
}

// =============================================================================
// LEDGER
// =============================================================================

/// Credits transfers to per-account balances. Accounts can be marked as
/// refusing payments.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: RwLock<HashMap<Address, U256>>,
    refusing: RwLock<HashSet<Address>>,
}

impl InMemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance received by `account` so far.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.balances.read().get(account).copied().unwrap_or_default()
    }

    /// Make `account` refuse (or accept again) incoming transfers.
    pub fn set_refusing(&self, account: Address, refusing: bool) {
        let mut set = self.refusing.write();
        if refusing {
            set.insert(account);
        } else {
            set.remove(&account);
        }
    }
}

impl ValueTransfer for InMemoryLedger {
    fn transfer(&self, to: &Address, amount: U256) -> Result<(), TransferError> {
        if self.refusing.read().contains(to) {
            return Err(TransferError::Refused);
        }
        let mut balances = self.balances.write();
        let balance = balances.entry(*to).or_default();
        *balance = balance.saturating_add(amount);
        Ok(())
    }
}

// =============================================================================
// CLOCKS
// =============================================================================

/// Clock set by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU32,
}

impl ManualClock {
    #[must_use]
    pub fn new(now: u32) -> Self {
        Self {
            now: AtomicU32::new(now),
        }
    }

    pub fn set(&self, now: u32) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: u32) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u32 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Wall clock, saturating at `u32::MAX`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u32 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u32::try_from(d.as_secs()).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }
}

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Shared handles to one set of in-memory collaborators.
///
/// Keeps typed handles for test setup while handing the server trait objects.
#[derive(Debug, Clone)]
pub struct InMemoryEnvironment {
    pub proxies: Arc<InMemoryProxyRegistry>,
    pub access_control: Arc<InMemoryAccessControl>,
    pub ledger: Arc<InMemoryLedger>,
    pub clock: Arc<ManualClock>,
}

impl InMemoryEnvironment {
    /// Fresh collaborators with the clock at `now`.
    #[must_use]
    pub fn new(now: u32) -> Self {
        Self {
            proxies: Arc::new(InMemoryProxyRegistry::new()),
            access_control: Arc::new(InMemoryAccessControl::new()),
            ledger: Arc::new(InMemoryLedger::new()),
            clock: Arc::new(ManualClock::new(now)),
        }
    }

    /// Trait-object view for wiring a server.
    #[must_use]
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            proxies: self.proxies.clone(),
            access_control: self.access_control.clone(),
            ledger: self.ledger.clone(),
            clock: self.clock.clone(),
        }
    }
}

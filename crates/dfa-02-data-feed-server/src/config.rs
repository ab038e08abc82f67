//! Server configuration.
//!
//! Identity of the deployment (chain id, server address, manager) plus the
//! timestamp skew and role descriptions that drive authorization.

use serde::{Deserialize, Serialize};
use shared_types::Address;
use thiserror::Error;

/// Default tolerance for timestamps ahead of the clock (1 hour).
pub const DEFAULT_MAX_FUTURE_SKEW_SECS: u32 = 3600;

/// Role description whose holders may set dAPI names.
pub const DAPI_NAME_SETTER_ROLE_DESCRIPTION: &str = "dAPI name setter";

/// Description of the admin role every server role is derived from.
pub const DEFAULT_ADMIN_ROLE_DESCRIPTION: &str = "Api3ServerV1 admin";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Manager address zero")]
    ManagerZero,

    #[error("Server address zero")]
    ServerAddressZero,

    #[error("Role description empty: {0}")]
    EmptyRoleDescription(&'static str),

    #[error("Future skew too large: {0}s")]
    SkewTooLarge(u32),
}

/// Configuration for a data feed server instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Chain id bound into every OEV update hash.
    pub chain_id: u64,
    /// Address of this server bound into every OEV update hash.
    pub server_address: Address,
    /// Manager account; bypasses role checks.
    pub manager: Address,
    /// How far ahead of `now` an update timestamp may be.
    pub max_future_skew_secs: u32,
    /// Description of the admin role.
    pub admin_role_description: String,
    /// Description of the dAPI name setter role.
    pub dapi_name_setter_role_description: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            chain_id: 1,
            server_address: Address::ZERO,
            manager: Address::ZERO,
            max_future_skew_secs: DEFAULT_MAX_FUTURE_SKEW_SECS,
            admin_role_description: DEFAULT_ADMIN_ROLE_DESCRIPTION.to_string(),
            dapi_name_setter_role_description: DAPI_NAME_SETTER_ROLE_DESCRIPTION.to_string(),
        }
    }
}

impl ServerConfig {
    /// Configuration for the given deployment identity, other fields default.
    #[must_use]
    pub fn new(chain_id: u64, server_address: Address, manager: Address) -> Self {
        Self {
            chain_id,
            server_address,
            manager,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.manager.is_zero() {
            return Err(ConfigError::ManagerZero);
        }
        if self.server_address.is_zero() {
            return Err(ConfigError::ServerAddressZero);
        }
        if self.admin_role_description.is_empty() {
            return Err(ConfigError::EmptyRoleDescription("admin"));
        }
        if self.dapi_name_setter_role_description.is_empty() {
            return Err(ConfigError::EmptyRoleDescription("dAPI name setter"));
        }
        // One day is far beyond any sane clock drift
        if self.max_future_skew_secs > 86_400 {
            return Err(ConfigError::SkewTooLarge(self.max_future_skew_secs));
        }
        Ok(())
    }
}

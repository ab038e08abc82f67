//! # Identifier Derivation
//!
//! Every relationship in the server is a recomputed hash: templates, Beacons,
//! Beacon sets, dAPI names, signed messages and roles. Nothing stores a
//! back-reference.

use dfa_01_signature_verification::keccak256;
use shared_types::abi::{encode_bytes32_array, PackedEncoder};
use shared_types::{Address, Hash, U256};

/// `keccak256(endpointId ‖ parameters)`.
#[must_use]
pub fn derive_template_id(endpoint_id: &Hash, parameters: &[u8]) -> Hash {
    keccak256(&PackedEncoder::new().bytes32(endpoint_id).bytes(parameters).finish())
}

/// `keccak256(airnode ‖ templateId)`.
#[must_use]
pub fn derive_beacon_id(airnode: &Address, template_id: &Hash) -> Hash {
    keccak256(&PackedEncoder::new().address(airnode).bytes32(template_id).finish())
}

/// `keccak256(abi.encode(bytes32[] beaconIds))`. Order-sensitive.
#[must_use]
pub fn derive_beacon_set_id(beacon_ids: &[Hash]) -> Hash {
    keccak256(&encode_bytes32_array(beacon_ids))
}

/// Storage key of a dAPI name.
#[must_use]
pub fn dapi_name_hash(dapi_name: &Hash) -> Hash {
    keccak256(dapi_name.as_bytes())
}

/// Message a source signs for a base Beacon update:
/// `keccak256(templateId ‖ uint256(timestamp) ‖ data)`.
#[must_use]
pub fn signed_data_message_hash(template_id: &Hash, timestamp: u32, data: &[u8]) -> Hash {
    keccak256(
        &PackedEncoder::new()
            .bytes32(template_id)
            .uint256(U256::from(timestamp))
            .bytes(data)
            .finish(),
    )
}

/// Fields bound into an OEV update hash.
#[derive(Debug, Clone, Copy)]
pub struct OevUpdateContext<'a> {
    pub chain_id: u64,
    pub server_address: Address,
    pub proxy: Address,
    pub data_feed_id: Hash,
    pub update_id: Hash,
    pub timestamp: u32,
    pub data: &'a [u8],
    pub updater: Address,
    pub bid_amount: U256,
}

/// `keccak256(chainId ‖ server ‖ proxy ‖ feedId ‖ updateId ‖ timestamp ‖ data ‖ updater ‖ bid)`.
#[must_use]
pub fn oev_update_hash(ctx: &OevUpdateContext<'_>) -> Hash {
    keccak256(
        &PackedEncoder::new()
            .uint256(U256::from(ctx.chain_id))
            .address(&ctx.server_address)
            .address(&ctx.proxy)
            .bytes32(&ctx.data_feed_id)
            .bytes32(&ctx.update_id)
            .uint256(U256::from(ctx.timestamp))
            .bytes(ctx.data)
            .address(&ctx.updater)
            .uint256(ctx.bid_amount)
            .finish(),
    )
}

/// Message one constituent signs for an OEV update: `keccak256(oevUpdateHash ‖ templateId)`.
#[must_use]
pub fn oev_signature_message_hash(oev_update_hash: &Hash, template_id: &Hash) -> Hash {
    keccak256(
        &PackedEncoder::new()
            .bytes32(oev_update_hash)
            .bytes32(template_id)
            .finish(),
    )
}

// =============================================================================
// ROLES
// =============================================================================

/// Root role of a manager: `keccak256(manager)`.
#[must_use]
pub fn root_role(manager: &Address) -> Hash {
    keccak256(manager.as_bytes())
}

/// Child role: `keccak256(adminRole ‖ keccak256(description))`.
#[must_use]
pub fn derive_role(admin_role: &Hash, description: &str) -> Hash {
    let description_hash = keccak256(description.as_bytes());
    keccak256(
        &PackedEncoder::new()
            .bytes32(admin_role)
            .bytes32(&description_hash)
            .finish(),
    )
}

/// Role whose holders may set dAPI names, derived below the manager's admin role.
#[must_use]
pub fn dapi_name_setter_role(
    manager: &Address,
    admin_role_description: &str,
    setter_role_description: &str,
) -> Hash {
    let admin_role = derive_role(&root_role(manager), admin_role_description);
    derive_role(&admin_role, setter_role_description)
}

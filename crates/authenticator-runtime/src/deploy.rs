//! # Deployment
//!
//! Instantiates one registry per target environment. The instance identity
//! follows the Ethereum CREATE rule, so a local deployment by the default
//! account at nonce 0 lands at the address wallets expect.

use crate::config::{ConfigError, RuntimeConfig};
use authenticator::{keccak256, AuthenticatorService, DomainDescriptor};
use serde::Serialize;
use shared_types::{format_address, format_hash, Address, ChainId, Hash};
use std::sync::Arc;
use tracing::info;

// =============================================================================
// RLP ENCODING HELPERS
// =============================================================================

/// RLP-encode a byte string shorter than 56 bytes.
fn rlp_encode_short_bytes(data: &[u8]) -> Vec<u8> {
    if data.len() == 1 && data[0] < 0x80 {
        vec![data[0]]
    } else {
        let mut result = Vec::with_capacity(data.len() + 1);
        result.push(0x80 + data.len() as u8);
        result.extend_from_slice(data);
        result
    }
}

/// Minimal big-endian bytes; zero encodes as the empty string.
fn minimal_be_bytes(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

/// Address of a contract created by `deployer` at `nonce`:
/// `keccak256(rlp([deployer, nonce]))[12..]`.
pub fn create_address(deployer: &Address, nonce: u64) -> Address {
    let encoded_deployer = rlp_encode_short_bytes(deployer);
    let encoded_nonce = rlp_encode_short_bytes(&minimal_be_bytes(nonce));

    // Payload is at most 21 + 9 bytes, always a short list
    let payload_len = encoded_deployer.len() + encoded_nonce.len();
    let mut encoded = Vec::with_capacity(payload_len + 1);
    encoded.push(0xc0 + payload_len as u8);
    encoded.extend(encoded_deployer);
    encoded.extend(encoded_nonce);

    let hash = keccak256(&encoded);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

// =============================================================================
// DEPLOYMENT
// =============================================================================

/// What was deployed, where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRecord {
    pub network: String,
    pub chain_id: ChainId,
    #[serde(serialize_with = "serialize_address")]
    pub deployer: Address,
    pub deployer_nonce: u64,
    #[serde(serialize_with = "serialize_address")]
    pub registry_address: Address,
    #[serde(serialize_with = "serialize_hash")]
    pub domain_separator: Hash,
}

fn serialize_address<S: serde::Serializer>(address: &Address, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_address(address))
}

fn serialize_hash<S: serde::Serializer>(hash: &Hash, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_hash(hash))
}

/// A freshly instantiated registry and its record.
pub struct Deployment {
    pub service: Arc<AuthenticatorService>,
    pub record: DeploymentRecord,
}

/// Instantiate a registry with empty ledgers for `config`.
pub fn deploy(config: &RuntimeConfig) -> Result<Deployment, ConfigError> {
    config.validate()?;
    let chain_id = config.resolved_chain_id()?;

    let registry_address = create_address(&config.deployer, config.deployer_nonce);
    let domain = DomainDescriptor::new(chain_id, registry_address);

    let record = DeploymentRecord {
        network: config.network.name().to_string(),
        chain_id,
        deployer: config.deployer,
        deployer_nonce: config.deployer_nonce,
        registry_address,
        domain_separator: domain.domain_separator(),
    };

    info!(
        network = %record.network,
        chain_id = %chain_id,
        deployer = %format_address(&record.deployer),
        registry = %format_address(&registry_address),
        "Authenticator deployed"
    );

    Ok(Deployment {
        service: Arc::new(AuthenticatorService::new(domain)),
        record,
    })
}

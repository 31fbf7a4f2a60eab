//! # Core Entities
//!
//! Identities, hashes and event payloads shared by every crate.
//!
//! ## Clusters
//!
//! - **Primitives**: `Hash`, `Address`, `U256`, `ChainId`
//! - **Payloads**: `AuthenticatedUser`
//! - **Hex codecs**: `parse_address`, `format_address`, `decode_hex`

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

// =============================================================================
// PRIMITIVES
// =============================================================================

/// A 32-byte Keccak-256 hash.
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address (last 20 bytes of keccak256(pubkey)).
pub type Address = [u8; 20];

/// Zero address, used as the "no identity" placeholder.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Numeric identifier of the network an instance runs in (EIP-155 chain id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Chain id encoded as the `uint256` used in typed-data domains.
    pub fn as_u256(&self) -> U256 {
        U256::from(self.0)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// Payload of the `Authenticated` event.
///
/// `nonce` is the nonce value the accepted signature consumed; the ledger
/// holds `nonce + 1` once the event is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Registry instance that accepted the signature.
    pub registry: Address,
    /// The authenticated user.
    pub user: Address,
    /// Nonce embedded in the accepted signature.
    pub nonce: U256,
}

// =============================================================================
// HEX CODECS
// =============================================================================

/// Decode a hex string with an optional `0x` prefix.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, ParseError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits).map_err(|e| ParseError::InvalidHex(e.to_string()))
}

/// Parse a `0x`-prefixed (or bare) 20-byte hex address. Case is ignored.
pub fn parse_address(input: &str) -> Result<Address, ParseError> {
    let bytes = decode_hex(input)?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| ParseError::InvalidLength {
        expected: 20,
        actual,
    })
}

/// Format an address as lowercase `0x` hex.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Format a hash as lowercase `0x` hex.
pub fn format_hash(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

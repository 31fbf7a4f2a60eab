//! # Domain Entities
//!
//! Core data structures for relayed authentication.

use super::errors::SignatureError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, AuthenticatedUser, U256};

/// Length of an `r || s || v` signature as produced by `eth_signTypedData_v4`.
pub const SIGNATURE_LENGTH: usize = 65;

// =============================================================================
// ECDSA Types (secp256k1)
// =============================================================================

/// ECDSA signature on the secp256k1 curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Split a 65-byte `r || s || v` signature.
    ///
    /// Any other length is `InvalidFormat`; compact 64-byte signatures are not
    /// accepted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SignatureError::InvalidFormat);
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);

        Ok(Self { r, s, v: bytes[64] })
    }

    /// Serialize back to the 65-byte wire form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

// =============================================================================
// Structured Message
// =============================================================================

/// The `Authenticate(address user,uint256 nonce)` typed-data message.
///
/// Never stored. The verifier always builds it from the ledger's current
/// nonce, never from a caller-supplied value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticateMessage {
    /// The user being authenticated.
    pub user: Address,
    /// The user's nonce at signing time.
    pub nonce: U256,
}

// =============================================================================
// Authentication Result
// =============================================================================

/// Outcome of a successful `authenticate` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticationReceipt {
    /// Payload of the `Authenticated` event; `event.nonce` is the consumed nonce.
    pub event: AuthenticatedUser,
    /// The user's nonce after this call.
    pub next_nonce: U256,
}

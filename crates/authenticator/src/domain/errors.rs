//! # Authentication Errors
//!
//! Two layers of errors:
//!
//! - `SignatureError`: detailed reason a signature could not be verified.
//!   Internal only, used for logging and unit tests.
//! - `AuthenticatorError`: what callers of the registry see. Every signature
//!   failure collapses into `InvalidSignature` so the boundary does not leak
//!   which validation step failed.

use shared_types::Address;
use thiserror::Error;

/// Errors that can occur while verifying an ECDSA signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature format is invalid (wrong length, scalar out of range, r off-curve)
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovered signer does not match the claimed user
    #[error("Signer mismatch: expected {expected:?}, got {actual:?}")]
    SignerMismatch { expected: Address, actual: Address },
}

/// Errors surfaced by `authenticate`.
///
/// Terminal: resubmitting the same `(user, signature)` pair fails again,
/// the caller needs a new signature over the current nonce.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthenticatorError {
    /// The signature is malformed or was not produced by the claimed user
    /// over their current nonce.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The user's nonce is at `U256::MAX` and cannot advance.
    #[error("Nonce exhausted")]
    NonceExhausted,
}

impl From<SignatureError> for AuthenticatorError {
    fn from(_: SignatureError) -> Self {
        Self::InvalidSignature
    }
}

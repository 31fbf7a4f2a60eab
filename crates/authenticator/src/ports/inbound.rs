//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of the registry.

use crate::domain::eip712::DomainDescriptor;
use crate::domain::entities::AuthenticationReceipt;
use crate::domain::errors::AuthenticatorError;
use shared_types::{Address, U256};

/// Authentication registry API.
///
/// Implementations must be thread-safe (`Send + Sync`); one instance is
/// shared by every relayer and query client of a deployment.
pub trait AuthenticatorApi: Send + Sync {
    /// Verify `signature` as `user`'s signature over their current nonce and,
    /// on success, advance the nonce and mark the user authenticated.
    ///
    /// Any caller may submit; the relayer's identity is irrelevant.
    ///
    /// # Errors
    /// - `InvalidSignature`: malformed, or not signed by `user` over the
    ///   current nonce under this registry's domain. No state change.
    /// - `NonceExhausted`: the nonce is `U256::MAX`. No state change.
    fn authenticate(
        &self,
        user: &Address,
        signature: &[u8],
    ) -> Result<AuthenticationReceipt, AuthenticatorError>;

    /// Whether `user` has ever authenticated. Pure.
    fn is_authenticated(&self, user: &Address) -> bool;

    /// The nonce the next signature for `user` must commit to. Pure.
    fn get_nonce(&self, user: &Address) -> U256;

    /// Direct read of the authenticated flag.
    fn authenticated(&self, user: &Address) -> bool;

    /// The signing domain this registry verifies against.
    fn domain(&self) -> &DomainDescriptor;
}

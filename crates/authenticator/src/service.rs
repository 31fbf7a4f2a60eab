//! # Authenticator Service
//!
//! Application service layer that implements the `AuthenticatorApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`AuthenticatorApi`)
//! - Owns the domain descriptor and the ledger of one registry instance
//! - Delegates hashing and recovery to the domain layer

use crate::domain::ecdsa;
use crate::domain::eip712::DomainDescriptor;
use crate::domain::entities::{AuthenticationReceipt, EcdsaSignature};
use crate::domain::errors::AuthenticatorError;
use crate::domain::ledger::RegistryLedger;
use crate::ports::inbound::AuthenticatorApi;
use shared_types::{format_address, Address, AuthenticatedUser, U256};
use tracing::{debug, info};

/// One deployed registry instance.
pub struct AuthenticatorService {
    domain: DomainDescriptor,
    ledger: RegistryLedger,
}

impl AuthenticatorService {
    /// Create a registry with empty ledgers bound to `domain`.
    pub fn new(domain: DomainDescriptor) -> Self {
        Self {
            domain,
            ledger: RegistryLedger::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn ledger(&self) -> &RegistryLedger {
        &self.ledger
    }
}

impl AuthenticatorApi for AuthenticatorService {
    fn authenticate(
        &self,
        user: &Address,
        signature: &[u8],
    ) -> Result<AuthenticationReceipt, AuthenticatorError> {
        // Held until commit so a concurrent call cannot consume the same nonce
        let guard = self.ledger.lock_user(user);
        let current = guard.nonce();

        let digest = self.domain.authenticate_digest(user, current);
        let verified = EcdsaSignature::from_bytes(signature)
            .and_then(|sig| ecdsa::verify_signer(&digest, &sig, user));

        if let Err(reason) = verified {
            debug!(
                user = %format_address(user),
                nonce = %current,
                reason = %reason,
                "Authentication rejected"
            );
            return Err(reason.into());
        }

        let next_nonce = guard.commit().inspect_err(|_| {
            debug!(user = %format_address(user), "Authentication rejected: nonce exhausted");
        })?;

        info!(
            registry = %format_address(&self.domain.verifying_contract()),
            user = %format_address(user),
            nonce = %current,
            "Authenticated"
        );

        Ok(AuthenticationReceipt {
            event: AuthenticatedUser {
                registry: self.domain.verifying_contract(),
                user: *user,
                nonce: current,
            },
            next_nonce,
        })
    }

    fn is_authenticated(&self, user: &Address) -> bool {
        self.ledger.is_authenticated(user)
    }

    fn get_nonce(&self, user: &Address) -> U256 {
        self.ledger.nonce(user)
    }

    fn authenticated(&self, user: &Address) -> bool {
        self.ledger.is_authenticated(user)
    }

    fn domain(&self) -> &DomainDescriptor {
        &self.domain
    }
}

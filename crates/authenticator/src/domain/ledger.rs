//! # Registry Ledger
//!
//! Per-user nonce counters and authenticated flags for one registry instance.
//!
//! Both maps live behind one `RwLock` so a commit updates them together.
//! Read-verify-increment sequences for a single user are serialized by a
//! fixed set of lock stripes keyed by address; users on different stripes
//! proceed in parallel.

use super::errors::AuthenticatorError;
use parking_lot::{Mutex, MutexGuard, RwLock};
use shared_types::{Address, U256};
use std::collections::{HashMap, HashSet};

/// Number of per-user lock stripes.
pub const LOCK_STRIPES: usize = 64;

#[derive(Default)]
struct LedgerState {
    nonces: HashMap<Address, U256>,
    authenticated: HashSet<Address>,
}

/// Nonce ledger and authenticated set, zeroed on construction.
pub struct RegistryLedger {
    state: RwLock<LedgerState>,
    stripes: Vec<Mutex<()>>,
}

impl RegistryLedger {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerState::default()),
            stripes: (0..LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Current nonce for `user`, 0 if never seen.
    pub fn nonce(&self, user: &Address) -> U256 {
        self.state
            .read()
            .nonces
            .get(user)
            .copied()
            .unwrap_or_default()
    }

    pub fn is_authenticated(&self, user: &Address) -> bool {
        self.state.read().authenticated.contains(user)
    }

    /// Take exclusive access to `user`'s entry until the guard drops.
    pub fn lock_user(&self, user: &Address) -> UserGuard<'_> {
        let stripe = self.stripes[stripe_index(user)].lock();
        UserGuard {
            ledger: self,
            user: *user,
            _stripe: stripe,
        }
    }

    #[cfg(test)]
    pub(crate) fn force_nonce(&self, user: &Address, nonce: U256) {
        self.state.write().nonces.insert(*user, nonce);
    }
}

impl Default for RegistryLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn stripe_index(user: &Address) -> usize {
    // Addresses are hash-derived, the low byte is uniform enough
    usize::from(user[19]) % LOCK_STRIPES
}

/// Exclusive handle on one user's ledger entry.
///
/// Dropping without `commit` leaves the entry untouched.
pub struct UserGuard<'a> {
    ledger: &'a RegistryLedger,
    user: Address,
    _stripe: MutexGuard<'a, ()>,
}

impl UserGuard<'_> {
    pub fn user(&self) -> Address {
        self.user
    }

    pub fn nonce(&self) -> U256 {
        self.ledger.nonce(&self.user)
    }

    /// Advance the nonce and set the authenticated flag.
    ///
    /// Returns the new nonce. At `U256::MAX` nothing is written and
    /// `NonceExhausted` is returned.
    pub fn commit(self) -> Result<U256, AuthenticatorError> {
        let mut state = self.ledger.state.write();
        let current = state.nonces.get(&self.user).copied().unwrap_or_default();
        let next = current
            .checked_add(U256::one())
            .ok_or(AuthenticatorError::NonceExhausted)?;

        state.nonces.insert(self.user, next);
        state.authenticated.insert(self.user);
        Ok(next)
    }
}

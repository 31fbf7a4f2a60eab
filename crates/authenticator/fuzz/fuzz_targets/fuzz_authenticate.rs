//! Fuzz target for the verification routine.
//!
//! Arbitrary `(user, signature)` pairs must never panic, and a rejected
//! attempt must never touch the ledger.
//!
//! ## Running
//!
//! ```bash
//! cd crates/authenticator
//! cargo +nightly fuzz run fuzz_authenticate
//! ```

#![no_main]

use authenticator::{AuthenticatorApi, AuthenticatorService, DomainDescriptor};
use libfuzzer_sys::fuzz_target;
use shared_types::{ChainId, U256};

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    chain_id: u64,
    registry: [u8; 20],
    user: [u8; 20],
    /// Any length, not just 65 bytes
    signature: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let service = AuthenticatorService::new(DomainDescriptor::new(
        ChainId(input.chain_id),
        input.registry,
    ));

    match service.authenticate(&input.user, &input.signature) {
        Ok(receipt) => {
            // Only reachable if the fuzzer forged a real signature
            assert_eq!(receipt.next_nonce, U256::one());
            assert!(service.is_authenticated(&input.user));
        }
        Err(_) => {
            assert_eq!(service.get_nonce(&input.user), U256::zero());
            assert!(!service.is_authenticated(&input.user));
        }
    }
});

//! # Test Fixtures
//!
//! Well-known development keys and signatures produced by standard wallet
//! tooling against a local deployment (chain 1337, registry deployed by
//! account #0 at nonce 0).

use authenticator::{
    address_from_pubkey, sign_authentication, DomainDescriptor, SigningKey,
};
use authenticator_runtime::{deploy, Deployment, RuntimeConfig};
use shared_types::{parse_address, Address, U256};

/// Development account #0, acting as relayer and deployer.
pub const RELAYER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const RELAYER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Development account #1, the user being authenticated.
pub const USER_KEY: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const USER: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

/// Registry address of the default local deployment.
pub const LOCAL_REGISTRY: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// `signTypedData` output of USER over `Authenticate(USER, 0)`.
pub const USER_SIG_NONCE_0: &str = "0xd5fa1a7b923b8b2a171e337be067f30c9ccbcd42150df2527cfd0f68e1b9dc98\
     335633c9f26fc490a3acb74654b968d26d56d68a26c6ebd2a07730a1cad88f1a1b";

/// `signTypedData` output of USER over `Authenticate(USER, 1)`.
pub const USER_SIG_NONCE_1: &str = "0xf27e20b2db5bbc8f4c293d81181ded5984fe082b288dde3fc6ce1387de119e69\
     0fcca0db269d1f73fe5b610e9a12aae76287b456ce5f949b4c970486218eb4751c";

/// RELAYER's key signing USER's `Authenticate(USER, 0)` message.
pub const RELAYER_SIG_FOR_USER_NONCE_0: &str =
    "0x79547052865f5976d581c55049913abde9207cec69881babda87de751d641d73\
     1460a21d55fc1c8e13c304b25fcf5c06161f4bec1fad456b13ea3ba98ca380491b";

/// Parse a fixture address.
///
/// # Panics
/// On a malformed constant.
pub fn address(text: &str) -> Address {
    parse_address(text).expect("fixture address")
}

/// Decode a fixture signature.
///
/// # Panics
/// On a malformed constant.
pub fn signature(text: &str) -> Vec<u8> {
    shared_types::decode_hex(text).expect("fixture signature")
}

/// Load a fixture private key.
///
/// # Panics
/// On a malformed constant.
pub fn signing_key(hex_key: &str) -> SigningKey {
    let bytes = hex::decode(hex_key).expect("fixture key hex");
    SigningKey::from_slice(&bytes).expect("fixture key scalar")
}

/// Fresh random identity.
pub fn random_user() -> (SigningKey, Address) {
    let key = SigningKey::random(&mut rand::thread_rng());
    let address = address_from_pubkey(key.verifying_key());
    (key, address)
}

/// Sign `Authenticate(user, nonce)` under `domain` and return wire bytes.
///
/// # Panics
/// If signing fails, which only happens for a zero digest.
pub fn sign(key: &SigningKey, domain: &DomainDescriptor, user: &Address, nonce: u64) -> Vec<u8> {
    sign_authentication(key, domain, user, U256::from(nonce))
        .expect("signing")
        .to_bytes()
        .to_vec()
}

/// A fresh local deployment with empty ledgers.
///
/// # Panics
/// If the default configuration stops being deployable.
pub fn local_deployment() -> Deployment {
    deploy(&RuntimeConfig::default()).expect("default deployment")
}

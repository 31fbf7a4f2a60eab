//! # Authenticator
//!
//! Relayed authentication registry: a user signs an EIP-712
//! `Authenticate(address user,uint256 nonce)` message offline, any relayer
//! submits it, and the registry records the user as authenticated.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): typed-data hashing, secp256k1 recovery, ledger
//! - **Ports Layer** (`ports/`): the `AuthenticatorApi` driving port
//! - **Service Layer** (`service.rs`): one registry instance wired to the domain
//! - **Adapters** (`adapters/`): event bus publishing and the JSON request handler
//!
//! ## Security Notes
//!
//! - **Replay Protection**: every signature commits to the user's current
//!   nonce, which advances on each success
//! - **Domain Binding**: signatures are scoped to one chain id and one
//!   registry address
//! - **Malleability Prevention (EIP-2)**: signatures with high S values are rejected
//! - **Opaque Failures**: every rejection surfaces as `InvalidSignature`

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::bus::{AuthenticatorBusAdapter, EventBusAdapter};
pub use adapters::rpc::{AuthRequest, AuthResponse, HandlerError, RequestHandler, ResponseBody};
pub use domain::ecdsa::{
    address_from_pubkey, keccak256, recover_address, sign_authentication, sign_prehash,
};
pub use domain::eip712::{DomainDescriptor, DOMAIN_NAME, DOMAIN_VERSION};
pub use domain::entities::{AuthenticateMessage, AuthenticationReceipt, EcdsaSignature};
pub use domain::errors::{AuthenticatorError, SignatureError};
pub use ports::inbound::AuthenticatorApi;
pub use service::AuthenticatorService;

/// Re-exported so callers can build signing keys without naming `k256`.
pub use k256::ecdsa::SigningKey;

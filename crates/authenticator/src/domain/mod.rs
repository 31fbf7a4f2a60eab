//! # Domain Layer
//!
//! Pure cryptographic and ledger logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod ecdsa;
pub mod eip712;
pub mod entities;
pub mod errors;
pub mod ledger;

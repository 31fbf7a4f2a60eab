//! # Shared Types Crate
//!
//! Identity and payload types used across the authenticator workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `Hash` and `U256` are defined once
//!   here and re-used by the core, the bus and the runtime.
//! - **Hex at the edges**: values are raw byte arrays internally; the `0x`
//!   hex form only exists at serialization and configuration boundaries.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;

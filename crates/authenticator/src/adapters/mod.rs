//! # Adapters Module
//!
//! Infrastructure adapters implementing the ports.

pub mod bus;
pub mod rpc;

//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that relayers and query clients use
//!
//! The driven side is the shared event bus (`shared_bus::EventPublisher`),
//! wired in by `adapters::bus`.

pub mod inbound;

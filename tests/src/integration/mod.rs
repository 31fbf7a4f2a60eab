//! # Integration Tests
//!
//! Cross-crate tests: registry, event bus, request handler and runtime
//! deployment working together.

pub mod concurrency;
pub mod flows;
pub mod scenarios;

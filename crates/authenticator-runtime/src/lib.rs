//! # Authenticator Runtime Library
//!
//! Configuration, deployment and wiring for the `authenticator-node` binary.
//! Exposed as a library so integration tests can drive a full node in-process.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize logging
//! 3. Derive the registry address and instantiate it with empty ledgers
//! 4. Announce the deployment on the event bus
//! 5. Serve JSON-lines requests on stdin/stdout

pub mod config;
pub mod deploy;
pub mod node;
pub mod telemetry;

pub use config::{ConfigError, LoggingConfig, Network, RuntimeConfig, DEFAULT_DEPLOYER};
pub use deploy::{create_address, deploy, Deployment, DeploymentRecord};
pub use node::{
    build_runtime, run_to_completion, serve, spawn_event_logger, wire, NodeHandler, SHUTDOWN_GRACE,
};
pub use telemetry::{init_logging, TelemetryError};

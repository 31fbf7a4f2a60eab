//! # Authenticator Node
//!
//! Deploys one registry for the configured network and serves the JSON
//! request protocol, one request per line on stdin, one response per line
//! on stdout. Logs go to stderr.

use std::sync::Arc;

use anyhow::{Context, Result};
use authenticator_runtime::{
    build_runtime, deploy, init_logging, run_to_completion, serve, spawn_event_logger, wire,
    RuntimeConfig,
};
use shared_bus::{EventTopic, InMemoryEventBus};
use tokio::io::BufReader;
use tracing::info;

fn main() -> Result<()> {
    let runtime = build_runtime().context("Failed to build tokio runtime")?;
    run_to_completion(runtime, run())
}

async fn run() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("===========================================");
    info!("  Authenticator Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!("{}", config.summary());

    let deployment = deploy(&config).context("Failed to deploy registry")?;
    info!(
        record = %serde_json::to_string(&deployment.record).context("Failed to encode deployment record")?,
        "Deployment record"
    );

    let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));
    let logger = spawn_event_logger(&bus);
    let handler = wire(&deployment, Arc::clone(&bus)).await;

    info!("Ready. Reading requests from stdin.");

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        served = serve(&handler, stdin, stdout) => {
            let served = served.context("Request loop failed")?;
            info!(served, "Input closed");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received");
        }
    }

    info!(
        authentications = bus.published_on(EventTopic::Authentication),
        "Node stopping"
    );

    // Dropping the last bus handles ends the event logger
    drop(handler);
    drop(bus);
    logger.await.context("Event logger panicked")?;

    info!("Shutdown complete");
    Ok(())
}

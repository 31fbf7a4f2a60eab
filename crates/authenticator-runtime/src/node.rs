//! # Node Wiring
//!
//! Connects a deployed registry to the event bus and serves the JSON-lines
//! request protocol.
//!
//! ```text
//! stdin ──JSON line──→ RequestHandler ──→ AuthenticatorService
//!                           │
//!                           └── Authenticated ──→ Event Bus ──→ event logger
//! stdout ←──JSON line──────┘
//! ```

use crate::deploy::Deployment;
use authenticator::{AuthenticatorBusAdapter, AuthenticatorService, EventBusAdapter, RequestHandler};
use shared_bus::{AuthenticatorEvent, EventFilter, InMemoryEventBus};
use shared_types::format_address;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tracing::{debug, info};

/// Handler type served by the node.
pub type NodeHandler = RequestHandler<AuthenticatorService, InMemoryEventBus>;

/// How long runtime teardown waits for blocking tasks after the node stops.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Multi-threaded runtime for the node.
pub fn build_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("authenticator-node")
        .build()
}

/// Drive `future` to completion, then tear the runtime down.
///
/// A pending stdin read sits on a blocking thread that cannot be cancelled,
/// so teardown is bounded by `SHUTDOWN_GRACE` instead of waiting for it.
pub fn run_to_completion<F: Future>(runtime: Runtime, future: F) -> F::Output {
    let output = runtime.block_on(future);
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    output
}

/// Announce the deployment on the bus and build the request handler.
pub async fn wire(deployment: &Deployment, bus: Arc<InMemoryEventBus>) -> NodeHandler {
    let adapter = EventBusAdapter::new(Arc::clone(&deployment.service), bus);
    adapter.publish_deployed().await;
    RequestHandler::new(adapter)
}

/// Log every bus event until the bus is dropped.
pub fn spawn_event_logger(bus: &InMemoryEventBus) -> JoinHandle<()> {
    let mut stream = bus.event_stream(EventFilter::all());

    tokio::spawn(async move {
        while let Some(event) = stream.next().await {
            match event {
                AuthenticatorEvent::RegistryDeployed {
                    registry, chain_id, ..
                } => {
                    info!(
                        registry = %format_address(&registry),
                        chain_id = %chain_id,
                        "[event] RegistryDeployed"
                    );
                }
                AuthenticatorEvent::Authenticated(payload) => {
                    info!(
                        registry = %format_address(&payload.registry),
                        user = %format_address(&payload.user),
                        nonce = %payload.nonce,
                        "[event] Authenticated"
                    );
                }
            }
        }
        debug!("Event logger stopped");
    })
}

/// Answer one JSON request per input line until EOF.
///
/// Blank lines are skipped. Returns the number of requests served.
pub async fn serve<R, W>(handler: &NodeHandler, reader: R, mut writer: W) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut served = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handler.handle_json(&line).await;
        writer.write_all(response.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        served += 1;
    }

    Ok(served)
}

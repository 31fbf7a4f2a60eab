//! Fuzz target for the JSON request handler.
//!
//! Any input line must produce a JSON response with a `status` field.

#![no_main]

use authenticator::{AuthenticatorService, DomainDescriptor, EventBusAdapter, RequestHandler};
use libfuzzer_sys::fuzz_target;
use shared_bus::InMemoryEventBus;
use shared_types::ChainId;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let service = Arc::new(AuthenticatorService::new(DomainDescriptor::new(
        ChainId(1337),
        [0x5f; 20],
    )));
    let handler = RequestHandler::new(EventBusAdapter::new(
        service,
        Arc::new(InMemoryEventBus::new()),
    ));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let response = runtime.block_on(handler.handle_json(line));

    let value: serde_json::Value = serde_json::from_str(&response).expect("valid JSON");
    assert!(value.get("status").is_some());
});

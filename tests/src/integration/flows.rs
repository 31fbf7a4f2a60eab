//! # Integration Test Flows
//!
//! Registry, shared bus and request handler wired the way the node wires
//! them.
//!
//! ## Flows Tested:
//!
//! 1. **Registry → Event Bus**: one `Authenticated` event per accepted signature
//! 2. **Request Handler → Registry**: JSON protocol end to end
//! 3. **Runtime wiring**: deployment announcement and JSON-lines serving

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use authenticator::{
        AuthenticatorApi, AuthenticatorBusAdapter, AuthenticatorService, EventBusAdapter,
    };
    use authenticator_runtime::{serve, wire};
    use serde_json::{json, Value};
    use shared_bus::{
        AuthenticatorEvent, EventFilter, EventPublisher, EventTopic, InMemoryEventBus,
    };
    use shared_types::{AuthenticatedUser, U256};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn bus_adapter() -> (
        EventBusAdapter<AuthenticatorService, InMemoryEventBus>,
        Arc<InMemoryEventBus>,
    ) {
        let bus = Arc::new(InMemoryEventBus::new());
        let adapter = EventBusAdapter::new(local_deployment().service, Arc::clone(&bus));
        (adapter, bus)
    }

    // =============================================================================
    // REGISTRY → EVENT BUS
    // =============================================================================

    #[tokio::test]
    async fn test_authenticated_event_payload() {
        let (adapter, bus) = bus_adapter();
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Authentication]));

        adapter
            .authenticate_and_publish(address(USER), &signature(USER_SIG_NONCE_0))
            .await
            .unwrap();

        let event = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("event");
        assert_eq!(
            event,
            AuthenticatorEvent::Authenticated(AuthenticatedUser {
                registry: address(LOCAL_REGISTRY),
                user: address(USER),
                nonce: U256::zero(),
            })
        );
    }

    #[tokio::test]
    async fn test_rejections_emit_nothing() {
        let (adapter, bus) = bus_adapter();
        let user = address(USER);

        let attempts = [
            signature(RELAYER_SIG_FOR_USER_NONCE_0),
            signature(USER_SIG_NONCE_1),
            vec![0u8; 64],
        ];
        for sig in attempts {
            assert!(adapter.authenticate_and_publish(user, &sig).await.is_err());
        }

        assert_eq!(bus.events_published(), 0);
        assert_eq!(adapter.service().get_nonce(&user), U256::zero());
    }

    #[tokio::test]
    async fn test_event_filter_by_registry() {
        let (adapter, bus) = bus_adapter();
        let mut ours = bus.subscribe(EventFilter::from_registries(vec![address(LOCAL_REGISTRY)]));
        let mut other = bus.subscribe(EventFilter::from_registries(vec![[0x11; 20]]));

        adapter
            .authenticate_and_publish(address(USER), &signature(USER_SIG_NONCE_0))
            .await
            .unwrap();

        assert!(matches!(
            ours.try_recv(),
            Ok(Some(AuthenticatorEvent::Authenticated(_)))
        ));
        assert!(matches!(other.try_recv(), Ok(None)));
    }

    // =============================================================================
    // RUNTIME WIRING
    // =============================================================================

    #[tokio::test]
    async fn test_node_session() {
        let deployment = local_deployment();
        let bus = Arc::new(InMemoryEventBus::new());
        let mut events = bus.subscribe(EventFilter::all());
        let handler = wire(&deployment, Arc::clone(&bus)).await;

        let requests = [
            json!({"method": "domain"}),
            json!({"method": "is_authenticated", "user": USER}),
            json!({"method": "authenticate", "user": USER, "signature": RELAYER_SIG_FOR_USER_NONCE_0}),
            json!({"method": "authenticate", "user": USER, "signature": USER_SIG_NONCE_0}),
            json!({"method": "authenticate", "user": USER, "signature": USER_SIG_NONCE_0}),
            json!({"method": "authenticate", "user": USER, "signature": USER_SIG_NONCE_1}),
            json!({"method": "get_nonce", "user": USER}),
            json!({"method": "authenticated", "user": USER}),
        ];
        let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();
        let mut output = Vec::new();

        let served = serve(&handler, input.as_bytes(), &mut output).await.unwrap();
        assert_eq!(served, requests.len());

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(responses[0]["chain_id"], 1337);
        assert_eq!(
            responses[0]["verifying_contract"],
            "0x5fbdb2315678afecb367f032d93f642f64180aa3"
        );
        assert_eq!(responses[1]["authenticated"], false);
        assert_eq!(responses[2]["error"], "Invalid signature");
        assert_eq!(responses[3]["next_nonce"], "1");
        assert_eq!(responses[4]["error"], "Invalid signature");
        assert_eq!(responses[5]["next_nonce"], "2");
        assert_eq!(responses[6]["nonce"], "2");
        assert_eq!(responses[7]["authenticated"], true);

        // Deployment plus two accepted signatures
        let mut received = Vec::new();
        while let Ok(Some(event)) = events.try_recv() {
            received.push(event.topic());
        }
        assert_eq!(
            received,
            vec![
                EventTopic::Deployment,
                EventTopic::Authentication,
                EventTopic::Authentication
            ]
        );
    }
}

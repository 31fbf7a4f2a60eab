//! # Event Bus Adapter
//!
//! Wires a registry instance to the shared event bus.
//!
//! ## Event Flow
//!
//! ```text
//! Relayer ──(user, signature)──→ [Registry]
//!                                    │
//!                  ┌─────────────────┴─────────────────┐
//!                  ↓                                   ↓
//!          [signature valid]                  [signature invalid]
//!                  │                                   │
//!                  ↓                                   ↓
//!     Authenticated ──→ [Event Bus]            Err, nothing published
//! ```

use crate::domain::entities::AuthenticationReceipt;
use crate::domain::errors::AuthenticatorError;
use crate::ports::inbound::AuthenticatorApi;
use async_trait::async_trait;
use shared_bus::{AuthenticatorEvent, EventPublisher};
use shared_types::{format_address, Address};
use std::sync::Arc;
use tracing::info;

// =============================================================================
// BUS ADAPTER TRAIT
// =============================================================================

/// Adapter for publishing registry events to the event bus.
#[async_trait]
pub trait AuthenticatorBusAdapter: Send + Sync {
    /// Authenticate and, on success, publish `Authenticated`.
    ///
    /// Returns the receipt and the number of subscribers that received the
    /// event. A rejected attempt publishes nothing.
    async fn authenticate_and_publish(
        &self,
        user: Address,
        signature: &[u8],
    ) -> Result<(AuthenticationReceipt, usize), AuthenticatorError>;

    /// Announce the registry instance on the bus.
    async fn publish_deployed(&self) -> usize;
}

// =============================================================================
// BUS ADAPTER IMPLEMENTATION
// =============================================================================

/// Event bus adapter for one registry instance.
pub struct EventBusAdapter<S, P>
where
    S: AuthenticatorApi,
    P: EventPublisher,
{
    service: Arc<S>,
    publisher: Arc<P>,
}

impl<S, P> EventBusAdapter<S, P>
where
    S: AuthenticatorApi,
    P: EventPublisher,
{
    pub fn new(service: Arc<S>, publisher: Arc<P>) -> Self {
        Self { service, publisher }
    }

    /// Get a reference to the underlying service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Get a reference to the event publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }
}

#[async_trait]
impl<S, P> AuthenticatorBusAdapter for EventBusAdapter<S, P>
where
    S: AuthenticatorApi,
    P: EventPublisher,
{
    async fn authenticate_and_publish(
        &self,
        user: Address,
        signature: &[u8],
    ) -> Result<(AuthenticationReceipt, usize), AuthenticatorError> {
        // State is committed before publishing; the event is observability only
        let receipt = self.service.authenticate(&user, signature)?;

        let receivers = self
            .publisher
            .publish(AuthenticatorEvent::Authenticated(receipt.event))
            .await;

        Ok((receipt, receivers))
    }

    async fn publish_deployed(&self) -> usize {
        let domain = self.service.domain();
        let event = AuthenticatorEvent::RegistryDeployed {
            registry: domain.verifying_contract(),
            chain_id: domain.chain_id(),
            domain_separator: domain.domain_separator(),
        };

        info!(
            registry = %format_address(&domain.verifying_contract()),
            chain_id = %domain.chain_id(),
            "Publishing RegistryDeployed event"
        );

        self.publisher.publish(event).await
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Authenticator Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, AuthenticatedUser, ChainId, Hash};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthenticatorEvent {
    // =========================================================================
    // DEPLOYMENT
    // =========================================================================
    /// A fresh registry instance was instantiated with empty ledgers.
    RegistryDeployed {
        /// Address (identity) of the new instance.
        registry: Address,
        /// Network the instance is bound to.
        chain_id: ChainId,
        /// Cached EIP-712 domain separator of the instance.
        domain_separator: Hash,
    },

    // =========================================================================
    // AUTHENTICATION
    // =========================================================================
    /// A relayed signature was accepted; `user` is now authenticated.
    Authenticated(AuthenticatedUser),
}

impl AuthenticatorEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::RegistryDeployed { .. } => EventTopic::Deployment,
            Self::Authenticated(_) => EventTopic::Authentication,
        }
    }

    /// Get the registry instance that emitted this event.
    #[must_use]
    pub fn registry(&self) -> Address {
        match self {
            Self::RegistryDeployed { registry, .. } => *registry,
            Self::Authenticated(payload) => payload.registry,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Registry instantiation events.
    Deployment,
    /// Successful authentication events.
    Authentication,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Registry instances to include. Empty means all instances.
    pub registries: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            registries: Vec::new(),
        }
    }

    /// Create a filter for events from specific registry instances.
    #[must_use]
    pub fn from_registries(registries: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            registries,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &AuthenticatorEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let registry_match =
            self.registries.is_empty() || self.registries.contains(&event.registry());

        topic_match && registry_match
    }
}

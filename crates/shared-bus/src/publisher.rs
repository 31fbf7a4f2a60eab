//! # Event Publisher
//!
//! Broadcast side of the bus. Every subscriber gets its own receiver on one
//! `tokio::sync::broadcast` channel and filters on its end, so publishing
//! never looks at filters.

use crate::events::{AuthenticatorEvent, EventFilter, EventTopic};
use crate::subscriber::{EventStream, EventSubscriber, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Trait for publishing events to the bus.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event. Returns how many receivers it reached.
    async fn publish(&self, event: AuthenticatorEvent) -> usize;

    /// Events published since creation, delivered or not.
    fn events_published(&self) -> u64;
}

/// In-process event bus.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<AuthenticatorEvent>,
    deployments: AtomicU64,
    authentications: AtomicU64,
    capacity: usize,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus buffering up to `capacity` events per receiver (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            deployments: AtomicU64::new(0),
            authentications: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to events matching `filter`.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, registries = filter.registries.len(), "Subscribed");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Subscribe as a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.subscribe(filter))
    }

    /// Live receivers. Dropped subscriptions stop counting immediately.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events published on `topic`. `EventTopic::All` sums every topic.
    #[must_use]
    pub fn published_on(&self, topic: EventTopic) -> u64 {
        match topic {
            EventTopic::Deployment => self.deployments.load(Ordering::Relaxed),
            EventTopic::Authentication => self.authentications.load(Ordering::Relaxed),
            EventTopic::All => self.events_published(),
        }
    }

    fn counter(&self, topic: EventTopic) -> Option<&AtomicU64> {
        match topic {
            EventTopic::Deployment => Some(&self.deployments),
            EventTopic::Authentication => Some(&self.authentications),
            EventTopic::All => None,
        }
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, filter: EventFilter) -> Subscription {
        InMemoryEventBus::subscribe(self, filter)
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: AuthenticatorEvent) -> usize {
        let topic = event.topic();
        if let Some(counter) = self.counter(topic) {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(topic = ?topic, receivers, "Event published");
                receivers
            }
            Err(_) => {
                warn!(topic = ?topic, "Event published with no receivers");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.deployments.load(Ordering::Relaxed) + self.authentications.load(Ordering::Relaxed)
    }
}

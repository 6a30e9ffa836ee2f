//! Notification bus port with broadcast and recording implementations.

use std::sync::Arc;

use async_trait::async_trait;
use domain::OrderConfirmation;
use tokio::sync::{RwLock, broadcast};

use crate::error::ServiceError;

/// Publishes order confirmations to downstream subscribers.
#[async_trait]
pub trait ConfirmationPublisher: Send + Sync {
    async fn publish_confirmation(
        &self,
        confirmation: OrderConfirmation,
    ) -> Result<(), ServiceError>;
}

/// Publishes confirmations on a tokio broadcast channel.
///
/// Publishing with no live subscriber fails with
/// [`ServiceError::Unavailable`]; the confirmation would otherwise be lost.
#[derive(Debug, Clone)]
pub struct BroadcastConfirmationPublisher {
    sender: broadcast::Sender<OrderConfirmation>,
}

impl BroadcastConfirmationPublisher {
    /// Creates a publisher whose channel buffers up to `capacity`
    /// confirmations per lagging subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to confirmations published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderConfirmation> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl ConfirmationPublisher for BroadcastConfirmationPublisher {
    async fn publish_confirmation(
        &self,
        confirmation: OrderConfirmation,
    ) -> Result<(), ServiceError> {
        self.sender.send(confirmation).map(|_| ()).map_err(|_| {
            ServiceError::Unavailable("no subscriber is listening for order confirmations".into())
        })
    }
}

#[derive(Debug, Default)]
struct InMemoryPublisherState {
    published: Vec<OrderConfirmation>,
    fail_on_publish: bool,
}

/// Publisher that keeps every confirmation in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfirmationPublisher {
    state: Arc<RwLock<InMemoryPublisherState>>,
}

impl InMemoryConfirmationPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the publisher to reject confirmations.
    pub async fn set_fail_on_publish(&self, fail: bool) {
        self.state.write().await.fail_on_publish = fail;
    }

    /// Returns the published confirmations, oldest first.
    pub async fn published(&self) -> Vec<OrderConfirmation> {
        self.state.read().await.published.clone()
    }

    pub async fn published_count(&self) -> usize {
        self.state.read().await.published.len()
    }
}

#[async_trait]
impl ConfirmationPublisher for InMemoryConfirmationPublisher {
    async fn publish_confirmation(
        &self,
        confirmation: OrderConfirmation,
    ) -> Result<(), ServiceError> {
        let mut state = self.state.write().await;

        if state.fail_on_publish {
            return Err(ServiceError::Unavailable(
                "notification bus did not accept the confirmation".to_string(),
            ));
        }

        state.published.push(confirmation);
        Ok(())
    }
}

//! The durable publisher: lazy connect, one reconnect-and-retry.

use async_trait::async_trait;
use domain::Order;
use tokio::sync::Mutex;

use crate::error::PublishError;
use crate::transport::{BrokerChannel, BrokerTransport, Headers};

/// Name of the durable direct exchange orders are published to.
pub const EXCHANGE: &str = "robot-shop";

/// Routing key fulfillment consumers bind on.
pub const ROUTING_KEY: &str = "orders";

/// Seam between the orchestrator and the broker, so request-path tests
/// can swap in [`crate::memory::InMemoryPublisher`].
#[async_trait]
pub trait OrderPublisher: Send + Sync {
    /// Publishes one order with the given transport headers.
    async fn publish(&self, order: &Order, headers: &Headers) -> Result<(), PublishError>;
}

/// Publishes orders over a single lazily-established broker channel.
///
/// At most one connection/channel pair is held at any time, behind a
/// mutex whose lock scope covers check-connect-publish as one atomic
/// unit: concurrent requests cannot race on reconnect or observe a
/// half-initialized channel.
///
/// A dead connection is discovered lazily, either by the liveness check
/// before a publish or by the publish itself failing with a
/// connection-level error. In the latter case the publisher reconnects
/// and retries exactly once; a second failure, or any non-connection
/// failure, propagates to the caller. No backoff, no further retries.
pub struct DurablePublisher<T: BrokerTransport> {
    transport: T,
    channel: Mutex<Option<T::Channel>>,
}

impl<T: BrokerTransport> DurablePublisher<T> {
    /// Creates a publisher. No connection is attempted until the first
    /// publish.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            channel: Mutex::new(None),
        }
    }

    /// Opens a channel if the slot is empty or reports closed. No-op when
    /// already connected.
    async fn ensure_connected(
        &self,
        slot: &mut Option<T::Channel>,
    ) -> Result<(), PublishError> {
        if !slot.as_ref().is_some_and(BrokerChannel::is_open) {
            *slot = Some(self.transport.connect(EXCHANGE).await?);
            tracing::info!(exchange = EXCHANGE, "connected to broker");
        }
        Ok(())
    }

    async fn try_publish(
        slot: &Option<T::Channel>,
        payload: &[u8],
        headers: &Headers,
    ) -> Result<(), PublishError> {
        match slot {
            Some(channel) => channel.publish(EXCHANGE, ROUTING_KEY, payload, headers).await,
            None => Err(PublishError::ConnectionLost(
                "no channel after connect".to_string(),
            )),
        }
    }

    /// Publishes `order`, reconnecting once if the first attempt fails at
    /// the connection level.
    #[tracing::instrument(
        skip(self, order, headers),
        fields(exchange = EXCHANGE, routing_key = ROUTING_KEY, orderid = %order.orderid)
    )]
    pub async fn publish(&self, order: &Order, headers: &Headers) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(order)?;

        let mut slot = self.channel.lock().await;
        self.ensure_connected(&mut slot).await?;

        match Self::try_publish(&slot, &payload, headers).await {
            Ok(()) => {
                tracing::info!("message sent");
                Ok(())
            }
            Err(err) if err.is_connection_lost() => {
                tracing::warn!(error = %err, "publish failed, reconnecting to queue");
                *slot = None;
                self.ensure_connected(&mut slot).await?;
                Self::try_publish(&slot, &payload, headers).await?;
                tracing::info!("message sent after reconnect");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Gracefully releases the connection if one is open. Called by the
    /// owning process on shutdown, never on errors.
    pub async fn close(&self) -> Result<(), PublishError> {
        let mut slot = self.channel.lock().await;
        if let Some(channel) = slot.take() {
            tracing::info!("closing queue connection");
            channel.close().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<T: BrokerTransport> OrderPublisher for DurablePublisher<T> {
    async fn publish(&self, order: &Order, headers: &Headers) -> Result<(), PublishError> {
        DurablePublisher::publish(self, order, headers).await
    }
}

//! In-memory publisher for testing the request path without a broker.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::Order;

use crate::error::PublishError;
use crate::publisher::OrderPublisher;
use crate::transport::Headers;

#[derive(Debug, Default)]
struct InMemoryPublisherState {
    published: Vec<Order>,
    failures: VecDeque<PublishError>,
}

/// Records published orders and can be scripted to fail.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPublisher {
    state: Arc<RwLock<InMemoryPublisherState>>,
}

impl InMemoryPublisher {
    /// Creates a new in-memory publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an error for the next publish call.
    pub fn fail_next_with(&self, err: PublishError) {
        self.state.write().unwrap().failures.push_back(err);
    }

    /// Returns the number of orders published so far.
    pub fn published_count(&self) -> usize {
        self.state.read().unwrap().published.len()
    }

    /// Returns a copy of all published orders, in publish order.
    pub fn published_orders(&self) -> Vec<Order> {
        self.state.read().unwrap().published.clone()
    }
}

#[async_trait]
impl OrderPublisher for InMemoryPublisher {
    async fn publish(&self, order: &Order, _headers: &Headers) -> Result<(), PublishError> {
        let mut state = self.state.write().unwrap();
        if let Some(err) = state.failures.pop_front() {
            return Err(err);
        }
        state.published.push(order.clone());
        Ok(())
    }
}

//! User service client: account check and order history.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;
use domain::Cart;
use reqwest::StatusCode;
use serde::Serialize;

use crate::error::ClientError;

const SERVICE: &str = "user";

/// Trait for user service operations.
#[async_trait]
pub trait UserClient: Send + Sync {
    /// Returns true when `user_id` belongs to a registered account.
    ///
    /// Any answered status other than 200 means "anonymous", not an
    /// error; only a transport failure is fatal.
    async fn check(&self, user_id: &str) -> Result<bool, ClientError>;

    /// Appends an order to the user's history. The collaborator's
    /// status is logged but not acted on; only a transport failure is
    /// fatal.
    async fn add_order_history(
        &self,
        user_id: &str,
        orderid: OrderId,
        cart: &Cart,
    ) -> Result<(), ClientError>;
}

#[derive(Serialize)]
struct OrderHistoryEntry<'a> {
    orderid: OrderId,
    cart: &'a Cart,
}

/// User service client over HTTP.
pub struct HttpUserClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserClient {
    /// Creates a client against `base_url` (e.g. `http://user:8080`).
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl UserClient for HttpUserClient {
    async fn check(&self, user_id: &str) -> Result<bool, ClientError> {
        let response = self
            .client
            .get(format!("{}/check/{user_id}", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::transport(SERVICE, e))?;
        Ok(response.status() == StatusCode::OK)
    }

    async fn add_order_history(
        &self,
        user_id: &str,
        orderid: OrderId,
        cart: &Cart,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/order/{user_id}", self.base_url))
            .json(&OrderHistoryEntry { orderid, cart })
            .send()
            .await
            .map_err(|e| ClientError::transport(SERVICE, e))?;
        tracing::info!(status = %response.status(), "order history returned");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    known_users: HashSet<String>,
    history: Vec<(String, OrderId)>,
    fail_on_check: bool,
    fail_on_history: bool,
}

/// In-memory user service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserClient {
    state: Arc<RwLock<InMemoryUserState>>,
}

impl InMemoryUserClient {
    /// Creates an in-memory user service with no registered users.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user id as a known account.
    pub fn register(&self, user_id: impl Into<String>) {
        self.state.write().unwrap().known_users.insert(user_id.into());
    }

    /// Makes the next check calls fail at the transport level.
    pub fn set_fail_on_check(&self, fail: bool) {
        self.state.write().unwrap().fail_on_check = fail;
    }

    /// Makes the next history calls fail at the transport level.
    pub fn set_fail_on_history(&self, fail: bool) {
        self.state.write().unwrap().fail_on_history = fail;
    }

    /// Returns the number of recorded history entries.
    pub fn history_count(&self) -> usize {
        self.state.read().unwrap().history.len()
    }

    /// Returns the order ids recorded for a user.
    pub fn history_for(&self, user_id: &str) -> Vec<OrderId> {
        self.state
            .read()
            .unwrap()
            .history
            .iter()
            .filter(|(user, _)| user == user_id)
            .map(|(_, orderid)| *orderid)
            .collect()
    }
}

#[async_trait]
impl UserClient for InMemoryUserClient {
    async fn check(&self, user_id: &str) -> Result<bool, ClientError> {
        let state = self.state.read().unwrap();
        if state.fail_on_check {
            return Err(ClientError::Transport {
                service: SERVICE,
                message: "connection refused".to_string(),
            });
        }
        Ok(state.known_users.contains(user_id))
    }

    async fn add_order_history(
        &self,
        user_id: &str,
        orderid: OrderId,
        _cart: &Cart,
    ) -> Result<(), ClientError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_history {
            return Err(ClientError::Transport {
                service: SERVICE,
                message: "connection refused".to_string(),
            });
        }
        state.history.push((user_id.to_string(), orderid));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use domain::{CartItem, SHIPPING_SKU};

    use super::*;

    #[tokio::test]
    async fn unregistered_user_is_anonymous() {
        let client = InMemoryUserClient::new();
        assert!(!client.check("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn registered_user_is_known() {
        let client = InMemoryUserClient::new();
        client.register("alice");
        assert!(client.check("alice").await.unwrap());
    }

    #[tokio::test]
    async fn history_is_recorded_per_user() {
        let client = InMemoryUserClient::new();
        let cart = Cart::new(vec![CartItem::new(SHIPPING_SKU, 1)], 5.0);
        let orderid = OrderId::new();

        client
            .add_order_history("alice", orderid, &cart)
            .await
            .unwrap();

        assert_eq!(client.history_count(), 1);
        assert_eq!(client.history_for("alice"), vec![orderid]);
        assert!(client.history_for("bob").is_empty());
    }

    #[tokio::test]
    async fn check_failure_is_transport_level() {
        let client = InMemoryUserClient::new();
        client.set_fail_on_check(true);

        let err = client.check("alice").await.unwrap_err();
        assert!(err.upstream_status().is_none());
    }
}

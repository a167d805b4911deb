//! Cart service client: cart deletion after a successful payment.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::ClientError;

const SERVICE: &str = "cart";

/// Trait for cart service operations.
#[async_trait]
pub trait CartClient: Send + Sync {
    /// Deletes the user's cart. Both a transport failure and a non-200
    /// answer are fatal at this step; the non-200 status propagates.
    async fn delete_cart(&self, user_id: &str) -> Result<(), ClientError>;
}

/// Cart service client over HTTP.
pub struct HttpCartClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCartClient {
    /// Creates a client against `base_url` (e.g. `http://cart:8080`).
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CartClient for HttpCartClient {
    async fn delete_cart(&self, user_id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(format!("{}/cart/{user_id}", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::transport(SERVICE, e))?;
        let status = response.status();
        tracing::info!(%status, "cart delete returned");
        if status != StatusCode::OK {
            return Err(ClientError::Status {
                service: SERVICE,
                status: status.as_u16(),
                message: "order history update error".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemoryCartState {
    deleted: Vec<String>,
    fail_status: Option<u16>,
    fail_transport: bool,
}

/// In-memory cart service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartClient {
    state: Arc<RwLock<InMemoryCartState>>,
}

impl InMemoryCartClient {
    /// Creates a new in-memory cart service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes delete calls answer with the given non-200 status.
    pub fn set_fail_status(&self, status: Option<u16>) {
        self.state.write().unwrap().fail_status = status;
    }

    /// Makes delete calls fail at the transport level.
    pub fn set_fail_transport(&self, fail: bool) {
        self.state.write().unwrap().fail_transport = fail;
    }

    /// Returns true if the user's cart was deleted.
    pub fn was_deleted(&self, user_id: &str) -> bool {
        self.state
            .read()
            .unwrap()
            .deleted
            .iter()
            .any(|id| id == user_id)
    }
}

#[async_trait]
impl CartClient for InMemoryCartClient {
    async fn delete_cart(&self, user_id: &str) -> Result<(), ClientError> {
        let mut state = self.state.write().unwrap();
        if state.fail_transport {
            return Err(ClientError::Transport {
                service: SERVICE,
                message: "connection refused".to_string(),
            });
        }
        if let Some(status) = state.fail_status {
            return Err(ClientError::Status {
                service: SERVICE,
                status,
                message: "order history update error".to_string(),
            });
        }
        state.deleted.push(user_id.to_string());
        Ok(())
    }
}

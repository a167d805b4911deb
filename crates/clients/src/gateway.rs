//! Payment gateway client. The call is a stub: a GET against the
//! configured URL, where a 200 means the payment is accepted.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::ClientError;

const SERVICE: &str = "payment gateway";

/// Trait for the payment gateway call.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Runs the gateway check. A transport failure is fatal; a non-200
    /// answer is a payment failure carrying the gateway's status.
    async fn authorize(&self) -> Result<(), ClientError>;
}

/// Payment gateway client over HTTP.
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    url: String,
}

impl HttpPaymentGateway {
    /// Creates a client for the configured gateway URL.
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn authorize(&self) -> Result<(), ClientError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ClientError::transport(SERVICE, e))?;
        let status = response.status();
        tracing::info!(url = %self.url, %status, "payment gateway returned");
        if status != StatusCode::OK {
            return Err(ClientError::Status {
                service: SERVICE,
                status: status.as_u16(),
                message: "payment error".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    fail_status: Option<u16>,
    fail_transport: bool,
    calls: usize,
}

/// In-memory payment gateway for testing. Accepts everything by default.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes authorize calls answer with the given non-200 status.
    pub fn set_fail_status(&self, status: Option<u16>) {
        self.state.write().unwrap().fail_status = status;
    }

    /// Makes authorize calls fail at the transport level.
    pub fn set_fail_transport(&self, fail: bool) {
        self.state.write().unwrap().fail_transport = fail;
    }

    /// Returns the number of authorize calls made.
    pub fn call_count(&self) -> usize {
        self.state.read().unwrap().calls
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn authorize(&self) -> Result<(), ClientError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
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
                message: "payment error".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accepts_by_default() {
        let gateway = InMemoryPaymentGateway::new();
        gateway.authorize().await.unwrap();
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn declined_payment_propagates_gateway_status() {
        let gateway = InMemoryPaymentGateway::new();
        gateway.set_fail_status(Some(402));

        let err = gateway.authorize().await.unwrap_err();
        assert_eq!(err.upstream_status(), Some(402));
        assert_eq!(err.to_string(), "payment error");
    }
}

//! Checkout error types.

use clients::ClientError;
use domain::CartError;
use publisher::PublishError;
use thiserror::Error;

/// Errors that can occur during the pay flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Cart failed validation. Client fault.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A collaborator call failed.
    #[error(transparent)]
    Upstream(#[from] ClientError),

    /// The order could not be queued.
    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl CheckoutError {
    /// The collaborator status to propagate to the HTTP caller, when the
    /// failure carries one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream(err) => err.upstream_status(),
            _ => None,
        }
    }
}

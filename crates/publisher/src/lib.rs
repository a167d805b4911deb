//! Durable order publisher for the payment service.
//!
//! Holds at most one lazily-established connection/channel pair to the
//! broker, declares the order exchange on every (re)connect, and retries
//! a failed publish exactly once after reconnecting when the failure is
//! connection-level. Everything else propagates to the caller.

pub mod error;
pub mod memory;
pub mod publisher;
pub mod transport;

pub use error::PublishError;
pub use memory::InMemoryPublisher;
pub use publisher::{DurablePublisher, OrderPublisher, EXCHANGE, ROUTING_KEY};
pub use transport::{BrokerChannel, BrokerTransport, Headers, LapinTransport};

//! Shared types for the payment service.

pub mod types;

pub use types::OrderId;

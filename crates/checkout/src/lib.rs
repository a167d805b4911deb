//! Request orchestrator for the pay flow.

pub mod error;
pub mod service;

pub use error::CheckoutError;
pub use service::CheckoutService;

//! HTTP collaborator clients.
//!
//! The payment service talks to three opaque collaborators: the user
//! service (account check, order history), the cart service (cart
//! delete) and the payment gateway (a stub call). Each sits behind an
//! async trait with a reqwest-backed implementation and an in-memory
//! double for tests.

pub mod cart;
pub mod error;
pub mod gateway;
pub mod user;

pub use cart::{CartClient, HttpCartClient, InMemoryCartClient};
pub use error::ClientError;
pub use gateway::{HttpPaymentGateway, InMemoryPaymentGateway, PaymentGateway};
pub use user::{HttpUserClient, InMemoryUserClient, UserClient};

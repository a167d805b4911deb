//! The order record handed to the broker.

use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// An accepted order, created once per successful payment.
///
/// Immutable after creation; ownership passes to the broker once
/// published, there is no local persistence. Field names match the
/// message-body contract consumed downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub orderid: OrderId,
    pub user: String,
    pub cart: Cart,
}

impl Order {
    /// Creates a new order with a fresh random id.
    pub fn new(user: impl Into<String>, cart: Cart) -> Self {
        Self {
            orderid: OrderId::new(),
            user: user.into(),
            cart,
        }
    }
}

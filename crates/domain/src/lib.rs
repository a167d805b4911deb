//! Domain layer: carts, orders, and cart validation rules.

pub mod cart;
pub mod error;
pub mod order;

pub use cart::{Cart, CartItem, SHIPPING_SKU};
pub use error::CartError;
pub use order::Order;

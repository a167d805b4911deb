//! Cart model and validation rules.

use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// Reserved SKU marking the shipping charge line of a cart.
///
/// A `SHIP` item is not a purchasable unit: it is excluded from
/// unit-count aggregation but must be present for a cart to be valid.
pub const SHIPPING_SKU: &str = "SHIP";

/// A single line item in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub sku: String,
    #[serde(default)]
    pub qty: u32,
}

impl CartItem {
    /// Creates a new cart item.
    pub fn new(sku: impl Into<String>, qty: u32) -> Self {
        Self {
            sku: sku.into(),
            qty,
        }
    }

    /// Returns true if this item is the shipping charge line.
    pub fn is_shipping(&self) -> bool {
        self.sku == SHIPPING_SKU
    }
}

/// A shopping cart as submitted to the pay endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total: f64,
}

impl Cart {
    /// Creates a cart from items and a total amount.
    pub fn new(items: Vec<CartItem>, total: f64) -> Self {
        Self { items, total }
    }

    /// Returns true if any item carries the shipping sentinel SKU.
    pub fn has_shipping(&self) -> bool {
        self.items.iter().any(CartItem::is_shipping)
    }

    /// Checks that the cart is payable: a non-zero total and a shipping line.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.total == 0.0 {
            return Err(CartError::ZeroTotal);
        }
        if !self.has_shipping() {
            return Err(CartError::MissingShipping);
        }
        Ok(())
    }

    /// Sums the quantities of all non-shipping items.
    pub fn unit_count(&self) -> u64 {
        self.items
            .iter()
            .filter(|item| !item.is_shipping())
            .map(|item| u64::from(item.qty))
            .sum()
    }
}

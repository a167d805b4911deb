//! Domain error types.

use thiserror::Error;

/// Errors raised by cart validation. Always a client fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The cart total is zero.
    #[error("cart not valid: total is zero")]
    ZeroTotal,

    /// The cart carries no shipping line item.
    #[error("cart not valid: no shipping item")]
    MissingShipping,
}

//! Error taxonomy for the order book boundary
//!
//! The engine itself never fails; these errors belong to the adapters
//! that validate input before calling it.

use crate::order::OrderId;
use thiserror::Error;

/// Price text that could not be converted to ticks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    #[error("malformed price '{0}'")]
    Malformed(String),

    #[error("price '{0}' out of representable range")]
    OutOfRange(String),
}

/// Order errors at the engine boundary. The engine itself signals an
/// unknown cancel id as a plain negative result; adapters that need a
/// typed reason for the reject wrap it as [`OrderError::UnknownOrder`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("quantity must be > 0")]
    InvalidQuantity,

    #[error("LIMIT order requires a positive price")]
    InvalidLimitPrice,

    #[error("order not found: {0}")]
    UnknownOrder(OrderId),
}

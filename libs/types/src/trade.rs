//! Trade execution record
//!
//! Trades carry value copies of the matched fields only; no order
//! reference ever escapes the engine.

use crate::numeric::Price;
use crate::order::{OrderId, Quantity, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An executed match between a buy order and a sell order.
///
/// `price` is always the resting order's price (price improvement goes
/// to the aggressor). `timestamp` is drawn from the same monotonic
/// sequence as order timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub buyer_order_id: OrderId,
    pub seller_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
    pub timestamp: Timestamp,
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TRADE {} {} {} {}",
            self.buyer_order_id, self.seller_order_id, self.price, self.quantity
        )
    }
}

//! Order lifecycle types
//!
//! The order record is a compact value type; the matching engine owns
//! every instance through its pool and the book refers to them by
//! handle only.

use crate::numeric::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, monotonically assigned order identifier (first id is 1).
pub type OrderId = u64;

/// Order size in whole units.
pub type Quantity = u32;

/// Monotonic event sequence number, shared by orders and trades.
pub type Timestamp = u64;

/// Order side (bid or ask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Wire code for the binary protocol.
    pub fn to_wire(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Decode a wire code; `None` for anything but 0/1.
    pub fn from_wire(code: u8) -> Option<Self> {
        match code {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type: priced and restable, or immediate-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Rests in the book at its limit price when not fully matched
    Limit,
    /// Matches against whatever is available; the remainder is discarded
    Market,
}

impl OrderType {
    /// Wire code for the binary protocol.
    pub fn to_wire(self) -> u8 {
        match self {
            OrderType::Limit => 0,
            OrderType::Market => 1,
        }
    }

    /// Decode a wire code; `None` for anything but 0/1.
    pub fn from_wire(code: u8) -> Option<Self> {
        match code {
            0 => Some(OrderType::Limit),
            1 => Some(OrderType::Market),
            _ => None,
        }
    }
}

/// Compact order record.
///
/// `price` is zero for market orders and never read for them.
/// Invariant: `filled_qty <= quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub timestamp: Timestamp,
    pub price: Price,
    pub quantity: Quantity,
    pub filled_qty: Quantity,
    pub side: Side,
    pub kind: OrderType,
}

impl Order {
    /// Unfilled quantity.
    pub fn remaining(&self) -> Quantity {
        self.quantity - self.filled_qty
    }

    /// Check if the order is completely filled.
    pub fn is_filled(&self) -> bool {
        self.filled_qty >= self.quantity
    }
}

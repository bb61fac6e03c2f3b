//! Core types for the order book engine
//!
//! Shared value types used by the engine and its adapters: fixed-point
//! prices, order and trade records, and the boundary error taxonomy.
//!
//! # Modules
//! - `numeric`: fixed-point `Price` (integer ticks, scale 100)
//! - `order`: `Side`, `OrderType`, id/quantity/timestamp aliases, `Order`
//! - `trade`: `Trade` execution record
//! - `errors`: adapter-boundary errors

pub mod errors;
pub mod numeric;
pub mod order;
pub mod trade;

pub use errors::{OrderError, PriceParseError};
pub use numeric::{Price, PRICE_SCALE};
pub use order::{Order, OrderId, OrderType, Quantity, Side, Timestamp};
pub use trade::Trade;

//! Order book infrastructure
//!
//! Two price-sorted side books plus an id lookup for O(1) cancels.
//! The side books are crate-visible fields: the matching loop drives
//! them directly through the "pop the best level's head" primitives
//! instead of holding iterators across mutations.

pub mod ask_book;
pub mod bid_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::PriceLevel;

use crate::pool::{OrderHandle, OrderPool};
use std::collections::HashMap;
use std::io::{self, Write};
use types::{Order, OrderId, Price, Side};

/// Two-sided limit order book.
///
/// The lookup's domain is exactly the set of resting orders: a handle is
/// registered when an order rests and removed when it fills or cancels.
#[derive(Debug, Default)]
pub struct OrderBook {
    pub(crate) bids: BidBook,
    pub(crate) asks: AskBook,
    lookup: HashMap<OrderId, OrderHandle>,
}

impl OrderBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rest an order in the book and register it for cancel lookup.
    pub fn add_order(&mut self, handle: OrderHandle, order: &Order) {
        self.lookup.insert(order.id, handle);
        match order.side {
            Side::Buy => self.bids.add(order.price, handle, order.remaining()),
            Side::Sell => self.asks.add(order.price, handle, order.remaining()),
        }
    }

    /// Remove an order by id. Returns its handle for the caller to free,
    /// or `None` if the id is not resting (unknown, filled, or already
    /// cancelled).
    pub fn cancel_order(&mut self, id: OrderId, pool: &OrderPool) -> Option<OrderHandle> {
        let handle = self.lookup.remove(&id)?;
        let order = pool.get(handle);
        let removed = match order.side {
            Side::Buy => self.bids.remove(order.price, handle, order.remaining()),
            Side::Sell => self.asks.remove(order.price, handle, order.remaining()),
        };
        debug_assert!(removed, "lookup entry without a resting order");
        Some(handle)
    }

    /// Highest resting buy price.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Lowest resting sell price.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Resting volume at an exact price on one side.
    pub fn get_volume_at_price(&self, side: Side, price: Price) -> u64 {
        match side {
            Side::Buy => self.bids.volume_at(price),
            Side::Sell => self.asks.volume_at(price),
        }
    }

    /// Whether an order id is currently resting.
    pub fn has_order(&self, id: OrderId) -> bool {
        self.lookup.contains_key(&id)
    }

    /// Number of resting orders across both sides.
    pub fn total_order_count(&self) -> usize {
        self.lookup.len()
    }

    /// Number of bid price levels.
    pub fn bid_level_count(&self) -> usize {
        self.bids.level_count()
    }

    /// Number of ask price levels.
    pub fn ask_level_count(&self) -> usize {
        self.asks.level_count()
    }

    /// Erase an id from the lookup only. The matching loop uses this
    /// when it has already removed the order from the level it is
    /// walking and handles empty-level cleanup itself.
    pub fn remove_from_lookup(&mut self, id: OrderId) {
        self.lookup.remove(&id);
    }

    /// Bid levels, best (highest) first.
    pub fn bid_levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.bids.levels()
    }

    /// Ask levels, best (lowest) first.
    pub fn ask_levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.asks.levels()
    }

    /// Render the book in its stable human-readable format: asks from
    /// highest to lowest, a spread marker, then bids from highest to
    /// lowest, one `price | total_qty (n orders)` line per level.
    pub fn write_snapshot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "=== ORDER BOOK ===")?;
        writeln!(out, "--- ASKS (lowest first) ---")?;

        let ask_lines: Vec<String> = self
            .asks
            .levels()
            .map(|(price, level)| format_level(price, level))
            .collect();
        for line in ask_lines.iter().rev() {
            writeln!(out, "{}", line)?;
        }

        writeln!(out, "--- SPREAD ---")?;

        writeln!(out, "--- BIDS (highest first) ---")?;
        for (price, level) in self.bids.levels() {
            writeln!(out, "{}", format_level(price, level))?;
        }
        writeln!(out, "==================")?;
        Ok(())
    }
}

fn format_level(price: Price, level: &PriceLevel) -> String {
    format!(
        "  {:>10}  |  {:>8}  ({} orders)",
        price.to_string(),
        level.total_quantity(),
        level.order_count()
    )
}

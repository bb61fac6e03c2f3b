//! Bid (buy-side) order book
//!
//! Buy levels sorted by price descending: the highest bid is the best.
//! `BTreeMap` iterates ascending, so best-price access reads the back of
//! the map and ordered iteration walks it in reverse.

use crate::pool::OrderHandle;
use std::collections::BTreeMap;
use types::{Price, Quantity};

use super::price_level::PriceLevel;

/// Bid side: best price = highest key.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create an empty bid book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resting order at `price`, creating the level if absent.
    pub fn add(&mut self, price: Price, handle: OrderHandle, remaining: Quantity) {
        self.levels.entry(price).or_default().add(handle, remaining);
    }

    /// Remove a specific order (cancel path). Drops the level if it empties.
    pub fn remove(&mut self, price: Price, handle: OrderHandle, remaining: Quantity) -> bool {
        if let Some(level) = self.levels.get_mut(&price) {
            if level.remove(handle, remaining) {
                if level.is_empty() {
                    self.levels.remove(&price);
                }
                return true;
            }
        }
        false
    }

    /// Best (highest) bid price.
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Head order of the level at `price`, if the level exists.
    pub fn front(&self, price: Price) -> Option<OrderHandle> {
        self.levels.get(&price).and_then(PriceLevel::front)
    }

    /// Pop the head order of the level at `price`, subtracting `removed`
    /// from its cached total. Drops the level if it empties.
    pub fn pop_front(&mut self, price: Price, removed: Quantity) {
        if let Some(level) = self.levels.get_mut(&price) {
            level.pop_front(removed);
            if level.is_empty() {
                self.levels.remove(&price);
            }
        }
    }

    /// Shrink the cached total at `price` after a partial fill of the head.
    pub fn reduce_front(&mut self, price: Price, filled: Quantity) {
        if let Some(level) = self.levels.get_mut(&price) {
            level.reduce_quantity(filled);
        }
    }

    /// Resting volume at `price`, 0 if the level does not exist.
    pub fn volume_at(&self, price: Price) -> u64 {
        self.levels.get(&price).map_or(0, PriceLevel::total_quantity)
    }

    /// Number of price levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Whether the side holds no orders.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels in book order (highest price first).
    pub fn levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().rev().map(|(price, level)| (*price, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::OrderPool;
    use types::{Order, OrderType, Side};

    fn buy(pool: &mut OrderPool, id: u64, ticks: i64, qty: Quantity) -> OrderHandle {
        pool.allocate(Order {
            id,
            timestamp: id,
            price: Price::from_ticks(ticks),
            quantity: qty,
            filled_qty: 0,
            side: Side::Buy,
            kind: OrderType::Limit,
        })
    }

    #[test]
    fn test_best_price_is_highest() {
        let mut pool = OrderPool::with_block_size(16);
        let mut book = BidBook::new();

        book.add(Price::from_ticks(9900), buy(&mut pool, 1, 9900, 100), 100);
        book.add(Price::from_ticks(10000), buy(&mut pool, 2, 10000, 50), 50);
        book.add(Price::from_ticks(9800), buy(&mut pool, 3, 9800, 75), 75);

        assert_eq!(book.best_price(), Some(Price::from_ticks(10000)));
        assert_eq!(book.level_count(), 3);
    }

    #[test]
    fn test_remove_drops_empty_level() {
        let mut pool = OrderPool::with_block_size(16);
        let mut book = BidBook::new();
        let price = Price::from_ticks(10000);
        let handle = buy(&mut pool, 1, 10000, 100);

        book.add(price, handle, 100);
        assert!(book.remove(price, handle, 100));
        assert!(book.is_empty());
        assert_eq!(book.best_price(), None);
    }

    #[test]
    fn test_fifo_at_same_price() {
        let mut pool = OrderPool::with_block_size(16);
        let mut book = BidBook::new();
        let price = Price::from_ticks(10000);
        let first = buy(&mut pool, 1, 10000, 100);
        let second = buy(&mut pool, 2, 10000, 100);

        book.add(price, first, 100);
        book.add(price, second, 100);

        assert_eq!(book.level_count(), 1);
        assert_eq!(book.front(price), Some(first));
        assert_eq!(book.volume_at(price), 200);
    }

    #[test]
    fn test_levels_iterate_highest_first() {
        let mut pool = OrderPool::with_block_size(16);
        let mut book = BidBook::new();

        book.add(Price::from_ticks(9800), buy(&mut pool, 1, 9800, 10), 10);
        book.add(Price::from_ticks(10000), buy(&mut pool, 2, 10000, 10), 10);

        let prices: Vec<_> = book.levels().map(|(price, _)| price.ticks()).collect();
        assert_eq!(prices, vec![10000, 9800]);
    }
}

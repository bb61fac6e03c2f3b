//! Ask (sell-side) order book
//!
//! Sell levels sorted by price ascending, so the lowest ask is first.
//! `BTreeMap` gives O(log P) insert/lookup with deterministic iteration
//! and cheap best-price access at the map's front.

use crate::pool::OrderHandle;
use std::collections::BTreeMap;
use types::{Price, Quantity};

use super::price_level::PriceLevel;

/// Ask side: best price = lowest key.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create an empty ask book.
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

    /// Best (lowest) ask price.
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
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

    /// Levels in book order (lowest price first).
    pub fn levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().map(|(price, level)| (*price, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::OrderPool;
    use types::{Order, OrderType, Side};

    fn sell(pool: &mut OrderPool, id: u64, ticks: i64, qty: Quantity) -> OrderHandle {
        pool.allocate(Order {
            id,
            timestamp: id,
            price: Price::from_ticks(ticks),
            quantity: qty,
            filled_qty: 0,
            side: Side::Sell,
            kind: OrderType::Limit,
        })
    }

    #[test]
    fn test_best_price_is_lowest() {
        let mut pool = OrderPool::with_block_size(16);
        let mut book = AskBook::new();

        book.add(Price::from_ticks(10100), sell(&mut pool, 1, 10100, 100), 100);
        book.add(Price::from_ticks(10000), sell(&mut pool, 2, 10000, 50), 50);
        book.add(Price::from_ticks(10200), sell(&mut pool, 3, 10200, 75), 75);

        assert_eq!(book.best_price(), Some(Price::from_ticks(10000)));
        assert_eq!(book.level_count(), 3);
    }

    #[test]
    fn test_remove_drops_empty_level() {
        let mut pool = OrderPool::with_block_size(16);
        let mut book = AskBook::new();
        let price = Price::from_ticks(10000);
        let handle = sell(&mut pool, 1, 10000, 100);

        book.add(price, handle, 100);
        assert!(book.remove(price, handle, 100));
        assert!(book.is_empty());
        assert_eq!(book.best_price(), None);
    }

    #[test]
    fn test_pop_front_drops_empty_level() {
        let mut pool = OrderPool::with_block_size(16);
        let mut book = AskBook::new();
        let price = Price::from_ticks(10000);

        book.add(price, sell(&mut pool, 1, 10000, 60), 60);
        book.add(price, sell(&mut pool, 2, 10000, 40), 40);
        assert_eq!(book.volume_at(price), 100);

        book.pop_front(price, 60);
        assert_eq!(book.volume_at(price), 40);
        assert_eq!(book.level_count(), 1);

        book.pop_front(price, 40);
        assert_eq!(book.level_count(), 0);
    }

    #[test]
    fn test_reduce_front_keeps_head() {
        let mut pool = OrderPool::with_block_size(16);
        let mut book = AskBook::new();
        let price = Price::from_ticks(10000);
        let handle = sell(&mut pool, 1, 10000, 100);

        book.add(price, handle, 100);
        book.reduce_front(price, 30);

        assert_eq!(book.volume_at(price), 70);
        assert_eq!(book.front(price), Some(handle));
    }

    #[test]
    fn test_levels_iterate_lowest_first() {
        let mut pool = OrderPool::with_block_size(16);
        let mut book = AskBook::new();

        book.add(Price::from_ticks(10200), sell(&mut pool, 1, 10200, 10), 10);
        book.add(Price::from_ticks(10000), sell(&mut pool, 2, 10000, 10), 10);

        let prices: Vec<_> = book.levels().map(|(price, _)| price.ticks()).collect();
        assert_eq!(prices, vec![10000, 10200]);
    }
}

//! Price level with FIFO queue
//!
//! All orders resting at a single price point, in arrival order: the
//! head is the oldest order and the next to match. The level caches the
//! sum of its orders' remaining quantities; because the queue stores
//! pool handles rather than order records, every mutation takes the
//! quantity delta from the caller.

use crate::pool::OrderHandle;
use std::collections::VecDeque;
use types::Quantity;

/// FIFO queue of resting orders at one price.
///
/// The cached total is `u64` so a level full of `u32` orders cannot
/// overflow the aggregate.
#[derive(Debug, Clone, Default)]
pub struct PriceLevel {
    orders: VecDeque<OrderHandle>,
    total_quantity: u64,
}

impl PriceLevel {
    /// Create an empty level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an order at the tail (time priority).
    pub fn add(&mut self, handle: OrderHandle, remaining: Quantity) {
        self.orders.push_back(handle);
        self.total_quantity += u64::from(remaining);
    }

    /// Head of the queue: the oldest resting order.
    pub fn front(&self) -> Option<OrderHandle> {
        self.orders.front().copied()
    }

    /// Remove the head. `removed` is the quantity leaving the level:
    /// the head's pre-fill remainder when it was just consumed, or its
    /// current remainder when evicted outright.
    pub fn pop_front(&mut self, removed: Quantity) -> Option<OrderHandle> {
        let handle = self.orders.pop_front()?;
        self.total_quantity -= u64::from(removed);
        Some(handle)
    }

    /// Remove a specific order (cancellation). O(n) over the level, but
    /// cancels are rare relative to matches.
    pub fn remove(&mut self, handle: OrderHandle, remaining: Quantity) -> bool {
        if let Some(position) = self.orders.iter().position(|h| *h == handle) {
            self.orders.remove(position);
            self.total_quantity -= u64::from(remaining);
            true
        } else {
            false
        }
    }

    /// Shrink the cached total after a partial fill of the head order.
    pub fn reduce_quantity(&mut self, filled: Quantity) {
        self.total_quantity -= u64::from(filled);
    }

    /// Whether the level holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of resting orders at this price.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Cached sum of remaining quantities.
    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    /// Orders in FIFO order (head first).
    pub fn handles(&self) -> impl Iterator<Item = OrderHandle> + '_ {
        self.orders.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::OrderPool;
    use types::{Order, OrderType, Price, Side};

    fn handles(pool: &mut OrderPool, count: u64) -> Vec<OrderHandle> {
        (1..=count)
            .map(|id| {
                pool.allocate(Order {
                    id,
                    timestamp: id,
                    price: Price::from_ticks(10000),
                    quantity: 100,
                    filled_qty: 0,
                    side: Side::Sell,
                    kind: OrderType::Limit,
                })
            })
            .collect()
    }

    #[test]
    fn test_add_accumulates_total() {
        let mut pool = OrderPool::with_block_size(16);
        let hs = handles(&mut pool, 3);
        let mut level = PriceLevel::new();

        for &h in &hs {
            level.add(h, 100);
        }

        assert_eq!(level.order_count(), 3);
        assert_eq!(level.total_quantity(), 300);
        assert!(!level.is_empty());
    }

    #[test]
    fn test_fifo_order() {
        let mut pool = OrderPool::with_block_size(16);
        let hs = handles(&mut pool, 2);
        let mut level = PriceLevel::new();

        level.add(hs[0], 100);
        level.add(hs[1], 100);

        assert_eq!(level.front(), Some(hs[0]));
        assert_eq!(level.pop_front(100), Some(hs[0]));
        assert_eq!(level.front(), Some(hs[1]));
        assert_eq!(level.total_quantity(), 100);
    }

    #[test]
    fn test_remove_specific_order() {
        let mut pool = OrderPool::with_block_size(16);
        let hs = handles(&mut pool, 3);
        let mut level = PriceLevel::new();

        for &h in &hs {
            level.add(h, 100);
        }

        assert!(level.remove(hs[1], 100));
        assert_eq!(level.order_count(), 2);
        assert_eq!(level.total_quantity(), 200);
        // Head is untouched
        assert_eq!(level.front(), Some(hs[0]));

        // Removing again finds nothing
        assert!(!level.remove(hs[1], 100));
    }

    #[test]
    fn test_reduce_quantity_after_partial_fill() {
        let mut pool = OrderPool::with_block_size(16);
        let hs = handles(&mut pool, 1);
        let mut level = PriceLevel::new();

        level.add(hs[0], 100);
        level.reduce_quantity(40);

        assert_eq!(level.total_quantity(), 60);
        assert_eq!(level.order_count(), 1);
    }

    #[test]
    fn test_pop_front_empty() {
        let mut level = PriceLevel::new();
        assert_eq!(level.pop_front(0), None);
        assert!(level.is_empty());
    }
}

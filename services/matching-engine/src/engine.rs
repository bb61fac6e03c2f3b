//! Matching engine core
//!
//! Owns the book, the order pool, and the id/timestamp counters.
//! Incoming orders match against the opposite side under price-time
//! priority; the unfilled remainder of a limit order rests, the
//! remainder of a market order is discarded. Trades always execute at
//! the resting order's price.
//!
//! Orders and trades share one monotonic timestamp sequence: the counter
//! advances once per accepted order and once per executed trade.

use crate::book::OrderBook;
use crate::pool::{OrderHandle, OrderPool};
use types::{Order, OrderId, OrderType, Price, Quantity, Side, Trade};

/// Single-symbol, single-threaded matching engine.
///
/// Every call runs to completion; there is no internal locking or
/// suspension. Id and timestamp counters both start at 1.
pub struct MatchingEngine {
    book: OrderBook,
    pool: OrderPool,
    next_order_id: OrderId,
    next_timestamp: u64,
    trade_count: u64,
    orders_processed: u64,
}

impl MatchingEngine {
    /// Create an engine with an empty book and a warm pool.
    pub fn new() -> Self {
        Self {
            book: OrderBook::new(),
            pool: OrderPool::new(),
            next_order_id: 1,
            next_timestamp: 1,
            trade_count: 0,
            orders_processed: 0,
        }
    }

    /// Process an incoming order: match against the opposite side, rest
    /// the remainder (limit) or discard it (market). Returns the trades
    /// in execution order.
    ///
    /// Callers validate inputs: `quantity > 0`, and a positive price for
    /// limit orders.
    pub fn process_order(
        &mut self,
        side: Side,
        kind: OrderType,
        price: Price,
        quantity: Quantity,
    ) -> Vec<Trade> {
        debug_assert!(quantity > 0, "quantity must be positive");
        debug_assert!(
            kind == OrderType::Market || price.is_positive(),
            "limit orders require a positive price"
        );

        self.orders_processed += 1;

        let order = Order {
            id: self.next_order_id,
            timestamp: self.next_timestamp,
            price,
            quantity,
            filled_qty: 0,
            side,
            kind,
        };
        self.next_order_id += 1;
        self.next_timestamp += 1;

        let handle = self.pool.allocate(order);
        let mut trades = Vec::new();

        match side {
            Side::Buy => self.match_buy(handle, &mut trades),
            Side::Sell => self.match_sell(handle, &mut trades),
        }

        let order = *self.pool.get(handle);
        if !order.is_filled() && order.kind == OrderType::Limit {
            self.book.add_order(handle, &order);
        } else {
            // Fully filled, or an unfilled market remainder: slot goes
            // back to the pool either way.
            self.pool.free(handle);
        }

        trades
    }

    /// Cancel a resting order by id. Returns false for unknown ids,
    /// including orders that have already filled or been cancelled.
    pub fn cancel_order(&mut self, id: OrderId) -> bool {
        match self.book.cancel_order(id, &self.pool) {
            Some(handle) => {
                self.pool.free(handle);
                true
            }
            None => false,
        }
    }

    /// The book, for queries and snapshot rendering.
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// The pool, for capacity inspection in benchmarks.
    pub fn pool(&self) -> &OrderPool {
        &self.pool
    }

    /// Read a live order by handle (testing and diagnostics).
    pub fn order(&self, handle: OrderHandle) -> &Order {
        self.pool.get(handle)
    }

    /// Id the next accepted order will receive.
    pub fn next_order_id(&self) -> OrderId {
        self.next_order_id
    }

    /// Trades executed since creation.
    pub fn trade_count(&self) -> u64 {
        self.trade_count
    }

    /// Orders accepted since creation.
    pub fn orders_processed(&self) -> u64 {
        self.orders_processed
    }

    /// Match an incoming buy against the ask side, best (lowest) price
    /// first, FIFO within each level.
    fn match_buy(&mut self, incoming: OrderHandle, trades: &mut Vec<Trade>) {
        loop {
            let (kind, limit_price, mut incoming_remaining) = {
                let order = self.pool.get(incoming);
                (order.kind, order.price, order.remaining())
            };
            if incoming_remaining == 0 {
                break;
            }
            let Some(best) = self.book.asks.best_price() else {
                break;
            };
            if kind == OrderType::Limit && best > limit_price {
                break;
            }

            while incoming_remaining > 0 {
                let Some(resting) = self.book.asks.front(best) else {
                    // Level drained and dropped; rescan for the new best.
                    break;
                };
                let resting_remaining = self.pool.get(resting).remaining();
                let fill = incoming_remaining.min(resting_remaining);

                trades.push(self.execute_trade(incoming, resting, fill, best));
                incoming_remaining -= fill;

                if fill == resting_remaining {
                    let resting_id = self.pool.get(resting).id;
                    self.book.asks.pop_front(best, fill);
                    self.book.remove_from_lookup(resting_id);
                    self.pool.free(resting);
                } else {
                    self.book.asks.reduce_front(best, fill);
                }
            }
        }
    }

    /// Match an incoming sell against the bid side, best (highest) price
    /// first, FIFO within each level.
    fn match_sell(&mut self, incoming: OrderHandle, trades: &mut Vec<Trade>) {
        loop {
            let (kind, limit_price, mut incoming_remaining) = {
                let order = self.pool.get(incoming);
                (order.kind, order.price, order.remaining())
            };
            if incoming_remaining == 0 {
                break;
            }
            let Some(best) = self.book.bids.best_price() else {
                break;
            };
            if kind == OrderType::Limit && best < limit_price {
                break;
            }

            while incoming_remaining > 0 {
                let Some(resting) = self.book.bids.front(best) else {
                    break;
                };
                let resting_remaining = self.pool.get(resting).remaining();
                let fill = incoming_remaining.min(resting_remaining);

                trades.push(self.execute_trade(resting, incoming, fill, best));
                incoming_remaining -= fill;

                if fill == resting_remaining {
                    let resting_id = self.pool.get(resting).id;
                    self.book.bids.pop_front(best, fill);
                    self.book.remove_from_lookup(resting_id);
                    self.pool.free(resting);
                } else {
                    self.book.bids.reduce_front(best, fill);
                }
            }
        }
    }

    /// Record a fill on both orders and stamp the trade from the shared
    /// timestamp sequence. `price` is the resting order's price.
    fn execute_trade(
        &mut self,
        buyer: OrderHandle,
        seller: OrderHandle,
        quantity: Quantity,
        price: Price,
    ) -> Trade {
        self.pool.get_mut(buyer).filled_qty += quantity;
        self.pool.get_mut(seller).filled_qty += quantity;
        self.trade_count += 1;

        let timestamp = self.next_timestamp;
        self.next_timestamp += 1;

        Trade {
            buyer_order_id: self.pool.get(buyer).id,
            seller_order_id: self.pool.get(seller).id,
            price,
            quantity,
            timestamp,
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

//! Random order generator
//!
//! Produces a deterministic, seeded stream of limit/market/cancel
//! operations clustered around a center price. Cancel targets are drawn
//! uniformly from ids already handed out, so most cancels hit live
//! orders early in a run and dead ones later, as in real flow.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use types::{OrderId, OrderType, Price, Quantity, Side};

/// One generated operation for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedOp {
    Order {
        side: Side,
        kind: OrderType,
        price: Price,
        quantity: Quantity,
    },
    Cancel {
        id: OrderId,
    },
}

/// Workload shape knobs.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Percentage of operations that are cancels (0–100).
    pub cancel_pct: u32,
    /// Percentage of new orders that are market orders (0–100).
    pub market_pct: u32,
    /// Center of the limit price distribution, in ticks.
    pub center_price: Price,
    /// Limit prices spread uniformly within ± this many ticks.
    pub spread_ticks: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cancel_pct: 5,
            market_pct: 10,
            center_price: Price::from_ticks(10000),
            spread_ticks: 100,
        }
    }
}

/// Deterministic order stream generator.
pub struct OrderGenerator {
    rng: ChaCha8Rng,
}

impl OrderGenerator {
    /// Create a generator from a seed; equal seeds yield equal streams.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate `count` operations with the given workload shape.
    pub fn generate(&mut self, count: usize, config: &GeneratorConfig) -> Vec<GeneratedOp> {
        let mut ops = Vec::with_capacity(count);
        let mut max_id: OrderId = 0;

        for _ in 0..count {
            if max_id > 0 && self.rng.gen_range(0..100) < config.cancel_pct {
                let id = self.rng.gen_range(1..=max_id);
                ops.push(GeneratedOp::Cancel { id });
                continue;
            }

            let side = if self.rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let quantity: Quantity = self.rng.gen_range(1..=1000);

            let (kind, price) = if self.rng.gen_range(0..100) < config.market_pct {
                (OrderType::Market, Price::ZERO)
            } else {
                let offset = self.rng.gen_range(-config.spread_ticks..=config.spread_ticks);
                (
                    OrderType::Limit,
                    Price::from_ticks(config.center_price.ticks() + offset),
                )
            };

            ops.push(GeneratedOp::Order {
                side,
                kind,
                price,
                quantity,
            });
            max_id += 1;
        }

        ops
    }
}

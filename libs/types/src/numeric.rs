//! Fixed-point price type
//!
//! Prices are signed 64-bit tick counts with a fixed scale of 100
//! (two decimal places). All comparisons and arithmetic stay in integer
//! space; no floating-point value ever crosses the engine boundary.
//! Decimal text is parsed through `rust_decimal` with HALF_UP rounding.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PriceParseError;

/// Ticks per whole price unit (two decimal places).
pub const PRICE_SCALE: i64 = 100;

/// Fixed-point price in ticks. E.g. `150.25` with scale 100 → 15025 ticks.
///
/// Market orders carry a price of zero; the engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    /// Zero price, used as the placeholder for market orders.
    pub const ZERO: Price = Price(0);

    /// Create a price from a raw tick count.
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Raw tick count.
    pub const fn ticks(&self) -> i64 {
        self.0
    }

    /// Check whether the price is positive (valid for a limit order).
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parse a decimal string (e.g. `"150.25"`) into ticks.
    ///
    /// Scales by [`PRICE_SCALE`] and rounds half-up, so `"1.005"` → 101 ticks.
    pub fn from_decimal_str(s: &str) -> Result<Self, PriceParseError> {
        let decimal =
            Decimal::from_str(s).map_err(|_| PriceParseError::Malformed(s.to_string()))?;
        let scaled = (decimal * Decimal::from(PRICE_SCALE))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        scaled
            .to_i64()
            .map(Self)
            .ok_or_else(|| PriceParseError::OutOfRange(s.to_string()))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / PRICE_SCALE;
        let frac = (self.0 % PRICE_SCALE).abs();
        write!(f, "{}.{:02}", whole, frac)
    }
}

// Serialized as the decimal string to prevent JSON number precision loss.
impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_decimal_str(&s).map_err(serde::de::Error::custom)
    }
}

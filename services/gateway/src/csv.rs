//! Text command adapter
//!
//! Parses CSV-like command lines and drives the engine, writing results
//! as plain text. The grammar:
//!
//! ```text
//! LIMIT,<BUY|SELL>,<price>,<qty>
//! MARKET,<BUY|SELL>,,<qty>
//! CANCEL,,,,<order_id>
//! PRINT
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Commands and
//! sides are case-insensitive; `B`/`S` are accepted as sides. The
//! CANCEL id must be the fifth comma-separated field; existing input
//! files depend on that position.

use matching_engine::MatchingEngine;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use types::{OrderError, OrderId, OrderType, Price, Quantity, Side, Trade};

/// A parse or validation failure for one input line. The display text
/// is the payload of the `ERROR:` output line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("expected TYPE,SIDE,PRICE,QTY")]
    MissingFields,

    #[error("unknown side '{0}'")]
    UnknownSide(String),

    #[error("LIMIT order requires a price")]
    MissingPrice,

    #[error("invalid price '{0}'")]
    InvalidPrice(String),

    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),

    #[error(transparent)]
    Invalid(#[from] OrderError),

    #[error("CANCEL requires order_id as 5th field")]
    MissingCancelId,

    #[error("invalid order id '{0}'")]
    InvalidOrderId(String),
}

/// One validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Order {
        side: Side,
        kind: OrderType,
        price: Price,
        quantity: Quantity,
    },
    Cancel {
        id: OrderId,
    },
    Print,
}

/// Parse a trimmed, non-empty command line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split(',').collect();
    let cmd = tokens[0].trim().to_ascii_uppercase();

    if cmd == "PRINT" {
        return Ok(Command::Print);
    }

    if cmd == "CANCEL" {
        if tokens.len() < 5 {
            return Err(CommandError::MissingCancelId);
        }
        let raw = tokens[4].trim();
        let id = raw
            .parse::<OrderId>()
            .map_err(|_| CommandError::InvalidOrderId(raw.to_string()))?;
        return Ok(Command::Cancel { id });
    }

    let kind = match cmd.as_str() {
        "LIMIT" => OrderType::Limit,
        "MARKET" => OrderType::Market,
        _ => return Err(CommandError::UnknownCommand(cmd)),
    };

    if tokens.len() < 4 {
        return Err(CommandError::MissingFields);
    }

    let side_token = tokens[1].trim().to_ascii_uppercase();
    let side = match side_token.as_str() {
        "BUY" | "B" => Side::Buy,
        "SELL" | "S" => Side::Sell,
        _ => return Err(CommandError::UnknownSide(side_token)),
    };

    let price = match kind {
        OrderType::Limit => {
            let raw = tokens[2].trim();
            if raw.is_empty() {
                return Err(CommandError::MissingPrice);
            }
            let price = Price::from_decimal_str(raw)
                .map_err(|_| CommandError::InvalidPrice(raw.to_string()))?;
            if !price.is_positive() {
                return Err(OrderError::InvalidLimitPrice.into());
            }
            price
        }
        OrderType::Market => Price::ZERO,
    };

    let qty_raw = tokens[3].trim();
    let quantity = qty_raw
        .parse::<Quantity>()
        .map_err(|_| CommandError::InvalidQuantity(qty_raw.to_string()))?;
    if quantity == 0 {
        return Err(OrderError::InvalidQuantity.into());
    }

    Ok(Command::Order {
        side,
        kind,
        price,
        quantity,
    })
}

/// A stateful text session over one engine instance.
pub struct CsvSession {
    engine: MatchingEngine,
}

impl CsvSession {
    /// Create a session with a fresh engine.
    pub fn new() -> Self {
        Self {
            engine: MatchingEngine::new(),
        }
    }

    /// The underlying engine, for inspection.
    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    /// Process one input line, writing any output to `out`.
    pub fn process_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }

        match parse_command(trimmed) {
            Ok(Command::Print) => self.engine.book().write_snapshot(out),
            Ok(Command::Cancel { id }) => {
                if self.engine.cancel_order(id) {
                    writeln!(out, "CANCELLED {}", id)
                } else {
                    writeln!(out, "CANCEL_REJECT {} (not found)", id)
                }
            }
            Ok(Command::Order {
                side,
                kind,
                price,
                quantity,
            }) => {
                let trades = self.engine.process_order(side, kind, price, quantity);
                write_trades(&trades, out)
            }
            Err(err) => writeln!(out, "ERROR: {}", err),
        }
    }

    /// Process every line from a reader, writing output to `out`.
    pub fn process_stream<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> io::Result<()> {
        for line in input.lines() {
            self.process_line(&line?, out)?;
        }
        Ok(())
    }
}

impl Default for CsvSession {
    fn default() -> Self {
        Self::new()
    }
}

fn write_trades<W: Write>(trades: &[Trade], out: &mut W) -> io::Result<()> {
    for trade in trades {
        writeln!(
            out,
            "TRADE {} {} {} {}",
            trade.buyer_order_id, trade.seller_order_id, trade.price, trade.quantity
        )?;
    }
    Ok(())
}

//! Protocol adapters for the matching engine
//!
//! Thin translation layers over the engine's three operations: a
//! CSV-like text command session and a fixed-size binary TCP protocol.
//! All input validation happens here; the engine itself never fails.
//!
//! # Modules
//! - `csv` — text command parsing and session output
//! - `protocol` — 32-byte binary message codecs
//! - `server` — single-threaded non-blocking TCP event loop

pub mod csv;
pub mod protocol;
pub mod server;

pub use csv::CsvSession;
pub use server::TcpGateway;

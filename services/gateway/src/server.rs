//! Non-blocking TCP gateway
//!
//! Single-threaded readiness loop over `mio`: one poll drives the
//! listener and every client. Clients speak the fixed 32-byte binary
//! protocol; partial reads are reassembled per client, and responses
//! queue in a per-client outbox that drains as the socket allows.
//! A client error tears down that connection only, never the engine.

use crate::protocol::{MsgType, OrderMessage, ResponseMessage, MESSAGE_SIZE};
use matching_engine::MatchingEngine;
use mio::net::{TcpListener, TcpStream};
use mio::{Events, Interest, Poll, Registry, Token};
use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::net::SocketAddr;
use types::{OrderError, OrderType, Price, Quantity, Side};

const LISTENER: Token = Token(0);

/// Translate one inbound message into the engine call and its responses.
///
/// Response policy: NEW_ORDER → one ACK carrying the assigned id, then
/// one FILL per trade in match order (match_id = counterparty order id);
/// CANCEL → ACK if removed, REJECT otherwise; anything malformed →
/// REJECT.
pub fn handle_message(engine: &mut MatchingEngine, msg: &OrderMessage) -> Vec<ResponseMessage> {
    match MsgType::from_wire(msg.msg_type) {
        Some(MsgType::Cancel) => {
            let removed = engine.cancel_order(msg.order_id);
            if !removed {
                tracing::debug!(
                    error = %OrderError::UnknownOrder(msg.order_id),
                    "rejecting cancel"
                );
            }
            let msg_type = if removed { MsgType::Ack } else { MsgType::Reject };
            vec![ResponseMessage {
                msg_type: msg_type as u8,
                order_id: msg.order_id,
                ..Default::default()
            }]
        }
        Some(MsgType::NewOrder) => {
            let (side, kind) = match (Side::from_wire(msg.side), OrderType::from_wire(msg.order_type))
            {
                (Some(side), Some(kind)) => (side, kind),
                _ => return vec![reject()],
            };
            let price = Price::from_ticks(msg.price);
            if let Err(err) = validate_order(kind, price, msg.quantity) {
                tracing::debug!(error = %err, "rejecting order");
                return vec![reject()];
            }

            let trades = engine.process_order(side, kind, price, msg.quantity);
            let assigned_id = engine.next_order_id() - 1;

            let mut responses = Vec::with_capacity(1 + trades.len());
            responses.push(ResponseMessage {
                msg_type: MsgType::Ack as u8,
                order_id: assigned_id,
                ..Default::default()
            });
            for trade in &trades {
                let match_id = match side {
                    Side::Buy => trade.seller_order_id,
                    Side::Sell => trade.buyer_order_id,
                };
                responses.push(ResponseMessage {
                    msg_type: MsgType::Fill as u8,
                    quantity: trade.quantity,
                    order_id: assigned_id,
                    price: trade.price.ticks(),
                    match_id,
                });
            }
            responses
        }
        _ => vec![reject()],
    }
}

fn reject() -> ResponseMessage {
    ResponseMessage {
        msg_type: MsgType::Reject as u8,
        ..Default::default()
    }
}

fn validate_order(kind: OrderType, price: Price, quantity: Quantity) -> Result<(), OrderError> {
    if quantity == 0 {
        return Err(OrderError::InvalidQuantity);
    }
    if kind == OrderType::Limit && !price.is_positive() {
        return Err(OrderError::InvalidLimitPrice);
    }
    Ok(())
}

struct Connection {
    stream: TcpStream,
    read_buf: [u8; MESSAGE_SIZE],
    bytes_read: usize,
    outbox: Vec<u8>,
    wants_write: bool,
}

impl Connection {
    fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            read_buf: [0; MESSAGE_SIZE],
            bytes_read: 0,
            outbox: Vec::new(),
            wants_write: false,
        }
    }

    /// Drain the socket, processing every complete message. Returns true
    /// when the connection should be torn down.
    fn handle_readable(&mut self, engine: &mut MatchingEngine) -> bool {
        loop {
            match self.stream.read(&mut self.read_buf[self.bytes_read..]) {
                Ok(0) => return true,
                Ok(n) => {
                    self.bytes_read += n;
                    if self.bytes_read == MESSAGE_SIZE {
                        let msg = OrderMessage::from_bytes(&self.read_buf);
                        for response in handle_message(engine, &msg) {
                            self.outbox.extend_from_slice(&response.to_bytes());
                        }
                        self.bytes_read = 0;
                    }
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "client read failed");
                    return true;
                }
            }
        }
        self.flush_outbox()
    }

    /// Write queued responses until done or the socket is full. Returns
    /// true when the connection should be torn down.
    fn flush_outbox(&mut self) -> bool {
        while !self.outbox.is_empty() {
            match self.stream.write(&self.outbox) {
                Ok(0) => return true,
                Ok(n) => {
                    self.outbox.drain(..n);
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "client write failed");
                    return true;
                }
            }
        }
        false
    }

    /// Track WRITABLE interest only while the outbox is non-empty.
    fn update_interest(&mut self, registry: &Registry, token: Token) -> io::Result<()> {
        let needs_write = !self.outbox.is_empty();
        if needs_write == self.wants_write {
            return Ok(());
        }
        let interest = if needs_write {
            Interest::READABLE | Interest::WRITABLE
        } else {
            Interest::READABLE
        };
        registry.reregister(&mut self.stream, token, interest)?;
        self.wants_write = needs_write;
        Ok(())
    }
}

/// The binary-protocol TCP server wrapping one engine instance.
pub struct TcpGateway {
    engine: MatchingEngine,
}

impl TcpGateway {
    /// Create a gateway with a fresh engine.
    pub fn new() -> Self {
        Self {
            engine: MatchingEngine::new(),
        }
    }

    /// Run the event loop. Blocks until a listener-level error.
    pub fn run(&mut self, addr: SocketAddr) -> io::Result<()> {
        let mut poll = Poll::new()?;
        let mut events = Events::with_capacity(256);
        let mut listener = TcpListener::bind(addr)?;
        poll.registry()
            .register(&mut listener, LISTENER, Interest::READABLE)?;

        let mut connections: HashMap<Token, Connection> = HashMap::new();
        let mut next_token = Token(LISTENER.0 + 1);

        tracing::info!(%addr, "order book gateway listening");

        loop {
            poll.poll(&mut events, None)?;

            for event in events.iter() {
                match event.token() {
                    LISTENER => loop {
                        match listener.accept() {
                            Ok((mut stream, peer)) => {
                                // Nagle off: responses are tiny and latency-bound.
                                let _ = stream.set_nodelay(true);
                                let token = next_token;
                                next_token = Token(token.0 + 1);
                                poll.registry()
                                    .register(&mut stream, token, Interest::READABLE)?;
                                connections.insert(token, Connection::new(stream));
                                tracing::info!(%peer, "client connected");
                            }
                            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                            Err(e) => return Err(e),
                        }
                    },
                    token => {
                        let mut closed = false;
                        if let Some(conn) = connections.get_mut(&token) {
                            if event.is_readable() {
                                closed = conn.handle_readable(&mut self.engine);
                            }
                            if !closed && event.is_writable() {
                                closed = conn.flush_outbox();
                            }
                            if !closed {
                                closed = conn.update_interest(poll.registry(), token).is_err();
                            }
                        }
                        if closed {
                            if let Some(mut conn) = connections.remove(&token) {
                                let _ = poll.registry().deregister(&mut conn.stream);
                                tracing::info!("client disconnected");
                            }
                        }
                    }
                }
            }
        }
    }
}

impl Default for TcpGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_order(side: u8, order_type: u8, price: i64, quantity: u32) -> OrderMessage {
        OrderMessage {
            msg_type: MsgType::NewOrder as u8,
            side,
            order_type,
            price,
            quantity,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_order_acks_with_assigned_id() {
        let mut engine = MatchingEngine::new();
        let responses = handle_message(&mut engine, &new_order(0, 0, 10000, 100));

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].msg_type, MsgType::Ack as u8);
        assert_eq!(responses[0].order_id, 1);
    }

    #[test]
    fn test_new_order_fills_follow_ack() {
        let mut engine = MatchingEngine::new();
        handle_message(&mut engine, &new_order(1, 0, 10000, 60)); // sell, id 1

        let responses = handle_message(&mut engine, &new_order(0, 0, 10000, 100)); // buy, id 2

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].msg_type, MsgType::Ack as u8);
        assert_eq!(responses[0].order_id, 2);
        assert_eq!(responses[1].msg_type, MsgType::Fill as u8);
        assert_eq!(responses[1].order_id, 2);
        assert_eq!(responses[1].quantity, 60);
        assert_eq!(responses[1].price, 10000);
        assert_eq!(responses[1].match_id, 1);
    }

    #[test]
    fn test_cancel_ack_and_reject() {
        let mut engine = MatchingEngine::new();
        handle_message(&mut engine, &new_order(0, 0, 10000, 100)); // id 1

        let cancel = OrderMessage {
            msg_type: MsgType::Cancel as u8,
            order_id: 1,
            ..Default::default()
        };
        let responses = handle_message(&mut engine, &cancel);
        assert_eq!(responses[0].msg_type, MsgType::Ack as u8);
        assert_eq!(responses[0].order_id, 1);

        let responses = handle_message(&mut engine, &cancel);
        assert_eq!(responses[0].msg_type, MsgType::Reject as u8);
    }

    #[test]
    fn test_unknown_message_type_rejected() {
        let mut engine = MatchingEngine::new();
        let msg = OrderMessage {
            msg_type: 99,
            ..Default::default()
        };
        let responses = handle_message(&mut engine, &msg);
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].msg_type, MsgType::Reject as u8);
    }

    #[test]
    fn test_invalid_new_orders_rejected() {
        let mut engine = MatchingEngine::new();

        // Bad side code
        let responses = handle_message(&mut engine, &new_order(9, 0, 10000, 100));
        assert_eq!(responses[0].msg_type, MsgType::Reject as u8);

        // Zero quantity
        let responses = handle_message(&mut engine, &new_order(0, 0, 10000, 0));
        assert_eq!(responses[0].msg_type, MsgType::Reject as u8);

        // Non-positive limit price
        let responses = handle_message(&mut engine, &new_order(0, 0, 0, 100));
        assert_eq!(responses[0].msg_type, MsgType::Reject as u8);

        // Nothing reached the engine
        assert_eq!(engine.orders_processed(), 0);
    }

    #[test]
    fn test_market_order_message_allows_zero_price() {
        let mut engine = MatchingEngine::new();
        let responses = handle_message(&mut engine, &new_order(0, 1, 0, 100));

        // Empty book: ACK only, residual discarded, nothing rests.
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].msg_type, MsgType::Ack as u8);
        assert_eq!(engine.book().total_order_count(), 0);
    }
}

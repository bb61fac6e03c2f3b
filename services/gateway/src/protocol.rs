//! Binary wire protocol
//!
//! Fixed 32-byte little-endian messages in both directions; no framing
//! beyond the fixed size, no heap allocation in the codec.
//!
//! ```text
//! OrderMessage    (client → server)
//!   0  msg_type: u8     1  side: u8        2  order_type: u8
//!   3  pad[5]           8  order_id: u64  16  price: i64
//!  24  quantity: u32   28  reserved: u32
//!
//! ResponseMessage (server → client)
//!   0  msg_type: u8     1  pad[3]           4  quantity: u32
//!   8  order_id: u64   16  price: i64      24  match_id: u64
//! ```

use types::{OrderId, Quantity};

/// Size of every message in either direction.
pub const MESSAGE_SIZE: usize = 32;

/// Message type discriminants shared by both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MsgType {
    NewOrder = 1,
    Cancel = 2,
    Ack = 10,
    Fill = 11,
    Reject = 12,
}

impl MsgType {
    /// Decode a wire discriminant; `None` for unknown values.
    pub fn from_wire(code: u8) -> Option<Self> {
        match code {
            1 => Some(MsgType::NewOrder),
            2 => Some(MsgType::Cancel),
            10 => Some(MsgType::Ack),
            11 => Some(MsgType::Fill),
            12 => Some(MsgType::Reject),
            _ => None,
        }
    }
}

/// Inbound order / cancel request.
///
/// For NEW_ORDER the `order_id` field is ignored (the server assigns);
/// for CANCEL it names the order to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderMessage {
    pub msg_type: u8,
    pub side: u8,
    pub order_type: u8,
    pub order_id: OrderId,
    pub price: i64,
    pub quantity: Quantity,
    pub reserved: u32,
}

impl OrderMessage {
    /// Encode into the fixed wire layout.
    pub fn to_bytes(&self) -> [u8; MESSAGE_SIZE] {
        let mut buf = [0u8; MESSAGE_SIZE];
        buf[0] = self.msg_type;
        buf[1] = self.side;
        buf[2] = self.order_type;
        buf[8..16].copy_from_slice(&self.order_id.to_le_bytes());
        buf[16..24].copy_from_slice(&self.price.to_le_bytes());
        buf[24..28].copy_from_slice(&self.quantity.to_le_bytes());
        buf[28..32].copy_from_slice(&self.reserved.to_le_bytes());
        buf
    }

    /// Decode from the fixed wire layout.
    pub fn from_bytes(buf: &[u8; MESSAGE_SIZE]) -> Self {
        Self {
            msg_type: buf[0],
            side: buf[1],
            order_type: buf[2],
            order_id: u64::from_le_bytes(buf[8..16].try_into().expect("fixed slice")),
            price: i64::from_le_bytes(buf[16..24].try_into().expect("fixed slice")),
            quantity: u32::from_le_bytes(buf[24..28].try_into().expect("fixed slice")),
            reserved: u32::from_le_bytes(buf[28..32].try_into().expect("fixed slice")),
        }
    }
}

/// Outbound acknowledgement / fill / reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResponseMessage {
    pub msg_type: u8,
    pub quantity: Quantity,
    pub order_id: OrderId,
    pub price: i64,
    pub match_id: u64,
}

impl ResponseMessage {
    /// Encode into the fixed wire layout.
    pub fn to_bytes(&self) -> [u8; MESSAGE_SIZE] {
        let mut buf = [0u8; MESSAGE_SIZE];
        buf[0] = self.msg_type;
        buf[4..8].copy_from_slice(&self.quantity.to_le_bytes());
        buf[8..16].copy_from_slice(&self.order_id.to_le_bytes());
        buf[16..24].copy_from_slice(&self.price.to_le_bytes());
        buf[24..32].copy_from_slice(&self.match_id.to_le_bytes());
        buf
    }

    /// Decode from the fixed wire layout.
    pub fn from_bytes(buf: &[u8; MESSAGE_SIZE]) -> Self {
        Self {
            msg_type: buf[0],
            quantity: u32::from_le_bytes(buf[4..8].try_into().expect("fixed slice")),
            order_id: u64::from_le_bytes(buf[8..16].try_into().expect("fixed slice")),
            price: i64::from_le_bytes(buf[16..24].try_into().expect("fixed slice")),
            match_id: u64::from_le_bytes(buf[24..32].try_into().expect("fixed slice")),
        }
    }
}

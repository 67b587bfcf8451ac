//! Protocol vocabulary for the server→client gesture channel.
//!
//! Frames follow the wire format described in [`crate::protocol::codec`].
//! All multi-byte integers travel big-endian; coordinates travel as raw
//! IEEE-754 binary32 bytes.

use serde::{Deserialize, Serialize};

// ── Protocol constants ────────────────────────────────────────────────────────

/// Total size of the frame header in bytes: type tag (1) + payload length (4).
pub const HEADER_SIZE: usize = 5;

/// Sentinel written into the group-ID slot of an EVENT frame to mark the
/// payload as an error signal rather than a gesture event.
pub const ERROR_GROUP_ID: i32 = -1;

// ── Message type codes ────────────────────────────────────────────────────────

/// All frame type tags defined by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    /// Gesture event or error signal pushed to the client.
    Event = 0x00,
    /// Asks the client which group owns a touch coordinate.
    GetGroupId = 0x01,
    /// Asks the client which gestures a group allows.
    GetAllowedGestures = 0x02,
}

impl TryFrom<u8> for MessageType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(MessageType::Event),
            0x01 => Ok(MessageType::GetGroupId),
            0x02 => Ok(MessageType::GetAllowedGestures),
            _ => Err(()),
        }
    }
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// One decoded outbound frame: type tag plus raw payload bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Identifies how the payload is to be interpreted.
    pub message_type: MessageType,
    /// Raw payload bytes; the length field on the wire declared exactly
    /// `payload.len()`.
    pub payload: Vec<u8>,
}

// ── Gesture descriptors ───────────────────────────────────────────────────────

/// One entry in a gestures reply: either a numeric gesture ID or the fully
/// qualified class name of a custom gesture.
///
/// On the wire the two are told apart by sign: a non-negative 4-byte integer
/// is an ID, a negative integer `-N` announces `N` bytes of UTF-8 class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureDescriptor {
    /// Built-in gesture, identified by number (see [`gesture_ids`]).
    Id(i32),
    /// Custom gesture, identified by class name.
    Name(String),
}

/// Well-known gesture IDs of the standard gesture set.
///
/// The protocol carries IDs opaquely; these constants exist so server and
/// client code agree on the built-ins without magic numbers.
pub mod gesture_ids {
    pub const DRAG: i32 = 0;
    pub const MULTI_POINT_DRAG: i32 = 1;
    pub const ROTATE: i32 = 2;
    pub const SPIN: i32 = 3;
    pub const TOUCH: i32 = 4;
    pub const ZOOM: i32 = 5;
    pub const DOUBLE_TAP: i32 = 6;
    pub const FLICK: i32 = 7;
    pub const RELATIVE_DRAG: i32 = 8;
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Contract for event objects pushed to clients via
/// [`ClientChannel::send_events`](crate::protocol::channel::ClientChannel::send_events).
///
/// The channel prefixes each event with its group ID and never inspects the
/// returned bytes; their layout is an agreement between gesture processors
/// and clients.
pub trait Event {
    /// Serializes the event into its wire representation.
    fn wire_bytes(&self) -> Vec<u8>;
}

impl Event for Vec<u8> {
    fn wire_bytes(&self) -> Vec<u8> {
        self.clone()
    }
}

impl Event for &[u8] {
    fn wire_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }
}

/// The meaning of an EVENT frame payload on the receiving side.
///
/// The first 4 bytes carry a group ID; [`ERROR_GROUP_ID`] there reroutes the
/// payload as an error signal, so receivers must check the sentinel before
/// treating the remainder as gesture data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventBody {
    /// A processed gesture event addressed to a group.
    Gesture {
        /// Group the event belongs to.
        group_id: i32,
        /// Opaque event bytes produced by [`Event::wire_bytes`].
        data: Vec<u8>,
    },
    /// An error signal (the group slot held the sentinel).
    Error {
        /// Application-defined error code, carried verbatim (see
        /// [`error_codes`]).
        code: i32,
    },
}

/// Error codes carried by [`EventBody::Error`] signals.
///
/// The channel passes codes through uninterpreted; this registry covers the
/// ones the server is known to emit.
pub mod error_codes {
    /// The touch input device disappeared mid-session.
    pub const INPUT_DEVICE_LOST: i32 = 0x01;
    /// No touch input source could be opened.
    pub const INPUT_SOURCE_UNAVAILABLE: i32 = 0x02;
}

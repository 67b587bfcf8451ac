//! # touchlink-core
//!
//! Wire protocol for the touchlink gesture server's client channels: the
//! length-prefixed frame codec, the gesture and event vocabulary, and the
//! blocking channel the server drives to talk to one connected client.
//!
//! This crate has zero dependencies on OS APIs, UI frameworks, or network
//! sockets: [`ClientChannel`] is generic over any `Read + Write` stream, so
//! production code hands it a `TcpStream` and tests hand it an in-memory
//! fake.
//!
//! # Protocol overview (for beginners)
//!
//! A touch server recognizes gestures on behalf of remote client
//! applications. Clients group their on-screen components into *groups*,
//! each identified by an `i32`; the server asks the client questions about
//! groups and pushes gesture events back to them. Per connected client the
//! server holds one [`ClientChannel`] and speaks four verbs over it:
//!
//! - **[`query_gestures`](ClientChannel::query_gestures)** – which gestures
//!   does this group allow? The client answers with a mixed list of numeric
//!   IDs and class names, told apart on the wire by the sign of a 4-byte
//!   marker.
//! - **[`resolve_group_id`](ClientChannel::resolve_group_id)** – a touch
//!   landed at `(x, y)`; which group owns that point?
//! - **[`send_events`](ClientChannel::send_events)** – deliver processed
//!   gesture events, one frame per event.
//! - **[`send_error`](ClientChannel::send_error)** – deliver an error
//!   signal, wired as an EVENT frame whose group slot carries the sentinel
//!   `-1`.
//!
//! Everything the server sends is a frame: one type byte, a 4-byte
//! big-endian payload length, then the payload. Replies come back raw
//! (unframed) in the opposite direction on the same stream.

pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `touchlink_core::ClientChannel` instead of the full module path.
pub use protocol::channel::{ChannelError, ClientChannel};
pub use protocol::codec::{
    decode_event_body, decode_frame, decode_gesture_fields, decode_gesture_list, encode_frame,
    encode_gesture_list, ProtocolError,
};
pub use protocol::messages::{
    Event, EventBody, Frame, GestureDescriptor, MessageType, ERROR_GROUP_ID, HEADER_SIZE,
};

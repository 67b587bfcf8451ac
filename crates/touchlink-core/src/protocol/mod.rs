//! Protocol module containing the frame vocabulary, the binary codec, and
//! the per-client channel.

pub mod channel;
pub mod codec;
pub mod messages;

pub use channel::{ChannelError, ClientChannel};
pub use codec::{decode_frame, encode_frame, ProtocolError};
pub use messages::*;

//! The server-side channel that talks to one connected client.
//!
//! [`ClientChannel`] owns the server→client half of a duplex byte stream and
//! a reusable payload buffer. Each verb accumulates payload bytes into the
//! buffer, then flushes them as one length-prefixed frame in a single write.
//! The two query verbs afterwards read the client's reply off the same
//! stream.
//!
//! Replies are deliberately not framed: a gestures reply is a raw byte count
//! followed by descriptor fields, and a group-ID reply is a bare big-endian
//! integer. [`crate::protocol::codec`] documents both layouts.

use std::io::{ErrorKind, Read, Write};

use thiserror::Error;
use tracing::{debug, trace};

use crate::protocol::codec::{self, ProtocolError};
use crate::protocol::messages::{Event, GestureDescriptor, MessageType, ERROR_GROUP_ID};

/// Errors surfaced by [`ClientChannel`] operations.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The underlying byte stream failed (reset, closed socket, OS error).
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Bytes arrived but violate the protocol: bad length accounting, a
    /// malformed reply, or a stream that ended mid-reply.
    #[error("protocol decode error: {0}")]
    Decode(#[from] ProtocolError),
}

/// Server-side handle for one connected client.
///
/// Generic over the stream so production code can hand it a
/// [`std::net::TcpStream`] while tests use in-memory fakes. Every verb takes
/// `&mut self`: a channel serves one caller at a time, and callers sharing
/// one across threads must serialize access externally. The server keeps
/// exactly one channel per client connection.
///
/// Errors always propagate to the caller; the channel never retries and
/// never logs a failure on its own.
pub struct ClientChannel<S> {
    stream: S,
    /// Payload bytes accumulated for the frame currently being built.
    /// Emptied on every exit path of [`Self::flush_frame`].
    buffer: Vec<u8>,
}

impl<S> ClientChannel<S> {
    /// Wraps a connected stream. The payload buffer starts empty.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: Vec::new(),
        }
    }

    /// Returns a reference to the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Consumes the channel, returning the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> ClientChannel<S> {
    /// Asks the client which gestures `group_id` allows.
    ///
    /// Writes a `GET_ALLOWED_GESTURES` frame carrying the group ID, then
    /// reads the reply: a 4-byte byte count followed by exactly that many
    /// bytes of descriptor fields. A non-positive count means the group
    /// allows nothing, and nothing further is read.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Transport`] if the stream fails;
    /// [`ChannelError::Decode`] if the reply is malformed or the stream ends
    /// mid-reply.
    pub fn query_gestures(
        &mut self,
        group_id: i32,
    ) -> Result<Vec<GestureDescriptor>, ChannelError> {
        self.buffer.extend_from_slice(&group_id.to_be_bytes());
        self.flush_frame(MessageType::GetAllowedGestures)?;

        let declared = self.read_reply_i32("gesture list byte count")?;
        let descriptors = if declared <= 0 {
            Vec::new()
        } else {
            let mut fields = vec![0u8; declared as usize];
            self.read_reply_exact(&mut fields, "gesture list fields")?;
            codec::decode_gesture_fields(&fields)?
        };

        debug!(group_id, descriptors = descriptors.len(), "gesture query complete");
        Ok(descriptors)
    }

    /// Asks the client which group owns the touch-down point `(x, y)`.
    ///
    /// Coordinates travel as raw IEEE-754 bytes, x first. The reply is a
    /// bare big-endian `i32`, returned verbatim — by convention `0` means no
    /// group claimed the point, but the channel does not interpret it.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Transport`] if the stream fails;
    /// [`ChannelError::Decode`] if the stream ends mid-reply.
    pub fn resolve_group_id(&mut self, x: f32, y: f32) -> Result<i32, ChannelError> {
        self.buffer.extend_from_slice(&x.to_be_bytes());
        self.buffer.extend_from_slice(&y.to_be_bytes());
        self.flush_frame(MessageType::GetGroupId)?;

        let group_id = self.read_reply_i32("group ID reply")?;
        debug!(group_id, "group query complete");
        Ok(group_id)
    }

    /// Pushes processed gesture events to the client, one frame per event,
    /// in slice order.
    ///
    /// Each frame's payload is the group ID followed by the event's
    /// [`wire_bytes`](Event::wire_bytes); the channel never inspects the
    /// event bytes. An empty slice writes nothing and succeeds. The first
    /// failure stops the batch; frames flushed before it stay sent.
    ///
    /// A `group_id` of [`ERROR_GROUP_ID`] would be indistinguishable from an
    /// error signal on the wire and must not be used here.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Transport`] if the stream fails.
    pub fn send_events<E: Event>(
        &mut self,
        group_id: i32,
        events: &[E],
    ) -> Result<(), ChannelError> {
        for event in events {
            self.buffer.extend_from_slice(&group_id.to_be_bytes());
            self.buffer.extend_from_slice(&event.wire_bytes());
            self.flush_frame(MessageType::Event)?;
        }
        Ok(())
    }

    /// Pushes an error signal to the client.
    ///
    /// On the wire this is an EVENT frame whose group slot carries
    /// [`ERROR_GROUP_ID`], followed by the code verbatim; the payload is
    /// always exactly 8 bytes. Code meanings are application-defined (see
    /// [`crate::protocol::messages::error_codes`]).
    ///
    /// # Errors
    ///
    /// [`ChannelError::Transport`] if the stream fails.
    pub fn send_error(&mut self, error_code: i32) -> Result<(), ChannelError> {
        self.buffer.extend_from_slice(&ERROR_GROUP_ID.to_be_bytes());
        self.buffer.extend_from_slice(&error_code.to_be_bytes());
        self.flush_frame(MessageType::Event)
    }

    /// Snapshots the payload buffer into one frame and writes it with a
    /// single `write_all`, then flushes the transport.
    ///
    /// The buffer is cleared before the write is attempted, so a transport
    /// failure cannot leak stale payload bytes into the next frame. Clearing
    /// keeps the allocation, which amortizes across an event stream.
    fn flush_frame(&mut self, message_type: MessageType) -> Result<(), ChannelError> {
        let frame = codec::encode_frame(message_type, &self.buffer);
        self.buffer.clear();

        self.stream.write_all(&frame)?;
        self.stream.flush()?;

        trace!(?message_type, frame_len = frame.len(), "frame flushed");
        Ok(())
    }

    /// Reads a 4-byte big-endian integer reply.
    fn read_reply_i32(&mut self, context: &'static str) -> Result<i32, ChannelError> {
        let mut bytes = [0u8; 4];
        self.read_reply_exact(&mut bytes, context)?;
        Ok(i32::from_be_bytes(bytes))
    }

    /// Reads exactly `buf.len()` reply bytes.
    ///
    /// A stream that ends mid-reply is a protocol violation, not a transport
    /// fault.
    fn read_reply_exact(
        &mut self,
        buf: &mut [u8],
        context: &'static str,
    ) -> Result<(), ChannelError> {
        self.stream.read_exact(buf).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                ChannelError::Decode(ProtocolError::UnexpectedEnd(context))
            } else {
                ChannelError::Transport(e)
            }
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Binary codec for the server→client gesture protocol.
//!
//! Wire format of every outbound frame:
//! ```text
//! [msg_type:1][payload_len:4][payload:N]
//! ```
//! Total header size: 5 bytes. All multi-byte integers are big-endian, and
//! coordinates travel as raw IEEE-754 binary32 bytes.
//!
//! Replies from the client are *not* framed: a gestures reply is a 4-byte
//! byte count followed by exactly that many bytes of descriptor fields, and
//! a group-ID reply is a bare 4-byte integer. The functions here work on
//! byte slices only; stream plumbing lives in [`crate::protocol::channel`].

use crate::protocol::messages::{
    EventBody, Frame, GestureDescriptor, MessageType, ERROR_GROUP_ID, HEADER_SIZE,
};
use thiserror::Error;

/// Errors that can occur while encoding or decoding protocol bytes.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The byte slice is shorter than the minimum required length.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The frame type byte is not a recognized value.
    #[error("unknown message type: 0x{0:02X}")]
    UnknownMessageType(u8),

    /// A declared length does not match the data available.
    #[error("payload length mismatch: declared {declared}, available is {available}")]
    PayloadLengthMismatch { declared: usize, available: usize },

    /// A descriptor field crosses the byte count the gestures reply declared.
    #[error("gesture list underflow: field at offset {offset} needs {needed} bytes, {available} remain of the declared count")]
    GestureListUnderflow {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A gesture class name is not valid UTF-8.
    #[error("gesture class name is not valid UTF-8: {0}")]
    InvalidClassName(#[from] std::str::Utf8Error),

    /// A gesture class name is empty; its marker would collide with ID `0`.
    #[error("empty gesture class name has no wire form")]
    EmptyClassName,

    /// A numeric gesture ID is negative; negative integers mark class names.
    #[error("negative gesture ID {0} would decode as a class-name marker")]
    NegativeGestureId(i32),

    /// A descriptor list does not fit behind a 4-byte length counter.
    #[error("gesture list too large for a 4-byte counter: {bytes} bytes")]
    GestureListTooLarge { bytes: usize },

    /// The stream ended in the middle of an expected reply.
    #[error("unexpected end of stream while reading {0}")]
    UnexpectedEnd(&'static str),
}

// ── Frames ────────────────────────────────────────────────────────────────────

/// Encodes one outbound frame: type tag, payload length, payload.
///
/// The frame comes back as a single contiguous allocation so the transport
/// layer can hand it to one `write_all` call.
///
/// # Examples
///
/// ```rust
/// use touchlink_core::protocol::codec::{decode_frame, encode_frame};
/// use touchlink_core::protocol::messages::MessageType;
///
/// let bytes = encode_frame(MessageType::Event, &[0x01, 0x02]);
/// let (frame, consumed) = decode_frame(&bytes).unwrap();
/// assert_eq!(frame.message_type, MessageType::Event);
/// assert_eq!(frame.payload, vec![0x01, 0x02]);
/// assert_eq!(consumed, bytes.len());
/// ```
pub fn encode_frame(message_type: MessageType, payload: &[u8]) -> Vec<u8> {
    debug_assert!(payload.len() <= u32::MAX as usize);

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());

    // Header: msg_type (1) + payload_len (4) = 5 bytes
    buf.push(message_type as u8);
    buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());

    buf.extend_from_slice(payload);
    buf
}

/// Decodes one frame from the beginning of `bytes`.
///
/// Returns the decoded frame and the total number of bytes consumed
/// (header + payload), so the caller can advance their read cursor.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the bytes are malformed.
pub fn decode_frame(bytes: &[u8]) -> Result<(Frame, usize), ProtocolError> {
    if bytes.len() < HEADER_SIZE {
        return Err(ProtocolError::InsufficientData {
            needed: HEADER_SIZE,
            available: bytes.len(),
        });
    }

    let type_byte = bytes[0];
    let message_type = MessageType::try_from(type_byte)
        .map_err(|_| ProtocolError::UnknownMessageType(type_byte))?;

    let payload_len = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;

    let total_needed = HEADER_SIZE + payload_len;
    if bytes.len() < total_needed {
        return Err(ProtocolError::PayloadLengthMismatch {
            declared: payload_len,
            available: bytes.len() - HEADER_SIZE,
        });
    }

    let payload = bytes[HEADER_SIZE..total_needed].to_vec();
    Ok((
        Frame {
            message_type,
            payload,
        },
        total_needed,
    ))
}

// ── Gestures replies ──────────────────────────────────────────────────────────

/// Encodes a gestures reply: a 4-byte byte count followed by the descriptor
/// fields.
///
/// Each [`GestureDescriptor::Id`] becomes one big-endian `i32`. Each
/// [`GestureDescriptor::Name`] of `N` bytes becomes the marker `-N` followed
/// by the UTF-8 name bytes, so a decoder tells the two apart by sign.
///
/// # Errors
///
/// Returns [`ProtocolError::NegativeGestureId`] for an ID below zero,
/// [`ProtocolError::EmptyClassName`] for a name with no bytes, and
/// [`ProtocolError::GestureListTooLarge`] when a name or the whole list
/// exceeds what the 4-byte counter can declare.
///
/// # Examples
///
/// ```rust
/// use touchlink_core::protocol::codec::{decode_gesture_list, encode_gesture_list};
/// use touchlink_core::protocol::messages::GestureDescriptor;
///
/// let list = vec![
///     GestureDescriptor::Id(5),
///     GestureDescriptor::Name("org.example.PinchGesture".to_string()),
/// ];
/// let reply = encode_gesture_list(&list).unwrap();
/// assert_eq!(decode_gesture_list(&reply).unwrap(), list);
/// ```
pub fn encode_gesture_list(
    descriptors: &[GestureDescriptor],
) -> Result<Vec<u8>, ProtocolError> {
    let mut fields = Vec::new();
    for descriptor in descriptors {
        match descriptor {
            GestureDescriptor::Id(id) => {
                if *id < 0 {
                    return Err(ProtocolError::NegativeGestureId(*id));
                }
                fields.extend_from_slice(&id.to_be_bytes());
            }
            GestureDescriptor::Name(name) => {
                let bytes = name.as_bytes();
                if bytes.is_empty() {
                    return Err(ProtocolError::EmptyClassName);
                }
                if bytes.len() > i32::MAX as usize {
                    return Err(ProtocolError::GestureListTooLarge { bytes: bytes.len() });
                }
                let marker = -(bytes.len() as i32);
                fields.extend_from_slice(&marker.to_be_bytes());
                fields.extend_from_slice(bytes);
            }
        }
    }

    if fields.len() > i32::MAX as usize {
        return Err(ProtocolError::GestureListTooLarge {
            bytes: fields.len(),
        });
    }

    let mut buf = Vec::with_capacity(4 + fields.len());
    buf.extend_from_slice(&(fields.len() as i32).to_be_bytes());
    buf.extend_from_slice(&fields);
    Ok(buf)
}

/// Decodes a complete gestures reply: a 4-byte byte count followed by
/// exactly that many bytes of descriptor fields.
///
/// A non-positive count yields an empty list.
///
/// # Errors
///
/// Returns [`ProtocolError::PayloadLengthMismatch`] when the slice holds
/// fewer or more field bytes than the count declares, plus any field-level
/// error from [`decode_gesture_fields`].
pub fn decode_gesture_list(reply: &[u8]) -> Result<Vec<GestureDescriptor>, ProtocolError> {
    let declared = read_i32(reply, 0)?;
    if declared <= 0 {
        if reply.len() > 4 {
            return Err(ProtocolError::PayloadLengthMismatch {
                declared: 0,
                available: reply.len() - 4,
            });
        }
        return Ok(Vec::new());
    }

    let declared = declared as usize;
    if reply.len() - 4 != declared {
        return Err(ProtocolError::PayloadLengthMismatch {
            declared,
            available: reply.len() - 4,
        });
    }

    decode_gesture_fields(&reply[4..])
}

/// Decodes the field region of a gestures reply.
///
/// `fields` must be exactly the region the reply's leading byte count
/// declared; the caller has already stripped the counter. The loop takes one
/// big-endian `i32` at a time: a non-negative value is a gesture ID, a
/// negative value `-N` announces `N` bytes of class name, consumed from the
/// same declared count.
///
/// # Errors
///
/// Returns [`ProtocolError::GestureListUnderflow`] when an integer or a
/// class name crosses the end of the region, and
/// [`ProtocolError::InvalidClassName`] when name bytes are not UTF-8.
pub fn decode_gesture_fields(fields: &[u8]) -> Result<Vec<GestureDescriptor>, ProtocolError> {
    let mut descriptors = Vec::new();
    let mut offset = 0;

    while offset < fields.len() {
        if fields.len() - offset < 4 {
            return Err(ProtocolError::GestureListUnderflow {
                offset,
                needed: 4,
                available: fields.len() - offset,
            });
        }
        let value = i32::from_be_bytes([
            fields[offset],
            fields[offset + 1],
            fields[offset + 2],
            fields[offset + 3],
        ]);
        offset += 4;

        if value >= 0 {
            descriptors.push(GestureDescriptor::Id(value));
            continue;
        }

        // Negative marker: the next -value bytes are a UTF-8 class name.
        let name_len = -(i64::from(value)) as usize;
        if fields.len() - offset < name_len {
            return Err(ProtocolError::GestureListUnderflow {
                offset,
                needed: name_len,
                available: fields.len() - offset,
            });
        }
        let name = std::str::from_utf8(&fields[offset..offset + name_len])?.to_string();
        offset += name_len;
        descriptors.push(GestureDescriptor::Name(name));
    }

    Ok(descriptors)
}

// ── Event payloads ────────────────────────────────────────────────────────────

/// Decodes the payload of an EVENT frame.
///
/// The first 4 bytes carry the group ID; the sentinel [`ERROR_GROUP_ID`]
/// marks the payload as an error signal whose remaining 4 bytes are the
/// error code. Any other group ID is a gesture event whose `data` is the
/// rest of the payload, possibly empty.
///
/// # Errors
///
/// Returns [`ProtocolError::InsufficientData`] when the group ID is cut off,
/// and [`ProtocolError::PayloadLengthMismatch`] when an error signal is not
/// exactly 8 bytes.
pub fn decode_event_body(payload: &[u8]) -> Result<EventBody, ProtocolError> {
    let group_id = read_i32(payload, 0)?;

    if group_id == ERROR_GROUP_ID {
        // Error signals are exactly sentinel + code.
        if payload.len() != 8 {
            return Err(ProtocolError::PayloadLengthMismatch {
                declared: 8,
                available: payload.len(),
            });
        }
        let code = read_i32(payload, 4)?;
        return Ok(EventBody::Error { code });
    }

    Ok(EventBody::Gesture {
        group_id,
        data: payload[4..].to_vec(),
    })
}

// ── Utility helpers ───────────────────────────────────────────────────────────

fn read_i32(buf: &[u8], offset: usize) -> Result<i32, ProtocolError> {
    if buf.len() < offset + 4 {
        return Err(ProtocolError::InsufficientData {
            needed: offset + 4,
            available: buf.len(),
        });
    }
    Ok(i32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

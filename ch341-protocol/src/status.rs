//! Response decoding
//!
//! Every response starts with one status byte; bit 7 set means the
//! addressed device did not acknowledge. Read responses carry the payload
//! directly after it.

use crate::message::Message;

/// Ack-failure bit in the status byte
pub const STATUS_NAK_BIT: u8 = 0x80;

/// Errors that can occur while decoding a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The addressed device did not acknowledge
    NoAcknowledge,
    /// Response too short to carry the status byte plus read payload
    ShortResponse,
}

/// Response length the bridge must deliver for `msg`
///
/// One status byte, plus the payload for a read. Any other actual length
/// is a transport-level failure.
pub fn expected_response_len(msg: &Message<'_>) -> usize {
    match msg {
        Message::Write { .. } => 1,
        Message::Read { buf, .. } => 1 + buf.len(),
    }
}

/// Decode one raw response against the message that produced it
///
/// On success a read message's buffer holds the returned payload; a write
/// carries no payload beyond "completed".
pub fn decode_response(raw: &[u8], msg: &mut Message<'_>) -> Result<(), DecodeError> {
    let status = *raw.first().ok_or(DecodeError::ShortResponse)?;
    if status & STATUS_NAK_BIT != 0 {
        return Err(DecodeError::NoAcknowledge);
    }

    if let Message::Read { buf, .. } = msg {
        let payload = raw
            .get(1..1 + buf.len())
            .ok_or(DecodeError::ShortResponse)?;
        buf.copy_from_slice(payload);
    }
    Ok(())
}

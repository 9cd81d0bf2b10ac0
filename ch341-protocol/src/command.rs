//! Command stream encoding
//!
//! Opcode vocabulary of the CH341 I2C command language. All commands are
//! single bytes; OUT/IN/SET carry a 6-bit (2-bit for SET) argument in the
//! low bits.

use heapless::Vec;

use crate::limits::AdapterLimits;
use crate::message::Message;

/// Prefix marking the buffer as a command stream
pub const CMD_STREAM: u8 = 0xAA;
/// Assert an I2C START condition
pub const CMD_STA: u8 = 0x74;
/// Assert an I2C STOP condition
pub const CMD_STO: u8 = 0x75;
/// Write `n` payload bytes; `n == 0` sends exactly one byte and returns
/// one status byte with the ack bit
pub const CMD_OUT: u8 = 0x80;
/// Read `n` payload bytes; `n == 0` reads exactly one byte
pub const CMD_IN: u8 = 0xC0;
/// One-time bus speed configuration
pub const CMD_SET: u8 = 0x60;
/// Terminate the command stream
pub const CMD_END: u8 = 0x00;

/// Fixed bulk packet size, both endpoint directions
pub const MAX_BULK_PACKET_SIZE: usize = 32;

/// Errors that can occur while building a command frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Message length exceeds the adapter limit for its direction
    MessageTooLong,
    /// Encoded frame would exceed the bulk packet size
    FrameOverflow,
}

/// One encoded command stream, never longer than the bulk packet size
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandFrame {
    bytes: Vec<u8, MAX_BULK_PACKET_SIZE>,
}

impl CommandFrame {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub(crate) fn push(&mut self, byte: u8) -> Result<(), ProtocolError> {
        self.bytes.push(byte).map_err(|_| ProtocolError::FrameOverflow)
    }

    pub(crate) fn extend(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        self.bytes
            .extend_from_slice(data)
            .map_err(|_| ProtocolError::FrameOverflow)
    }

    /// The encoded bytes, ready for one bulk OUT transfer
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode one I2C message into a command frame
///
/// `send_stop` must be true only for the last message of a transaction;
/// it appends the STOP condition that releases the bus. Length limits are
/// enforced here, before the caller generates any USB traffic.
pub fn encode(
    msg: &Message<'_>,
    send_stop: bool,
    limits: &AdapterLimits,
) -> Result<CommandFrame, ProtocolError> {
    limits.check(msg)?;

    let mut frame = CommandFrame::new();
    frame.push(CMD_STREAM)?;
    frame.push(CMD_STA)?;
    // OUT with len 0: clock out one byte (the address) and get one
    // status byte back with the ack info
    frame.push(CMD_OUT)?;
    frame.push(msg.address_byte())?;

    match msg {
        Message::Write { data, .. } if !data.is_empty() => {
            frame.push(CMD_OUT | data.len() as u8)?;
            frame.extend(data)?;
        }
        Message::Read { buf, .. } if !buf.is_empty() => {
            // The last byte must be fetched by a separate zero-length IN
            // command. A single full-length IN leaves the chip wedged.
            if buf.len() > 1 {
                frame.push(CMD_IN | (buf.len() as u8 - 1))?;
            }
            frame.push(CMD_IN)?;
        }
        // Zero-length probe: address phase only
        _ => {}
    }

    if send_stop {
        frame.push(CMD_STO)?;
    }
    frame.push(CMD_END)?;

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LIMITS: AdapterLimits = AdapterLimits::for_packet_size(MAX_BULK_PACKET_SIZE);

    #[test]
    fn write_frame_layout() {
        // Register-pointer write to an SHT40 at 0x44, not last in its
        // transaction: no STOP.
        let msg = Message::Write {
            addr: 0x44,
            data: &[0x01],
        };
        let frame = encode(&msg, false, &LIMITS).unwrap();
        assert_eq!(frame.as_bytes(), &[0xAA, 0x74, 0x80, 0x88, 0x81, 0x01, 0x00]);
    }

    #[test]
    fn read_frame_splits_final_byte() {
        let mut buf = [0u8; 3];
        let msg = Message::Read {
            addr: 0x44,
            buf: &mut buf,
        };
        let frame = encode(&msg, true, &LIMITS).unwrap();
        // IN|2 for the first two bytes, zero-length IN for the last one
        assert_eq!(
            frame.as_bytes(),
            &[0xAA, 0x74, 0x80, 0x89, 0xC2, 0xC0, 0x75, 0x00]
        );
    }

    #[test]
    fn single_byte_read_uses_one_in_command() {
        let mut buf = [0u8; 1];
        let msg = Message::Read {
            addr: 0x23,
            buf: &mut buf,
        };
        let frame = encode(&msg, true, &LIMITS).unwrap();
        assert_eq!(frame.as_bytes(), &[0xAA, 0x74, 0x80, 0x47, 0xC0, 0x75, 0x00]);
    }

    #[test]
    fn stop_placement() {
        let msg = Message::Write {
            addr: 0x50,
            data: &[0xEE],
        };

        let with_stop = encode(&msg, true, &LIMITS).unwrap();
        let n = with_stop.len();
        assert_eq!(with_stop.as_bytes()[n - 2], CMD_STO);
        assert_eq!(with_stop.as_bytes()[n - 1], CMD_END);

        let without_stop = encode(&msg, false, &LIMITS).unwrap();
        assert!(!without_stop.as_bytes().contains(&CMD_STO));
        assert_eq!(*without_stop.as_bytes().last().unwrap(), CMD_END);
    }

    #[test]
    fn zero_length_probe_has_no_data_phase() {
        let msg = Message::Write {
            addr: 0x44,
            data: &[],
        };
        let frame = encode(&msg, true, &LIMITS).unwrap();
        assert_eq!(frame.as_bytes(), &[0xAA, 0x74, 0x80, 0x88, 0x75, 0x00]);
    }

    #[test]
    fn oversized_messages_are_rejected() {
        let data = [0u8; 26];
        let msg = Message::Write {
            addr: 0x44,
            data: &data,
        };
        assert_eq!(encode(&msg, true, &LIMITS), Err(ProtocolError::MessageTooLong));

        let mut buf = [0u8; 32];
        let msg = Message::Read {
            addr: 0x44,
            buf: &mut buf,
        };
        assert_eq!(encode(&msg, true, &LIMITS), Err(ProtocolError::MessageTooLong));
    }

    #[test]
    fn maximum_write_fills_the_packet() {
        let data = [0x5Au8; 25];
        let msg = Message::Write {
            addr: 0x44,
            data: &data,
        };
        let frame = encode(&msg, true, &LIMITS).unwrap();
        assert_eq!(frame.len(), MAX_BULK_PACKET_SIZE);
    }

    proptest! {
        #[test]
        fn write_frames_are_well_formed(
            addr in 0u8..0x80,
            data in prop::collection::vec(any::<u8>(), 1..=25),
            stop in any::<bool>(),
        ) {
            let msg = Message::Write { addr, data: data.as_slice() };
            let frame = encode(&msg, stop, &LIMITS).unwrap();
            let bytes = frame.as_bytes();

            prop_assert!(bytes.len() <= MAX_BULK_PACKET_SIZE);
            prop_assert_eq!(bytes[0], CMD_STREAM);
            prop_assert_eq!(*bytes.last().unwrap(), CMD_END);
            prop_assert_eq!(bytes[3], addr << 1);
            prop_assert_eq!(bytes[4], CMD_OUT | data.len() as u8);
            // Payload appears verbatim after the OUT header
            prop_assert_eq!(&bytes[5..5 + data.len()], data.as_slice());
        }

        #[test]
        fn read_frames_end_with_zero_length_in(
            addr in 0u8..0x80,
            len in 1usize..=31,
            stop in any::<bool>(),
        ) {
            let mut buf = [0u8; 31];
            let msg = Message::Read { addr, buf: &mut buf[..len] };
            let frame = encode(&msg, stop, &LIMITS).unwrap();
            let bytes = frame.as_bytes();

            prop_assert_eq!(bytes[3], (addr << 1) | 1);
            if len > 1 {
                prop_assert_eq!(bytes[4], CMD_IN | (len as u8 - 1));
                prop_assert_eq!(bytes[5], CMD_IN);
            } else {
                prop_assert_eq!(bytes[4], CMD_IN);
                prop_assert_ne!(bytes[5], CMD_IN);
            }
        }
    }
}

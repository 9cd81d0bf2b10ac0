//! Adapter length limits
//!
//! Both payload limits fall out of the fixed bulk packet size. They are
//! enforced before encoding so that an oversized message never generates
//! USB traffic.

use crate::command::{ProtocolError, MAX_BULK_PACKET_SIZE};
use crate::message::Message;

/// Maximum payload sizes for one message, derived once at attach time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdapterLimits {
    /// Longest write payload that fits one command frame
    pub max_write_len: usize,
    /// Longest read payload that fits one response packet
    pub max_read_len: usize,
}

impl AdapterLimits {
    /// Derive the limits from a bulk packet size
    pub const fn for_packet_size(packet_size: usize) -> Self {
        Self {
            max_write_len: packet_size - 7, // -7 for proto overhead
            max_read_len: packet_size - 1,  // -1 for status byte
        }
    }

    /// Reject a message whose length exceeds the limit for its direction
    pub fn check(&self, msg: &Message<'_>) -> Result<(), ProtocolError> {
        let limit = if msg.is_read() {
            self.max_read_len
        } else {
            self.max_write_len
        };
        if msg.len() > limit {
            return Err(ProtocolError::MessageTooLong);
        }
        Ok(())
    }
}

impl Default for AdapterLimits {
    fn default() -> Self {
        Self::for_packet_size(MAX_BULK_PACKET_SIZE)
    }
}

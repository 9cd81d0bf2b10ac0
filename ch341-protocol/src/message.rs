//! Generic I2C messages as the bridge sees them
//!
//! A message pairs a 7-bit target address with a caller-owned buffer:
//! source data for a write, destination for a read. Length and direction
//! are fixed for the lifetime of the message; the codec never resizes the
//! buffer.

/// One I2C message within a transaction
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message<'b> {
    /// Write the borrowed bytes to the device at `addr`
    Write { addr: u8, data: &'b [u8] },
    /// Read from the device at `addr`, filling the buffer completely
    Read { addr: u8, buf: &'b mut [u8] },
}

impl Message<'_> {
    /// 7-bit target address
    pub fn addr(&self) -> u8 {
        match self {
            Message::Write { addr, .. } | Message::Read { addr, .. } => *addr,
        }
    }

    /// Payload length in bytes (0 for a pure address probe)
    pub fn len(&self) -> usize {
        match self {
            Message::Write { data, .. } => data.len(),
            Message::Read { buf, .. } => buf.len(),
        }
    }

    /// True for a zero-length message (address probe)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for the read direction
    pub fn is_read(&self) -> bool {
        matches!(self, Message::Read { .. })
    }

    /// The address byte placed on the wire: `(addr << 1) | rd`
    pub fn address_byte(&self) -> u8 {
        (self.addr() << 1) | self.is_read() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_byte_carries_direction_bit() {
        let write = Message::Write {
            addr: 0x44,
            data: &[0x01],
        };
        assert_eq!(write.address_byte(), 0x88);

        let mut buf = [0u8; 3];
        let read = Message::Read {
            addr: 0x44,
            buf: &mut buf,
        };
        assert_eq!(read.address_byte(), 0x89);
    }

    #[test]
    fn probe_message_is_empty() {
        let probe = Message::Write {
            addr: 0x20,
            data: &[],
        };
        assert!(probe.is_empty());
        assert!(!probe.is_read());
        assert_eq!(probe.len(), 0);
    }
}

//! Transaction failure taxonomy
//!
//! Three distinct failure classes so callers can tell a bus problem from
//! a device that simply did not answer: length-policy violations (caught
//! before any I/O), transport failures (the USB exchange itself broke),
//! and remote acknowledgement failures (the exchange worked, the device
//! NAKed).

use ch341_protocol::ProtocolError;
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// Outcome classification for a failed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Message length exceeds the adapter limit for its direction;
    /// nothing was sent
    MessageTooLong,
    /// The underlying bulk call failed
    Transport(E),
    /// A bulk call moved a different number of bytes than required
    IncompleteTransfer { expected: usize, actual: usize },
    /// Status byte had bit 7 set: the addressed device did not acknowledge
    NoAcknowledge,
}

impl<E> Error<E> {
    /// True when the USB exchange itself failed, as opposed to the
    /// device not answering or the message being rejected up front
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::IncompleteTransfer { .. }
        )
    }
}

impl<E> From<ProtocolError> for Error<E> {
    fn from(_: ProtocolError) -> Self {
        // Both codec failures are length-policy violations: a frame can
        // only overflow when the message was too long for its direction.
        Error::MessageTooLong
    }
}

impl<E: core::fmt::Debug> embedded_hal::i2c::Error for Error<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::NoAcknowledge => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown),
            _ => ErrorKind::Other,
        }
    }
}

//! Transaction sequencer
//!
//! One [`Ch341Bus`] per physical bridge. The bus owns its transport and a
//! single 32-byte scratch buffer for responses; taking `&mut self` for the
//! whole of [`Ch341Bus::transfer`] is what serializes transactions per
//! instance. Distinct instances are fully independent.

use ch341_protocol::{
    command, speed_frame, status, AdapterLimits, BusSpeed, CommandFrame, DecodeError, Message,
    MAX_BULK_PACKET_SIZE,
};

use crate::error::Error;
use crate::transport::BulkTransport;

/// I2C master bus backed by one CH341 bridge
pub struct Ch341Bus<T> {
    transport: T,
    limits: AdapterLimits,
    // Response scratch, reused across every message of every transaction
    buf: [u8; MAX_BULK_PACKET_SIZE],
}

impl<T: BulkTransport> Ch341Bus<T> {
    /// Wrap a claimed bulk pipe pair
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            limits: AdapterLimits::default(),
            buf: [0; MAX_BULK_PACKET_SIZE],
        }
    }

    /// Payload limits enforced by this bus
    pub fn limits(&self) -> &AdapterLimits {
        &self.limits
    }

    /// Configure the bus clock
    ///
    /// One-time side effect at attach time; the bridge keeps the setting
    /// until reconfigured. No response is produced.
    pub fn set_speed(&mut self, speed: BusSpeed) -> Result<(), Error<T::Error>> {
        let frame = speed_frame(speed)?;
        self.send_frame(&frame)
    }

    /// Check for a device at `addr` with a zero-length write
    pub fn probe(&mut self, addr: u8) -> Result<(), Error<T::Error>> {
        let mut msgs = [Message::Write { addr, data: &[] }];
        self.transfer(&mut msgs).map(|_| ())
    }

    /// Execute one bus transaction
    ///
    /// Messages run in order and share a single START/STOP pair: every
    /// message issues a (repeated) START, only the last one a STOP. The
    /// first failure aborts the transaction; later messages are never
    /// attempted. Returns the number of messages completed, always
    /// `msgs.len()` on success.
    pub fn transfer(&mut self, msgs: &mut [Message<'_>]) -> Result<usize, Error<T::Error>> {
        let num = msgs.len();
        for (i, msg) in msgs.iter_mut().enumerate() {
            self.xfer_msg(msg, i == num - 1)?;
        }
        Ok(num)
    }

    /// Hand the transport back, e.g. on detach
    pub fn release(self) -> T {
        self.transport
    }

    fn xfer_msg(&mut self, msg: &mut Message<'_>, stop: bool) -> Result<(), Error<T::Error>> {
        // Length limits are enforced inside `encode`, before any traffic
        let frame = command::encode(msg, stop, &self.limits)?;
        self.send_frame(&frame)?;

        let expected = status::expected_response_len(msg);
        let actual = self
            .transport
            .receive(&mut self.buf)
            .map_err(Error::Transport)?;
        if actual != expected {
            return Err(Error::IncompleteTransfer { expected, actual });
        }

        status::decode_response(&self.buf[..actual], msg).map_err(|e| match e {
            DecodeError::NoAcknowledge => Error::NoAcknowledge,
            // Unreachable after the length check above, classified the same
            DecodeError::ShortResponse => Error::IncompleteTransfer { expected, actual },
        })
    }

    fn send_frame(&mut self, frame: &CommandFrame) -> Result<(), Error<T::Error>> {
        let sent = self
            .transport
            .send(frame.as_bytes())
            .map_err(Error::Transport)?;
        if sent != frame.len() {
            return Err(Error::IncompleteTransfer {
                expected: frame.len(),
                actual: sent,
            });
        }
        Ok(())
    }
}

impl<T: BulkTransport> embedded_hal::i2c::ErrorType for Ch341Bus<T>
where
    T::Error: core::fmt::Debug,
{
    type Error = Error<T::Error>;
}

/// Deviation from the `embedded-hal` contract: the bridge exchanges one
/// command frame per operation, so every operation gets its own repeated
/// START and address phase. Adjacent same-type operations are not merged
/// into a single data phase; the frame-size limits would not fit merged
/// payloads anyway.
impl<T: BulkTransport> embedded_hal::i2c::I2c for Ch341Bus<T>
where
    T::Error: core::fmt::Debug,
{
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [embedded_hal::i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        use embedded_hal::i2c::Operation;

        let num = operations.len();
        for (i, op) in operations.iter_mut().enumerate() {
            let mut msg = match op {
                Operation::Write(data) => Message::Write {
                    addr: address,
                    data: *data,
                },
                Operation::Read(buf) => Message::Read {
                    addr: address,
                    buf: &mut **buf,
                },
            };
            self.xfer_msg(&mut msg, i == num - 1)?;
        }
        Ok(())
    }
}

//! SHT4x humidity/temperature sensor skeleton
//!
//! Minimal client for the Sensirion SHT4x family: identification and
//! presence checking only, no measurement protocol. Serves as the
//! smallest possible downstream driver over the bridged bus.

use embedded_hal::i2c::I2c;

/// Default I2C address of the SHT40 variant
pub const SHT40_ADDRESS: u8 = 0x44;

/// SHT4x sensor client
pub struct Sht40<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Sht40<I2C> {
    /// Bind a sensor at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SHT40_ADDRESS)
    }

    /// Bind a sensor at a non-default address (SHT4xB parts use 0x45)
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device type name
    pub fn name(&self) -> &'static str {
        "sht40"
    }

    /// Bound I2C address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Check that the sensor acknowledges its address
    ///
    /// Zero-length write; succeeds without transferring any data bytes.
    pub fn probe(&mut self) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[])
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ch341_bus::{BulkTransport, Ch341Bus, Error};
    use heapless::Vec;

    /// One-shot transport: captures sent frames, answers each with a
    /// fixed status byte.
    struct OneStatusTransport {
        sent: Vec<Vec<u8, 32>, 4>,
        status: u8,
    }

    impl BulkTransport for OneStatusTransport {
        type Error = ();

        fn send(&mut self, frame: &[u8]) -> Result<usize, ()> {
            self.sent.push(Vec::from_slice(frame).unwrap()).unwrap();
            Ok(frame.len())
        }

        fn receive(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            buf[0] = self.status;
            Ok(1)
        }
    }

    fn bus_with_status(status: u8) -> Ch341Bus<OneStatusTransport> {
        Ch341Bus::new(OneStatusTransport {
            sent: Vec::new(),
            status,
        })
    }

    #[test]
    fn identity_attributes() {
        let sensor = Sht40::new(bus_with_status(0x00));
        assert_eq!(sensor.name(), "sht40");
        assert_eq!(sensor.address(), 0x44);

        let sensor = Sht40::with_address(bus_with_status(0x00), 0x45);
        assert_eq!(sensor.address(), 0x45);
    }

    #[test]
    fn probe_sends_the_address_phase_only() {
        let mut sensor = Sht40::new(bus_with_status(0x00));
        sensor.probe().unwrap();

        let transport = sensor.release().release();
        assert_eq!(transport.sent.len(), 1);
        assert_eq!(
            transport.sent[0].as_slice(),
            &[0xAA, 0x74, 0x80, 0x88, 0x75, 0x00]
        );
    }

    #[test]
    fn probe_reports_missing_sensor() {
        let mut sensor = Sht40::new(bus_with_status(0x80));
        assert_eq!(sensor.probe(), Err(Error::NoAcknowledge));
    }
}

//! Bulk transport boundary
//!
//! One implementation per USB backend (libusb-style host stacks, kernel
//! URB wrappers, mocks for tests). The engine only ever performs one
//! blocking write-then-read exchange per message.

/// USB vendor id of the CH341 in I2C/MEM mode
pub const VENDOR_ID: u16 = 0x1a86;
/// USB product id of the CH341 in I2C/MEM mode
pub const PRODUCT_ID: u16 = 0x5512;

/// Fixed deadline for each bulk call, in milliseconds
///
/// Expiry must surface as the implementation's error type; the engine
/// treats it like any other transport failure.
pub const TRANSFER_TIMEOUT_MS: u32 = 2000;

/// Half-duplex bulk pipe pair to the bridge
///
/// Both endpoints use fixed 32-byte packets; the surrounding driver is
/// expected to have validated the endpoint max packet size at attach time.
/// Calls block for at most [`TRANSFER_TIMEOUT_MS`].
pub trait BulkTransport {
    /// Error type for bulk transfers
    type Error;

    /// Write one command frame to the bulk OUT endpoint
    ///
    /// Returns the number of bytes actually sent, which must equal the
    /// frame length for the exchange to count as successful.
    fn send(&mut self, frame: &[u8]) -> Result<usize, Self::Error>;

    /// Read one response from the bulk IN endpoint into `buf`
    ///
    /// Returns the number of bytes actually received. The engine validates
    /// it against the length the command must produce.
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

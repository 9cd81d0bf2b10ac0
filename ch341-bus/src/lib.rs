//! CH341 I2C bus engine
//!
//! Drives I2C transactions through a CH341 USB bridge: each message is
//! encoded into a command frame, exchanged over a pair of half-duplex bulk
//! pipes, and decoded back into an ack/payload result. The USB side is
//! abstracted behind [`BulkTransport`]; device enumeration, endpoint
//! discovery and teardown belong to the surrounding driver.
//!
//! [`Ch341Bus`] implements [`embedded_hal::i2c::I2c`], so any downstream
//! peripheral driver written against that trait runs unmodified on top of
//! the bridge.

#![no_std]
#![deny(unsafe_code)]

mod bus;
mod error;
mod transport;

pub use bus::Ch341Bus;
pub use error::Error;
pub use transport::{BulkTransport, PRODUCT_ID, TRANSFER_TIMEOUT_MS, VENDOR_ID};

//! Peripheral driver skeletons
//!
//! Drivers for devices attached behind the CH341 bridge. Everything here
//! is generic over [`embedded_hal::i2c::I2c`], so the same drivers run on
//! any other compliant bus implementation.

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;

//! Sensor clients

pub mod sht40;

pub use sht40::Sht40;

//! CH341 USB-I2C Command Protocol
//!
//! This crate defines the bulk-transfer command language spoken by the WCH
//! CH341 bridge chip in I2C mode. It is pure codec: no USB traffic happens
//! here, only translation between generic I2C messages and the chip's
//! fixed-format command streams.
//!
//! # Protocol Overview
//!
//! Every I2C message becomes one command frame of at most 32 bytes (the
//! bulk endpoint packet size in both directions):
//! ```text
//! ┌────────┬───────┬──────┬──────┬──────────────┬────────┬──────┐
//! │ STREAM │ START │ OUT  │ ADDR │ DATA PHASE   │ STOP?  │ END  │
//! │ 0xAA   │ 0x74  │ 0x80 │ 1B   │ 0–25B        │ 0x75   │ 0x00 │
//! └────────┴───────┴──────┴──────┴──────────────┴────────┴──────┘
//! ```
//!
//! The zero-length OUT before ADDR makes the chip clock out exactly one
//! byte (the address) and hand back one status byte carrying the ack bit.
//! The data phase is `OUT|len` plus payload for writes, or one or two IN
//! commands for reads; STOP is present only on the last message of a
//! transaction.
//!
//! Every response begins with a status byte whose bit 7 reports a remote
//! acknowledgement failure; read responses carry the payload after it.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod limits;
pub mod message;
pub mod speed;
pub mod status;

pub use command::{encode, CommandFrame, ProtocolError, MAX_BULK_PACKET_SIZE};
pub use limits::AdapterLimits;
pub use message::Message;
pub use speed::{speed_frame, BusSpeed};
pub use status::{decode_response, expected_response_len, DecodeError};

//! Bus speed configuration
//!
//! The bridge takes its I2C clock from a one-shot SET command issued at
//! attach time; speed is not part of the per-message encoding.

use crate::command::{CommandFrame, ProtocolError, CMD_END, CMD_SET, CMD_STREAM};

/// I2C bus clock settings supported by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusSpeed {
    /// Low speed, 20 kHz
    Low,
    /// Standard mode, 100 kHz
    #[default]
    Standard,
    /// Fast mode, 400 kHz
    Fast,
    /// High speed, 750 kHz
    High,
}

impl BusSpeed {
    /// Wire value carried in the low bits of the SET command
    pub fn bits(self) -> u8 {
        match self {
            BusSpeed::Low => 0,
            BusSpeed::Standard => 1,
            BusSpeed::Fast => 2,
            BusSpeed::High => 3,
        }
    }

    /// Nominal bus clock in Hz
    pub fn frequency_hz(self) -> u32 {
        match self {
            BusSpeed::Low => 20_000,
            BusSpeed::Standard => 100_000,
            BusSpeed::Fast => 400_000,
            BusSpeed::High => 750_000,
        }
    }
}

/// Build the one-shot speed configuration frame
pub fn speed_frame(speed: BusSpeed) -> Result<CommandFrame, ProtocolError> {
    let mut frame = CommandFrame::new();
    frame.push(CMD_STREAM)?;
    frame.push(CMD_SET | speed.bits())?;
    frame.push(CMD_END)?;
    Ok(frame)
}

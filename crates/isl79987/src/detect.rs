// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Signal presence and video standard detection
//!
//! Each analog input has its own decoder bank (banks 1 through 4, bank 0x0F
//! broadcasts to all four). Detection is always two sequential reads on the
//! selected bank: the lock/loss status first, then the standard nibble.
//! The standard bits carry no meaning while the decoder is unlocked, so a
//! no-signal result short-circuits classification.

use crate::bus::{RegisterBus, PAGE_SELECT};
use crate::chip::ChipSession;
use crate::topology::VideoStandard;
use crate::Error;
use std::fmt;

/// Decoder status register, per channel bank.
pub(crate) const AFE_STATUS_REG: u8 = 0x03;
/// Video loss
pub(crate) const STATUS_VDLOSS: u8 = 0x80;
/// Even field
pub(crate) const STATUS_FIELD: u8 = 0x10;
/// [6] horizontal, [5] sync and [3] vertical lock combined
pub(crate) const STATUS_LOCK: u8 = 0x68;
pub(crate) const STATUS_NOSIGNAL_MASK: u8 = STATUS_VDLOSS | STATUS_LOCK;

/// Detected-standard register; the top nibble holds the classification.
const DEC_STD_REG: u8 = 0x1C;
const STD_PAL: u8 = 0x10;
const STD_SECAM: u8 = 0x20;
const STD_PAL_CN: u8 = 0x50;
const STD_INVALID: u8 = 0x70;

/// Which analog input to interrogate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalogInput {
    #[default]
    Input1,
    Input2,
    Input3,
    Input4,
    /// Broadcast bank covering all four decoders
    All,
}

impl AnalogInput {
    pub(crate) fn page(&self) -> u8 {
        match self {
            AnalogInput::Input1 => 0x01,
            AnalogInput::Input2 => 0x02,
            AnalogInput::Input3 => 0x03,
            AnalogInput::Input4 => 0x04,
            AnalogInput::All => 0x0F,
        }
    }

    /// Input index 0..=3; `None` for the broadcast bank.
    pub fn index(&self) -> Option<u8> {
        match self {
            AnalogInput::Input1 => Some(0),
            AnalogInput::Input2 => Some(1),
            AnalogInput::Input3 => Some(2),
            AnalogInput::Input4 => Some(3),
            AnalogInput::All => None,
        }
    }
}

impl fmt::Display for AnalogInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.index() {
            Some(i) => write!(f, "input {}", i + 1),
            None => write!(f, "all inputs"),
        }
    }
}

/// Result of a detection pass on one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalStatus {
    pub present: bool,
    pub standard: VideoStandard,
}

impl<B> ChipSession<B>
where
    B: RegisterBus,
{
    /// Report signal presence and the detected standard on `input`.
    ///
    /// Simulated sessions report no signal and the NTSC power-on default
    /// without issuing bus traffic.
    pub fn detect(&mut self, input: AnalogInput) -> Result<SignalStatus, Error> {
        if self.is_simulated() {
            return Ok(SignalStatus {
                present: false,
                standard: VideoStandard::Ntsc,
            });
        }

        self.bus().write(PAGE_SELECT, input.page())?;
        let status = self.bus().read(AFE_STATUS_REG)?;
        if status & STATUS_NOSIGNAL_MASK != STATUS_LOCK {
            log::debug!("{}: no signal (status 0x{:02X})", input, status);
            return Ok(SignalStatus {
                present: false,
                standard: VideoStandard::Unknown,
            });
        }

        let nibble = self.bus().read(DEC_STD_REG)? & 0x70;
        let standard = match nibble {
            STD_PAL | STD_SECAM | STD_PAL_CN => VideoStandard::Pal,
            STD_INVALID => VideoStandard::Unknown,
            _ => VideoStandard::Ntsc,
        };
        log::debug!("{}: {} (std nibble 0x{:02X})", input, standard, nibble);

        Ok(SignalStatus {
            present: true,
            standard,
        })
    }
}

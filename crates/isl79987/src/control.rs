// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Analog picture controls
//!
//! Every control is one or two register operations on a selected bank, most
//! of them read-modify-write so neighboring bits survive. Values outside a
//! control's documented range are rejected before any bus traffic.

use crate::bus::{RegisterBus, PAGE_SELECT};
use crate::chip::ChipSession;
use crate::detect::AnalogInput;
use crate::Error;
use std::fmt;

// Broadcast decoder bank (RFxx reaches all four channel decoders).
const PAGE_DECODER_ALL: u8 = 0x0F;
// Hue lives on the channel-1 decoder bank, which paces the others.
const PAGE_DECODER_1: u8 = 0x01;
const PAGE_MIPI: u8 = 0x05;

const REG_BRIGHTNESS: u8 = 0x10;
const REG_CONTRAST: u8 = 0x11;
const REG_SHARPNESS: u8 = 0x12;
const REG_SATURATION_CB: u8 = 0x13;
const REG_SATURATION_CR: u8 = 0x14;
const REG_HUE: u8 = 0x15;
const REG_BLACK_LEVEL: u8 = 0x0C;
const BLACK_LEVEL_EN: u8 = 0x10;
const REG_AWB: u8 = 0x80;
const AWB_EN: u8 = 0x81;
const REG_TEST_PATTERN: u8 = 0x0D;

/// Brightness range, signed luma offset.
pub const BRIGHTNESS_MIN: i32 = -128;
pub const BRIGHTNESS_MAX: i32 = 127;
pub const BRIGHTNESS_DEFAULT: i32 = 0;

/// Contrast range.
pub const CONTRAST_MIN: i32 = 0;
pub const CONTRAST_MAX: i32 = 255;
pub const CONTRAST_DEFAULT: i32 = 128;

/// Saturation range, applied to Cb and Cr alike.
pub const SATURATION_MIN: i32 = 0;
pub const SATURATION_MAX: i32 = 255;
pub const SATURATION_DEFAULT: i32 = 128;

/// Hue range: 0 is -90°, 32 is 0°, 63 is +90°.
pub const HUE_MIN: i32 = 0;
pub const HUE_MAX: i32 = 63;
pub const HUE_DEFAULT: i32 = 32;

/// Sharpness range (low nibble of the sharpness register).
pub const SHARPNESS_MIN: i32 = 0;
pub const SHARPNESS_MAX: i32 = 15;
pub const SHARPNESS_DEFAULT: i32 = 1;

/// A named adjustment and its requested value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Brightness(i32),
    Contrast(i32),
    Saturation(i32),
    Hue(i32),
    Sharpness(i32),
    BlackLevel(bool),
    AutoWhiteBalance(bool),
    TestPattern { input: AnalogInput, enable: bool },
}

impl Control {
    pub fn name(&self) -> &'static str {
        match self {
            Control::Brightness(_) => "brightness",
            Control::Contrast(_) => "contrast",
            Control::Saturation(_) => "saturation",
            Control::Hue(_) => "hue",
            Control::Sharpness(_) => "sharpness",
            Control::BlackLevel(_) => "black-level",
            Control::AutoWhiteBalance(_) => "auto-white-balance",
            Control::TestPattern { .. } => "test-pattern",
        }
    }

    fn check_range(&self) -> Result<(), Error> {
        let (value, min, max) = match *self {
            Control::Brightness(v) => (v, BRIGHTNESS_MIN, BRIGHTNESS_MAX),
            Control::Contrast(v) => (v, CONTRAST_MIN, CONTRAST_MAX),
            Control::Saturation(v) => (v, SATURATION_MIN, SATURATION_MAX),
            Control::Hue(v) => (v, HUE_MIN, HUE_MAX),
            Control::Sharpness(v) => (v, SHARPNESS_MIN, SHARPNESS_MAX),
            Control::BlackLevel(_)
            | Control::AutoWhiteBalance(_)
            | Control::TestPattern { .. } => return Ok(()),
        };
        if value < min || value > max {
            return Err(Error::UnsupportedControl(format!(
                "{} value {} out of range {}..={}",
                self.name(),
                value,
                min,
                max
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Control::Brightness(v)
            | Control::Contrast(v)
            | Control::Saturation(v)
            | Control::Hue(v)
            | Control::Sharpness(v) => write!(f, "{}={}", self.name(), v),
            Control::BlackLevel(on) | Control::AutoWhiteBalance(on) => {
                write!(f, "{}={}", self.name(), on)
            }
            Control::TestPattern { input, enable } => {
                write!(f, "{}[{}]={}", self.name(), input, enable)
            }
        }
    }
}

/// Fold the centered hue range onto the chip's native encoding, which is
/// offset from center: 32 stays put, 0..=31 maps to 33..=63, 33..=63 maps
/// to 0..=30.
pub(crate) fn hue_to_register(value: u8) -> u8 {
    if value == 32 {
        32
    } else if value < 32 {
        value + 33
    } else {
        value - 33
    }
}

/// Test-pattern enable bit for one input; 0xF0 covers all four.
fn test_pattern_mask(input: AnalogInput) -> u8 {
    match input {
        AnalogInput::Input1 => 0x80,
        AnalogInput::Input2 => 0x40,
        AnalogInput::Input3 => 0x20,
        AnalogInput::Input4 => 0x10,
        AnalogInput::All => 0xF0,
    }
}

impl<B> ChipSession<B>
where
    B: RegisterBus,
{
    /// Apply one control change. Simulated sessions validate the range and
    /// otherwise succeed without bus traffic.
    pub fn set_control(&mut self, control: Control) -> Result<(), Error> {
        control.check_range()?;

        if self.is_simulated() {
            return Ok(());
        }

        log::debug!("set {}", control);

        match control {
            Control::Brightness(v) => {
                self.bus().write(PAGE_SELECT, PAGE_DECODER_ALL)?;
                self.bus().write(REG_BRIGHTNESS, v as i8 as u8)?;
            }
            Control::Contrast(v) => {
                self.bus().write(PAGE_SELECT, PAGE_DECODER_ALL)?;
                self.bus().write(REG_CONTRAST, v as u8)?;
            }
            Control::Saturation(v) => {
                self.bus().write(PAGE_SELECT, PAGE_DECODER_ALL)?;
                self.bus().write(REG_SATURATION_CB, v as u8)?;
                self.bus().write(REG_SATURATION_CR, v as u8)?;
            }
            Control::Hue(v) => {
                self.bus().write(PAGE_SELECT, PAGE_DECODER_1)?;
                self.bus().write(REG_HUE, hue_to_register(v as u8))?;
            }
            Control::Sharpness(v) => {
                self.bus().write(PAGE_SELECT, PAGE_DECODER_ALL)?;
                let reg = self.bus().read(REG_SHARPNESS)?;
                self.bus().write(REG_SHARPNESS, (reg & 0xF0) | v as u8)?;
            }
            Control::BlackLevel(on) => {
                self.bus().write(PAGE_SELECT, PAGE_DECODER_ALL)?;
                let reg = self.bus().read(REG_BLACK_LEVEL)?;
                let reg = if on { reg | BLACK_LEVEL_EN } else { reg & !BLACK_LEVEL_EN };
                self.bus().write(REG_BLACK_LEVEL, reg)?;
            }
            Control::AutoWhiteBalance(on) => {
                self.bus().write(PAGE_SELECT, PAGE_DECODER_ALL)?;
                let reg = self.bus().read(REG_AWB)?;
                let reg = if on { reg | AWB_EN } else { reg & !AWB_EN };
                self.bus().write(REG_AWB, reg)?;
            }
            Control::TestPattern { input, enable } => {
                let mask = test_pattern_mask(input);
                self.bus().write(PAGE_SELECT, PAGE_MIPI)?;
                let reg = self.bus().read(REG_TEST_PATTERN)?;
                let reg = if enable { reg | mask } else { reg & !mask };
                self.bus().write(REG_TEST_PATTERN, reg)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::MockBus;

    #[test]
    fn hue_forward_mapping() {
        // exact forward table, not a round-trip: 63 maps onto 30, whose
        // inverse path differs
        assert_eq!(hue_to_register(0), 33);
        assert_eq!(hue_to_register(31), 63);
        assert_eq!(hue_to_register(32), 32);
        assert_eq!(hue_to_register(33), 0);
        assert_eq!(hue_to_register(63), 30);
    }

    #[test]
    fn saturation_writes_cb_and_cr() {
        let mut session = ChipSession::new(MockBus::new());
        session.set_control(Control::Saturation(200)).unwrap();
        let writes = session.bus().writes();
        assert_eq!(
            writes,
            vec![
                (PAGE_SELECT, PAGE_DECODER_ALL),
                (REG_SATURATION_CB, 200),
                (REG_SATURATION_CR, 200),
            ]
        );
    }

    #[test]
    fn brightness_is_signed() {
        let mut session = ChipSession::new(MockBus::new());
        session.set_control(Control::Brightness(-1)).unwrap();
        let writes = session.bus().writes();
        assert_eq!(writes.last(), Some(&(REG_BRIGHTNESS, 0xFF)));
    }

    #[test]
    fn sharpness_preserves_high_nibble() {
        let mut bus = MockBus::new();
        bus.expect_read(PAGE_DECODER_ALL, REG_SHARPNESS, 0xA0);
        let mut session = ChipSession::new(bus);
        session.set_control(Control::Sharpness(0x05)).unwrap();
        let writes = session.bus().writes();
        assert_eq!(writes.last(), Some(&(REG_SHARPNESS, 0xA5)));
    }

    #[test]
    fn test_pattern_all_inputs_preserves_low_nibble() {
        let mut bus = MockBus::new();
        bus.expect_read(PAGE_MIPI, REG_TEST_PATTERN, 0x0A);
        let mut session = ChipSession::new(bus);
        session
            .set_control(Control::TestPattern {
                input: AnalogInput::All,
                enable: true,
            })
            .unwrap();
        let writes = session.bus().writes();
        assert_eq!(
            writes,
            vec![(PAGE_SELECT, PAGE_MIPI), (REG_TEST_PATTERN, 0xFA)]
        );
    }

    #[test]
    fn test_pattern_disable_clears_only_the_input_bit() {
        let mut bus = MockBus::new();
        bus.expect_read(PAGE_MIPI, REG_TEST_PATTERN, 0xF0);
        let mut session = ChipSession::new(bus);
        session
            .set_control(Control::TestPattern {
                input: AnalogInput::Input2,
                enable: false,
            })
            .unwrap();
        let writes = session.bus().writes();
        assert_eq!(writes.last(), Some(&(REG_TEST_PATTERN, 0xB0)));
    }

    #[test]
    fn hue_selects_the_channel1_bank() {
        let mut session = ChipSession::new(MockBus::new());
        session.set_control(Control::Hue(0)).unwrap();
        let writes = session.bus().writes();
        assert_eq!(writes, vec![(PAGE_SELECT, PAGE_DECODER_1), (REG_HUE, 33)]);
    }

    #[test]
    fn out_of_range_values_are_rejected_before_bus_traffic() {
        let mut session = ChipSession::new(MockBus::new());
        for control in [
            Control::Brightness(128),
            Control::Contrast(-1),
            Control::Hue(64),
            Control::Sharpness(16),
            Control::Saturation(300),
        ] {
            let err = session.set_control(control).unwrap_err();
            assert!(matches!(err, Error::UnsupportedControl(_)));
        }
        assert_eq!(session.bus().transactions(), 0);
    }
}

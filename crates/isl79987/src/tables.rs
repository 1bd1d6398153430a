// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Static register programming tables
//!
//! Pure data, applied in order through [`crate::bus::RegisterBus`]. Entries
//! at address 0xFF are bank selects; everything after one is relative to the
//! selected bank. Values come from the Renesas reference configuration for
//! the supported channel/lane layouts and are not derived at runtime.
//!
//! Register map notes:
//! - R002\[7\] SW_RST, self-clearing
//! - R002\[4\] MIPI reset, R002\[3:0\] channel enables
//! - R1xx..R4xx per-channel decoder banks, RFxx broadcasts to all four
//! - R500\[7\] MIPI power-down
//! - R504 virtual channel map, two bits per channel (default 0xE4)
//! - R506\[0\] pseudo-frame mode, R50D\[7:4\] test pattern enables

use crate::bus::RegPair;
use crate::regs;

/// Bank reset / default configuration, applied first on every download.
pub static DEFAULT: &[RegPair] = regs![
    (0xFF, 0x00),
    (0x03, 0x00),
    (0x0D, 0xC9),
    (0x0E, 0xC9),
    (0x10, 0x01),
    (0x11, 0x03),
    (0x12, 0x00),
    (0x13, 0x00),
    (0x14, 0x00),
    (0xFF, 0x05),
    (0x00, 0x02),
    (0x01, 0x85),
    (0x02, 0xA0),
    (0x03, 0x18),
    (0x04, 0xE4),
    (0x05, 0x40),
    (0x06, 0x40),
    (0x10, 0x05),
    (0x11, 0xA0),
    (0x20, 0x00),
    (0x21, 0x0C),
    (0x22, 0x00),
    (0x23, 0x00),
    (0x24, 0x00),
    (0x25, 0xF0),
    (0x26, 0x00),
    (0x27, 0x00),
    (0x2A, 0x00),
    (0x2B, 0x19),
    (0x2C, 0x18),
    (0x2D, 0xF1),
    (0x2E, 0x00),
    (0x2F, 0xF1),
    (0x30, 0x00),
    (0x31, 0x00),
    (0x32, 0x00),
    (0x33, 0xC0),
    (0x34, 0x18),
    (0x35, 0x00),
    (0x36, 0x00),
];

/// Decoder calibration, broadcast to all four channel decoders.
pub static DECODER_CALIBRATION: &[RegPair] = regs![
    (0xFF, 0x0F),
    (0x2F, 0xE6),
    (0x33, 0x85),
    (0x3D, 0x08),
    (0xE7, 0x00),
];

/// NTSC-family decoder timing (525/60 sources).
pub static DECODER_NTSC: &[RegPair] = regs![
    (0xFF, 0x0F),
    (0x07, 0x02),
    (0x08, 0x14),
    (0x09, 0xF0),
    (0x0A, 0x13),
    (0x0B, 0xD0),
    (0x2F, 0xE6),
    (0x33, 0x85),
    (0x3D, 0x08),
    (0xE7, 0x00),
];

/// PAL-family decoder timing (625/50 sources).
///
/// vDelay (RF07[7:6]/RF08) is set to 0x16 rather than the cropping value
/// 0x19; applications crop the extra top lines themselves.
pub static DECODER_PAL: &[RegPair] = regs![
    (0xFF, 0x0F),
    (0x07, 0x12),
    (0x08, 0x16),
    (0x09, 0x20),
    (0x0A, 0x0D),
    (0x0B, 0xD0),
    (0x2F, 0xE6),
    (0x33, 0x85),
    (0x3D, 0x08),
    (0xE7, 0x00),
];

/// NTSC-family CSI-2 output timing.
pub static MIPI_NTSC: &[RegPair] = regs![
    (0xFF, 0x05),
    (0x0F, 0x80),
    (0x2C, 0x18),
    (0x2D, 0xF1),
    (0x2E, 0x00),
    (0x2F, 0xF1),
    (0x3C, 0x00),
    (0x3D, 0x1F),
];

/// PAL-family CSI-2 output timing.
pub static MIPI_PAL: &[RegPair] = regs![
    (0xFF, 0x05),
    (0x0F, 0x84),
    (0x2C, 0x19),
    (0x2D, 0x21),
    (0x2E, 0x01),
    (0x2F, 0x21),
    (0x3C, 0x01),
    (0x3D, 0x21),
];

/// Four channels over two lanes.
pub static CH4_LANE2: &[RegPair] = regs![
    (0xFF, 0x00),
    (0x07, 0x12),
    (0x08, 0x1F),
    (0x09, 0x43),
    (0x0A, 0x4F),
    (0x0B, 0x41),
    (0xFF, 0x05),
    (0x00, 0x02),
    (0x01, 0x05),
    (0x02, 0xA0),
    (0x03, 0x10),
    (0x04, 0xE4),
    (0x05, 0x00),
    (0x06, 0x00),
    (0x07, 0x2B),
    (0x08, 0x02),
    (0x09, 0x00),
    (0x0A, 0x62),
    (0x0B, 0x02),
    (0x0C, 0x36),
    (0x0D, 0x00),
    (0x0E, 0x6C),
    (0x0F, 0x80),
    (0x10, 0x05),
    (0x11, 0xA0),
    (0x12, 0x77),
    (0x13, 0x17),
    (0x14, 0x08),
    (0x15, 0x38),
    (0x16, 0x14),
    (0x17, 0xF6),
    (0x18, 0x00),
    (0x19, 0x17),
    (0x1A, 0x0A),
    (0x1B, 0x71),
    (0x1C, 0x7A),
    (0x1D, 0x0F),
    (0x1E, 0x8C),
    (0x23, 0x0A),
    (0x26, 0x08),
    (0x28, 0x01),
    (0x29, 0x0E),
    (0x2A, 0x00),
    (0x2B, 0x00),
    (0x38, 0x03),
    (0x39, 0xC0),
    (0x3A, 0x06),
    (0x3B, 0xB3),
    (0x3C, 0x00),
    (0x3D, 0xF1),
];

/// Four channels over one lane.
pub static CH4_LANE1: &[RegPair] = regs![
    (0xFF, 0x00),
    (0x07, 0x12),
    (0x08, 0x1F),
    (0x09, 0x43),
    (0x0A, 0x4F),
    (0x0B, 0x40),
    (0xFF, 0x05),
    (0x00, 0x01),
    (0x01, 0x05),
    (0x02, 0xA0),
    (0x03, 0x10),
    (0x04, 0xE4),
    (0x05, 0x00),
    (0x06, 0x00),
    (0x07, 0x2B),
    (0x08, 0x00),
    (0x09, 0x00),
    (0x0A, 0x62),
    (0x0B, 0x02),
    (0x0C, 0x36),
    (0x0D, 0x00),
    (0x0E, 0x6C),
    (0x0F, 0x80),
    (0x10, 0x05),
    (0x11, 0xA0),
    (0x12, 0x78),
    (0x13, 0x17),
    (0x14, 0x07),
    (0x15, 0x36),
    (0x16, 0x10),
    (0x17, 0xF6),
    (0x18, 0x00),
    (0x19, 0x17),
    (0x1A, 0x0A),
    (0x1B, 0x71),
    (0x1C, 0x7A),
    (0x1D, 0x0F),
    (0x1E, 0x8C),
    (0x23, 0x0A),
    (0x26, 0x07),
    (0x28, 0x01),
    (0x29, 0x0E),
    (0x2A, 0x00),
    (0x2B, 0x00),
    (0x38, 0x03),
    (0x39, 0xC0),
    (0x3A, 0x06),
    (0x3B, 0xB3),
    (0x3C, 0x00),
    (0x3D, 0xF1),
];

/// Two channels over two lanes.
pub static CH2_LANE2: &[RegPair] = regs![
    (0xFF, 0x00),
    (0x07, 0x11),
    (0x08, 0x1F),
    (0x09, 0x47),
    (0x0A, 0x4F),
    (0x0B, 0x42),
    (0xFF, 0x05),
    (0x00, 0x02),
    (0x01, 0x05),
    (0x02, 0xA0),
    (0x03, 0x10),
    (0x04, 0xE4),
    (0x05, 0x00),
    (0x06, 0x00),
    (0x07, 0x24),
    (0x08, 0x02),
    (0x09, 0x00),
    (0x0A, 0x62),
    (0x0B, 0x02),
    (0x0C, 0x36),
    (0x0D, 0x00),
    (0x0E, 0x36),
    (0x0F, 0x80),
    (0x10, 0x05),
    (0x11, 0xA0),
    (0x12, 0x34),
    (0x13, 0x0F),
    (0x14, 0x06),
    (0x15, 0x24),
    (0x16, 0x11),
    (0x17, 0x70),
    (0x18, 0x00),
    (0x19, 0x17),
    (0x1A, 0x06),
    (0x1B, 0x31),
    (0x1C, 0x46),
    (0x1D, 0x08),
    (0x1E, 0x57),
    (0x23, 0x06),
    (0x26, 0x06),
    (0x28, 0x01),
    (0x29, 0x69),
    (0x2A, 0x00),
    (0x2B, 0x00),
    (0x38, 0x01),
    (0x39, 0xE0),
    (0x3A, 0x06),
    (0x3B, 0xB3),
    (0x3C, 0x00),
    (0x3D, 0xF1),
];

/// Two channels over one lane.
pub static CH2_LANE1: &[RegPair] = regs![
    (0xFF, 0x00),
    (0x07, 0x11),
    (0x08, 0x1F),
    (0x09, 0x47),
    (0x0A, 0x4F),
    (0x0B, 0x41),
    (0xFF, 0x05),
    (0x00, 0x01),
    (0x01, 0x05),
    (0x02, 0xA0),
    (0x03, 0x10),
    (0x04, 0xE4),
    (0x05, 0x00),
    (0x06, 0x00),
    (0x07, 0x1B),
    (0x08, 0x02),
    (0x09, 0x00),
    (0x0A, 0x62),
    (0x0B, 0x02),
    (0x0C, 0x36),
    (0x0D, 0x00),
    (0x0E, 0x36),
    (0x0F, 0x80),
    (0x10, 0x05),
    (0x11, 0xA0),
    (0x12, 0x34),
    (0x13, 0x07),
    (0x14, 0x02),
    (0x15, 0x1E),
    (0x16, 0x0A),
    (0x17, 0x70),
    (0x18, 0x00),
    (0x19, 0x17),
    (0x1A, 0x06),
    (0x1B, 0x31),
    (0x1C, 0x43),
    (0x1D, 0x08),
    (0x1E, 0x77),
    (0x23, 0x03),
    (0x26, 0x02),
    (0x28, 0x00),
    (0x29, 0xB4),
    (0x2A, 0x00),
    (0x2B, 0x00),
    (0x38, 0x01),
    (0x39, 0xE0),
    (0x3A, 0x06),
    (0x3B, 0xB3),
    (0x3C, 0x00),
    (0x3D, 0xF1),
];

/// Single channel, single lane.
pub static CH1_LANE1: &[RegPair] = regs![
    (0xFF, 0x00),
    (0x07, 0x00),
    (0x08, 0x1F),
    (0x09, 0x4F),
    (0x0A, 0x4F),
    (0x0B, 0x42),
    (0xFF, 0x05),
    (0x00, 0x01),
    (0x01, 0x05),
    (0x02, 0xA0),
    (0x03, 0x10),
    (0x04, 0xE4),
    (0x05, 0x00),
    (0x06, 0x00),
    (0x07, 0x17),
    (0x08, 0x00),
    (0x09, 0x00),
    (0x0A, 0x62),
    (0x0B, 0x02),
    (0x0C, 0x36),
    (0x0D, 0x00),
    (0x0E, 0x1B),
    (0x0F, 0x80),
    (0x10, 0x05),
    (0x11, 0xA0),
    (0x12, 0x12),
    (0x13, 0x05),
    (0x14, 0x02),
    (0x15, 0x0E),
    (0x16, 0x08),
    (0x17, 0x37),
    (0x18, 0x00),
    (0x19, 0x00),
    (0x1A, 0x02),
    (0x1B, 0x11),
    (0x1C, 0x22),
    (0x1D, 0x03),
    (0x1E, 0x22),
    (0x23, 0x02),
    (0x26, 0x02),
    (0x28, 0x01),
    (0x29, 0x0E),
    (0x2A, 0x00),
    (0x2B, 0x00),
    (0x38, 0x00),
    (0x39, 0xF0),
    (0x3A, 0x06),
    (0x3B, 0xB3),
    (0x3C, 0x00),
    (0x3D, 0xF1),
];

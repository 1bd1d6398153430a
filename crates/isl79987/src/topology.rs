// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Runtime topology of the bridge
//!
//! A [`Topology`] captures everything the planner needs to pick register
//! tables: how many analog inputs are active, how many CSI-2 lanes carry the
//! output, which video standard the sources use, the virtual-channel map,
//! and whether pseudo-frame stacking (optionally with histogram lines) is
//! requested.

use std::fmt;

/// Analog video standard of the connected sources.
///
/// The chip only distinguishes the 525/60 (NTSC) and 625/50 (PAL) timing
/// families when programming decoder and output tables; the finer variants
/// matter for reporting what was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoStandard {
    #[default]
    Ntsc,
    Pal,
    Secam,
    Ntsc443,
    PalM,
    PalN,
    PalNc,
    Pal60,
    Unknown,
}

impl VideoStandard {
    /// True for the 525-line/60Hz family (NTSC, NTSC 4.43, PAL-M, PAL-60).
    ///
    /// `Unknown` counts as NTSC-family, matching the chip's power-on default.
    pub fn is_525_60(&self) -> bool {
        matches!(
            self,
            VideoStandard::Ntsc
                | VideoStandard::Ntsc443
                | VideoStandard::PalM
                | VideoStandard::Pal60
                | VideoStandard::Unknown
        )
    }

    /// Active lines per field: 240 for the NTSC family, 288 for PAL.
    pub fn field_lines(&self) -> u16 {
        if self.is_525_60() {
            240
        } else {
            288
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VideoStandard::Ntsc => "NTSC",
            VideoStandard::Pal => "PAL",
            VideoStandard::Secam => "SECAM",
            VideoStandard::Ntsc443 => "NTSC-443",
            VideoStandard::PalM => "PAL-M",
            VideoStandard::PalN => "PAL-N",
            VideoStandard::PalNc => "PAL-Nc",
            VideoStandard::Pal60 => "PAL-60",
            VideoStandard::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VideoStandard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Virtual-channel map assigning CSI-2 VC0 to input 1 (chip default 0xE4,
/// requested as 0 so no map write is emitted).
pub const VC_MAP_INPUT1: u8 = 0x00;
/// VC0 to input 2 (map 00-11-10-01).
pub const VC_MAP_INPUT2: u8 = 0x39;
/// VC0 to input 3 (map 01-00-11-10).
pub const VC_MAP_INPUT3: u8 = 0x4E;
/// VC0 to input 4 (map 10-01-00-11).
pub const VC_MAP_INPUT4: u8 = 0x93;

/// Pseudo-frame line-spread patterns indexed by the low two bits of the
/// virtual-channel map. Empirical chip values; kept as an opaque lookup.
pub(crate) const PSEUDO_VC_SPREAD: [u8; 4] = [0x00, 0x55, 0xAA, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    /// active analog input channels: 1, 2 or 4
    channels: u8,

    /// CSI-2 data lanes: 1 or 2
    lanes: u8,

    /// video standard of the connected sources
    standard: VideoStandard,

    /// virtual-channel map, two bits per channel; 0 keeps the chip default
    virtual_channels: u8,

    /// pseudo-frame stacking depth: 0 (off), 1, 2 or 4
    pseudo_frame_depth: u8,

    /// reserve one histogram line per stacked frame
    histogram: bool,
}

impl Topology {
    pub fn with_channels(self, channels: u8) -> Topology {
        Topology { channels, ..self }.clamped()
    }

    pub fn with_lanes(self, lanes: u8) -> Topology {
        Topology { lanes, ..self }.clamped()
    }

    pub fn with_standard(self, standard: VideoStandard) -> Topology {
        Topology { standard, ..self }
    }

    pub fn with_virtual_channels(self, virtual_channels: u8) -> Topology {
        Topology {
            virtual_channels,
            ..self
        }
    }

    pub fn with_pseudo_frame(self, depth: u8) -> Topology {
        Topology {
            pseudo_frame_depth: depth,
            ..self
        }
    }

    pub fn with_histogram(self, histogram: bool) -> Topology {
        Topology { histogram, ..self }
    }

    /// A single channel only ever drives one lane. Clamped rather than
    /// rejected, matching the chip bring-up behavior.
    fn clamped(mut self) -> Topology {
        if self.channels == 1 && self.lanes == 2 {
            log::debug!("1 channel supports only 1 lane, clamping");
            self.lanes = 1;
        }
        self
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn lanes(&self) -> u8 {
        self.lanes
    }

    pub fn standard(&self) -> VideoStandard {
        self.standard
    }

    pub fn virtual_channels(&self) -> u8 {
        self.virtual_channels
    }

    pub fn pseudo_frame_depth(&self) -> u8 {
        self.pseudo_frame_depth
    }

    pub fn histogram(&self) -> bool {
        self.histogram
    }

    /// CSI-2 pixel rate this layout produces, for the downstream receiver.
    pub fn pixel_rate(&self) -> u64 {
        self.channels as u64 * 13_500_000
    }

    /// Picture aspect ratio; 4:3 in both timing families.
    pub fn aspect_ratio(&self) -> (u32, u32) {
        (4, 3)
    }
}

impl Default for Topology {
    fn default() -> Topology {
        Topology {
            channels: 4,
            lanes: 2,
            standard: VideoStandard::Ntsc,
            virtual_channels: VC_MAP_INPUT1,
            pseudo_frame_depth: 0,
            histogram: false,
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}ch/{}lane {} vc:0x{:02X}",
            self.channels, self.lanes, self.standard, self.virtual_channels
        )?;
        if self.pseudo_frame_depth > 0 {
            write!(
                f,
                " pseudo:{}{}",
                self.pseudo_frame_depth,
                if self.histogram { "+histo" } else { "" }
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_channel_clamps_to_one_lane() {
        let topo = Topology::default().with_channels(1).with_lanes(2);
        assert_eq!(topo.channels(), 1);
        assert_eq!(topo.lanes(), 1);

        // order of the builder calls must not matter
        let topo = Topology::default().with_lanes(2).with_channels(1);
        assert_eq!(topo.lanes(), 1);
    }

    #[test]
    fn standard_families() {
        assert!(VideoStandard::Ntsc.is_525_60());
        assert!(VideoStandard::PalM.is_525_60());
        assert!(VideoStandard::Pal60.is_525_60());
        assert!(!VideoStandard::Pal.is_525_60());
        assert!(!VideoStandard::Secam.is_525_60());
        assert!(!VideoStandard::PalNc.is_525_60());
        assert_eq!(VideoStandard::Pal.field_lines(), 288);
        assert_eq!(VideoStandard::Ntsc.field_lines(), 240);
    }

    #[test]
    fn pixel_rate_scales_with_channels() {
        assert_eq!(Topology::default().pixel_rate(), 54_000_000);
        assert_eq!(
            Topology::default().with_channels(1).pixel_rate(),
            13_500_000
        );
    }
}

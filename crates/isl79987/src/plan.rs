// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Register sequence planning
//!
//! [`plan`] is a pure function from a [`Topology`] to the ordered set of
//! register sequences a download must apply. No bus traffic happens here;
//! invalid channel/lane combinations are rejected before a single byte is
//! written.

use crate::bus::{RegPair, PAGE_SELECT};
use crate::tables;
use crate::topology::{Topology, PSEUDO_VC_SPREAD};
use crate::Error;

/// One planned sequence: a static table or a computed run of writes.
#[derive(Debug, Clone)]
pub enum Sequence {
    Table(&'static [RegPair]),
    Writes(Vec<RegPair>),
}

impl Sequence {
    pub fn pairs(&self) -> &[RegPair] {
        match self {
            Sequence::Table(t) => t,
            Sequence::Writes(w) => w,
        }
    }
}

/// Ordered download plan for one topology.
///
/// `defaults` is applied first, between the all-reset and the
/// channel-enable-clear steps; `sequences` follows in order. The optional
/// `pseudo_frame` tail is applied last and is pure writes; the
/// frame-buffering mode disable that precedes it is a read-modify-write and
/// stays with the controller.
#[derive(Debug, Clone)]
pub struct DownloadPlan {
    pub defaults: &'static [RegPair],
    pub sequences: Vec<Sequence>,
    pub pseudo_frame: Option<Vec<RegPair>>,
}

/// Total output line count in pseudo-frame mode: one field of lines per
/// stacked frame, plus one histogram line per frame when enabled.
pub fn pseudo_frame_lines(topo: &Topology) -> u16 {
    let depth = topo.pseudo_frame_depth() as u16;
    let mut lines = depth * topo.standard().field_lines();
    if topo.histogram() {
        lines += depth;
    }
    lines
}

/// Select the register sequences for `topo`, in application order.
pub fn plan(topo: &Topology) -> Result<DownloadPlan, Error> {
    let channel_lane = match (topo.channels(), topo.lanes()) {
        (1, 1) => tables::CH1_LANE1,
        (2, 1) => tables::CH2_LANE1,
        (2, 2) => tables::CH2_LANE2,
        (4, 1) => tables::CH4_LANE1,
        (4, 2) => tables::CH4_LANE2,
        (channels, lanes) => return Err(Error::UnsupportedTopology { channels, lanes }),
    };

    let (decoder_std, mipi_std) = if topo.standard().is_525_60() {
        (tables::DECODER_NTSC, tables::MIPI_NTSC)
    } else {
        (tables::DECODER_PAL, tables::MIPI_PAL)
    };

    let mut sequences = vec![
        Sequence::Table(tables::DECODER_CALIBRATION),
        Sequence::Table(decoder_std),
        Sequence::Table(channel_lane),
    ];

    if topo.virtual_channels() != 0 {
        sequences.push(Sequence::Writes(vec![
            RegPair { reg: PAGE_SELECT, value: 0x05 },
            RegPair { reg: 0x04, value: topo.virtual_channels() },
        ]));
    }

    sequences.push(Sequence::Table(mipi_std));

    let pseudo_frame = if topo.pseudo_frame_depth() > 0 {
        Some(pseudo_frame_writes(topo))
    } else {
        None
    };

    Ok(DownloadPlan {
        defaults: tables::DEFAULT,
        sequences,
        pseudo_frame,
    })
}

/// Pseudo-frame programming: histogram enable (one reserved line per stacked
/// frame), fixed line numbering with line spread, and the total line count,
/// high byte first.
fn pseudo_frame_writes(topo: &Topology) -> Vec<RegPair> {
    let lines = pseudo_frame_lines(topo);
    let spread = PSEUDO_VC_SPREAD[(topo.virtual_channels() & 0x03) as usize];

    let mut writes = Vec::with_capacity(7);
    if topo.histogram() {
        writes.push(RegPair { reg: PAGE_SELECT, value: 0x0F });
        writes.push(RegPair { reg: 0xE7, value: 0x01 });
    }
    writes.push(RegPair { reg: PAGE_SELECT, value: 0x05 });
    writes.push(RegPair { reg: 0x06, value: 0x61 });
    writes.push(RegPair { reg: 0x04, value: spread });
    writes.push(RegPair { reg: 0x38, value: (lines >> 8) as u8 });
    writes.push(RegPair { reg: 0x39, value: (lines & 0xFF) as u8 });
    writes
}

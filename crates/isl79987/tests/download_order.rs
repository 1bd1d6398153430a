// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Whole-download transaction ordering against a mock bus.

use isl79987::bus::{MockBus, RegPair, PAGE_SELECT};
use isl79987::chip::ChipSession;
use isl79987::tables;
use isl79987::topology::{Topology, VideoStandard, VC_MAP_INPUT2};

const REG_CONTROL: u8 = 0x02;

fn pairs(table: &[RegPair]) -> Vec<(u8, u8)> {
    table.iter().map(|p| (p.reg, p.value)).collect()
}

/// Control-register read-modify-write; unscripted mock reads return zero,
/// so the written value is the mask applied to zero.
fn control_rmw(expected: &mut Vec<(u8, u8)>, value: u8) {
    expected.push((PAGE_SELECT, 0x00));
    expected.push((REG_CONTROL, value));
}

#[test]
fn default_topology_downloads_in_canonical_order() {
    let mut session = ChipSession::new(MockBus::new());
    session.download(&Topology::default()).unwrap();

    let mut expected = Vec::new();
    // hold the output reset with every channel enabled
    control_rmw(&mut expected, 0x1F);
    expected.extend(pairs(tables::DEFAULT));
    // drop the channel enables before reprogramming the decoders
    control_rmw(&mut expected, 0x00);
    expected.extend(pairs(tables::DECODER_CALIBRATION));
    expected.extend(pairs(tables::DECODER_NTSC));
    expected.extend(pairs(tables::CH4_LANE2));
    expected.extend(pairs(tables::MIPI_NTSC));
    // release the output reset last
    control_rmw(&mut expected, 0x00);

    assert_eq!(session.release().writes(), expected);
}

#[test]
fn pal_two_channel_single_lane_uses_pal_tables() {
    let topo = Topology::default()
        .with_channels(2)
        .with_lanes(1)
        .with_standard(VideoStandard::Pal);
    let mut session = ChipSession::new(MockBus::new());
    session.download(&topo).unwrap();

    let mut expected = Vec::new();
    control_rmw(&mut expected, 0x1F);
    expected.extend(pairs(tables::DEFAULT));
    control_rmw(&mut expected, 0x00);
    expected.extend(pairs(tables::DECODER_CALIBRATION));
    expected.extend(pairs(tables::DECODER_PAL));
    expected.extend(pairs(tables::CH2_LANE1));
    expected.extend(pairs(tables::MIPI_PAL));
    control_rmw(&mut expected, 0x00);

    assert_eq!(session.release().writes(), expected);
}

#[test]
fn virtual_channels_and_pseudo_frame_extend_the_download() {
    let topo = Topology::default()
        .with_standard(VideoStandard::Pal)
        .with_virtual_channels(VC_MAP_INPUT2)
        .with_pseudo_frame(2)
        .with_histogram(true);

    let mut bus = MockBus::new();
    // frame-buffering mode register reads back fully set
    bus.expect_read(0x05, 0x01, 0xFF);
    let mut session = ChipSession::new(bus);
    session.download(&topo).unwrap();

    let mut expected = Vec::new();
    control_rmw(&mut expected, 0x1F);
    expected.extend(pairs(tables::DEFAULT));
    control_rmw(&mut expected, 0x00);
    expected.extend(pairs(tables::DECODER_CALIBRATION));
    expected.extend(pairs(tables::DECODER_PAL));
    expected.extend(pairs(tables::CH4_LANE2));
    // virtual-channel remap ahead of the output tables
    expected.push((PAGE_SELECT, 0x05));
    expected.push((0x04, VC_MAP_INPUT2));
    expected.extend(pairs(tables::MIPI_PAL));
    // frame mode dropped before the stacker is programmed
    expected.push((PAGE_SELECT, 0x05));
    expected.push((0x01, 0xDF));
    // histogram reserves one line per stacked frame
    expected.push((PAGE_SELECT, 0x0F));
    expected.push((0xE7, 0x01));
    expected.push((PAGE_SELECT, 0x05));
    expected.push((0x06, 0x61));
    expected.push((0x04, 0x55));
    // 2 * 288 + 2 = 578 lines
    expected.push((0x38, 0x02));
    expected.push((0x39, 0x42));
    control_rmw(&mut expected, 0x00);

    assert_eq!(session.release().writes(), expected);
}

#[test]
fn unsupported_topology_issues_no_traffic() {
    let topo = Topology::default().with_channels(3);
    let mut session = ChipSession::new(MockBus::new());
    session.download(&topo).unwrap_err();
    assert_eq!(session.release().transactions(), 0);
}

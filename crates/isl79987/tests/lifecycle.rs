// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Full probe-to-stream lifecycle over a mock bus.

use isl79987::bus::{MockBus, Transaction, PAGE_SELECT};
use isl79987::chip::{ChipSession, Identity, CHIP_ID, SIMULATED_READ};
use isl79987::control::Control;
use isl79987::detect::AnalogInput;
use isl79987::topology::{Topology, VideoStandard};
use isl79987::Error;

const AFE_STATUS: u8 = 0x03;
const STATUS_VDLOSS: u8 = 0x80;
const STATUS_FIELD: u8 = 0x10;
const STATUS_LOCK: u8 = 0x68;

#[test]
fn probe_detect_download_stream() {
    let mut bus = MockBus::new();
    bus.expect_read(0x00, 0x00, CHIP_ID);
    bus.expect_read(0x00, 0x01, 0x02);
    // input 1 locked on an NTSC source
    bus.expect_read(0x01, AFE_STATUS, STATUS_LOCK);
    bus.expect_read(0x01, 0x1C, 0x00);
    // stream start: one poll lands in the odd field, the next in the even
    bus.expect_read(0x01, AFE_STATUS, 0x00);
    bus.expect_read(0x01, AFE_STATUS, STATUS_FIELD);

    let mut session = ChipSession::new(bus);
    assert_eq!(
        session.identify().unwrap(),
        Identity::Chip { id: CHIP_ID, revision: 0x02 }
    );

    let status = session.detect(AnalogInput::Input1).unwrap();
    assert!(status.present);
    assert_eq!(status.standard, VideoStandard::Ntsc);

    let topo = Topology::default().with_standard(status.standard);
    session.download(&topo).unwrap();
    assert_eq!(session.topology(), &topo);

    session.start_stream().unwrap();
    assert!(session.is_streaming());

    // a second start while streaming is a no-op; the status register now
    // reads back stuck in the even field, so a real re-sync would hang
    session.start_stream().unwrap();

    session.stop_stream();
    assert!(!session.is_streaming());
}

#[test]
fn signal_loss_during_stream_start_propagates() {
    let mut bus = MockBus::new();
    bus.expect_read(0x00, 0x00, CHIP_ID);
    bus.expect_read(0x00, 0x01, 0x02);
    bus.expect_read(0x01, AFE_STATUS, STATUS_VDLOSS);

    let mut session = ChipSession::new(bus);
    session.identify().unwrap();
    session.download(&Topology::default()).unwrap();

    let err = session.start_stream().unwrap_err();
    assert!(matches!(err, Error::SignalAbsent));
    assert!(!session.is_streaming());
}

#[test]
fn suspend_resume_round_trip() {
    let mut bus = MockBus::new();
    // output-stage control reads back with the power bit clear, then set
    bus.expect_read(0x05, 0x00, 0x00);
    bus.expect_read(0x05, 0x00, 0x80);

    let mut session = ChipSession::new(bus);
    session.suspend().unwrap();
    session.resume().unwrap();

    let writes = session.release().writes();
    // suspend sets the power-down bit, resume clears it and pulses reset
    assert!(writes.contains(&(0x00, 0x80)));
    assert_eq!(
        &writes[writes.len() - 4..],
        &[
            (PAGE_SELECT, 0x05),
            (0x00, 0x00),
            (PAGE_SELECT, 0x00),
            (0x02, 0x80),
        ]
    );
}

#[test]
fn simulated_lifecycle_never_touches_the_bus() {
    let mut bus = MockBus::new();
    // wrong chip answers the identity read
    bus.expect_read(0x00, 0x00, 0x10);

    let mut session = ChipSession::new(bus);
    assert_eq!(session.identify().unwrap(), Identity::Simulated);
    let baseline = {
        let bus = session.release();
        let n = bus.transactions();
        session = ChipSession::simulated(bus);
        n
    };

    session.download(&Topology::default().with_channels(2)).unwrap();
    let status = session.detect(AnalogInput::All).unwrap();
    assert!(!status.present);
    assert_eq!(status.standard, VideoStandard::Ntsc);
    session.start_stream().unwrap();
    assert!(session.is_streaming());
    session.set_control(Control::Contrast(200)).unwrap();
    assert_eq!(session.read_register(0x00, 0x00).unwrap(), SIMULATED_READ);
    session.stop_stream();

    let bus = session.release();
    assert_eq!(bus.transactions(), baseline);
    assert!(bus
        .log()
        .iter()
        .all(|t| !matches!(t, Transaction::Write { reg: 0xFF, value: 0x05 })));
}

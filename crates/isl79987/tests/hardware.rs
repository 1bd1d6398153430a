// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Hardware smoke tests; run with `--ignored` on a board with the bridge.
//!
//! The bus path comes from the ISL79987_BUS environment variable and
//! defaults to /dev/i2c-2. Tests are serial because they share one chip.

use isl79987::bus::{I2cRegisterBus, DEFAULT_I2C_ADDRESS};
use isl79987::chip::{ChipSession, Identity};
use isl79987::detect::AnalogInput;
use isl79987::topology::Topology;
use linux_embedded_hal::I2cdev;
use serial_test::serial;

fn open_session() -> ChipSession<I2cRegisterBus<I2cdev>> {
    let path = std::env::var("ISL79987_BUS").unwrap_or_else(|_| "/dev/i2c-2".to_string());
    let i2c = I2cdev::new(&path).expect("cannot open the I2C bus");
    ChipSession::new(I2cRegisterBus::new(i2c, DEFAULT_I2C_ADDRESS))
}

#[test]
#[serial]
#[ignore = "requires an ISL79987 on the bus"]
fn chip_answers_with_its_id() {
    let mut session = open_session();
    match session.identify().unwrap() {
        Identity::Chip { id, .. } => assert_eq!(id, 0x87),
        Identity::Simulated => panic!("chip did not answer on the bus"),
    }
}

#[test]
#[serial]
#[ignore = "requires an ISL79987 on the bus"]
fn download_and_detect() {
    let mut session = open_session();
    session.identify().unwrap();
    session.download(&Topology::default()).unwrap();

    // detection must complete whether or not a source is connected
    for input in [AnalogInput::Input1, AnalogInput::Input2] {
        let status = session.detect(input).unwrap();
        println!("{}: present={} standard={}", input, status.present, status.standard);
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Userspace driver for the Renesas ISL79987 analog video decoder
//!
//! The ISL79987 bridges up to four analog composite video inputs (CVBS) onto
//! a one- or two-lane MIPI CSI-2 output, tagging each input with a virtual
//! channel so a downstream receiver can demultiplex them. The chip is
//! programmed over I2C through a page-banked single-byte register space:
//! writing register 0xFF selects the active bank and every following access
//! is relative to that bank.
//!
//! This crate drives the full reset → configure → stream lifecycle:
//! identification, register-table download for a given topology (channel
//! count, lane count, video standard, virtual-channel map, pseudo-frame
//! mode), signal and standard detection, field-edge synchronization at
//! stream start, and the analog picture controls.
//!
//! # Quick Start
//!
//! ```no_run
//! use isl79987::bus::I2cRegisterBus;
//! use isl79987::chip::ChipSession;
//! use isl79987::topology::{Topology, VideoStandard};
//! use linux_embedded_hal::I2cdev;
//!
//! let i2c = I2cdev::new("/dev/i2c-4")?;
//! let bus = I2cRegisterBus::new(i2c, 0x44);
//!
//! let mut session = ChipSession::new(bus);
//! session.identify()?;
//!
//! let topo = Topology::default()
//!     .with_channels(4)
//!     .with_lanes(2)
//!     .with_standard(VideoStandard::Ntsc);
//! session.download(&topo)?;
//! session.start_stream()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Simulated mode
//!
//! If identification fails the session degrades permanently into simulated
//! mode: every subsequent operation succeeds without touching the bus and
//! returns deterministic placeholder data. This keeps bring-up tooling usable
//! on boards where the bridge is absent; only re-creating the session can
//! leave simulated mode.

use std::{error, fmt};

/// Error type for driver operations
#[derive(Debug)]
pub enum Error {
    /// Transport failure on a single register transaction
    Bus(BusError),

    /// Channel/lane combination the chip cannot produce
    UnsupportedTopology { channels: u8, lanes: u8 },

    /// Identity register did not match the expected chip id
    NotIdentified { id: u8 },

    /// Control identifier or value the chip does not implement
    UnsupportedControl(String),

    /// Field wait aborted because the video-loss bit was observed
    SignalAbsent,
}

/// Failed register transaction, with the position inside a sequence download
/// when the failure happened mid-table.
#[derive(Debug)]
pub struct BusError {
    /// Register address of the failed transaction
    pub reg: u8,
    /// Index of the failing pair within a `write_sequence` call
    pub index: Option<usize>,
    /// Transport-level detail from the underlying bus
    pub detail: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Bus(err) => write!(f, "register bus error: {}", err),
            Error::UnsupportedTopology { channels, lanes } => {
                write!(f, "unsupported topology: {} channels on {} lanes", channels, lanes)
            }
            Error::NotIdentified { id } => {
                write!(f, "chip not identified: id register read 0x{:02X}", id)
            }
            Error::UnsupportedControl(name) => write!(f, "unsupported control: {}", name),
            Error::SignalAbsent => write!(f, "video signal absent"),
        }
    }
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "reg 0x{:02X} (sequence entry {}): {}", self.reg, i, self.detail),
            None => write!(f, "reg 0x{:02X}: {}", self.reg, self.detail),
        }
    }
}

impl error::Error for Error {}

impl From<BusError> for Error {
    fn from(err: BusError) -> Self {
        Error::Bus(err)
    }
}

/// The bus module provides the page-banked register bus abstraction.
pub mod bus;

/// The tables module holds the static register programming tables.
pub mod tables;

/// The topology module describes the runtime channel/lane/standard layout.
pub mod topology;

/// The plan module selects register sequences for a topology.
pub mod plan;

/// The chip module owns the chip session and configuration lifecycle.
pub mod chip;

/// The detect module reports signal presence and detected video standard.
pub mod detect;

/// The field module synchronizes to analog field edges at stream start.
pub mod field;

/// The control module exposes the analog picture adjustments.
pub mod control;

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Chip session and configuration lifecycle
//!
//! A [`ChipSession`] owns exclusive access to the register bus for one
//! physical chip. Ownership is the concurrency model: every logical
//! operation takes `&mut self`, so a full table download or a field wait is
//! a single critical section and bank selects can never interleave between
//! callers. Share a session across threads by wrapping it in a `Mutex` held
//! for the whole logical operation, never per transaction.
//!
//! Lifecycle: create → [`identify`](ChipSession::identify) →
//! [`download`](ChipSession::download) →
//! [`start_stream`](ChipSession::start_stream). Identification failure is
//! not fatal: the session falls back permanently into simulated mode, where
//! every operation succeeds without bus traffic and reads return placeholder
//! data.

use crate::bus::{RegisterBus, PAGE_SELECT};
use crate::plan;
use crate::topology::Topology;
use crate::Error;
use std::thread;
use std::time::Duration;

/// Expected value of the identity register (bank 0, register 0x00).
pub const CHIP_ID: u8 = 0x87;

/// Placeholder value simulated-mode register reads return.
pub const SIMULATED_READ: u8 = 0xBF;

const REG_IDENT: u8 = 0x00;
const REG_REVISION: u8 = 0x01;

/// Bank 0 control register: [7] soft reset (self-clearing), [4] MIPI output
/// reset, [3:0] channel enables.
const REG_CONTROL: u8 = 0x02;
const CONTROL_SW_RESET: u8 = 0x80;
const CONTROL_MIPI_RESET: u8 = 0x10;
const CONTROL_CHANNEL_MASK: u8 = 0x0F;

/// Bank 5 output-stage control: [7] MIPI power down.
const REG_MIPI_POWER: u8 = 0x00;
const MIPI_POWER_DOWN: u8 = 0x80;

/// Bank 5 frame-buffering control: [5] frame mode.
const REG_FRAME_MODE: u8 = 0x01;
const FRAME_MODE_EN: u8 = 0x20;

/// Output settle time after releasing the MIPI reset at stream start;
/// roughly one 60Hz field period, applied twice.
const STREAM_SETTLE: Duration = Duration::from_micros(16_600);

/// What [`ChipSession::identify`] found on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// The expected chip answered; revision is informational only.
    Chip { id: u8, revision: u8 },
    /// Identification failed; the session is now simulated.
    Simulated,
}

/// How [`ChipSession::set_lane_reset`] manipulates the control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneReset {
    /// Release the MIPI output reset
    ClearMipiReset,
    /// Hold the MIPI output in reset
    SetMipiReset,
    /// Disable all channel outputs
    ClearChannels,
    /// Release reset and disable channels
    ClearAll,
    /// Hold reset and enable all channels
    SetAll,
}

impl LaneReset {
    fn apply(&self, control: u8) -> u8 {
        match self {
            LaneReset::ClearMipiReset => control & !CONTROL_MIPI_RESET,
            LaneReset::SetMipiReset => control | CONTROL_MIPI_RESET,
            LaneReset::ClearChannels => control & !CONTROL_CHANNEL_MASK,
            LaneReset::ClearAll => control & !(CONTROL_MIPI_RESET | CONTROL_CHANNEL_MASK),
            LaneReset::SetAll => control | CONTROL_MIPI_RESET | CONTROL_CHANNEL_MASK,
        }
    }
}

/// Exclusive session with one bridge chip.
#[derive(Debug)]
pub struct ChipSession<B> {
    bus: B,
    identified: bool,
    simulated: bool,
    topology: Topology,
    streaming: bool,
}

impl<B> ChipSession<B>
where
    B: RegisterBus,
{
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            identified: false,
            simulated: false,
            topology: Topology::default(),
            streaming: false,
        }
    }

    /// Create a session that never touches the bus. Equivalent to a failed
    /// identification, useful on boards where the bridge is absent.
    pub fn simulated(bus: B) -> Self {
        let mut session = Self::new(bus);
        session.simulated = true;
        session
    }

    /// Whether the session fell back to simulated mode. There is no way
    /// back to hardware mode short of creating a new session.
    pub fn is_simulated(&self) -> bool {
        self.simulated
    }

    pub fn is_identified(&self) -> bool {
        self.identified
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Topology last applied through [`download`](Self::download). The
    /// effective lane count and virtual-channel map for the downstream
    /// CSI-2 receiver come from here.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub(crate) fn bus(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Check the identity register against [`CHIP_ID`].
    ///
    /// A mismatch is logged and degrades the session permanently into
    /// simulated mode rather than failing; only transport errors surface as
    /// errors.
    pub fn identify(&mut self) -> Result<Identity, Error> {
        if self.simulated {
            return Ok(Identity::Simulated);
        }

        self.bus.write(PAGE_SELECT, 0x00)?;
        let id = self.bus.read(REG_IDENT)?;
        if id != CHIP_ID {
            log::warn!(
                "isl79987 not found, id register read 0x{:02X}; falling back to simulated mode",
                id
            );
            self.simulated = true;
            return Ok(Identity::Simulated);
        }

        let revision = self.bus.read(REG_REVISION)?;
        log::info!("isl79987 id 0x{:02X} rev 0x{:02X} found", id, revision);
        self.identified = true;
        Ok(Identity::Chip { id, revision })
    }

    /// Pulse the self-clearing soft-reset bit. No polling is needed; the
    /// hardware clears it on its own.
    pub fn soft_reset(&mut self) -> Result<(), Error> {
        if self.simulated {
            return Ok(());
        }
        self.bus.write(PAGE_SELECT, 0x00)?;
        let control = self.bus.read(REG_CONTROL)?;
        self.bus.write(REG_CONTROL, control | CONTROL_SW_RESET)?;
        Ok(())
    }

    /// Read-modify-write the MIPI reset and channel-enable bits, gating the
    /// serial output during reconfiguration.
    pub fn set_lane_reset(&mut self, mode: LaneReset) -> Result<(), Error> {
        if self.simulated {
            return Ok(());
        }
        self.bus.write(PAGE_SELECT, 0x00)?;
        let control = self.bus.read(REG_CONTROL)?;
        self.bus.write(REG_CONTROL, mode.apply(control))?;
        Ok(())
    }

    /// Download the full register configuration for `topo`.
    ///
    /// Order: hold reset with all channels enabled, defaults, disable
    /// channels, decoder calibration, standard decoder table, channel/lane
    /// table, optional virtual-channel map, standard output table, optional
    /// pseudo-frame programming, release the MIPI reset.
    ///
    /// A bus failure aborts the download where it happened; the chip's
    /// register state is then undefined and the documented recovery is to
    /// run `download` again. The session stays non-streaming either way.
    pub fn download(&mut self, topo: &Topology) -> Result<(), Error> {
        let plan = plan::plan(topo)?;

        if self.simulated {
            self.topology = *topo;
            return Ok(());
        }

        log::debug!("downloading registers for {}", topo);

        self.set_lane_reset(LaneReset::SetAll)?;
        self.bus.write_sequence(plan.defaults)?;
        self.set_lane_reset(LaneReset::ClearChannels)?;

        for seq in &plan.sequences {
            self.bus.write_sequence(seq.pairs())?;
        }

        if let Some(pseudo) = &plan.pseudo_frame {
            // frame buffering and pseudo-frame stacking are mutually
            // exclusive; drop frame mode before enabling the stacker
            self.bus.write(PAGE_SELECT, 0x05)?;
            let mode = self.bus.read(REG_FRAME_MODE)?;
            self.bus.write(REG_FRAME_MODE, mode & !FRAME_MODE_EN)?;
            self.bus.write_sequence(pseudo)?;
        }

        self.set_lane_reset(LaneReset::ClearMipiReset)?;

        self.topology = *topo;
        Ok(())
    }

    /// Toggle the output-stage power-down bit. Independent of the streaming
    /// state; used for suspend/resume.
    pub fn set_power(&mut self, on: bool) -> Result<(), Error> {
        if self.simulated {
            return Ok(());
        }
        self.bus.write(PAGE_SELECT, 0x05)?;
        let reg = self.bus.read(REG_MIPI_POWER)?;
        let reg = if on {
            reg & !MIPI_POWER_DOWN
        } else {
            reg | MIPI_POWER_DOWN
        };
        self.bus.write(REG_MIPI_POWER, reg)?;
        Ok(())
    }

    /// Power the output stage down for system suspend.
    pub fn suspend(&mut self) -> Result<(), Error> {
        self.set_power(false)
    }

    /// Power the output stage back up and pulse a soft reset.
    pub fn resume(&mut self) -> Result<(), Error> {
        self.set_power(true)?;
        self.soft_reset()
    }

    /// Start streaming: hold the MIPI reset, synchronize to an even-field
    /// edge, release the reset and let the output settle for two field
    /// periods.
    ///
    /// This is one critical section: the field wait issues many short bus
    /// transactions and no other register access may interleave with it.
    /// Returns [`Error::SignalAbsent`] (and stays non-streaming) when the
    /// video-loss bit is observed during the wait; detection should be
    /// retried before another streaming attempt.
    pub fn start_stream(&mut self) -> Result<(), Error> {
        if self.simulated {
            self.streaming = true;
            return Ok(());
        }
        if self.streaming {
            return Ok(());
        }

        self.set_lane_reset(LaneReset::SetMipiReset)?;
        self.wait_for_field_edge(crate::field::FieldParity::Even)?;
        self.set_lane_reset(LaneReset::ClearMipiReset)?;

        thread::sleep(STREAM_SETTLE);
        thread::sleep(STREAM_SETTLE);

        self.streaming = true;
        log::debug!("streaming started");
        Ok(())
    }

    /// Stop streaming. The chip keeps its configuration; only the session
    /// flag changes.
    pub fn stop_stream(&mut self) {
        if self.streaming {
            self.streaming = false;
            log::debug!("streaming stopped");
        }
    }

    /// Debug read of one register on one bank. Simulated sessions return
    /// [`SIMULATED_READ`].
    pub fn read_register(&mut self, page: u8, reg: u8) -> Result<u8, Error> {
        if self.simulated {
            return Ok(SIMULATED_READ);
        }
        self.bus.write(PAGE_SELECT, page)?;
        Ok(self.bus.read(reg)?)
    }

    /// Debug write of one register on one bank.
    pub fn write_register(&mut self, page: u8, reg: u8, value: u8) -> Result<(), Error> {
        if self.simulated {
            return Ok(());
        }
        self.bus.write(PAGE_SELECT, page)?;
        Ok(self.bus.write(reg, value)?)
    }

    /// Release the session and hand the bus back.
    pub fn release(self) -> B {
        self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::MockBus;

    #[test]
    fn identify_match_reads_revision() {
        let mut bus = MockBus::new();
        bus.expect_read(0x00, REG_IDENT, CHIP_ID);
        bus.expect_read(0x00, REG_REVISION, 0x01);

        let mut session = ChipSession::new(bus);
        let identity = session.identify().unwrap();
        assert_eq!(identity, Identity::Chip { id: 0x87, revision: 0x01 });
        assert!(session.is_identified());
        assert!(!session.is_simulated());
    }

    #[test]
    fn identify_mismatch_goes_simulated_permanently() {
        let mut bus = MockBus::new();
        bus.expect_read(0x00, REG_IDENT, 0x12);

        let mut session = ChipSession::new(bus);
        assert_eq!(session.identify().unwrap(), Identity::Simulated);
        assert!(session.is_simulated());

        let transactions = session.bus().transactions();

        // everything after the failed identification is a no-op
        session.soft_reset().unwrap();
        session.set_power(true).unwrap();
        session.download(&Topology::default()).unwrap();
        assert_eq!(session.read_register(0x00, REG_IDENT).unwrap(), SIMULATED_READ);
        assert_eq!(session.bus().transactions(), transactions);
    }

    #[test]
    fn soft_reset_sets_only_the_reset_bit() {
        let mut bus = MockBus::new();
        bus.expect_read(0x00, REG_CONTROL, 0x1F);

        let mut session = ChipSession::new(bus);
        session.soft_reset().unwrap();
        let writes = session.bus().writes();
        assert_eq!(writes, vec![(PAGE_SELECT, 0x00), (REG_CONTROL, 0x9F)]);
    }

    #[test]
    fn lane_reset_masks() {
        assert_eq!(LaneReset::ClearMipiReset.apply(0xFF), 0xEF);
        assert_eq!(LaneReset::SetMipiReset.apply(0x00), 0x10);
        assert_eq!(LaneReset::ClearChannels.apply(0xFF), 0xF0);
        assert_eq!(LaneReset::ClearAll.apply(0xFF), 0xE0);
        assert_eq!(LaneReset::SetAll.apply(0x00), 0x1F);
    }

    #[test]
    fn download_failure_leaves_session_non_streaming() {
        let mut bus = MockBus::new();
        bus.expect_read(0x00, REG_IDENT, CHIP_ID);
        bus.expect_read(0x00, REG_REVISION, 0x01);
        bus.fail_after(10);

        let mut session = ChipSession::new(bus);
        session.identify().unwrap();
        let requested = Topology::default().with_channels(2).with_lanes(1);
        let err = session.download(&requested).unwrap_err();
        assert!(matches!(err, Error::Bus(_)));
        assert!(!session.is_streaming());
        // the failed download must not be recorded as applied
        assert_eq!(session.topology(), &Topology::default());
    }

    #[test]
    fn power_toggles_bit7_of_output_control() {
        let mut bus = MockBus::new();
        bus.expect_read(0x05, REG_MIPI_POWER, 0x00);

        let mut session = ChipSession::new(bus);
        session.set_power(false).unwrap();
        let writes = session.bus().writes();
        assert_eq!(writes.last(), Some(&(REG_MIPI_POWER, 0x80)));
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Field-edge synchronization
//!
//! The chip raises no interrupt for field transitions, so the only way to
//! align stream start with an analog field edge is to busy-poll the decoder
//! status register. The wait is deliberately unbounded: there is no internal
//! timeout, and the only early exit is the video-loss bit. Callers needing
//! bounded latency must run the wait on a dedicated worker and compose their
//! own deadline around it; once issued, bus transactions cannot be
//! un-issued anyway.

use crate::bus::{RegisterBus, PAGE_SELECT};
use crate::chip::ChipSession;
use crate::detect::{AFE_STATUS_REG, STATUS_FIELD, STATUS_VDLOSS};
use crate::Error;

/// Target field parity for a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldParity {
    /// Wait for the transition into the even field (status bit rising)
    Even,
    /// Wait for the transition into the odd field (status bit falling)
    Odd,
}

impl<B> ChipSession<B>
where
    B: RegisterBus,
{
    /// Block until the decoder reports a field transition into `parity`.
    ///
    /// Two-phase: first poll until the parity bit leaves the target state,
    /// then poll until it enters it. This guarantees an actual edge rather
    /// than an already-matching level. Every poll checks the video-loss bit
    /// and aborts with [`Error::SignalAbsent`] the moment it is set; a
    /// field edge cannot be observed without signal.
    ///
    /// Polls decoder 1, which paces the shared output timing. Holds the
    /// session for the full wait, so no other register access can interleave.
    pub fn wait_for_field_edge(&mut self, parity: FieldParity) -> Result<(), Error> {
        if self.is_simulated() {
            return Ok(());
        }

        self.bus().write(PAGE_SELECT, 0x01)?;

        let target_set = matches!(parity, FieldParity::Even);
        self.poll_field(!target_set)?;
        self.poll_field(target_set)
    }

    /// Poll until the field bit equals `set`, aborting on video loss.
    fn poll_field(&mut self, set: bool) -> Result<(), Error> {
        loop {
            let status = self.bus().read(AFE_STATUS_REG)?;
            if status & STATUS_VDLOSS != 0 {
                return Err(Error::SignalAbsent);
            }
            if (status & STATUS_FIELD != 0) == set {
                return Ok(());
            }
        }
    }
}

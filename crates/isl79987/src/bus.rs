// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Page-banked single-byte register bus
//!
//! The ISL79987 exposes its registers as 8-bit address / 8-bit value pairs
//! behind a bank-select register: writing [`PAGE_SELECT`] (0xFF) changes the
//! active bank and every subsequent address refers to that bank until the
//! next page select. Program order is therefore load-bearing, and this layer
//! never reorders, batches, or retries transactions. Retry policy belongs to
//! the caller.

use crate::BusError;
use embedded_hal::i2c::I2c;

/// Bank-select register address. Valid in every bank.
pub const PAGE_SELECT: u8 = 0xFF;

/// One register write: (address, value)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegPair {
    pub reg: u8,
    pub value: u8,
}

/// An ordered register programming table, page selects included.
pub type RegisterSequence = [RegPair];

/// Shorthand for building static tables.
#[macro_export]
macro_rules! regs {
    ($(($reg:expr, $val:expr)),* $(,)?) => {
        &[ $( $crate::bus::RegPair { reg: $reg, value: $val } ),* ]
    };
}

/// Single-byte register transport for one chip instance.
///
/// Implementations perform exactly one bus transaction per call. A failing
/// `write_sequence` aborts at the first bad pair and reports its position;
/// registers already written stay written.
pub trait RegisterBus {
    fn write(&mut self, reg: u8, value: u8) -> Result<(), BusError>;

    fn read(&mut self, reg: u8) -> Result<u8, BusError>;

    fn write_sequence(&mut self, seq: &RegisterSequence) -> Result<(), BusError> {
        for (i, pair) in seq.iter().enumerate() {
            self.write(pair.reg, pair.value).map_err(|mut err| {
                err.index = Some(i);
                err
            })?;
        }
        Ok(())
    }
}

impl<B: RegisterBus + ?Sized> RegisterBus for Box<B> {
    fn write(&mut self, reg: u8, value: u8) -> Result<(), BusError> {
        (**self).write(reg, value)
    }

    fn read(&mut self, reg: u8) -> Result<u8, BusError> {
        (**self).read(reg)
    }

    fn write_sequence(&mut self, seq: &RegisterSequence) -> Result<(), BusError> {
        (**self).write_sequence(seq)
    }
}

/// [`RegisterBus`] over any `embedded-hal` I2C master.
///
/// The chip answers at 0x44 (0x88 in 8-bit notation); reads are a one-byte
/// address write followed by a one-byte read, matching the chip's
/// SCCB-style register protocol.
pub struct I2cRegisterBus<I2C> {
    i2c: I2C,
    address: u8,
}

/// Default 7-bit I2C address of the ISL79987.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x44;

impl<I2C> I2cRegisterBus<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Release the underlying I2C device.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> RegisterBus for I2cRegisterBus<I2C>
where
    I2C: I2c,
{
    fn write(&mut self, reg: u8, value: u8) -> Result<(), BusError> {
        log::trace!("i2c write reg 0x{:02X} = 0x{:02X}", reg, value);
        self.i2c.write(self.address, &[reg, value]).map_err(|e| BusError {
            reg,
            index: None,
            detail: format!("i2c write failed: {:?}", e),
        })
    }

    fn read(&mut self, reg: u8) -> Result<u8, BusError> {
        let mut buf = [0u8];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|e| BusError {
                reg,
                index: None,
                detail: format!("i2c read failed: {:?}", e),
            })?;
        log::trace!("i2c read reg 0x{:02X} -> 0x{:02X}", reg, buf[0]);
        Ok(buf[0])
    }
}

/// One logged bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Write { reg: u8, value: u8 },
    Read { reg: u8, value: u8 },
}

/// In-memory register bus for tests and host-side development.
///
/// Tracks the active bank by watching [`PAGE_SELECT`] writes, records every
/// transaction in order, and serves reads from scripted per-(bank, register)
/// values. Repeated reads of the same register walk through the scripted
/// values and then stick at the last one, which is what polling loops need.
#[derive(Debug, Default)]
pub struct MockBus {
    page: u8,
    log: Vec<Transaction>,
    reads: std::collections::HashMap<(u8, u8), (Vec<u8>, usize)>,
    fail_after: Option<usize>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the value returned by the next read of `reg` on `page`.
    /// Multiple calls queue values in order; the last value repeats.
    pub fn expect_read(&mut self, page: u8, reg: u8, value: u8) -> &mut Self {
        self.reads.entry((page, reg)).or_default().0.push(value);
        self
    }

    /// Fail every transaction after the first `n` have succeeded.
    pub fn fail_after(&mut self, n: usize) -> &mut Self {
        self.fail_after = Some(n);
        self
    }

    /// Every transaction issued so far, in program order.
    pub fn log(&self) -> &[Transaction] {
        &self.log
    }

    /// Writes only, as (register, value) pairs in program order.
    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.log
            .iter()
            .filter_map(|t| match t {
                Transaction::Write { reg, value } => Some((*reg, *value)),
                Transaction::Read { .. } => None,
            })
            .collect()
    }

    /// Total number of transactions issued.
    pub fn transactions(&self) -> usize {
        self.log.len()
    }

    /// The bank currently selected through [`PAGE_SELECT`].
    pub fn current_page(&self) -> u8 {
        self.page
    }

    fn check_budget(&self, reg: u8) -> Result<(), BusError> {
        if let Some(n) = self.fail_after {
            if self.log.len() >= n {
                return Err(BusError {
                    reg,
                    index: None,
                    detail: "injected fault".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl RegisterBus for MockBus {
    fn write(&mut self, reg: u8, value: u8) -> Result<(), BusError> {
        self.check_budget(reg)?;
        self.log.push(Transaction::Write { reg, value });
        if reg == PAGE_SELECT {
            self.page = value;
        }
        Ok(())
    }

    fn read(&mut self, reg: u8) -> Result<u8, BusError> {
        self.check_budget(reg)?;
        let value = match self.reads.get_mut(&(self.page, reg)) {
            Some((vals, pos)) if !vals.is_empty() => {
                let v = vals[(*pos).min(vals.len() - 1)];
                *pos += 1;
                v
            }
            _ => 0,
        };
        self.log.push(Transaction::Read { reg, value });
        Ok(value)
    }
}

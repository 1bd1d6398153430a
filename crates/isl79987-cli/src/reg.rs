// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use crate::utils::{self, BusArgs};
use clap::{Args as ClapArgs, Subcommand};
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {
    #[command(flatten)]
    bus: BusArgs,

    #[command(subcommand)]
    op: Op,
}

#[derive(Subcommand, Debug)]
enum Op {
    /// Read one register on a bank
    Read {
        /// Bank to select (0x00-0x0F)
        #[arg(value_parser = utils::parse_byte)]
        page: u8,

        /// Register address
        #[arg(value_parser = utils::parse_byte)]
        reg: u8,
    },

    /// Write one register on a bank
    Write {
        /// Bank to select (0x00-0x0F)
        #[arg(value_parser = utils::parse_byte)]
        page: u8,

        /// Register address
        #[arg(value_parser = utils::parse_byte)]
        reg: u8,

        /// Value to write
        #[arg(value_parser = utils::parse_byte)]
        value: u8,
    },
}

#[derive(Debug, Serialize)]
struct RegReport {
    page: String,
    reg: String,
    value: String,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing reg command: {:?}", args);

    let mut session = utils::open_session(&args.bus)?;
    session.identify()?;

    let (page, reg, value) = match args.op {
        Op::Read { page, reg } => {
            let value = session.read_register(page, reg)?;
            (page, reg, value)
        }
        Op::Write { page, reg, value } => {
            session.write_register(page, reg, value)?;
            (page, reg, value)
        }
    };

    let report = RegReport {
        page: format!("0x{:02X}", page),
        reg: format!("0x{:02X}", reg),
        value: format!("0x{:02X}", value),
    };

    if json {
        utils::print_json(&report)?;
    } else {
        println!("{}/{} = {}", report.page, report.reg, report.value);
    }

    Ok(())
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use crate::utils::{self, BusArgs};
use clap::Args as ClapArgs;
use isl79987::detect::AnalogInput;
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {
    #[command(flatten)]
    bus: BusArgs,

    /// Input to interrogate (1-4, or all)
    #[arg(short, long, default_value = "1", value_parser = utils::parse_input)]
    input: AnalogInput,
}

#[derive(Debug, Serialize)]
struct DetectReport {
    input: String,
    present: bool,
    standard: String,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing detect command: {:?}", args);

    let mut session = utils::open_session(&args.bus)?;
    session.identify()?;

    let status = session.detect(args.input)?;
    let report = DetectReport {
        input: args.input.to_string(),
        present: status.present,
        standard: status.standard.to_string(),
    };

    if json {
        utils::print_json(&report)?;
    } else if report.present {
        println!("{}: {} signal locked", report.input, report.standard);
    } else {
        println!("{}: no signal", report.input);
    }

    Ok(())
}

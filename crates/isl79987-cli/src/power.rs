// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use crate::utils::{self, BusArgs};
use clap::Args as ClapArgs;
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {
    #[command(flatten)]
    bus: BusArgs,

    /// Power the output stage up (resume)
    #[arg(long, conflicts_with = "off")]
    on: bool,

    /// Power the output stage down (suspend)
    #[arg(long)]
    off: bool,
}

#[derive(Debug, Serialize)]
struct PowerReport {
    powered: bool,
    simulated: bool,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing power command: {:?}", args);

    if !args.on && !args.off {
        return Err(CliError::InvalidArgs(
            "specify --on or --off".to_string(),
        ));
    }

    let mut session = utils::open_session(&args.bus)?;
    session.identify()?;

    if args.on {
        session.resume()?;
    } else {
        session.suspend()?;
    }

    let report = PowerReport {
        powered: args.on,
        simulated: session.is_simulated(),
    };

    if json {
        utils::print_json(&report)?;
    } else if report.powered {
        println!("output stage powered up");
    } else {
        println!("output stage powered down");
    }

    Ok(())
}

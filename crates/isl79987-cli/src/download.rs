// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use crate::utils::{self, BusArgs, TopologyArgs};
use clap::Args as ClapArgs;
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {
    #[command(flatten)]
    bus: BusArgs,

    #[command(flatten)]
    topology: TopologyArgs,
}

#[derive(Debug, Serialize)]
struct DownloadReport {
    channels: u8,
    lanes: u8,
    standard: String,
    pixel_rate: u64,
    simulated: bool,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing download command: {:?}", args);

    let topo = args.topology.to_topology();

    let mut session = utils::open_session(&args.bus)?;
    session.identify()?;
    session.download(&topo)?;

    let report = DownloadReport {
        channels: topo.channels(),
        lanes: topo.lanes(),
        standard: topo.standard().to_string(),
        pixel_rate: topo.pixel_rate(),
        simulated: session.is_simulated(),
    };

    if json {
        utils::print_json(&report)?;
    } else {
        println!(
            "configured {} channel(s) on {} lane(s), {} ({} px/s)",
            report.channels, report.lanes, report.standard, report.pixel_rate
        );
    }

    Ok(())
}

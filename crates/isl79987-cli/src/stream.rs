// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use crate::utils::{self, BusArgs, TopologyArgs};
use clap::Args as ClapArgs;
use isl79987::detect::AnalogInput;
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {
    #[command(flatten)]
    bus: BusArgs,

    #[command(flatten)]
    topology: TopologyArgs,

    /// Skip the signal check before starting the output
    #[arg(long)]
    force: bool,
}

#[derive(Debug, Serialize)]
struct StreamReport {
    streaming: bool,
    channels: u8,
    lanes: u8,
    standard: String,
    simulated: bool,
}

/// Full bring-up: identify, download, field-synchronized stream start.
///
/// The output keeps running after the process exits; `power --off` or a
/// fresh download stops it.
pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing stream command: {:?}", args);

    let topo = args.topology.to_topology();

    let mut session = utils::open_session(&args.bus)?;
    session.identify()?;

    if !args.force {
        let status = session.detect(AnalogInput::Input1)?;
        if !status.present && !session.is_simulated() {
            return Err(CliError::NoSignal(
                "input 1 reports no signal; use --force to start anyway".to_string(),
            ));
        }
    }

    session.download(&topo)?;
    session.start_stream()?;

    let report = StreamReport {
        streaming: session.is_streaming(),
        channels: topo.channels(),
        lanes: topo.lanes(),
        standard: topo.standard().to_string(),
        simulated: session.is_simulated(),
    };

    if json {
        utils::print_json(&report)?;
    } else {
        println!(
            "streaming {} channel(s) on {} lane(s), {}",
            report.channels, report.lanes, report.standard
        );
    }

    Ok(())
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use crate::utils::{self, BusArgs};
use clap::Args as ClapArgs;
use isl79987::chip::Identity;
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {
    #[command(flatten)]
    bus: BusArgs,
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    found: bool,
    simulated: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    revision: Option<String>,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing probe command: {:?}", args);

    let mut session = utils::open_session(&args.bus)?;
    let report = match session.identify()? {
        Identity::Chip { id, revision } => ProbeReport {
            found: true,
            simulated: false,
            id: Some(format!("0x{:02X}", id)),
            revision: Some(format!("0x{:02X}", revision)),
        },
        Identity::Simulated => ProbeReport {
            found: false,
            simulated: true,
            id: None,
            revision: None,
        },
    };

    if json {
        utils::print_json(&report)?;
    } else if report.found {
        println!(
            "ISL79987 found: id {} rev {}",
            report.id.as_deref().unwrap_or("?"),
            report.revision.as_deref().unwrap_or("?")
        );
    } else {
        println!("ISL79987 not found, session is simulated");
    }

    Ok(())
}

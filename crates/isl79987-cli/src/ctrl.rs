// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use crate::utils::{self, BusArgs};
use clap::Args as ClapArgs;
use isl79987::control::Control;
use isl79987::detect::AnalogInput;
use serde::Serialize;

#[derive(ClapArgs, Debug)]
pub struct Args {
    #[command(flatten)]
    bus: BusArgs,

    /// Brightness (-128 to 127)
    #[arg(long, allow_negative_numbers = true)]
    brightness: Option<i32>,

    /// Contrast (0 to 255)
    #[arg(long)]
    contrast: Option<i32>,

    /// Saturation (0 to 255)
    #[arg(long)]
    saturation: Option<i32>,

    /// Hue (0 to 63, 32 is neutral)
    #[arg(long)]
    hue: Option<i32>,

    /// Sharpness (0 to 15)
    #[arg(long)]
    sharpness: Option<i32>,

    /// Black level stretch on or off
    #[arg(long)]
    black_level: Option<bool>,

    /// Automatic white balance on or off
    #[arg(long)]
    awb: Option<bool>,

    /// Enable the color-bar test pattern on an input (1-4, or all)
    #[arg(long, value_parser = utils::parse_input)]
    test_pattern: Option<AnalogInput>,

    /// Disable the color-bar test pattern on an input (1-4, or all)
    #[arg(long, value_parser = utils::parse_input)]
    test_pattern_off: Option<AnalogInput>,
}

impl Args {
    fn controls(&self) -> Vec<Control> {
        let mut controls = Vec::new();
        if let Some(v) = self.brightness {
            controls.push(Control::Brightness(v));
        }
        if let Some(v) = self.contrast {
            controls.push(Control::Contrast(v));
        }
        if let Some(v) = self.saturation {
            controls.push(Control::Saturation(v));
        }
        if let Some(v) = self.hue {
            controls.push(Control::Hue(v));
        }
        if let Some(v) = self.sharpness {
            controls.push(Control::Sharpness(v));
        }
        if let Some(on) = self.black_level {
            controls.push(Control::BlackLevel(on));
        }
        if let Some(on) = self.awb {
            controls.push(Control::AutoWhiteBalance(on));
        }
        if let Some(input) = self.test_pattern {
            controls.push(Control::TestPattern { input, enable: true });
        }
        if let Some(input) = self.test_pattern_off {
            controls.push(Control::TestPattern { input, enable: false });
        }
        controls
    }
}

#[derive(Debug, Serialize)]
struct CtrlReport {
    applied: Vec<String>,
}

pub fn execute(args: Args, json: bool) -> Result<(), CliError> {
    log::debug!("Executing ctrl command: {:?}", args);

    let controls = args.controls();
    if controls.is_empty() {
        return Err(CliError::InvalidArgs(
            "no control given; see 'ctrl --help' for the available controls".to_string(),
        ));
    }

    let mut session = utils::open_session(&args.bus)?;
    session.identify()?;

    let mut applied = Vec::with_capacity(controls.len());
    for control in controls {
        session.set_control(control)?;
        applied.push(control.to_string());
    }

    if json {
        let report = CtrlReport { applied };
        utils::print_json(&report)?;
    } else {
        for name in &applied {
            println!("applied {}", name);
        }
    }

    Ok(())
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use crate::error::CliError;
use clap::Args as ClapArgs;
use isl79987::bus::{I2cRegisterBus, MockBus, RegisterBus};
use isl79987::chip::ChipSession;
use isl79987::detect::AnalogInput;
use isl79987::topology::{
    Topology, VideoStandard, VC_MAP_INPUT1, VC_MAP_INPUT2, VC_MAP_INPUT3, VC_MAP_INPUT4,
};
use linux_embedded_hal::I2cdev;
use serde::Serialize;

/// Pretty-print a report struct as JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::General(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json_str);
    Ok(())
}

/// Bus selection, shared by every subcommand.
#[derive(ClapArgs, Debug)]
pub struct BusArgs {
    /// I2C bus device path
    #[arg(short, long, default_value = "/dev/i2c-2")]
    pub bus: String,

    /// 7-bit chip address (decimal or 0x-prefixed hex)
    #[arg(short, long, default_value = "0x44", value_parser = parse_address)]
    pub address: u8,

    /// Run against a simulated chip instead of hardware
    #[arg(long)]
    pub simulate: bool,
}

/// Topology selection, shared by download and stream.
#[derive(ClapArgs, Debug)]
pub struct TopologyArgs {
    /// Number of analog inputs to bring up (1, 2 or 4)
    #[arg(short, long, default_value_t = 4)]
    pub channels: u8,

    /// Number of CSI-2 data lanes (1 or 2)
    #[arg(short, long, default_value_t = 2)]
    pub lanes: u8,

    /// Video standard (ntsc, pal, secam, ntsc443, pal-m, pal-n, pal-nc, pal60)
    #[arg(short, long, default_value = "ntsc", value_parser = parse_standard)]
    pub standard: VideoStandard,

    /// Virtual-channel remap (input1, input2, input3, input4)
    #[arg(long, value_parser = parse_vc_map)]
    pub vc_map: Option<u8>,

    /// Stack this many captures into one pseudo-frame (0 disables)
    #[arg(long, default_value_t = 0)]
    pub pseudo_frame: u8,

    /// Append one histogram line per stacked frame
    #[arg(long)]
    pub histogram: bool,
}

impl TopologyArgs {
    pub fn to_topology(&self) -> Topology {
        let mut topo = Topology::default()
            .with_channels(self.channels)
            .with_lanes(self.lanes)
            .with_standard(self.standard)
            .with_pseudo_frame(self.pseudo_frame)
            .with_histogram(self.histogram);
        if let Some(vc) = self.vc_map {
            topo = topo.with_virtual_channels(vc);
        }
        topo
    }
}

/// Open a chip session on the requested bus, or a simulated one.
///
/// The session is boxed over the bus trait so hardware and simulated
/// transports share one command path.
pub fn open_session(args: &BusArgs) -> Result<ChipSession<Box<dyn RegisterBus>>, CliError> {
    if args.simulate {
        log::info!("running against a simulated chip");
        return Ok(ChipSession::simulated(Box::new(MockBus::new())));
    }

    let i2c = I2cdev::new(&args.bus)
        .map_err(|e| CliError::ChipNotFound(format!("cannot open {}: {}", args.bus, e)))?;
    Ok(ChipSession::new(Box::new(I2cRegisterBus::new(
        i2c,
        args.address,
    ))))
}

pub fn parse_address(s: &str) -> Result<u8, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    let addr = parsed.map_err(|_| format!("invalid address '{}'", s))?;
    if addr > 0x7F {
        return Err(format!("address 0x{:02X} is not a 7-bit address", addr));
    }
    Ok(addr)
}

pub fn parse_standard(s: &str) -> Result<VideoStandard, String> {
    match s.to_ascii_lowercase().as_str() {
        "ntsc" => Ok(VideoStandard::Ntsc),
        "ntsc443" | "ntsc-443" => Ok(VideoStandard::Ntsc443),
        "pal" => Ok(VideoStandard::Pal),
        "pal-m" | "palm" => Ok(VideoStandard::PalM),
        "pal-n" | "paln" => Ok(VideoStandard::PalN),
        "pal-nc" | "palnc" => Ok(VideoStandard::PalNc),
        "pal60" | "pal-60" => Ok(VideoStandard::Pal60),
        "secam" => Ok(VideoStandard::Secam),
        _ => Err(format!("unknown video standard '{}'", s)),
    }
}

pub fn parse_vc_map(s: &str) -> Result<u8, String> {
    match s.to_ascii_lowercase().as_str() {
        "input1" | "1" => Ok(VC_MAP_INPUT1),
        "input2" | "2" => Ok(VC_MAP_INPUT2),
        "input3" | "3" => Ok(VC_MAP_INPUT3),
        "input4" | "4" => Ok(VC_MAP_INPUT4),
        _ => Err(format!("unknown virtual-channel map '{}'", s)),
    }
}

pub fn parse_input(s: &str) -> Result<AnalogInput, String> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "input1" => Ok(AnalogInput::Input1),
        "2" | "input2" => Ok(AnalogInput::Input2),
        "3" | "input3" => Ok(AnalogInput::Input3),
        "4" | "input4" => Ok(AnalogInput::Input4),
        "all" => Ok(AnalogInput::All),
        _ => Err(format!("unknown input '{}'", s)),
    }
}

/// Parse a register or value byte, decimal or 0x-prefixed hex.
pub fn parse_byte(s: &str) -> Result<u8, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else {
        s.parse()
    }
    .map_err(|_| format!("invalid byte value '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parsing() {
        assert_eq!(parse_address("0x44").unwrap(), 0x44);
        assert_eq!(parse_address("68").unwrap(), 68);
        assert!(parse_address("0x88").is_err());
        assert!(parse_address("zz").is_err());
    }

    #[test]
    fn standard_parsing_is_case_insensitive() {
        assert_eq!(parse_standard("NTSC").unwrap(), VideoStandard::Ntsc);
        assert_eq!(parse_standard("pal-nc").unwrap(), VideoStandard::PalNc);
        assert!(parse_standard("cvbs").is_err());
    }

    #[test]
    fn vc_map_names_resolve_to_remap_codes() {
        assert_eq!(parse_vc_map("input1").unwrap(), 0x00);
        assert_eq!(parse_vc_map("3").unwrap(), VC_MAP_INPUT3);
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

mod ctrl;
mod detect;
mod download;
mod error;
mod power;
mod probe;
mod reg;
mod stream;
mod utils;

use clap::{Parser, Subcommand};
use error::result_to_exit_code;
use std::process::ExitCode;

/// ISL79987 CLI - Analog video decoder bring-up and debug tool
#[derive(Parser)]
#[command(name = "isl79987ctl")]
#[command(version)]
#[command(about = "ISL79987 CLI - Analog video decoder bring-up and debug tool")]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (use RUST_LOG=trace for bus traffic)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output results in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify the chip and report its revision
    Probe(probe::Args),

    /// Report signal presence and video standard per input
    Detect(detect::Args),

    /// Download the register configuration for a topology
    Download(download::Args),

    /// Configure the chip and start the CSI-2 output
    Stream(stream::Args),

    /// Adjust the analog picture controls
    Ctrl(ctrl::Args),

    /// Power the output stage up or down
    Power(power::Args),

    /// Raw register access on a selected bank
    Reg(reg::Args),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // Execute the subcommand and convert result to exit code
    let result = match cli.command {
        Commands::Probe(args) => probe::execute(args, cli.json),
        Commands::Detect(args) => detect::execute(args, cli.json),
        Commands::Download(args) => download::execute(args, cli.json),
        Commands::Stream(args) => stream::execute(args, cli.json),
        Commands::Ctrl(args) => ctrl::execute(args, cli.json),
        Commands::Power(args) => power::execute(args, cli.json),
        Commands::Reg(args) => reg::execute(args, cli.json),
    };

    result_to_exit_code(result)
}

/// Initialize env_logger based on verbosity flags
fn init_logging(verbose: bool, quiet: bool) {
    let env = env_logger::Env::default();

    let env = if quiet {
        env.default_filter_or("error")
    } else if verbose {
        env.default_filter_or("debug")
    } else {
        env.default_filter_or("info")
    };

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .init();

    log::debug!("Logging initialized");
}

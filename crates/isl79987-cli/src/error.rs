// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use std::fmt;
use std::process::ExitCode;

/// CLI-specific error type with exit code mapping
#[derive(Debug)]
pub enum CliError {
    /// Invalid command-line arguments
    InvalidArgs(String),
    /// Chip not found or not answering on the bus
    ChipNotFound(String),
    /// Register transaction failed
    BusError(String),
    /// No video signal on the selected input
    NoSignal(String),
    /// General error from the driver library
    General(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidArgs(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::ChipNotFound(msg) => write!(f, "Chip not found: {}", msg),
            CliError::BusError(msg) => write!(f, "Bus error: {}", msg),
            CliError::NoSignal(msg) => write!(f, "No signal: {}", msg),
            CliError::General(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::InvalidArgs(_) => ExitCode::from(2),
            CliError::ChipNotFound(_) => ExitCode::from(3),
            CliError::BusError(_) => ExitCode::from(5),
            CliError::NoSignal(_) => ExitCode::from(6),
            CliError::General(_) => ExitCode::from(1),
        }
    }
}

/// Map isl79987::Error to CliError with appropriate exit codes
impl From<isl79987::Error> for CliError {
    fn from(err: isl79987::Error) -> Self {
        use isl79987::Error;

        match err {
            Error::Bus(bus_err) => CliError::BusError(bus_err.to_string()),
            Error::UnsupportedTopology { channels, lanes } => CliError::InvalidArgs(format!(
                "{} channels on {} lanes is not a supported topology",
                channels, lanes
            )),
            Error::NotIdentified { id } => {
                CliError::ChipNotFound(format!("identity register read 0x{:02X}", id))
            }
            Error::UnsupportedControl(msg) => CliError::InvalidArgs(msg),
            Error::SignalAbsent => {
                CliError::NoSignal("video loss reported during field wait".to_string())
            }
        }
    }
}

/// Helper function to convert result to exit code
pub fn result_to_exit_code<T>(result: Result<T, CliError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CliError::InvalidArgs("test".into()).exit_code(),
            ExitCode::from(2)
        );
        assert_eq!(
            CliError::ChipNotFound("test".into()).exit_code(),
            ExitCode::from(3)
        );
        assert_eq!(
            CliError::BusError("test".into()).exit_code(),
            ExitCode::from(5)
        );
        assert_eq!(
            CliError::NoSignal("test".into()).exit_code(),
            ExitCode::from(6)
        );
        assert_eq!(
            CliError::General("test".into()).exit_code(),
            ExitCode::from(1)
        );
    }

    #[test]
    fn test_topology_error_maps_to_invalid_args() {
        let err: CliError = isl79987::Error::UnsupportedTopology { channels: 3, lanes: 1 }.into();
        assert!(matches!(err, CliError::InvalidArgs(_)));
        assert_eq!(err.exit_code(), ExitCode::from(2));
    }
}

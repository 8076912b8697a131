//! Error types and exit-code mapping for the CLI runtime.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;

use sqlbridge_engine::{BridgeError, Operation};

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error(
        "no engine script configured; set `script` in sqlbridge.toml, SQLBRIDGE_SCRIPT, or --script"
    )]
    MissingScript,
    #[error("failed to read SQL from stdin: {0}")]
    ReadInput(io::Error),
    #[error("no SQL provided on stdin")]
    EmptyInput,
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
    #[error("engine returned an unexpected outcome for '{operation}'")]
    UnexpectedOutcome { operation: Operation },
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl AppError {
    /// Maps the error to the binary's exit code: 2 when the engine itself
    /// failed on the input, 1 for configuration and usage problems.
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Raw exit status used by [`Self::exit_code`].
    pub(crate) const fn exit_status(&self) -> u8 {
        match self {
            Self::Bridge(_) => 2,
            _ => 1,
        }
    }
}

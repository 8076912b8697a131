//! CLI argument definitions for the sqlbridge binary.

use clap::{Args, Parser, Subcommand};

/// Command-line interface for the sqlbridge editor bridge.
#[derive(Parser, Debug)]
#[command(name = "sqlbridge", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The operation to run against the engine.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// User-invocable operations.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Transpiles the SQL read from stdin between dialects.
    Transpile(TransformArgs),
    /// Pretty-prints the SQL read from stdin.
    Format(TransformArgs),
    /// Lists the dialects the engine supports, one per line.
    Dialects,
    /// Checks that the engine is installed and reports its version.
    CheckInstall,
}

/// Per-invocation overrides for the transform operations.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct TransformArgs {
    /// Source dialect; overrides the configured default.
    #[arg(long, value_name = "DIALECT")]
    pub(crate) read: Option<String>,
    /// Target dialect; overrides the configured default.
    #[arg(long, value_name = "DIALECT")]
    pub(crate) write: Option<String>,
    /// Quote every identifier in the output.
    #[arg(long, overrides_with = "no_identify")]
    pub(crate) identify: bool,
    /// Leave identifiers unquoted even when the configured default quotes
    /// them.
    #[arg(long, overrides_with = "identify")]
    pub(crate) no_identify: bool,
}

impl TransformArgs {
    /// Resolves the effective identifier-quoting flag against the
    /// configured default: an explicit flag wins, otherwise the
    /// configuration decides.
    #[must_use]
    pub(crate) const fn effective_identify(&self, configured: bool) -> bool {
        if self.identify {
            true
        } else if self.no_identify {
            false
        } else {
            configured
        }
    }
}

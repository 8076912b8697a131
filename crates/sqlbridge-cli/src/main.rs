//! CLI entrypoint for the sqlbridge editor bridge.
//!
//! The binary delegates to [`sqlbridge_cli::run`], which loads
//! configuration, parses the command line, invokes the external SQL engine,
//! and writes the replacement span to stdout.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    sqlbridge_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}

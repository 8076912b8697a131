//! Runtime for the `sqlbridge` binary.
//!
//! `sqlbridge` is the host-facing surface of the editor bridge: an editor
//! pipes a selected span of SQL to the binary's stdin and substitutes the
//! span with whatever arrives on stdout. Four operations are exposed:
//! `transpile` and `format` transform the span, `dialects` lists the
//! engine's supported dialect names, and `check-install` verifies the
//! engine is present.
//!
//! The runtime loads layered configuration, installs telemetry, parses the
//! command line, and delegates to the [`sqlbridge_engine`] dispatcher. Only
//! operation results are written to stdout; diagnostics and logs go to
//! stderr so editors can consume stdout verbatim.

mod cli;
mod config;
mod errors;
mod telemetry;

use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use sqlbridge_config::Config;
use sqlbridge_engine::{
    BridgeError, Dispatcher, InvocationRequest, Operation, Outcome, ProcessInvoker,
};

use crate::cli::{Cli, CliCommand, TransformArgs};
use crate::errors::AppError;

/// Tracing target for the CLI runtime.
const CLI_TARGET: &str = "sqlbridge_cli";

/// Runs the CLI with the given arguments, writing results to `stdout` and
/// diagnostics to `stderr`. Returns the process exit code.
pub fn run<I>(args: I, stdout: &mut dyn Write, stderr: &mut dyn Write) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
{
    let args: Vec<OsString> = args.into_iter().collect();
    match run_command(&args, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, stderr);
            err.exit_code()
        }
    }
}

/// Loads configuration, parses the command line, and executes the command.
fn run_command(args: &[OsString], stdout: &mut dyn Write) -> Result<(), AppError> {
    let split = config::split_config_arguments(args);
    let loaded = Config::load_from_iter(split.config_arguments.iter().cloned())
        .map_err(AppError::LoadConfiguration)?;
    telemetry::initialise(&loaded)?;

    let mut command_args: Vec<OsString> = Vec::with_capacity(args.len());
    command_args.push(
        args.first()
            .cloned()
            .unwrap_or_else(|| OsString::from("sqlbridge")),
    );
    if let Some(rest) = args.get(split.command_start..) {
        command_args.extend(rest.iter().cloned());
    }

    let parsed = match Cli::try_parse_from(&command_args) {
        Ok(parsed) => parsed,
        Err(err) if err.use_stderr() => return Err(AppError::CliUsage(err)),
        // Help and version output belong on stdout with a zero exit.
        Err(err) => {
            write!(stdout, "{err}").map_err(AppError::WriteOutput)?;
            return Ok(());
        }
    };

    debug!(
        target: CLI_TARGET,
        runtime = %loaded.runtime(),
        script = ?loaded.script(),
        "configuration loaded"
    );

    execute(parsed.command, &loaded, stdout)
}

/// Executes a parsed command against the engine dispatcher.
fn execute(
    command: CliCommand,
    loaded: &Config,
    stdout: &mut dyn Write,
) -> Result<(), AppError> {
    let dispatcher = Dispatcher::new(build_invoker(loaded)?);
    match command {
        CliCommand::Transpile(args) => {
            transform(Operation::Transpile, &args, loaded, &dispatcher, stdout)
        }
        CliCommand::Format(args) => {
            transform(Operation::Format, &args, loaded, &dispatcher, stdout)
        }
        CliCommand::Dialects => list_dialects(&dispatcher, stdout),
        CliCommand::CheckInstall => check_install(&dispatcher, stdout),
    }
}

/// Builds the process invoker from the configured engine location.
fn build_invoker(loaded: &Config) -> Result<ProcessInvoker, AppError> {
    let script = loaded.script().ok_or(AppError::MissingScript)?;
    Ok(ProcessInvoker::new(
        loaded.runtime().as_std_path().to_path_buf(),
        script.as_std_path().to_path_buf(),
    ))
}

/// Reads the SQL span from stdin, runs a transform, and writes the
/// replacement span to stdout exactly as the engine emitted it.
fn transform(
    operation: Operation,
    args: &TransformArgs,
    loaded: &Config,
    dispatcher: &Dispatcher<ProcessInvoker>,
    stdout: &mut dyn Write,
) -> Result<(), AppError> {
    let mut sql = String::new();
    std::io::stdin()
        .read_to_string(&mut sql)
        .map_err(AppError::ReadInput)?;
    if sql.trim().is_empty() {
        return Err(AppError::EmptyInput);
    }

    let mut request = InvocationRequest::with_payload(operation, sql);
    let read = args
        .read
        .clone()
        .or_else(|| loaded.read_dialect().map(str::to_owned));
    if let Some(dialect) = read {
        request = request.with_read_dialect(dialect);
    }
    let write = args
        .write
        .clone()
        .or_else(|| loaded.write_dialect().map(str::to_owned));
    if let Some(dialect) = write {
        request = request.with_write_dialect(dialect);
    }
    if args.effective_identify(loaded.identify()) {
        request = request.with_identify();
    }

    match dispatcher.run(&request)? {
        Outcome::Replace(text) => {
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(AppError::WriteOutput)
        }
        _ => Err(AppError::UnexpectedOutcome { operation }),
    }
}

/// Prints the engine's supported dialect names, one per line.
fn list_dialects(
    dispatcher: &Dispatcher<ProcessInvoker>,
    stdout: &mut dyn Write,
) -> Result<(), AppError> {
    let request = InvocationRequest::new(Operation::Dialects);
    match dispatcher.run(&request)? {
        Outcome::Dialects(names) => {
            for name in names {
                writeln!(stdout, "{name}").map_err(AppError::WriteOutput)?;
            }
            Ok(())
        }
        _ => Err(AppError::UnexpectedOutcome {
            operation: Operation::Dialects,
        }),
    }
}

/// Reports the engine version, or installation advice when the engine is
/// missing. Both are ordinary results, so the exit code stays zero.
fn check_install(
    dispatcher: &Dispatcher<ProcessInvoker>,
    stdout: &mut dyn Write,
) -> Result<(), AppError> {
    let request = InvocationRequest::new(Operation::Version);
    match dispatcher.run(&request)? {
        Outcome::Message(version) => {
            writeln!(stdout, "sqlglot {version}").map_err(AppError::WriteOutput)
        }
        Outcome::InstallAdvice(advice) => {
            writeln!(stdout, "{advice}").map_err(AppError::WriteOutput)
        }
        _ => Err(AppError::UnexpectedOutcome {
            operation: Operation::Version,
        }),
    }
}

/// Renders an error for the user. Engine diagnostics pass through
/// verbatim; everything else is prefixed with the binary name.
fn report(err: &AppError, stderr: &mut dyn Write) {
    match err {
        AppError::Bridge(BridgeError::EngineFailed { diagnostic }) => {
            drop(write!(stderr, "{diagnostic}"));
            if !diagnostic.ends_with('\n') {
                drop(writeln!(stderr));
            }
        }
        other => {
            drop(writeln!(stderr, "sqlbridge: {other}"));
        }
    }
}

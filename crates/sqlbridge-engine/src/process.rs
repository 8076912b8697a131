//! Child-process execution of the external engine.
//!
//! [`ProcessInvoker`] implements the [`EngineInvoker`] trait by spawning the
//! engine script under the configured runtime, writing the SQL payload to
//! stdin, and capturing combined output plus exit status. The invoker is
//! pure transport: a non-zero exit status is reported through the result,
//! never raised as an error, so the dispatcher alone decides what a failed
//! run means.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::debug;

use crate::dispatch::EngineInvoker;
use crate::error::BridgeError;
use crate::invocation::InvocationResult;

/// Tracing target for engine process operations.
const PROCESS_TARGET: &str = "sqlbridge_engine::process";

/// Runs the engine script as a child process of the configured runtime.
///
/// The child command line is `<runtime> <script> <args...>`. Each invocation
/// owns its child process and pipes exclusively; both are released when the
/// call returns, on success and failure alike. There is no timeout: the
/// call blocks until the engine exits.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::PathBuf;
///
/// use sqlbridge_engine::{EngineInvoker, ProcessInvoker};
///
/// let invoker = ProcessInvoker::new(
///     PathBuf::from("python3"),
///     PathBuf::from("/usr/local/share/sqlbridge/engine.py"),
/// );
/// let args = vec![String::from("version")];
/// // invoker.invoke(&args, None) would run `python3 engine.py version`.
/// # let _ = (invoker, args);
/// ```
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    runtime: PathBuf,
    script: PathBuf,
}

impl ProcessInvoker {
    /// Creates an invoker for the given runtime executable and engine script.
    #[must_use]
    pub const fn new(runtime: PathBuf, script: PathBuf) -> Self {
        Self { runtime, script }
    }

    /// Returns the runtime executable path.
    #[must_use]
    pub fn runtime(&self) -> &Path {
        &self.runtime
    }

    /// Returns the engine script path.
    #[must_use]
    pub fn script(&self) -> &Path {
        &self.script
    }
}

impl EngineInvoker for ProcessInvoker {
    fn invoke(
        &self,
        args: &[String],
        input: Option<&str>,
    ) -> Result<InvocationResult, BridgeError> {
        if !self.script.exists() {
            return Err(BridgeError::ExecutableNotFound {
                path: self.script.clone(),
            });
        }

        let mut command = Command::new(&self.runtime);
        command.arg(&self.script);
        command.args(args);
        command.stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        debug!(
            target: PROCESS_TARGET,
            runtime = %self.runtime.display(),
            script = %self.script.display(),
            ?args,
            has_input = input.is_some(),
            "spawning engine process"
        );

        let mut child = command.spawn().map_err(|err| BridgeError::SpawnFailed {
            message: format!("failed to spawn '{}'", self.runtime.display()),
            source: Some(Arc::new(err)),
        })?;

        if let Some(text) = input {
            write_payload(&mut child, text)?;
        }

        let output = child.wait_with_output().map_err(|err| BridgeError::Io {
            source: Arc::new(err),
        })?;

        let exit_status = output.status.code().unwrap_or(-1);
        let mut output_text = String::from_utf8_lossy(&output.stdout).into_owned();
        output_text.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!(
            target: PROCESS_TARGET,
            exit_status,
            output_bytes = output_text.len(),
            "engine process exited"
        );

        Ok(InvocationResult::new(exit_status, output_text))
    }
}

/// Writes the payload to the child's stdin and closes the pipe.
fn write_payload(child: &mut std::process::Child, text: &str) -> Result<(), BridgeError> {
    let mut stdin = child.stdin.take().ok_or_else(|| BridgeError::SpawnFailed {
        message: String::from("failed to capture stdin"),
        source: None,
    })?;

    // An engine that exits before draining stdin closes the pipe early; the
    // exit status and diagnostic still arrive through the output capture, so
    // a broken pipe here is not a failure.
    match stdin.write_all(text.as_bytes()) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {}
        Err(err) => {
            return Err(BridgeError::Io {
                source: Arc::new(err),
            });
        }
    }

    // Stdin is dropped here, signalling end of input to the engine.
    Ok(())
}

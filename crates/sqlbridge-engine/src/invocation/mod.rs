//! Invocation request and result model for the engine protocol.
//!
//! An [`InvocationRequest`] captures everything one engine run needs: the
//! subcommand, the optional SQL payload, and the dialect flags. Requests are
//! constructed fresh per call and never mutated afterwards. The argument
//! list derived from a request has a fixed order so invocations are
//! reproducible.

use serde::{Deserialize, Serialize};

/// Engine subcommand selected for an invocation.
///
/// # Example
///
/// ```
/// use sqlbridge_engine::Operation;
///
/// assert_eq!(Operation::Transpile.subcommand(), "transpile");
/// assert!(Operation::Transpile.takes_payload());
/// assert!(!Operation::Dialects.takes_payload());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Translate SQL between dialects.
    Transpile,
    /// Pretty-print SQL.
    Format,
    /// List the dialect names the engine supports.
    Dialects,
    /// Report the engine version.
    Version,
}

impl Operation {
    /// Returns the engine subcommand name.
    #[must_use]
    pub const fn subcommand(self) -> &'static str {
        match self {
            Self::Transpile => "transpile",
            Self::Format => "format",
            Self::Dialects => "dialects",
            Self::Version => "version",
        }
    }

    /// True when the operation streams a SQL payload to the engine's stdin.
    ///
    /// `Transpile` and `Format` always carry a payload; `Dialects` and
    /// `Version` never do.
    #[must_use]
    pub const fn takes_payload(self) -> bool {
        matches!(self, Self::Transpile | Self::Format)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.subcommand())
    }
}

/// A single engine invocation, fixed at construction.
///
/// Dialect names pass through uninterpreted; an unknown name surfaces only
/// through the engine's own diagnostic. `identify == false` means the flag
/// is omitted entirely, not passed as a negative.
///
/// # Example
///
/// ```
/// use sqlbridge_engine::{InvocationRequest, Operation};
///
/// let request = InvocationRequest::with_payload(Operation::Transpile, "SELECT 1")
///     .with_read_dialect("Postgres")
///     .with_write_dialect("DuckDB")
///     .with_identify();
///
/// assert_eq!(
///     request.to_args(),
///     ["transpile", "--read", "Postgres", "--write", "DuckDB", "--identify"],
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    operation: Operation,
    payload: Option<String>,
    read_dialect: Option<String>,
    write_dialect: Option<String>,
    identify: bool,
}

impl InvocationRequest {
    /// Creates a payload-free request for the metadata subcommands.
    #[must_use]
    pub const fn new(operation: Operation) -> Self {
        Self {
            operation,
            payload: None,
            read_dialect: None,
            write_dialect: None,
            identify: false,
        }
    }

    /// Creates a request carrying the SQL span to transform.
    #[must_use]
    pub fn with_payload(operation: Operation, payload: impl Into<String>) -> Self {
        Self {
            operation,
            payload: Some(payload.into()),
            read_dialect: None,
            write_dialect: None,
            identify: false,
        }
    }

    /// Sets the source dialect passed as `--read`.
    #[must_use]
    pub fn with_read_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.read_dialect = Some(dialect.into());
        self
    }

    /// Sets the target dialect passed as `--write`.
    #[must_use]
    pub fn with_write_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.write_dialect = Some(dialect.into());
        self
    }

    /// Requests that all identifiers be quoted in the engine output.
    #[must_use]
    pub const fn with_identify(mut self) -> Self {
        self.identify = true;
        self
    }

    /// Returns the selected operation.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the SQL payload, if the request carries one.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Returns the source dialect, if set.
    #[must_use]
    pub fn read_dialect(&self) -> Option<&str> {
        self.read_dialect.as_deref()
    }

    /// Returns the target dialect, if set.
    #[must_use]
    pub fn write_dialect(&self) -> Option<&str> {
        self.write_dialect.as_deref()
    }

    /// Returns whether identifier quoting was requested.
    #[must_use]
    pub const fn identify(&self) -> bool {
        self.identify
    }

    /// Builds the engine argument list in its fixed order: subcommand,
    /// `--read`, `--write`, `--identify`.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![self.operation.subcommand().to_owned()];
        if let Some(read) = &self.read_dialect {
            args.push(String::from("--read"));
            args.push(read.clone());
        }
        if let Some(write) = &self.write_dialect {
            args.push(String::from("--write"));
            args.push(write.clone());
        }
        if self.identify {
            args.push(String::from("--identify"));
        }
        args
    }
}

/// Captured result of one engine process run.
///
/// Produced once per run and immutable afterwards. `output_text` holds the
/// combined output stream: stdout first, then stderr.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    exit_status: i32,
    output_text: String,
}

impl InvocationResult {
    /// Creates a result from a raw exit status and captured output.
    #[must_use]
    pub fn new(exit_status: i32, output_text: impl Into<String>) -> Self {
        Self {
            exit_status,
            output_text: output_text.into(),
        }
    }

    /// Returns the child process exit status.
    #[must_use]
    pub const fn exit_status(&self) -> i32 {
        self.exit_status
    }

    /// Returns the captured combined output.
    #[must_use]
    pub const fn output_text(&self) -> &str {
        self.output_text.as_str()
    }

    /// True when the engine exited with status zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.exit_status == 0
    }

    /// Consumes the result, returning the captured output.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output_text
    }
}

#[cfg(test)]
mod tests;

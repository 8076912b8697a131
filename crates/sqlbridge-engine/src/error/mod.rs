//! Domain errors raised by the engine protocol layer.
//!
//! All errors use `thiserror`-derived enums with structured context so
//! callers can inspect the failure programmatically. I/O errors are wrapped
//! in `Arc` to satisfy the `result_large_err` Clippy lint.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::invocation::Operation;

/// Errors arising from engine invocations and result interpretation.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The configured engine script does not exist on disk.
    #[error("engine script not found: {path}")]
    ExecutableNotFound {
        /// Path that was checked before spawning.
        path: PathBuf,
    },

    /// The engine process could not be started.
    #[error("engine failed to start: {message}")]
    SpawnFailed {
        /// Human-readable failure description.
        message: String,
        /// Optional underlying I/O error.
        #[source]
        source: Option<Arc<std::io::Error>>,
    },

    /// An I/O error occurred while communicating with the engine process.
    #[error("I/O error communicating with the engine: {source}")]
    Io {
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The engine ran but reported failure through a non-zero exit status.
    ///
    /// The diagnostic is the engine's own captured output, surfaced
    /// verbatim; the caller's buffer is left untouched.
    #[error("{diagnostic}")]
    EngineFailed {
        /// Captured combined output of the failed run.
        diagnostic: String,
    },

    /// Fetching or parsing the dialect metadata failed.
    ///
    /// The dialect cache stays unpopulated after this error, so a later
    /// call retries the fetch.
    #[error("failed to fetch dialect list: {message}")]
    DialectFetch {
        /// Description of the fetch or parse failure.
        message: String,
        /// Optional underlying JSON error.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A payload-carrying operation was dispatched without a payload.
    #[error("operation '{operation}' requires a SQL payload")]
    MissingPayload {
        /// Operation that was dispatched.
        operation: Operation,
    },
}

impl BridgeError {
    /// True when the failure indicates the engine itself is absent or
    /// cannot be launched, as opposed to a failure on valid input.
    ///
    /// The installation check uses this to distinguish "not installed"
    /// (an expected, recoverable condition) from execution errors.
    #[must_use]
    pub const fn indicates_missing_engine(&self) -> bool {
        matches!(
            self,
            Self::ExecutableNotFound { .. } | Self::SpawnFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests;

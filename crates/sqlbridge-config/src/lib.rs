//! Layered configuration for the sqlbridge toolchain.
//!
//! Configuration merges four sources with ascending precedence: built-in
//! defaults, a `sqlbridge.toml` configuration file (located via
//! `--config-path`), `SQLBRIDGE_*` environment variables, and command-line
//! flags. The merge itself is delegated to `ortho_config`; this crate owns
//! the shape of the configuration and its defaults.
//!
//! The configuration surface is deliberately small: where the engine lives
//! (`runtime` + `script`), the default dialect flags applied when a command
//! does not override them, and how the binary logs.

mod defaults;
mod logging;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_RUNTIME, default_log_filter, default_log_filter_string,
    default_log_format, default_runtime,
};
pub use logging::{LogFormat, LogFormatParseError};

use std::ffi::OsString;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::{OrthoConfig, OrthoError};
use serde::Deserialize;

/// Resolved configuration shared by every sqlbridge command.
#[derive(Clone, Debug, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SQLBRIDGE")]
pub struct Config {
    /// Interpreter used to run the engine script.
    #[serde(default = "defaults::default_runtime")]
    runtime: Utf8PathBuf,
    /// Path to the engine script. Required for every engine-backed command.
    script: Option<Utf8PathBuf>,
    /// Default source dialect passed as `--read` when a command sets none.
    read_dialect: Option<String>,
    /// Default target dialect passed as `--write` when a command sets none.
    write_dialect: Option<String>,
    /// Quote all identifiers in engine output by default.
    #[serde(default)]
    identify: bool,
    /// Log filter expression applied to the tracing subscriber.
    #[serde(default = "defaults::default_log_filter_string")]
    log_filter: String,
    /// Log output format.
    #[serde(default)]
    log_format: LogFormat,
}

impl Config {
    /// Loads configuration from the given command-line arguments, the
    /// environment, and the configuration file.
    ///
    /// The first element of `iter` is treated as the binary name, matching
    /// `clap` conventions.
    ///
    /// # Errors
    ///
    /// Returns the underlying `ortho_config` error when a source cannot be
    /// read or a value fails to deserialise.
    pub fn load_from_iter<I, T>(iter: I) -> Result<Self, Arc<OrthoError>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as OrthoConfig>::load_from_iter(iter)
    }

    /// Returns the interpreter used to run the engine script.
    #[must_use]
    pub fn runtime(&self) -> &Utf8Path {
        self.runtime.as_path()
    }

    /// Returns the engine script path, when configured.
    #[must_use]
    pub fn script(&self) -> Option<&Utf8Path> {
        self.script.as_deref()
    }

    /// Returns the default source dialect, when configured.
    #[must_use]
    pub fn read_dialect(&self) -> Option<&str> {
        self.read_dialect.as_deref()
    }

    /// Returns the default target dialect, when configured.
    #[must_use]
    pub fn write_dialect(&self) -> Option<&str> {
        self.write_dialect.as_deref()
    }

    /// Returns whether identifier quoting is requested by default.
    #[must_use]
    pub const fn identify(&self) -> bool {
        self.identify
    }

    /// Returns the log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime: defaults::default_runtime(),
            script: None,
            read_dialect: None,
            write_dialect: None,
            identify: false,
            log_filter: defaults::default_log_filter_string(),
            log_format: defaults::default_log_format(),
        }
    }
}

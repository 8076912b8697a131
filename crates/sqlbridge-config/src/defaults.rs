//! Built-in defaults shared by the configuration layers.

use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Interpreter used to run the engine script when none is configured.
pub const DEFAULT_RUNTIME: &str = "python3";

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    String::from(DEFAULT_LOG_FILTER)
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default interpreter path for the engine script.
#[must_use]
pub fn default_runtime() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_RUNTIME)
}

//! Unit tests for error display and classification.

use std::path::PathBuf;
use std::sync::Arc;

use rstest::rstest;

use super::*;

#[rstest]
fn executable_not_found_names_the_path() {
    let err = BridgeError::ExecutableNotFound {
        path: PathBuf::from("/opt/sqlbridge/engine.py"),
    };
    assert_eq!(
        err.to_string(),
        "engine script not found: /opt/sqlbridge/engine.py"
    );
}

#[rstest]
fn engine_failed_surfaces_the_diagnostic_verbatim() {
    let err = BridgeError::EngineFailed {
        diagnostic: String::from("Error: Unknown dialect: 'Sybase'\n"),
    };
    assert_eq!(err.to_string(), "Error: Unknown dialect: 'Sybase'\n");
}

#[rstest]
fn dialect_fetch_reports_the_message() {
    let err = BridgeError::DialectFetch {
        message: String::from("engine exited with status 1"),
        source: None,
    };
    assert_eq!(
        err.to_string(),
        "failed to fetch dialect list: engine exited with status 1"
    );
}

#[rstest]
fn missing_payload_names_the_operation() {
    let err = BridgeError::MissingPayload {
        operation: Operation::Format,
    };
    assert_eq!(err.to_string(), "operation 'format' requires a SQL payload");
}

#[rstest]
#[case::not_found(
    BridgeError::ExecutableNotFound { path: PathBuf::from("/missing") },
    true
)]
#[case::spawn_failed(
    BridgeError::SpawnFailed { message: String::from("no such runtime"), source: None },
    true
)]
#[case::engine_failed(
    BridgeError::EngineFailed { diagnostic: String::from("bad SQL") },
    false
)]
fn missing_engine_classification(#[case] err: BridgeError, #[case] missing: bool) {
    assert_eq!(err.indicates_missing_engine(), missing);
}

#[rstest]
fn io_error_chains_its_source() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let err = BridgeError::Io {
        source: Arc::new(io),
    };
    assert!(std::error::Error::source(&err).is_some());
}

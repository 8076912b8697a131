//! Memoised dialect metadata fetched from the engine.
//!
//! The engine's `dialects` subcommand is semi-static and comparatively
//! expensive, so its result is fetched once per process and served from
//! memory afterwards. The cache is invalidated only by an explicit
//! [`DialectCache::reset`]; there is no TTL.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::dispatch::EngineInvoker;
use crate::error::BridgeError;
use crate::invocation::{InvocationRequest, Operation};

/// Tracing target for dialect cache operations.
const DIALECTS_TARGET: &str = "sqlbridge_engine::dialects";

/// Process-wide cache of the engine's supported dialect names.
///
/// The slot is guarded by a mutex held across the first fetch, so two
/// overlapping first calls resolve to a single engine invocation. After
/// population the value never changes until `reset`, and reads only clone
/// the stored list.
///
/// Invariant: the stored list is non-empty exactly when the cache is
/// populated. An engine that reports no dialects is treated as a malformed
/// metadata response.
#[derive(Debug, Default)]
pub struct DialectCache {
    dialects: Mutex<Option<Vec<String>>>,
}

impl DialectCache {
    /// Creates an unpopulated cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dialect list, fetching it on first use.
    ///
    /// The fetch invokes the engine's `dialects` subcommand with no payload
    /// and parses its output as a JSON array of strings. The order the
    /// engine reported is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::DialectFetch`] when the engine exits non-zero
    /// or the output is not a non-empty JSON array of strings, and any
    /// transport error from the invoker. The cache stays unpopulated after
    /// an error, so a later call retries the fetch.
    pub fn get_or_fetch<E: EngineInvoker>(&self, invoker: &E) -> Result<Vec<String>, BridgeError> {
        let mut slot = self
            .dialects
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(dialects) = slot.as_ref() {
            return Ok(dialects.clone());
        }

        let dialects = fetch_dialects(invoker)?;
        debug!(
            target: DIALECTS_TARGET,
            count = dialects.len(),
            "dialect list fetched"
        );
        *slot = Some(dialects.clone());
        Ok(dialects)
    }

    /// True once a fetch has succeeded.
    pub fn is_populated(&self) -> bool {
        self.dialects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Clears the cache so the next read re-fetches from the engine.
    pub fn reset(&self) {
        *self
            .dialects
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Runs the `dialects` subcommand and parses the reported names.
fn fetch_dialects<E: EngineInvoker>(invoker: &E) -> Result<Vec<String>, BridgeError> {
    let request = InvocationRequest::new(Operation::Dialects);
    let result = invoker.invoke(&request.to_args(), None)?;

    if !result.is_success() {
        return Err(BridgeError::DialectFetch {
            message: format!(
                "engine exited with status {}: {}",
                result.exit_status(),
                result.output_text().trim()
            ),
            source: None,
        });
    }

    let dialects: Vec<String> =
        serde_json::from_str(result.output_text()).map_err(|err| BridgeError::DialectFetch {
            message: String::from("engine did not return a JSON array of dialect names"),
            source: Some(err),
        })?;

    if dialects.is_empty() {
        return Err(BridgeError::DialectFetch {
            message: String::from("engine reported an empty dialect list"),
            source: None,
        });
    }

    Ok(dialects)
}

//! Subprocess command protocol for an external SQL transpilation engine.
//!
//! The `sqlbridge-engine` crate implements the protocol layer that lets an
//! editor front end drive a sqlglot-style engine script: it constructs
//! invocations, streams the selected SQL span to the engine's stdin,
//! interprets exit status and captured output, and memoises the engine's
//! semi-static dialect list so metadata queries run at most once per
//! process.
//!
//! # Architecture
//!
//! Three components, leaves first. The [`ProcessInvoker`] runs the engine as
//! a child process and returns an [`InvocationResult`] without interpreting
//! it. The [`DialectCache`] lazily fetches the supported dialect names
//! through an invoker and serves them from memory afterwards. The
//! [`Dispatcher`] translates a user-level [`InvocationRequest`] into an
//! argument list, delegates to the invoker or the cache, and maps the raw
//! result into an [`Outcome`] or a [`BridgeError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use sqlbridge_engine::{Dispatcher, InvocationRequest, Operation, ProcessInvoker};
//!
//! let invoker = ProcessInvoker::new(
//!     PathBuf::from("python3"),
//!     PathBuf::from("/usr/local/share/sqlbridge/engine.py"),
//! );
//! let dispatcher = Dispatcher::new(invoker);
//!
//! let request = InvocationRequest::with_payload(Operation::Transpile, "SELECT 1")
//!     .with_write_dialect("duckdb");
//! // dispatcher.run(&request) would spawn the engine and return the
//! // replacement text.
//! # let _ = request;
//! # let _ = dispatcher;
//! ```

pub mod dialects;
pub mod dispatch;
pub mod error;
pub mod invocation;
pub mod process;

#[cfg(test)]
mod tests;

pub use self::dialects::DialectCache;
pub use self::dispatch::{Dispatcher, EngineInvoker, Outcome};
pub use self::error::BridgeError;
pub use self::invocation::{InvocationRequest, InvocationResult, Operation};
pub use self::process::ProcessInvoker;

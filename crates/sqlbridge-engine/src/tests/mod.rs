//! Crate-level integration tests and shared test doubles.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::PathBuf;

use crate::dialects::DialectCache;
use crate::dispatch::{Dispatcher, EngineInvoker, Outcome};
use crate::error::BridgeError;
use crate::invocation::{InvocationRequest, InvocationResult, Operation};


/// Invoker returning a fixed exit status and output, recording every call.
pub(crate) struct ScriptedInvoker {
    exit_status: i32,
    output: String,
    calls: Cell<usize>,
    last_args: RefCell<Vec<String>>,
    last_input: RefCell<Option<String>>,
}

impl ScriptedInvoker {
    pub(crate) fn succeeding(output: &str) -> Self {
        Self::with_status(0, output)
    }

    pub(crate) fn failing(exit_status: i32, output: &str) -> Self {
        Self::with_status(exit_status, output)
    }

    fn with_status(exit_status: i32, output: &str) -> Self {
        Self {
            exit_status,
            output: output.to_owned(),
            calls: Cell::new(0),
            last_args: RefCell::new(Vec::new()),
            last_input: RefCell::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }

    pub(crate) fn last_args(&self) -> Vec<String> {
        self.last_args.borrow().clone()
    }

    pub(crate) fn last_input(&self) -> Option<String> {
        self.last_input.borrow().clone()
    }
}

impl EngineInvoker for ScriptedInvoker {
    fn invoke(
        &self,
        args: &[String],
        input: Option<&str>,
    ) -> Result<InvocationResult, BridgeError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_args.borrow_mut() = args.to_vec();
        *self.last_input.borrow_mut() = input.map(str::to_owned);
        Ok(InvocationResult::new(self.exit_status, self.output.clone()))
    }
}

/// Invoker replaying a queue of scripted results, one per call.
pub(crate) struct SequenceInvoker {
    replies: RefCell<VecDeque<(i32, String)>>,
    calls: Cell<usize>,
}

impl SequenceInvoker {
    pub(crate) fn new(replies: Vec<(i32, &str)>) -> Self {
        Self {
            replies: RefCell::new(
                replies
                    .into_iter()
                    .map(|(status, output)| (status, output.to_owned()))
                    .collect(),
            ),
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl EngineInvoker for SequenceInvoker {
    fn invoke(
        &self,
        _args: &[String],
        _input: Option<&str>,
    ) -> Result<InvocationResult, BridgeError> {
        self.calls.set(self.calls.get() + 1);
        let (status, output) = self
            .replies
            .borrow_mut()
            .pop_front()
            .expect("SequenceInvoker ran out of scripted replies");
        Ok(InvocationResult::new(status, output))
    }
}

/// Invoker ensuring the payload ends with exactly one trailing newline,
/// standing in for a formatting engine with a fixed point.
pub(crate) struct NormalisingInvoker;

impl EngineInvoker for NormalisingInvoker {
    fn invoke(
        &self,
        _args: &[String],
        input: Option<&str>,
    ) -> Result<InvocationResult, BridgeError> {
        let sql = input.unwrap_or_default();
        let mut formatted = sql.trim_end().to_owned();
        formatted.push('\n');
        Ok(InvocationResult::new(0, formatted))
    }
}

/// Invoker simulating an engine script that is absent from disk.
pub(crate) struct MissingScriptInvoker;

impl EngineInvoker for MissingScriptInvoker {
    fn invoke(
        &self,
        _args: &[String],
        _input: Option<&str>,
    ) -> Result<InvocationResult, BridgeError> {
        Err(BridgeError::ExecutableNotFound {
            path: PathBuf::from("/missing/engine.py"),
        })
    }
}

#[test]
fn end_to_end_dispatch_with_scripted_engine() {
    let invoker = ScriptedInvoker::succeeding("SELECT 1\n");
    let dispatcher = Dispatcher::new(invoker);

    let request = InvocationRequest::with_payload(Operation::Transpile, "select 1")
        .with_write_dialect("duckdb");
    let outcome = dispatcher.run(&request).expect("dispatch");

    assert_eq!(outcome, Outcome::Replace(String::from("SELECT 1\n")));
    assert_eq!(dispatcher.invoker().calls(), 1);
    assert_eq!(
        dispatcher.invoker().last_args(),
        vec![
            String::from("transpile"),
            String::from("--write"),
            String::from("duckdb"),
        ],
    );
    assert_eq!(dispatcher.invoker().last_input().as_deref(), Some("select 1"));
}

#[test]
fn cache_survives_across_dispatches() {
    let invoker = ScriptedInvoker::succeeding(r#"["duckdb", "postgres"]"#);
    let dispatcher = Dispatcher::new(invoker);
    let request = InvocationRequest::new(Operation::Dialects);

    let first = dispatcher.run(&request).expect("first listing");
    let second = dispatcher.run(&request).expect("second listing");

    assert_eq!(first, second);
    assert_eq!(dispatcher.invoker().calls(), 1);
    assert!(dispatcher.dialect_cache().is_populated());
}

#[test]
fn reset_forces_a_fresh_fetch() {
    let invoker = ScriptedInvoker::succeeding(r#"["duckdb"]"#);
    let cache = DialectCache::new();

    cache.get_or_fetch(&invoker).expect("first fetch");
    cache.reset();
    assert!(!cache.is_populated());
    cache.get_or_fetch(&invoker).expect("second fetch");

    assert_eq!(invoker.calls(), 2);
}

//! Command dispatch: user-level operations mapped onto engine invocations.
//!
//! The [`Dispatcher`] is the public entry point of the crate. It builds the
//! argument list for a request, delegates to an [`EngineInvoker`], and
//! interprets exit status and captured output as an [`Outcome`] or a
//! [`BridgeError`]. Each `run` call is atomic from the dispatcher's
//! perspective: one child process run, no retries, no partial success.
//!
//! The invoker abstraction enables test doubles that return pre-configured
//! results without spawning real processes.

use tracing::debug;

use crate::dialects::DialectCache;
use crate::error::BridgeError;
use crate::invocation::{InvocationRequest, InvocationResult, Operation};

/// Tracing target for dispatch operations.
const DISPATCH_TARGET: &str = "sqlbridge_engine::dispatch";

/// Remediation guidance shown when the engine cannot be executed.
const INSTALL_HINT: &str = "install sqlglot with: python -m pip install sqlglot";

/// Trait abstracting engine process execution for testability.
///
/// The production implementation is
/// [`ProcessInvoker`](crate::process::ProcessInvoker), which spawns the
/// engine script as a child process. Test code can implement this trait to
/// inject pre-configured results.
///
/// # Example
///
/// ```
/// use sqlbridge_engine::{BridgeError, EngineInvoker, InvocationResult};
///
/// struct StubInvoker;
///
/// impl EngineInvoker for StubInvoker {
///     fn invoke(
///         &self,
///         _args: &[String],
///         _input: Option<&str>,
///     ) -> Result<InvocationResult, BridgeError> {
///         Ok(InvocationResult::new(0, "SELECT 1"))
///     }
/// }
/// ```
pub trait EngineInvoker {
    /// Runs the engine with `args`, optionally streaming `input` to its
    /// stdin, and returns the captured result once the child exits.
    ///
    /// A non-zero exit status is reported through the returned
    /// [`InvocationResult`], not as an error; only transport failures are
    /// errors at this layer.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ExecutableNotFound`] when the engine script is
    /// missing, [`BridgeError::SpawnFailed`] when the child cannot start,
    /// or [`BridgeError::Io`] on pipe failures.
    fn invoke(
        &self,
        args: &[String],
        input: Option<&str>,
    ) -> Result<InvocationResult, BridgeError>;
}

/// Interpreted result of a dispatched operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Replace the selected span with this text, exactly as the engine
    /// emitted it, trailing newline included or omitted as-is.
    Replace(String),
    /// Display this message to the user.
    Message(String),
    /// Present the dialect names, in the order the engine reported them.
    Dialects(Vec<String>),
    /// The engine is missing or broken; display installation guidance.
    InstallAdvice(String),
}

/// Translates user-level operations into engine invocations and maps the
/// raw results back into outcomes.
///
/// # Example
///
/// ```
/// use sqlbridge_engine::{
///     BridgeError, Dispatcher, EngineInvoker, InvocationRequest, InvocationResult, Operation,
///     Outcome,
/// };
///
/// struct EchoInvoker;
///
/// impl EngineInvoker for EchoInvoker {
///     fn invoke(
///         &self,
///         _args: &[String],
///         input: Option<&str>,
///     ) -> Result<InvocationResult, BridgeError> {
///         Ok(InvocationResult::new(0, input.unwrap_or_default()))
///     }
/// }
///
/// let dispatcher = Dispatcher::new(EchoInvoker);
/// let request = InvocationRequest::with_payload(Operation::Format, "SELECT 1");
/// let outcome = dispatcher.run(&request).expect("dispatch succeeds");
/// assert_eq!(outcome, Outcome::Replace(String::from("SELECT 1")));
/// ```
#[derive(Debug)]
pub struct Dispatcher<E> {
    invoker: E,
    dialects: DialectCache,
}

impl<E> Dispatcher<E> {
    /// Creates a dispatcher with an empty dialect cache.
    #[must_use]
    pub fn new(invoker: E) -> Self {
        Self {
            invoker,
            dialects: DialectCache::new(),
        }
    }

    /// Returns a reference to the invoker.
    #[must_use]
    pub const fn invoker(&self) -> &E {
        &self.invoker
    }

    /// Returns a reference to the dialect cache.
    #[must_use]
    pub const fn dialect_cache(&self) -> &DialectCache {
        &self.dialects
    }
}

impl<E: EngineInvoker> Dispatcher<E> {
    /// Runs a user-level operation and interprets the result.
    ///
    /// `Transpile` and `Format` stream the request payload to the engine
    /// and yield [`Outcome::Replace`] on success. `Dialects` serves from
    /// the cache, invoking the engine only on first use. `Version` performs
    /// the installation check and always yields an outcome: a missing or
    /// broken engine is an expected condition, reported as
    /// [`Outcome::InstallAdvice`] rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::EngineFailed`] when a transform run exits
    /// non-zero, [`BridgeError::DialectFetch`] when the metadata fetch
    /// fails, [`BridgeError::MissingPayload`] when a transform request
    /// carries no payload, or any transport error from the invoker.
    pub fn run(&self, request: &InvocationRequest) -> Result<Outcome, BridgeError> {
        match request.operation() {
            Operation::Transpile | Operation::Format => self.transform(request),
            Operation::Dialects => self.list_dialects(),
            Operation::Version => Ok(self.check_install()),
        }
    }

    /// Runs a payload-carrying transform and returns the replacement text.
    fn transform(&self, request: &InvocationRequest) -> Result<Outcome, BridgeError> {
        let Some(payload) = request.payload() else {
            return Err(BridgeError::MissingPayload {
                operation: request.operation(),
            });
        };

        let result = self.invoker.invoke(&request.to_args(), Some(payload))?;
        debug!(
            target: DISPATCH_TARGET,
            operation = %request.operation(),
            exit_status = result.exit_status(),
            "transform completed"
        );

        if result.is_success() {
            Ok(Outcome::Replace(result.into_output()))
        } else {
            Err(BridgeError::EngineFailed {
                diagnostic: result.into_output(),
            })
        }
    }

    /// Serves the dialect list, fetching it through the cache on first use.
    fn list_dialects(&self) -> Result<Outcome, BridgeError> {
        self.dialects
            .get_or_fetch(&self.invoker)
            .map(Outcome::Dialects)
    }

    /// Checks the engine installation by asking it for its version.
    ///
    /// Never fails: every failure mode collapses into installation advice,
    /// since an absent engine is a recoverable condition the user fixes by
    /// installing it, not an execution error on valid input.
    fn check_install(&self) -> Outcome {
        let request = InvocationRequest::new(Operation::Version);
        match self.invoker.invoke(&request.to_args(), None) {
            Ok(result) if result.is_success() => {
                Outcome::Message(result.output_text().trim().to_owned())
            }
            Ok(result) => {
                let diagnostic = result.output_text().trim().to_owned();
                debug!(
                    target: DISPATCH_TARGET,
                    exit_status = result.exit_status(),
                    "version probe failed"
                );
                Outcome::InstallAdvice(install_advice(&diagnostic))
            }
            Err(err) => Outcome::InstallAdvice(install_advice(&err.to_string())),
        }
    }
}

/// Composes the advisory message for a failed installation check.
fn install_advice(detail: &str) -> String {
    if detail.is_empty() {
        format!("SQL engine is not available; {INSTALL_HINT}")
    } else {
        format!("SQL engine is not available ({detail}); {INSTALL_HINT}")
    }
}

//! The per-phase failure boundary.
//!
//! Everything a phase does runs inside [`guard`]. Whatever escapes, an error
//! or a panic, becomes one [`LifecycleError`] that the orchestrator hands to
//! its [`ErrorCatch`] exactly once.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::lifecycle::error::{LifecycleError, LifecycleResult};

/// The two lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Bootstrap,
    Shutdown,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Bootstrap => "bootstrap",
            Phase::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a phase ended, as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// Every step of the phase ran.
    Completed,
    /// The boundary intercepted a failure; remaining steps were skipped.
    Failed,
}

impl PhaseOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, PhaseOutcome::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseOutcome::Completed => "completed",
            PhaseOutcome::Failed => "failed",
        }
    }
}

/// The error boundary collaborator.
pub trait ErrorCatch {
    /// Called once per intercepted failure.
    fn catch(&mut self, phase: Phase, error: &LifecycleError);
}

/// Reports intercepted failures as an error event plus a one-line diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultErrorCatch;

impl ErrorCatch for DefaultErrorCatch {
    fn catch(&mut self, phase: Phase, error: &LifecycleError) {
        tracing::error!(
            phase = %phase,
            module = error.module().unwrap_or("-"),
            error = %error,
            "Lifecycle phase aborted"
        );
        eprintln!("{}: {}", phase, error);
    }
}

/// Run `body`, turning a panic into [`LifecycleError::Panicked`].
///
/// With `catch_panics` off a panic unwinds straight through.
pub fn guard<F>(phase: Phase, catch_panics: bool, body: F) -> LifecycleResult<()>
where
    F: FnOnce() -> LifecycleResult<()>,
{
    if !catch_panics {
        return body();
    }

    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => result,
        Err(payload) => Err(LifecycleError::Panicked {
            phase,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

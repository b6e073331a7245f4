//! Lifecycle failure types.

use thiserror::Error;

use crate::lifecycle::boundary::Phase;
use crate::lifecycle::hooks::HookKind;
use crate::lifecycle::module::ModuleFailure;

/// Failures raised while a lifecycle phase runs.
///
/// Every variant is treated identically by the phase boundary; the variants
/// only exist so the error handler can describe what went wrong.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A module's `init` signalled failure.
    #[error("module `{module}` failed to initialize: {source}")]
    Init {
        module: String,
        #[source]
        source: ModuleFailure,
    },

    /// A module's `finish` signalled failure.
    #[error("module `{module}` failed to finish: {source}")]
    Finish {
        module: String,
        #[source]
        source: ModuleFailure,
    },

    /// A hook implementation failed as a whole.
    #[error("{hook} failed: {source}")]
    Hook {
        hook: HookKind,
        #[source]
        source: ModuleFailure,
    },

    /// A procedure installed into one of the hooks failed.
    #[error("procedure `{name}` failed during {hook}: {source}")]
    Procedure {
        hook: HookKind,
        name: String,
        #[source]
        source: ModuleFailure,
    },

    /// Something inside the phase panicked.
    #[error("panic during {phase}: {message}")]
    Panicked { phase: Phase, message: String },

    /// The phase was requested a second time.
    #[error("{0} already ran; running it again requires a process restart")]
    Reentered(Phase),
}

impl LifecycleError {
    /// Returns the module name for module-level failures.
    pub fn module(&self) -> Option<&str> {
        match self {
            LifecycleError::Init { module, .. } | LifecycleError::Finish { module, .. } => {
                Some(module)
            }
            _ => None,
        }
    }
}

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Errors raised while assembling a module sequence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    /// There is no root module.
    #[error("module sequence is empty")]
    Empty,

    /// Two modules share a name.
    #[error("module `{0}` appears more than once in the sequence")]
    Duplicate(String),
}

//! Initial and termination procedures.
//!
//! # Data Flow
//! ```text
//! module init → InitContext::install_initial / install_termination
//!     → ProcedureRegistry lists
//!
//! bootstrap (after the last non-root module):
//!     execute_initial_procedures  → installation order
//! shutdown (before the first finish):
//!     execute_termination_procedures → reverse installation order
//! ```
//!
//! # Design Decisions
//! - Each list runs once; installing into an executed list is refused
//! - A failing procedure stops its list, the rest never run

use std::fmt;

use crate::lifecycle::error::{LifecycleError, LifecycleResult};
use crate::lifecycle::module::ModuleResult;

/// A deferred action installed by a module.
pub type Procedure = Box<dyn FnOnce() -> ModuleResult>;

/// Which of the two hooks is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    Initial,
    Termination,
}

impl HookKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::Initial => "initial procedures",
            HookKind::Termination => "termination procedures",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The hook boundary consumed by the orchestrator.
pub trait Hooks {
    /// Register a procedure for the initial hook. `false` if already executed.
    fn install_initial(&mut self, name: &str, procedure: Procedure) -> bool;

    /// Register a procedure for the termination hook. `false` if already executed.
    fn install_termination(&mut self, name: &str, procedure: Procedure) -> bool;

    fn execute_initial_procedures(&mut self) -> LifecycleResult<()>;

    fn execute_termination_procedures(&mut self) -> LifecycleResult<()>;
}

#[derive(Default)]
struct ProcedureList {
    entries: Vec<(String, Procedure)>,
    executed: bool,
}

impl ProcedureList {
    fn install(&mut self, name: &str, procedure: Procedure) -> bool {
        if self.executed {
            return false;
        }
        self.entries.push((name.to_string(), procedure));
        true
    }

    fn execute(&mut self, hook: HookKind, reverse: bool) -> LifecycleResult<()> {
        self.executed = true;
        let mut entries = std::mem::take(&mut self.entries);
        if reverse {
            entries.reverse();
        }

        for (name, procedure) in entries {
            tracing::debug!(hook = %hook, procedure = %name, "Running procedure");
            procedure().map_err(|source| LifecycleError::Procedure { hook, name, source })?;
        }
        Ok(())
    }
}

/// Default [`Hooks`] implementation.
#[derive(Default)]
pub struct ProcedureRegistry {
    initial: ProcedureList,
    termination: ProcedureList,
}

impl ProcedureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial procedures still waiting to run.
    pub fn pending_initial(&self) -> usize {
        self.initial.entries.len()
    }

    /// Termination procedures still waiting to run.
    pub fn pending_termination(&self) -> usize {
        self.termination.entries.len()
    }
}

impl Hooks for ProcedureRegistry {
    fn install_initial(&mut self, name: &str, procedure: Procedure) -> bool {
        self.initial.install(name, procedure)
    }

    fn install_termination(&mut self, name: &str, procedure: Procedure) -> bool {
        self.termination.install(name, procedure)
    }

    fn execute_initial_procedures(&mut self) -> LifecycleResult<()> {
        self.initial.execute(HookKind::Initial, false)
    }

    fn execute_termination_procedures(&mut self) -> LifecycleResult<()> {
        self.termination.execute(HookKind::Termination, true)
    }
}

impl fmt::Debug for ProcedureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcedureRegistry")
            .field("pending_initial", &self.pending_initial())
            .field("pending_termination", &self.pending_termination())
            .finish()
    }
}

//! Shutdown phase and process termination.
//!
//! # Order
//! ```text
//! execute_termination_procedures (once)
//!     → Mk.finish (root) → Mk-1.finish → … → M1.finish
//!     → terminate(status)
//! ```
//!
//! # Design Decisions
//! - Every module is finished, whether or not bootstrap reached it
//! - The first failing finish skips the rest and suppresses termination
//! - Termination only happens after the phase completed

use std::time::Instant;

use crate::lifecycle::boundary::{self, Phase, PhaseOutcome};
use crate::lifecycle::error::LifecycleResult;
use crate::lifecycle::orchestrator::Orchestrator;

/// Ends the process once shutdown completes.
pub trait Terminator {
    fn terminate(&mut self, status: i32);
}

/// Exits the process via [`std::process::exit`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&mut self, status: i32) {
        tracing::info!(status, "Exiting");
        std::process::exit(status);
    }
}

/// Status reported by the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitPolicy {
    /// Fixed status for a run that is reported as successful.
    pub success_status: i32,

    /// Report lifecycle failures with [`ExitPolicy::FAILURE_STATUS`].
    pub strict: bool,
}

impl ExitPolicy {
    pub const FAILURE_STATUS: i32 = 1;

    /// The status to report, given whether any phase failed.
    pub fn status(&self, failed: bool) -> i32 {
        if self.strict && failed {
            Self::FAILURE_STATUS
        } else {
            self.success_status
        }
    }
}

impl Default for ExitPolicy {
    fn default() -> Self {
        Self {
            success_status: 0,
            strict: false,
        }
    }
}

impl Orchestrator {
    /// Run the termination procedures, finish every module in reverse
    /// order, then terminate the process.
    ///
    /// With the default [`ProcessExit`] terminator this does not return when
    /// the phase completes.
    pub fn shutdown(&mut self) -> PhaseOutcome {
        if self.shutdown.is_some() {
            return self.reject(Phase::Shutdown);
        }

        let started = Instant::now();
        tracing::info!(modules = self.sequence.len(), "Shutdown starting");

        let catch_panics = self.catch_panics;
        let result = boundary::guard(Phase::Shutdown, catch_panics, || self.run_shutdown());
        let outcome = self.settle(Phase::Shutdown, result, started);
        self.shutdown = Some(outcome);

        if outcome == PhaseOutcome::Completed {
            let bootstrap_failed = self.bootstrap.is_some_and(|o| o.is_failed());
            let status = self.policy.status(bootstrap_failed);
            self.terminator.terminate(status);
        }
        outcome
    }

    fn run_shutdown(&mut self) -> LifecycleResult<()> {
        tracing::debug!("Executing termination procedures");
        self.hooks.execute_termination_procedures()?;

        for index in (0..self.sequence.len()).rev() {
            self.finish_module(index)?;
        }
        Ok(())
    }
}

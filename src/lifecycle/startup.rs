//! Bootstrap phase.
//!
//! # Order
//! ```text
//! M1.init → M2.init → … → Mk-1.init
//!     → execute_initial_procedures (once)
//!     → Mk.init (root)
//! ```
//!
//! # Design Decisions
//! - Fail fast: the first failure ends the phase, later modules stay pending
//! - No compensating finish for modules that did come up
//! - The root module sees a world where every initial procedure has run

use std::time::Instant;

use crate::lifecycle::boundary::{self, Phase, PhaseOutcome};
use crate::lifecycle::error::LifecycleResult;
use crate::lifecycle::orchestrator::Orchestrator;

impl Orchestrator {
    /// Initialize every module in order, running the initial procedures
    /// just before the root module.
    ///
    /// Runs once. A failure is handed to the error catch and reported as
    /// [`PhaseOutcome::Failed`]; it is never returned as an error.
    pub fn bootstrap(&mut self, args: &[String]) -> PhaseOutcome {
        if self.bootstrap.is_some() {
            return self.reject(Phase::Bootstrap);
        }

        let started = Instant::now();
        tracing::info!(
            modules = self.sequence.len(),
            root = self.sequence.root_name(),
            argc = args.len(),
            "Bootstrap starting"
        );

        let catch_panics = self.catch_panics;
        let result = boundary::guard(Phase::Bootstrap, catch_panics, || self.run_bootstrap(args));
        let outcome = self.settle(Phase::Bootstrap, result, started);
        self.bootstrap = Some(outcome);
        outcome
    }

    fn run_bootstrap(&mut self, args: &[String]) -> LifecycleResult<()> {
        let root = self.sequence.root_index();
        for index in 0..root {
            self.init_module(index, args)?;
        }

        tracing::debug!("Executing initial procedures");
        self.hooks.execute_initial_procedures()?;

        self.init_module(root, args)
    }
}

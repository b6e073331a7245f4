//! The module lifecycle orchestrator.
//!
//! Holds the fixed sequence together with its collaborators (hooks, error
//! catch, terminator). The two phases live in `startup.rs` and
//! `shutdown.rs`.

use std::time::Instant;

use crate::config::schema::LifecycleConfig;
use crate::lifecycle::boundary::{DefaultErrorCatch, ErrorCatch, Phase, PhaseOutcome};
use crate::lifecycle::error::{LifecycleError, LifecycleResult};
use crate::lifecycle::hooks::{Hooks, ProcedureRegistry};
use crate::lifecycle::module::{InitContext, ModuleFailure};
use crate::lifecycle::sequence::ModuleSequence;
use crate::lifecycle::shutdown::{ExitPolicy, ProcessExit, Terminator};
use crate::observability::metrics;

/// Where a module stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// Not initialized yet.
    Pending,
    /// `init` was entered and has not returned.
    Initializing,
    Initialized,
    InitFailed,
    /// `finish` was entered and has not returned.
    Finishing,
    Finished,
    FinishFailed,
}

/// Which step of a module is being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Init,
    Finish,
}

impl Step {
    fn as_str(&self) -> &'static str {
        match self {
            Step::Init => "init",
            Step::Finish => "finish",
        }
    }
}

/// Runs a [`ModuleSequence`] through bootstrap and shutdown.
pub struct Orchestrator {
    pub(crate) sequence: ModuleSequence,
    pub(crate) states: Vec<ModuleState>,
    pub(crate) hooks: Box<dyn Hooks>,
    error_catch: Box<dyn ErrorCatch>,
    pub(crate) terminator: Box<dyn Terminator>,
    pub(crate) policy: ExitPolicy,
    pub(crate) catch_panics: bool,
    pub(crate) bootstrap: Option<PhaseOutcome>,
    pub(crate) shutdown: Option<PhaseOutcome>,
}

impl Orchestrator {
    /// Create an orchestrator with the default collaborators.
    pub fn new(sequence: ModuleSequence) -> Self {
        let states = vec![ModuleState::Pending; sequence.len()];
        Self {
            sequence,
            states,
            hooks: Box::new(ProcedureRegistry::new()),
            error_catch: Box::new(DefaultErrorCatch),
            terminator: Box::new(ProcessExit),
            policy: ExitPolicy::default(),
            catch_panics: true,
            bootstrap: None,
            shutdown: None,
        }
    }

    /// Create an orchestrator configured from the `[lifecycle]` section.
    pub fn from_config(sequence: ModuleSequence, config: &LifecycleConfig) -> Self {
        Self::new(sequence)
            .with_policy(ExitPolicy {
                success_status: config.success_status,
                strict: config.strict_exit,
            })
            .with_catch_panics(config.catch_panics)
    }

    pub fn with_hooks(mut self, hooks: impl Hooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn with_error_catch(mut self, error_catch: impl ErrorCatch + 'static) -> Self {
        self.error_catch = Box::new(error_catch);
        self
    }

    pub fn with_terminator(mut self, terminator: impl Terminator + 'static) -> Self {
        self.terminator = Box::new(terminator);
        self
    }

    pub fn with_policy(mut self, policy: ExitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }

    pub fn sequence(&self) -> &ModuleSequence {
        &self.sequence
    }

    pub fn policy(&self) -> ExitPolicy {
        self.policy
    }

    /// Per-module state, in initialization order.
    pub fn states(&self) -> Vec<(&str, ModuleState)> {
        self.sequence
            .names()
            .into_iter()
            .zip(self.states.iter().copied())
            .collect()
    }

    /// State of a module by name.
    pub fn state_of(&self, name: &str) -> Option<ModuleState> {
        self.sequence
            .names()
            .iter()
            .position(|n| *n == name)
            .map(|index| self.states[index])
    }

    /// Outcome of bootstrap, if it ran.
    pub fn bootstrap_outcome(&self) -> Option<PhaseOutcome> {
        self.bootstrap
    }

    /// Outcome of shutdown, if it ran.
    pub fn shutdown_outcome(&self) -> Option<PhaseOutcome> {
        self.shutdown
    }

    pub(crate) fn init_module(&mut self, index: usize, args: &[String]) -> LifecycleResult<()> {
        self.states[index] = ModuleState::Initializing;
        let module = self.sequence.module_mut(index);
        let name = module.name().to_string();
        tracing::debug!(module = %name, index, "Initializing module");

        let mut ctx = InitContext::new(args, self.hooks.as_mut());
        let result = module.init(&mut ctx);
        self.record_step(index, Step::Init, name, result)
    }

    pub(crate) fn finish_module(&mut self, index: usize) -> LifecycleResult<()> {
        self.states[index] = ModuleState::Finishing;
        let module = self.sequence.module_mut(index);
        let name = module.name().to_string();
        tracing::debug!(module = %name, index, "Finishing module");

        let result = module.finish();
        self.record_step(index, Step::Finish, name, result)
    }

    fn record_step(
        &mut self,
        index: usize,
        step: Step,
        module: String,
        result: Result<(), ModuleFailure>,
    ) -> LifecycleResult<()> {
        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics::record_module_step(&module, step.as_str(), outcome);

        self.states[index] = match (step, result.is_ok()) {
            (Step::Init, true) => ModuleState::Initialized,
            (Step::Init, false) => ModuleState::InitFailed,
            (Step::Finish, true) => ModuleState::Finished,
            (Step::Finish, false) => ModuleState::FinishFailed,
        };

        result.map_err(|source| match step {
            Step::Init => LifecycleError::Init { module, source },
            Step::Finish => LifecycleError::Finish { module, source },
        })
    }

    /// Close out a phase: hand a failure to the error catch, record the outcome.
    pub(crate) fn settle(
        &mut self,
        phase: Phase,
        result: LifecycleResult<()>,
        started: Instant,
    ) -> PhaseOutcome {
        let outcome = match result {
            Ok(()) => PhaseOutcome::Completed,
            Err(error) => {
                self.mark_interrupted();
                self.error_catch.catch(phase, &error);
                PhaseOutcome::Failed
            }
        };

        metrics::record_phase(phase, outcome, started);
        tracing::info!(
            phase = %phase,
            outcome = outcome.as_str(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Phase finished"
        );
        outcome
    }

    /// A phase that was asked to run twice.
    pub(crate) fn reject(&mut self, phase: Phase) -> PhaseOutcome {
        self.error_catch.catch(phase, &LifecycleError::Reentered(phase));
        PhaseOutcome::Failed
    }

    // A panic leaves the interrupted module mid-step.
    fn mark_interrupted(&mut self) {
        for state in self.states.iter_mut() {
            *state = match *state {
                ModuleState::Initializing => ModuleState::InitFailed,
                ModuleState::Finishing => ModuleState::FinishFailed,
                other => other,
            };
        }
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("sequence", &self.sequence)
            .field("policy", &self.policy)
            .field("catch_panics", &self.catch_panics)
            .field("bootstrap", &self.bootstrap)
            .field("shutdown", &self.shutdown)
            .finish()
    }
}

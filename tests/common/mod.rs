//! Shared utilities for lifecycle integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use bootseq::lifecycle::{
    ErrorCatch, Hooks, InitContext, LifecycleError, LifecycleResult, Module, ModuleResult,
    ModuleSequence, Orchestrator, Phase, Procedure, ProcedureRegistry, Terminator,
};

/// Ordered record of everything that happened during a test.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

/// Argument vector as the process would see it.
pub fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    Error,
    Panic,
}

/// A module that writes `init:NAME` / `finish:NAME` to the journal.
pub struct Recorder {
    name: String,
    journal: Journal,
    init_fault: Fault,
    finish_fault: Fault,
    initial_procedure: bool,
    termination_procedure: bool,
}

impl Recorder {
    pub fn new(name: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            journal: journal.clone(),
            init_fault: Fault::None,
            finish_fault: Fault::None,
            initial_procedure: false,
            termination_procedure: false,
        }
    }

    pub fn failing_init(mut self, fault: Fault) -> Self {
        self.init_fault = fault;
        self
    }

    pub fn failing_finish(mut self, fault: Fault) -> Self {
        self.finish_fault = fault;
        self
    }

    /// Install `initial:NAME` during init.
    pub fn with_initial_procedure(mut self) -> Self {
        self.initial_procedure = true;
        self
    }

    /// Install `termination:NAME` during init.
    pub fn with_termination_procedure(mut self) -> Self {
        self.termination_procedure = true;
        self
    }

    fn trip(&self, fault: Fault, step: &str) -> ModuleResult {
        match fault {
            Fault::None => Ok(()),
            Fault::Error => Err(format!("{} {} failed", self.name, step).into()),
            Fault::Panic => panic!("{} {} panicked", self.name, step),
        }
    }
}

impl Module for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) -> ModuleResult {
        self.journal.borrow_mut().push(format!("init:{}", self.name));

        if self.initial_procedure {
            let journal = self.journal.clone();
            let entry = format!("initial:{}", self.name);
            ctx.install_initial(&self.name, move || {
                journal.borrow_mut().push(entry);
                Ok(())
            });
        }
        if self.termination_procedure {
            let journal = self.journal.clone();
            let entry = format!("termination:{}", self.name);
            ctx.install_termination(&self.name, move || {
                journal.borrow_mut().push(entry);
                Ok(())
            });
        }

        self.trip(self.init_fault, "init")
    }

    fn finish(&mut self) -> ModuleResult {
        self.journal.borrow_mut().push(format!("finish:{}", self.name));
        self.trip(self.finish_fault, "finish")
    }
}

/// Hooks that journal each execution, then delegate to a real registry.
pub struct RecordingHooks {
    journal: Journal,
    registry: ProcedureRegistry,
    fail_initial: bool,
}

impl RecordingHooks {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            registry: ProcedureRegistry::new(),
            fail_initial: false,
        }
    }

    pub fn failing_initial(mut self) -> Self {
        self.fail_initial = true;
        self
    }
}

impl Hooks for RecordingHooks {
    fn install_initial(&mut self, name: &str, procedure: Procedure) -> bool {
        self.registry.install_initial(name, procedure)
    }

    fn install_termination(&mut self, name: &str, procedure: Procedure) -> bool {
        self.registry.install_termination(name, procedure)
    }

    fn execute_initial_procedures(&mut self) -> LifecycleResult<()> {
        self.journal.borrow_mut().push("hook:initial".to_string());
        if self.fail_initial {
            return Err(LifecycleError::Hook {
                hook: bootseq::lifecycle::HookKind::Initial,
                source: "initial hook refused".into(),
            });
        }
        self.registry.execute_initial_procedures()
    }

    fn execute_termination_procedures(&mut self) -> LifecycleResult<()> {
        self.journal.borrow_mut().push("hook:termination".to_string());
        self.registry.execute_termination_procedures()
    }
}

/// Error catch that keeps `(phase, message)` pairs.
#[derive(Clone, Default)]
pub struct RecordingCatch {
    pub caught: Rc<RefCell<Vec<(Phase, String)>>>,
}

impl RecordingCatch {
    pub fn calls(&self) -> Vec<(Phase, String)> {
        self.caught.borrow().clone()
    }
}

impl ErrorCatch for RecordingCatch {
    fn catch(&mut self, phase: Phase, error: &LifecycleError) {
        self.caught.borrow_mut().push((phase, error.to_string()));
    }
}

/// Terminator that records the requested status instead of exiting.
#[derive(Clone, Default)]
pub struct RecordingExit {
    pub statuses: Rc<RefCell<Vec<i32>>>,
}

impl RecordingExit {
    pub fn calls(&self) -> Vec<i32> {
        self.statuses.borrow().clone()
    }
}

impl Terminator for RecordingExit {
    fn terminate(&mut self, status: i32) {
        self.statuses.borrow_mut().push(status);
    }
}

/// Everything a test needs to observe an orchestrator run.
pub struct Harness {
    pub journal: Journal,
    pub catch: RecordingCatch,
    pub exit: RecordingExit,
    pub orchestrator: Orchestrator,
}

impl Harness {
    /// Wire `modules` with recording hooks, catch and terminator.
    pub fn new(journal: Journal, modules: Vec<Recorder>) -> Self {
        let hooks = RecordingHooks::new(&journal);
        Self::with_hooks(journal, modules, hooks)
    }

    pub fn with_hooks(journal: Journal, modules: Vec<Recorder>, hooks: RecordingHooks) -> Self {
        let modules: Vec<Box<dyn Module>> = modules
            .into_iter()
            .map(|m| Box::new(m) as Box<dyn Module>)
            .collect();
        let sequence = ModuleSequence::new(modules).expect("valid sequence");

        let catch = RecordingCatch::default();
        let exit = RecordingExit::default();
        let orchestrator = Orchestrator::new(sequence)
            .with_hooks(hooks)
            .with_error_catch(catch.clone())
            .with_terminator(exit.clone());

        Self {
            journal,
            catch,
            exit,
            orchestrator,
        }
    }

    /// Recorders named `names`, in order.
    pub fn named(names: &[&str]) -> Self {
        let journal = journal();
        let modules = names.iter().map(|n| Recorder::new(n, &journal)).collect();
        Self::new(journal, modules)
    }

    pub fn entries(&self) -> Vec<String> {
        entries(&self.journal)
    }
}

//! The module capability sequenced by the orchestrator.
//!
//! A module is opaque: the orchestrator only knows its name and that it can
//! be initialized and finished. Anything it needs from the process arrives
//! through [`InitContext`].

use crate::lifecycle::hooks::{Hooks, Procedure};

/// Failure payload a module (or an installed procedure) may return.
pub type ModuleFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of a single module step.
pub type ModuleResult = Result<(), ModuleFailure>;

/// A unit with an init and a finish operation.
pub trait Module {
    /// Stable name used in logs, metrics and error reports.
    fn name(&self) -> &str;

    /// Bring the module up. Called once, in sequence order.
    fn init(&mut self, ctx: &mut InitContext<'_>) -> ModuleResult;

    /// Tear the module down. Called once, in reverse sequence order.
    fn finish(&mut self) -> ModuleResult;
}

/// What a module sees while it initializes.
pub struct InitContext<'a> {
    args: &'a [String],
    hooks: &'a mut dyn Hooks,
}

impl<'a> InitContext<'a> {
    pub(crate) fn new(args: &'a [String], hooks: &'a mut dyn Hooks) -> Self {
        Self { args, hooks }
    }

    /// The process argument vector, program name first.
    pub fn args(&self) -> &'a [String] {
        self.args
    }

    /// Number of entries in the argument vector.
    pub fn argc(&self) -> usize {
        self.args.len()
    }

    /// Defer `procedure` until the initial-procedures hook runs.
    ///
    /// Returns `false` when that hook has already executed.
    pub fn install_initial<F>(&mut self, name: &str, procedure: F) -> bool
    where
        F: FnOnce() -> ModuleResult + 'static,
    {
        self.hooks.install_initial(name, Box::new(procedure) as Procedure)
    }

    /// Defer `procedure` until the termination-procedures hook runs.
    ///
    /// Returns `false` when that hook has already executed.
    pub fn install_termination<F>(&mut self, name: &str, procedure: F) -> bool
    where
        F: FnOnce() -> ModuleResult + 'static,
    {
        self.hooks.install_termination(name, Box::new(procedure) as Procedure)
    }
}

/// A module with empty init and finish steps.
#[derive(Debug, Clone)]
pub struct NoopModule {
    name: String,
}

impl NoopModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Module for NoopModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, _ctx: &mut InitContext<'_>) -> ModuleResult {
        Ok(())
    }

    fn finish(&mut self) -> ModuleResult {
        Ok(())
    }
}

/// Adapts a pair of closures into a [`Module`].
pub struct FnModule<I, F> {
    name: String,
    init: I,
    finish: F,
}

impl<I, F> FnModule<I, F>
where
    I: FnMut(&mut InitContext<'_>) -> ModuleResult,
    F: FnMut() -> ModuleResult,
{
    pub fn new(name: impl Into<String>, init: I, finish: F) -> Self {
        Self {
            name: name.into(),
            init,
            finish,
        }
    }
}

impl<I, F> Module for FnModule<I, F>
where
    I: FnMut(&mut InitContext<'_>) -> ModuleResult,
    F: FnMut() -> ModuleResult,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) -> ModuleResult {
        (self.init)(ctx)
    }

    fn finish(&mut self) -> ModuleResult {
        (self.finish)()
    }
}

impl<I, F> std::fmt::Debug for FnModule<I, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnModule").field("name", &self.name).finish()
    }
}

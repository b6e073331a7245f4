//! Module lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     M1..Mk-1 init → initial procedures → root init
//!
//! Shutdown (shutdown.rs):
//!     termination procedures → root finish → Mk-1..M1 finish → terminate
//!
//! Boundary (boundary.rs):
//!     error or panic inside a phase → ErrorCatch (once) → PhaseOutcome::Failed
//! ```
//!
//! # Design Decisions
//! - The module order is a literal list, never computed
//! - Finish order is the exact reverse of init order
//! - Single-threaded; each phase runs to completion or to its first failure
//! - Each phase runs at most once per orchestrator

pub mod boundary;
pub mod error;
pub mod hooks;
pub mod module;
pub mod orchestrator;
pub mod sequence;
pub mod shutdown;
pub mod startup;

pub use boundary::{DefaultErrorCatch, ErrorCatch, Phase, PhaseOutcome};
pub use error::{LifecycleError, LifecycleResult, SequenceError};
pub use hooks::{HookKind, Hooks, Procedure, ProcedureRegistry};
pub use module::{FnModule, InitContext, Module, ModuleFailure, ModuleResult, NoopModule};
pub use orchestrator::{ModuleState, Orchestrator};
pub use sequence::ModuleSequence;
pub use shutdown::{ExitPolicy, ProcessExit, Terminator};

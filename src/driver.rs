//! Process driver.
//!
//! Calls bootstrap, then shutdown, with no branching on either outcome.
//! Under the default [`ExitPolicy`] the status is always the fixed success
//! status; a failure only shows up through the error catch.

use crate::lifecycle::Orchestrator;

/// Run both phases and return the process status.
///
/// With the default terminator a completed shutdown exits the process
/// before this returns.
pub fn run(orchestrator: &mut Orchestrator, args: &[String]) -> i32 {
    let bootstrap = orchestrator.bootstrap(args);
    let shutdown = orchestrator.shutdown();

    let failed = bootstrap.is_failed() || shutdown.is_failed();
    orchestrator.policy().status(failed)
}

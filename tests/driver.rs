//! Process driver exit status.

use bootseq::driver;
use bootseq::lifecycle::{ExitPolicy, PhaseOutcome};

mod common;

use common::{argv, journal, Fault, Harness, Recorder};

fn strict() -> ExitPolicy {
    ExitPolicy {
        success_status: 0,
        strict: true,
    }
}

#[test]
fn test_clean_run_reports_success() {
    let mut h = Harness::named(&["Storage", "Map"]);

    let status = driver::run(&mut h.orchestrator, &argv(&["map"]));

    assert_eq!(status, 0);
    assert_eq!(h.exit.calls(), vec![0]);
    assert_eq!(h.orchestrator.shutdown_outcome(), Some(PhaseOutcome::Completed));
}

#[test]
fn test_bootstrap_failure_still_reports_success() {
    let journal = journal();
    let modules = vec![
        Recorder::new("Storage", &journal).failing_init(Fault::Error),
        Recorder::new("Map", &journal),
    ];
    let mut h = Harness::new(journal, modules);

    let status = driver::run(&mut h.orchestrator, &argv(&["map"]));

    assert_eq!(status, 0);
    // Shutdown ran anyway, over every module.
    assert_eq!(
        h.entries(),
        vec!["init:Storage", "hook:termination", "finish:Map", "finish:Storage"]
    );
    assert_eq!(h.exit.calls(), vec![0]);
    assert_eq!(h.catch.calls().len(), 1);
}

#[test]
fn test_shutdown_failure_still_reports_success() {
    let journal = journal();
    let modules = vec![
        Recorder::new("Storage", &journal),
        Recorder::new("Map", &journal).failing_finish(Fault::Panic),
    ];
    let mut h = Harness::new(journal, modules);

    let status = driver::run(&mut h.orchestrator, &argv(&["map"]));

    assert_eq!(status, 0);
    assert!(h.exit.calls().is_empty());
}

#[test]
fn test_strict_policy_surfaces_bootstrap_failure() {
    let journal = journal();
    let modules = vec![
        Recorder::new("Storage", &journal).failing_init(Fault::Error),
        Recorder::new("Map", &journal),
    ];
    let mut h = Harness::new(journal, modules);
    h.orchestrator = h.orchestrator.with_policy(strict());

    let status = driver::run(&mut h.orchestrator, &argv(&["map"]));

    assert_eq!(status, ExitPolicy::FAILURE_STATUS);
    assert_eq!(h.exit.calls(), vec![ExitPolicy::FAILURE_STATUS]);
}

#[test]
fn test_strict_policy_surfaces_shutdown_failure() {
    let journal = journal();
    let modules = vec![
        Recorder::new("Storage", &journal).failing_finish(Fault::Error),
        Recorder::new("Map", &journal),
    ];
    let mut h = Harness::new(journal, modules);
    h.orchestrator = h.orchestrator.with_policy(strict());

    let status = driver::run(&mut h.orchestrator, &argv(&["map"]));

    assert_eq!(status, ExitPolicy::FAILURE_STATUS);
    assert!(h.exit.calls().is_empty());
}

#[test]
fn test_custom_success_status() {
    let mut h = Harness::named(&["Map"]);
    h.orchestrator = h.orchestrator.with_policy(ExitPolicy {
        success_status: 3,
        strict: false,
    });

    assert_eq!(driver::run(&mut h.orchestrator, &argv(&["map"])), 3);
    assert_eq!(h.exit.calls(), vec![3]);
}

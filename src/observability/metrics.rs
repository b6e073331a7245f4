//! Lifecycle metrics.
//!
//! # Metrics
//! - `bootseq_module_steps_total` (counter): module init/finish by outcome
//! - `bootseq_phases_total` (counter): bootstrap/shutdown by outcome
//! - `bootseq_phase_duration_seconds` (histogram): time spent per phase
//! - `bootseq_option_scans_total` (counter): scanner calls by outcome
//!
//! # Design Decisions
//! - Facade only: without an installed recorder every call is a no-op
//! - The embedding program decides whether and where to export

use std::time::Instant;

use crate::lifecycle::boundary::{Phase, PhaseOutcome};

/// Record one module step (`init` or `finish`).
pub fn record_module_step(module: &str, step: &'static str, outcome: &'static str) {
    metrics::counter!("bootseq_module_steps_total",
        "module" => module.to_string(),
        "step" => step,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record the end of a phase.
pub fn record_phase(phase: Phase, outcome: PhaseOutcome, started: Instant) {
    metrics::counter!("bootseq_phases_total",
        "phase" => phase.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);

    metrics::histogram!("bootseq_phase_duration_seconds",
        "phase" => phase.as_str()
    )
    .record(started.elapsed().as_secs_f64());
}

/// Record one option scanner call.
pub fn record_scan(outcome: &'static str) {
    metrics::counter!("bootseq_option_scans_total", "outcome" => outcome).increment(1);
}

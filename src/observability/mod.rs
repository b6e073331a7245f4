//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! orchestrator, hooks, option mirror produce:
//!     → logging.rs (structured events, one `run` span per process)
//!     → metrics.rs (counters and histograms via the metrics facade)
//! ```
//!
//! # Design Decisions
//! - The orchestrator logs steps, never failures; the error catch does that
//! - JSON output for machines, pretty output for people

pub mod logging;
pub mod metrics;

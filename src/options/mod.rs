//! Option scanning subsystem.
//!
//! # Data Flow
//! ```text
//! argument vector + option spec
//!     → scanner.rs (one getopt step, state kept in OptionScanner)
//!     → mirror.rs  (copy optarg/optind/opterr/optopt into a ScanResult,
//!                   end-of-options -1 → 0)
//!     → caller inspects the ScanResult
//! ```
//!
//! # Design Decisions
//! - The scanner never fails; errors are reported through the result fields
//! - Results are owned copies, valid after the next call
//! - The mirror has no dependency on the lifecycle orchestrator beyond its
//!   no-op module slot

pub mod mirror;
pub mod scanner;

pub use mirror::{scan_option, MirrorModule, OptionMirror, ScanResult, END_OF_OPTIONS};
pub use scanner::OptionScanner;

//! Module bootstrap and shutdown sequencer.

pub mod config;
pub mod driver;
pub mod lifecycle;
pub mod observability;
pub mod options;
pub mod program;

pub use config::schema::BootConfig;
pub use lifecycle::{Module, ModuleSequence, Orchestrator};
pub use options::{scan_option, ScanResult};

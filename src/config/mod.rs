//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BootConfig (validated, immutable)
//!     → command-line overrides in main.rs
//!     → orchestrator, logging and the root module
//! ```
//!
//! # Design Decisions
//! - Config is read once before bootstrap; there is no reload
//! - All fields have defaults so no file is needed at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BootConfig, LifecycleConfig, LogFormat, LoggingConfig, OptionsConfig};
pub use validation::{validate_config, ValidationError};

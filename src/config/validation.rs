//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (exit status fits a process status byte)
//! - Check the option spec is something the scanner can use
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BootConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::BootConfig;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("logging.level `{0}` is not one of trace, debug, info, warn, error, off")]
    UnknownLogLevel(String),

    #[error("lifecycle.success_status {0} is outside 0..=255")]
    StatusOutOfRange(i32),

    #[error("lifecycle.strict_exit needs success_status 0, got {0}")]
    StrictWithNonZeroSuccess(i32),

    #[error("options.spec contains `{0}`, which cannot be an option character")]
    InvalidOptionChar(char),

    #[error("options.spec has a `:` at position {0} that follows no option")]
    StrayColon(usize),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &BootConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.logging.level.clone()));
    }

    let status = config.lifecycle.success_status;
    if !(0..=255).contains(&status) {
        errors.push(ValidationError::StatusOutOfRange(status));
    } else if config.lifecycle.strict_exit && status != 0 {
        errors.push(ValidationError::StrictWithNonZeroSuccess(status));
    }

    errors.extend(validate_option_spec(&config.options.spec));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_option_spec(spec: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let body = spec.strip_prefix(':').unwrap_or(spec);
    let offset = spec.len() - body.len();

    // Colons allowed after an option: one (required) or two (optional).
    let mut colons_allowed = 0;
    for (i, c) in body.chars().enumerate() {
        match c {
            ':' if colons_allowed > 0 => colons_allowed -= 1,
            ':' => errors.push(ValidationError::StrayColon(i + offset)),
            '-' | '?' => errors.push(ValidationError::InvalidOptionChar(c)),
            c if !c.is_ascii_graphic() => errors.push(ValidationError::InvalidOptionChar(c)),
            _ => colons_allowed = 2,
        }
    }
    errors
}

//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! serialization for `--print-config`.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BootConfig {
    /// Logging output.
    pub logging: LoggingConfig,

    /// Orchestrator behavior.
    pub lifecycle: LifecycleConfig,

    /// Option scanning done by the root module.
    pub options: OptionsConfig,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error, off).
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Lifecycle configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Exit status of a run reported as successful.
    pub success_status: i32,

    /// Exit with status 1 when a phase failed instead of the success status.
    pub strict_exit: bool,

    /// Turn panics inside a phase into lifecycle failures.
    pub catch_panics: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            success_status: 0,
            strict_exit: false,
            catch_panics: true,
        }
    }
}

/// Option scanning configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct OptionsConfig {
    /// Option spec in getopt syntax.
    pub spec: String,

    /// Scanner error-reporting flag.
    pub report_errors: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            spec: "hvs:o:".to_string(),
            report_errors: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BootConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.lifecycle.success_status, 0);
        assert!(!config.lifecycle.strict_exit);
        assert!(config.lifecycle.catch_panics);
        assert_eq!(config.options.spec, "hvs:o:");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: BootConfig = toml::from_str(
            r#"
            [logging]
            format = "json"

            [lifecycle]
            strict_exit = true
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert!(config.lifecycle.strict_exit);
        assert!(config.lifecycle.catch_panics);
        assert_eq!(config.options, OptionsConfig::default());
    }
}

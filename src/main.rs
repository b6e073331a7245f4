//! Module bootstrap and shutdown sequencer.
//!
//! Brings the map program's modules up in their fixed order, runs the
//! program body in the root module, then tears everything down in reverse.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv ──▶ main (config, logging, run span)
//!              │
//!              ▼
//!           driver::run ──────────────────────────────────────────────┐
//!              │                                                       │
//!              ▼                                                       ▼
//!   ┌──────────────────────── bootstrap ─────────┐   ┌──────────── shutdown ────────────┐
//!   │ Storage → … → WriteMap                     │   │ termination procedures           │
//!   │   → initial procedures                     │   │   → Map → WriteMap → … → Storage │
//!   │   → Map (root: option mirror → scanner)    │   │   → exit(status)                 │
//!   └──────────────────────┬─────────────────────┘   └──────────────┬───────────────────┘
//!                          ▼                                        ▼
//!                    failure boundary → ErrorCatch (once per phase)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use uuid::Uuid;

use bootseq::config::{load_config, BootConfig, LogFormat};
use bootseq::lifecycle::Orchestrator;
use bootseq::observability::logging::init_logging;
use bootseq::{driver, program};

/// Status for problems found before bootstrap (bad config, bad sequence).
const USAGE_STATUS: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "bootseq")]
#[command(version, about = "Bootstrap and shutdown sequencer for the map program", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the log output format.
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Override the log level.
    #[arg(long)]
    log_level: Option<String>,

    /// Exit with status 1 when a lifecycle phase fails.
    #[arg(long)]
    strict: bool,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,

    /// Arguments handed to the program's modules.
    #[arg(last = true)]
    program_args: Vec<String>,
}

impl Cli {
    fn effective_config(&self) -> Result<BootConfig, bootseq::config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => BootConfig::default(),
        };

        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.strict {
            config.lifecycle.strict_exit = true;
        }

        bootseq::config::validate_config(&config)
            .map_err(bootseq::config::ConfigError::Validation)?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.effective_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("bootseq: {}", e);
            return ExitCode::from(USAGE_STATUS);
        }
    };

    if cli.print_config {
        return match serde_json::to_string_pretty(&config) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("bootseq: {}", e);
                ExitCode::from(USAGE_STATUS)
            }
        };
    }

    init_logging(&config.logging);

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("run", run_id = %run_id);
    let _enter = span.enter();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bootseq starting");

    let sequence = match program::map_sequence(&config.options) {
        Ok(sequence) => sequence,
        Err(e) => {
            tracing::error!(error = %e, "Invalid module sequence");
            return ExitCode::from(USAGE_STATUS);
        }
    };

    let mut orchestrator = Orchestrator::from_config(sequence, &config.lifecycle);

    let program_name = std::env::args()
        .next()
        .unwrap_or_else(|| program::ROOT_MODULE.to_string());
    let mut args = Vec::with_capacity(cli.program_args.len() + 1);
    args.push(program_name);
    args.extend(cli.program_args);

    let status = driver::run(&mut orchestrator, &args);
    ExitCode::from(u8::try_from(status).unwrap_or(USAGE_STATUS))
}

// src/logging.rs

//! Diagnostic logging setup for `runlog` using `tracing` + `tracing-subscriber`.
//!
//! This is separate from the two sinks the executor writes to: it only
//! carries spawn/exit details and sink write failures.
//!
//! Filter priority:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `RUNLOG_LOG` environment variable, any `EnvFilter` directive
//!    (e.g. `debug` or `runlog::exec=trace`)
//! 3. default to `warn`
//!
//! Logs are sent to STDERR so that `--rpc` output on stdout stays clean.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

const ENV_VAR: &str = "RUNLOG_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_env_filter(build_filter(cli_level))
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;

    Ok(())
}

fn build_filter(cli_level: Option<LogLevel>) -> EnvFilter {
    match cli_level {
        Some(lvl) => EnvFilter::new(lvl.as_directive()),
        None => EnvFilter::try_from_env(ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

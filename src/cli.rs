// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::SinkTarget;

/// Command-line arguments for `runlog`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runlog",
    version,
    about = "Run a command and log its progress and output to two sinks.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Runlog.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Stream the command's stdout/stderr live into the info/error logs.
    #[arg(short, long)]
    pub verbose: bool,

    /// Capture stdout and print it raw on our stdout (request/response mode).
    #[arg(long, conflicts_with = "verbose")]
    pub rpc: bool,

    /// Working directory for the command.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Informational log target: `stdout`, `stderr` or a file path.
    #[arg(long, value_name = "TARGET")]
    pub info_log: Option<SinkTarget>,

    /// Error log target: `stdout`, `stderr` or a file path.
    #[arg(long, value_name = "TARGET")]
    pub error_log: Option<SinkTarget>,

    /// Do not prefix log lines with a timestamp.
    #[arg(long)]
    pub no_timestamps: bool,

    /// Diagnostic logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNLOG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve config and print what would run, without running it.
    #[arg(long)]
    pub dry_run: bool,

    /// The program to run followed by its arguments.
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod sink;
pub mod types;

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{ConfigFile, RunSection};
use crate::errors::ExecuteError;
use crate::exec::{CommandExecutor, Executor};
use crate::sink::{SharedSink, StreamSink};
use crate::types::SinkTarget;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + CLI overrides
/// - the two log sinks
/// - the executor
///
/// Returns the process exit code: `0` on success, the command's own exit
/// code when it failed with one, `1` otherwise. Command failures are already
/// reported through the sinks and are not returned as errors.
pub fn run(args: CliArgs) -> Result<i32> {
    let mut cfg = config::load_or_default(args.config.as_deref())?;
    apply_overrides(&mut cfg, &args);

    let cmd = build_command(&args.command, &cfg.run)?;

    if args.dry_run {
        print_dry_run(&cfg, &cmd, args.rpc);
        return Ok(0);
    }

    let (info_log, err_log) = open_sinks(&cfg)?;
    let executor = CommandExecutor::new(info_log, err_log);

    if args.rpc {
        let (output, code) = match executor.execute_rpc(cmd) {
            Ok(output) => (output, 0),
            Err(err) => {
                let code = exit_code_for(&err);
                (err.into_output(), code)
            }
        };
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&output).context("writing command output to stdout")?;
        stdout.flush().context("flushing stdout")?;
        Ok(code)
    } else {
        match executor.execute(cmd, cfg.run.verbose) {
            Ok(()) => Ok(0),
            Err(err) => Ok(exit_code_for(&err)),
        }
    }
}

/// CLI flags win over the config file.
fn apply_overrides(cfg: &mut ConfigFile, args: &CliArgs) {
    if args.verbose {
        cfg.run.verbose = true;
    }
    if let Some(dir) = &args.dir {
        cfg.run.dir = Some(dir.clone());
    }
    if let Some(target) = &args.info_log {
        cfg.log.info = target.clone();
    }
    if let Some(target) = &args.error_log {
        cfg.log.error = target.clone();
    }
    if args.no_timestamps {
        cfg.log.timestamps = false;
    }
}

/// Build the process descriptor from the trailing CLI words and `[run]`.
pub fn build_command(argv: &[String], run: &RunSection) -> Result<Command> {
    let (program, rest) = argv.split_first().context("no command given")?;

    let mut cmd = Command::new(program);
    cmd.args(rest);
    if let Some(dir) = &run.dir {
        cmd.current_dir(dir);
    }
    cmd.envs(&run.env);

    Ok(cmd)
}

/// Open both sinks. Targets naming the same file share one sink so their
/// records never interleave mid-line.
fn open_sinks(cfg: &ConfigFile) -> Result<(SharedSink, SharedSink)> {
    let mut files: HashMap<PathBuf, SharedSink> = HashMap::new();
    let info = open_sink(&cfg.log.info, cfg.log.timestamps, &mut files)?;
    let err = open_sink(&cfg.log.error, cfg.log.timestamps, &mut files)?;
    Ok((info, err))
}

fn open_sink(
    target: &SinkTarget,
    timestamps: bool,
    files: &mut HashMap<PathBuf, SharedSink>,
) -> Result<SharedSink> {
    let sink: SharedSink = match target {
        SinkTarget::Stdout => Arc::new(StreamSink::stdout().with_timestamps(timestamps)),
        SinkTarget::Stderr => Arc::new(StreamSink::stderr().with_timestamps(timestamps)),
        SinkTarget::File(path) => {
            if let Some(existing) = files.get(path) {
                return Ok(Arc::clone(existing));
            }
            let sink: SharedSink = Arc::new(
                StreamSink::append_file(path)
                    .with_context(|| format!("opening log file {:?}", path))?
                    .with_timestamps(timestamps),
            );
            files.insert(path.clone(), Arc::clone(&sink));
            sink
        }
    };
    debug!(sink = %target, timestamps, "opened log sink");
    Ok(sink)
}

fn exit_code_for(err: &ExecuteError) -> i32 {
    err.exit_code().filter(|&code| code != 0).unwrap_or(1)
}

/// Simple dry-run output: print sinks and the command.
fn print_dry_run(cfg: &ConfigFile, cmd: &Command, rpc: bool) {
    println!("runlog dry-run");
    println!("  log.info = {}", cfg.log.info);
    println!("  log.error = {}", cfg.log.error);
    println!("  log.timestamps = {}", cfg.log.timestamps);
    println!();

    let mode = if rpc {
        "rpc"
    } else if cfg.run.verbose {
        "verbose"
    } else {
        "combined"
    };
    println!("command ({mode}):");
    println!("  program: {}", cmd.get_program().to_string_lossy());
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    if !args.is_empty() {
        println!("  args: {:?}", args);
    }
    if let Some(dir) = cmd.get_current_dir() {
        println!("  dir: {}", dir.display());
    }
    for (key, value) in cfg.run.env.iter() {
        println!("  env: {key}={value}");
    }

    debug!("dry-run complete (no execution)");
}

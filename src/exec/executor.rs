// src/exec/executor.rs

use std::process::Command;

use tracing::debug;

use crate::errors::{CommandError, ExecuteError};
use crate::exec::process;
use crate::sink::{LogWriter, SharedSink};

pub const MSG_PROCESSING: &str = "Processing message...";
pub const MSG_PROCESSED: &str = "Processed!";
pub const MSG_FAILED: &str = "Failed. Check error log for details.";

/// Runs prepared commands and narrates progress into log sinks.
///
/// Production code uses [`CommandExecutor`]; callers that only need the
/// contract can depend on this trait and swap in a fake in tests.
pub trait Executor {
    /// Run `cmd` to completion.
    ///
    /// - `verbose = true`: stdout/stderr are forwarded live into the info and
    ///   error sinks.
    /// - `verbose = false`: combined output is captured and only written to
    ///   the error sink if the run fails.
    fn execute(&self, cmd: Command, verbose: bool) -> Result<(), ExecuteError>;

    /// Run `cmd` to completion and return its raw standard output.
    ///
    /// On failure the captured bytes are available through
    /// [`ExecuteError::output`].
    fn execute_rpc(&self, cmd: Command) -> Result<Vec<u8>, ExecuteError>;
}

/// [`Executor`] backed by real OS processes.
///
/// Holds the two injected sinks and nothing else, so one executor can be
/// reused for any number of sequential runs.
#[derive(Clone)]
pub struct CommandExecutor {
    info_log: SharedSink,
    err_log: SharedSink,
}

impl CommandExecutor {
    pub fn new(info_log: SharedSink, err_log: SharedSink) -> Self {
        Self { info_log, err_log }
    }

    fn failed(&self, output: &[u8]) {
        self.err_log
            .println(&format!("Failed: {}", String::from_utf8_lossy(output)));
    }

    fn finish<T>(
        &self,
        result: Result<T, CommandError>,
        output: Vec<u8>,
    ) -> Result<T, ExecuteError> {
        match result {
            Ok(value) => {
                self.info_log.println(MSG_PROCESSED);
                Ok(value)
            }
            Err(source) => {
                self.info_log.println(MSG_FAILED);
                self.err_log.println(&format!("Error: {source}"));
                Err(ExecuteError::new(source, output))
            }
        }
    }
}

impl Executor for CommandExecutor {
    fn execute(&self, cmd: Command, verbose: bool) -> Result<(), ExecuteError> {
        self.info_log.println(MSG_PROCESSING);
        trace_command(&cmd, if verbose { "verbose" } else { "combined" });

        let result = if verbose {
            process::run_streaming(
                cmd,
                LogWriter::new(self.info_log.clone()),
                LogWriter::new(self.err_log.clone()),
            )
        } else {
            let (output, result) = process::run_combined(cmd);
            if result.is_err() {
                self.failed(&output);
            }
            result
        };

        self.finish(result, Vec::new())
    }

    fn execute_rpc(&self, cmd: Command) -> Result<Vec<u8>, ExecuteError> {
        self.info_log.println(MSG_PROCESSING);
        trace_command(&cmd, "rpc");

        let (output, result) = process::run_stdout(cmd);
        match result {
            Ok(()) => self.finish(Ok(output), Vec::new()),
            Err(err) => {
                self.failed(&output);
                self.finish(Err(err), output)
            }
        }
    }
}

fn trace_command(cmd: &Command, mode: &str) {
    debug!(
        program = ?cmd.get_program(),
        args = ?cmd.get_args().collect::<Vec<_>>(),
        dir = ?cmd.get_current_dir(),
        mode,
        "running command"
    );
}

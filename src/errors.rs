// src/errors.rs

//! Crate-wide error types.
//!
//! - [`CommandError`] is the underlying failure of a single process run.
//! - [`ExecuteError`] is what the executor hands back to callers: the
//!   underlying failure behind a fixed message prefix, plus whatever output
//!   was captured before the failure.
//! - [`RunlogError`] covers config loading and validation.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Why a single process run failed.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The process could not be started at all.
    #[error("{0}")]
    Spawn(#[source] io::Error),

    /// Reading the process's pipes or waiting on it failed.
    #[error("{0}")]
    Io(#[source] io::Error),

    /// The process ran and exited unsuccessfully.
    ///
    /// `stderr` holds the process's standard error when the run path
    /// collected it separately (see [`crate::exec::Executor::execute_rpc`]);
    /// it is empty otherwise.
    #[error("{status}")]
    Status { status: ExitStatus, stderr: Vec<u8> },
}

impl CommandError {
    /// Exit code of the process, if it ran and exited with one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::Status { status, .. } => status.code(),
            _ => None,
        }
    }
}

/// Error returned by [`crate::exec::Executor`] operations.
#[derive(Error, Debug)]
#[error("Error occurred during execution of command: {source}")]
pub struct ExecuteError {
    #[source]
    source: CommandError,
    output: Vec<u8>,
}

impl ExecuteError {
    pub fn new(source: CommandError, output: Vec<u8>) -> Self {
        Self { source, output }
    }

    /// The underlying process failure.
    pub fn command_error(&self) -> &CommandError {
        &self.source
    }

    /// Standard output captured before the failure.
    ///
    /// Always empty for [`crate::exec::Executor::execute`], which never
    /// returns output.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.source.exit_code()
    }
}

#[derive(Error, Debug)]
pub enum RunlogError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RunlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_error_message_wraps_underlying() {
        let err = ExecuteError::new(
            CommandError::Spawn(io::Error::new(io::ErrorKind::NotFound, "no such program")),
            Vec::new(),
        );
        assert_eq!(
            err.to_string(),
            "Error occurred during execution of command: no such program"
        );
    }

    #[test]
    fn execute_error_exposes_source_and_output() {
        use std::error::Error as _;

        let err = ExecuteError::new(
            CommandError::Io(io::Error::other("broken pipe")),
            b"partial".to_vec(),
        );
        assert_eq!(err.output(), b"partial");
        assert_eq!(err.source().map(|s| s.to_string()), Some("broken pipe".into()));
        assert!(err.exit_code().is_none());
        assert_eq!(err.into_output(), b"partial".to_vec());
    }
}

#![allow(dead_code)]

use std::process::Command;
use std::sync::Arc;

use runlog::exec::CommandExecutor;
use runlog::sink::{SharedSink, StreamSink};

use crate::buffer::SharedBuffer;

/// `sh -c <script>`.
pub fn sh(script: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(script);
    cmd
}

/// An executor whose info and error sinks write into inspectable buffers.
pub struct CapturedExecutor {
    pub executor: CommandExecutor,
    pub info: SharedBuffer,
    pub err: SharedBuffer,
    pub info_sink: SharedSink,
    pub err_sink: SharedSink,
}

/// Builder for [`CapturedExecutor`].
pub struct ExecutorBuilder {
    timestamps: bool,
}

impl ExecutorBuilder {
    pub fn new() -> Self {
        Self { timestamps: true }
    }

    pub fn timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    pub fn build(self) -> CapturedExecutor {
        let info = SharedBuffer::new();
        let err = SharedBuffer::new();
        let info_sink: SharedSink =
            Arc::new(StreamSink::new(info.clone()).with_timestamps(self.timestamps));
        let err_sink: SharedSink =
            Arc::new(StreamSink::new(err.clone()).with_timestamps(self.timestamps));

        CapturedExecutor {
            executor: CommandExecutor::new(Arc::clone(&info_sink), Arc::clone(&err_sink)),
            info,
            err,
            info_sink,
            err_sink,
        }
    }
}

impl Default for ExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

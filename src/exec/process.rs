// src/exec/process.rs

//! Blocking process runners.
//!
//! Each function consumes an unstarted `Command`, attaches the stdio it
//! needs, spawns the process and blocks until it exits. Stdin is always the
//! null device, whichever path runs the command. None of them log to
//! the executor's sinks; that is the job of [`super::executor`].

use std::io::{self, BufRead, BufReader, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use tracing::debug;

use crate::errors::CommandError;

const CHUNK_SIZE: usize = 8 * 1024;

/// Run `cmd`, forwarding its stdout into `stdout` and its stderr into
/// `stderr` chunk by chunk, as soon as each read returns.
///
/// Both pipes are drained concurrently so a chatty stderr cannot stall the
/// child while stdout is being read: stderr is pumped on a scoped thread
/// that is joined before this function returns.
pub fn run_streaming<O, E>(mut cmd: Command, stdout: O, stderr: E) -> Result<(), CommandError>
where
    O: Write,
    E: Write + Send,
{
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(CommandError::Spawn)?;
    debug!(pid = child.id(), "spawned streaming process");

    let out_pipe = child.stdout.take();
    let err_pipe = child.stderr.take();

    let pumped = thread::scope(|s| {
        let err_pump = s.spawn(move || match err_pipe {
            Some(pipe) => forward_chunks(pipe, stderr),
            None => Ok(()),
        });

        let out_res = match out_pipe {
            Some(pipe) => forward_chunks(pipe, stdout),
            None => Ok(()),
        };
        let err_res = err_pump
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));

        out_res.and(err_res)
    });

    let status = child.wait().map_err(CommandError::Io)?;
    check_status(status, Vec::new())?;
    pumped.map_err(CommandError::Io)
}

/// Run `cmd` with stdout and stderr sharing a single pipe, returning
/// everything the process wrote, in write order, together with the outcome.
///
/// The output is returned even when the run fails.
pub fn run_combined(cmd: Command) -> (Vec<u8>, Result<(), CommandError>) {
    let mut output = Vec::new();
    let result = run_combined_into(cmd, &mut output);
    (output, result)
}

fn run_combined_into(mut cmd: Command, output: &mut Vec<u8>) -> Result<(), CommandError> {
    let (mut reader, writer) = io::pipe().map_err(CommandError::Spawn)?;
    let writer_err = writer.try_clone().map_err(CommandError::Spawn)?;
    cmd.stdin(Stdio::null()).stdout(writer).stderr(writer_err);

    let mut child = cmd.spawn().map_err(CommandError::Spawn)?;
    debug!(pid = child.id(), "spawned capturing process");

    // `cmd` still owns our copies of the write end; EOF only arrives once
    // they are closed.
    drop(cmd);

    let read = reader.read_to_end(output).map_err(CommandError::Io);
    let status = child.wait().map_err(CommandError::Io)?;
    check_status(status, Vec::new())?;
    read.map(|_| ())
}

/// Run `cmd` capturing stdout only. Stderr is collected separately and only
/// surfaces inside [`CommandError::Status`].
pub fn run_stdout(mut cmd: Command) -> (Vec<u8>, Result<(), CommandError>) {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    match cmd.output() {
        Ok(out) => {
            let result = check_status(out.status, out.stderr);
            (out.stdout, result)
        }
        Err(err) => (Vec::new(), Err(CommandError::Spawn(err))),
    }
}

fn check_status(status: ExitStatus, stderr: Vec<u8>) -> Result<(), CommandError> {
    debug!(exit_code = ?status.code(), success = status.success(), "process exited");
    if status.success() {
        Ok(())
    } else {
        Err(CommandError::Status { status, stderr })
    }
}

/// Copy `pipe` into `dest`, one `write_all` per read. Partial lines are
/// forwarded without waiting for a newline.
fn forward_chunks(pipe: impl Read, mut dest: impl Write) -> io::Result<()> {
    let mut reader = BufReader::with_capacity(CHUNK_SIZE, pipe);

    loop {
        let chunk = match reader.fill_buf() {
            Ok([]) => return dest.flush(),
            Ok(chunk) => chunk,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        dest.write_all(chunk)?;
        let len = chunk.len();
        reader.consume(len);
    }
}

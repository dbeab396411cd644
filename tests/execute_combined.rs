// tests/execute_combined.rs
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, sh, strip_stamps, unstamped, ExecutorBuilder};

use std::process::Command;

use runlog::exec::{Executor, MSG_FAILED, MSG_PROCESSED, MSG_PROCESSING};

#[test]
fn success_logs_processing_then_processed_only() {
    init_tracing();
    let h = ExecutorBuilder::new().build();

    h.executor.execute(sh("echo hidden; echo also-hidden >&2"), false).unwrap();

    let info = h.info.lines();
    assert_eq!(strip_stamps(&info), vec![MSG_PROCESSING, MSG_PROCESSED]);
    assert!(info.iter().all(|l| unstamped(l).is_some()));
    assert!(h.err.is_empty());
}

#[test]
fn false_reports_empty_output_and_exit_status() {
    init_tracing();
    let h = ExecutorBuilder::new().build();

    let err = h.executor.execute(Command::new("false"), false).unwrap_err();

    assert!(
        err.to_string()
            .starts_with("Error occurred during execution of command: ")
    );
    assert_eq!(err.exit_code(), Some(1));
    assert!(err.output().is_empty());

    assert_eq!(strip_stamps(&h.info.lines()), vec![MSG_PROCESSING, MSG_FAILED]);
    assert_eq!(
        strip_stamps(&h.err.lines()),
        vec!["Failed: ", "Error: exit status: 1"]
    );
}

#[test]
fn failure_dumps_combined_output_as_one_record() {
    init_tracing();
    let h = ExecutorBuilder::new().build();

    let err = h
        .executor
        .execute(sh("echo first; echo second >&2; echo third; exit 5"), false)
        .unwrap_err();

    assert!(err.to_string().ends_with("exit status: 5"));

    // The whole buffer is one record: only its first line carries a stamp.
    let lines = h.err.lines();
    assert_eq!(lines.len(), 4);
    assert_eq!(unstamped(&lines[0]), Some("Failed: first"));
    assert_eq!(lines[1], "second");
    assert_eq!(lines[2], "third");
    assert_eq!(unstamped(&lines[3]), Some("Error: exit status: 5"));
}

#[test]
fn missing_program_is_a_spawn_failure() {
    init_tracing();
    let h = ExecutorBuilder::new().build();

    let err = h
        .executor
        .execute(Command::new("/no/such/runlog-test-binary"), false)
        .unwrap_err();

    assert!(matches!(
        err.command_error(),
        runlog::errors::CommandError::Spawn(_)
    ));
    assert!(err.exit_code().is_none());
    assert_eq!(strip_stamps(&h.info.lines()), vec![MSG_PROCESSING, MSG_FAILED]);
}

#[test]
fn working_dir_and_env_reach_the_process() {
    init_tracing();
    let h = ExecutorBuilder::new().build();
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = sh("test \"$(pwd -P)\" = \"$EXPECTED\"");
    cmd.current_dir(dir.path())
        .env("EXPECTED", dir.path().canonicalize().unwrap());

    h.executor.execute(cmd, false).unwrap();
}

#[test]
fn repeated_runs_do_not_share_state() {
    init_tracing();
    let h = ExecutorBuilder::new().timestamps(false).build();

    h.executor.execute(sh("true"), false).unwrap();
    let first = h.info.lines();
    h.executor.execute(sh("true"), false).unwrap();
    let both = h.info.lines();

    assert_eq!(first, vec![MSG_PROCESSING, MSG_PROCESSED]);
    assert_eq!(both[..2], both[2..]);
    assert!(h.err.is_empty());
}

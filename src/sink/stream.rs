// src/sink/stream.rs

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;
use tracing::warn;

use super::LogSink;

/// Timestamp prefix layout, e.g. `2026/10/19 14:03:07`.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// A [`LogSink`] writing records to an arbitrary `Write` destination.
///
/// Each record is written with a single `write_all` under the sink's lock
/// and always ends in exactly one newline. Write errors are reported through
/// `tracing` and otherwise ignored, so logging never fails the caller.
pub struct StreamSink {
    inner: Mutex<Inner>,
}

struct Inner {
    out: Box<dyn Write + Send>,
    timestamps: bool,
}

impl StreamSink {
    /// Sink over `out` with timestamps enabled.
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            inner: Mutex::new(Inner {
                out: Box::new(out),
                timestamps: true,
            }),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Sink appending to the file at `path`, creating it if needed.
    pub fn append_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::new(file))
    }

    /// Builder-style variant of [`LogSink::set_timestamps`].
    pub fn with_timestamps(self, enabled: bool) -> Self {
        self.set_timestamps(enabled);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic mid-write leaves at worst a torn record; keep logging.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, msg: &[u8], stamped: bool) {
        let mut inner = self.lock();

        let mut record = Vec::with_capacity(msg.len() + TIMESTAMP_FORMAT.len() + 2);
        if stamped && inner.timestamps {
            record.extend_from_slice(Local::now().format(TIMESTAMP_FORMAT).to_string().as_bytes());
            record.push(b' ');
        }
        record.extend_from_slice(msg);
        if !msg.ends_with(b"\n") {
            record.push(b'\n');
        }

        let res = inner.out.write_all(&record);
        let res = res.and_then(|()| inner.out.flush());
        if let Err(err) = res {
            warn!(error = %err, "failed to write log record");
        }
    }
}

impl LogSink for StreamSink {
    fn println(&self, msg: &str) {
        self.emit(msg.as_bytes(), true);
    }

    fn write_raw(&self, bytes: &[u8]) {
        self.emit(bytes, false);
    }

    fn timestamps(&self) -> bool {
        self.lock().timestamps
    }

    fn set_timestamps(&self, enabled: bool) {
        self.lock().timestamps = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::testing::Capture;

    fn is_stamped(line: &str, msg: &str) -> bool {
        // "YYYY/MM/DD HH:MM:SS " is 20 bytes.
        line.len() == 20 + msg.len()
            && line.ends_with(msg)
            && chrono::NaiveDateTime::parse_from_str(&line[..19], TIMESTAMP_FORMAT).is_ok()
    }

    #[test]
    fn println_prefixes_timestamp_and_newline() {
        let cap = Capture::default();
        let sink = StreamSink::new(cap.clone());

        sink.println("Processed!");

        let lines = cap.lines();
        assert_eq!(lines.len(), 1);
        assert!(is_stamped(&lines[0], "Processed!"), "got {:?}", lines[0]);
        assert!(cap.text().ends_with("Processed!\n"));
    }

    #[test]
    fn println_without_timestamps_is_bare() {
        let cap = Capture::default();
        let sink = StreamSink::new(cap.clone()).with_timestamps(false);

        sink.println("hello");

        assert_eq!(cap.text(), "hello\n");
        assert!(!sink.timestamps());
    }

    #[test]
    fn raw_write_never_stamps_and_keeps_mode() {
        let cap = Capture::default();
        let sink = StreamSink::new(cap.clone());

        sink.write_raw(b"line one\n");
        sink.write_raw(b"no newline");

        assert_eq!(cap.text(), "line one\nno newline\n");
        assert!(sink.timestamps());
    }

    #[test]
    fn newline_is_not_doubled() {
        let cap = Capture::default();
        let sink = StreamSink::new(cap.clone()).with_timestamps(false);

        sink.println("Failed: oops\n");

        assert_eq!(cap.text(), "Failed: oops\n");
    }

    #[test]
    fn append_file_appends_across_sinks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.log");

        StreamSink::append_file(&path).unwrap().with_timestamps(false).println("first");
        StreamSink::append_file(&path).unwrap().with_timestamps(false).println("second");

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}

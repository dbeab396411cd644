// src/sink/writer.rs

use std::io::{self, Write};

use super::SharedSink;

/// `io::Write` adapter over a single [`LogSink`](super::LogSink).
///
/// Every `write` call becomes one raw record (no timestamp prefix) and
/// always reports the full length as written.
pub struct LogWriter {
    sink: SharedSink,
}

impl LogWriter {
    pub fn new(sink: SharedSink) -> Self {
        Self { sink }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write_raw(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

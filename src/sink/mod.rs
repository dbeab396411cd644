// src/sink/mod.rs

//! Logging sinks used by the executor.
//!
//! A sink is an append-only text channel with a timestamp-prefix mode, in
//! the spirit of a classic line logger. The executor gets two of them
//! (informational and error) injected at construction.
//!
//! - [`stream`] provides [`StreamSink`], a sink over any `Write` destination.
//! - [`writer`] provides [`LogWriter`], which adapts a sink into an
//!   `io::Write` so subprocess output can be forwarded into it.

pub mod stream;
pub mod writer;

use std::sync::Arc;

pub use stream::{StreamSink, TIMESTAMP_FORMAT};
pub use writer::LogWriter;

/// An append-only log destination.
///
/// Implementations must be internally synchronised: every method takes
/// `&self` and a single call produces exactly one record.
pub trait LogSink: Send + Sync {
    /// Write `msg` as one record, prefixed with a timestamp when the
    /// timestamp mode is enabled.
    fn println(&self, msg: &str);

    /// Write `bytes` as one record without any timestamp prefix.
    ///
    /// Does not read or change the timestamp mode.
    fn write_raw(&self, bytes: &[u8]);

    fn timestamps(&self) -> bool;

    fn set_timestamps(&self, enabled: bool);
}

/// Shared handle to a sink, as stored by the executor.
pub type SharedSink = Arc<dyn LogSink>;

#[cfg(test)]
pub(crate) mod testing {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// Clonable in-memory writer; every clone sees the same bytes.
    #[derive(Clone, Default)]
    pub(crate) struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        pub(crate) fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }

        pub(crate) fn lines(&self) -> Vec<String> {
            self.text().lines().map(str::to_string).collect()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

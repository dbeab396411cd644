// tests/log_writer_props.rs

use std::io::Write;
use std::sync::Arc;

use proptest::prelude::*;
use runlog::sink::{LogSink, LogWriter, StreamSink};
use runlog_test_utils::buffer::SharedBuffer;

proptest! {
    #[test]
    fn write_reports_full_length_and_emits_bytes_verbatim(
        bytes in proptest::collection::vec(any::<u8>(), 0..512),
        stamped in any::<bool>(),
    ) {
        let buf = SharedBuffer::new();
        let sink = Arc::new(StreamSink::new(buf.clone()).with_timestamps(stamped));
        let mut writer = LogWriter::new(sink.clone());

        let n = writer.write(&bytes).unwrap();

        prop_assert_eq!(n, bytes.len());
        prop_assert_eq!(sink.timestamps(), stamped);

        let mut expected = bytes.clone();
        if !expected.ends_with(b"\n") {
            expected.push(b'\n');
        }
        prop_assert_eq!(buf.contents(), expected);
    }
}

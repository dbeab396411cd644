#![allow(dead_code)]

use std::sync::LazyLock;

use regex::Regex;

pub use runlog_test_utils::buffer::SharedBuffer;
pub use runlog_test_utils::builders::{sh, CapturedExecutor, ExecutorBuilder};
pub use runlog_test_utils::init_tracing;

static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2} ").unwrap());

/// The line without its timestamp prefix, or `None` if it has none.
pub fn unstamped(line: &str) -> Option<&str> {
    TIMESTAMP.find(line).map(|m| &line[m.end()..])
}

/// Strip the timestamp prefix where present, keep raw lines as they are.
pub fn strip_stamps(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|l| unstamped(l).unwrap_or(l).to_string())
        .collect()
}

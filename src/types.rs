// src/types.rs

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

/// Where a log sink writes.
///
/// Parsed from a plain string: `"stdout"`, `"stderr"`, or anything else as a
/// file path opened in append mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum SinkTarget {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl Default for SinkTarget {
    fn default() -> Self {
        SinkTarget::Stderr
    }
}

impl FromStr for SinkTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Err("sink target must not be empty (expected \"stdout\", \"stderr\" or a file path)".to_string()),
            "stdout" => Ok(SinkTarget::Stdout),
            "stderr" => Ok(SinkTarget::Stderr),
            _ => Ok(SinkTarget::File(PathBuf::from(trimmed))),
        }
    }
}

impl TryFrom<String> for SinkTarget {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for SinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkTarget::Stdout => f.write_str("stdout"),
            SinkTarget::Stderr => f.write_str("stderr"),
            SinkTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::types::SinkTarget;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [log]
/// info = "stdout"
/// error = "logs/error.log"
/// timestamps = true
///
/// [run]
/// verbose = false
/// dir = "build"
///
/// [run.env]
/// RUST_BACKTRACE = "1"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub log: LogSection,

    #[serde(default)]
    pub run: RunSection,
}

/// `[log]` section: where the two sinks write.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// Informational sink. Default: `"stderr"`.
    #[serde(default)]
    pub info: SinkTarget,

    /// Error sink. Default: `"stderr"`.
    #[serde(default)]
    pub error: SinkTarget,

    /// Prefix framework log lines with a timestamp. Default: `true`.
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,
}

fn default_timestamps() -> bool {
    true
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            info: SinkTarget::default(),
            error: SinkTarget::default(),
            timestamps: default_timestamps(),
        }
    }
}

/// `[run]` section: defaults applied to the command being run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    /// Stream output live into the sinks instead of capturing it.
    #[serde(default)]
    pub verbose: bool,

    /// Working directory for the command.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Extra environment variables for the command.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// [`ConfigFile::default`].
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub log: LogSection,
    pub run: RunSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(log: LogSection, run: RunSection) -> Self {
        Self { log, run }
    }
}

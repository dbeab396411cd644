// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run basic validation.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks that `[run].dir` exists, file sinks are not directories and
///   `[run.env]` names are usable.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load `path` if given, else `Runlog.toml` when it exists, else defaults.
///
/// An explicitly requested file that is missing is an error; the implicit
/// default file is optional.
pub fn load_or_default(path: Option<&Path>) -> Result<ConfigFile> {
    match path {
        Some(path) => load_and_validate(path),
        None => {
            let default_path = default_config_path();
            if default_path.is_file() {
                load_and_validate(default_path)
            } else {
                Ok(ConfigFile::default())
            }
        }
    }
}

/// `Runlog.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Runlog.toml")
}

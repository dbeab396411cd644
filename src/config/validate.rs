// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, RunlogError};
use crate::types::SinkTarget;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::RunlogError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.log, raw.run))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_sink("info", &cfg.log.info)?;
    validate_sink("error", &cfg.log.error)?;
    validate_run_dir(cfg)?;
    validate_env(cfg)?;
    Ok(())
}

fn validate_sink(name: &str, target: &SinkTarget) -> Result<()> {
    if let SinkTarget::File(path) = target {
        if path.is_dir() {
            return Err(RunlogError::ConfigError(format!(
                "[log].{} points to a directory, expected a file: {}",
                name,
                path.display()
            )));
        }
    }
    Ok(())
}

fn validate_run_dir(cfg: &RawConfigFile) -> Result<()> {
    if let Some(dir) = &cfg.run.dir {
        if !dir.is_dir() {
            return Err(RunlogError::ConfigError(format!(
                "[run].dir is not an existing directory: {}",
                dir.display()
            )));
        }
    }
    Ok(())
}

fn validate_env(cfg: &RawConfigFile) -> Result<()> {
    for (key, value) in cfg.run.env.iter() {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return Err(RunlogError::ConfigError(format!(
                "[run.env] has invalid variable name '{}'",
                key
            )));
        }
        if value.contains('\0') {
            return Err(RunlogError::ConfigError(format!(
                "[run.env].{} contains a NUL byte",
                key
            )));
        }
    }
    Ok(())
}

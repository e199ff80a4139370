// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{RawConfigFile, Settings};
use crate::config::validate::resolve;
use crate::errors::{Result, WatchrunError};

/// Load a configuration file and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; merging and validation happen
/// in [`resolve`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        WatchrunError::Config(format!("cannot read config file {:?}: {e}", path))
    })?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load the config file if there is one.
///
/// - An explicit path must exist.
/// - Otherwise `Watchrun.toml` in the working directory is used when present.
pub fn load_optional(explicit: Option<&Path>) -> Result<Option<RawConfigFile>> {
    if let Some(path) = explicit {
        return load_from_path(path).map(Some);
    }

    let implicit = default_config_path();
    if implicit.is_file() {
        debug!(path = ?implicit, "using config file from working directory");
        return load_from_path(&implicit).map(Some);
    }

    Ok(None)
}

/// CLI args + optional config file -> validated `Settings`.
pub fn load_settings(cli: &CliArgs) -> Result<Settings> {
    // Usage errors take precedence over config file problems.
    if cli.command.is_empty() {
        return Err(WatchrunError::MissingCommand);
    }
    let file = load_optional(cli.config.as_deref())?.unwrap_or_default();
    resolve(cli, &file.watch)
}

/// Config file picked up when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Watchrun.toml")
}

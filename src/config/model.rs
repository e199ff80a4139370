// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::watch::FilterConfig;

pub const DEFAULT_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_TARGET_EXT: &str = ".go";

/// Top-level shape of `Watchrun.toml`.
///
/// ```toml
/// [watch]
/// interval = 2
/// target_exts = [".rs", ".toml"]
/// target_dirs = ["../shared"]
/// excludes = ["src/generated.rs"]
/// verbose = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,
}

/// `[watch]` section. Every key is optional; missing keys fall back to the
/// built-in defaults unless the CLI sets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    pub interval: Option<u64>,
    pub target_exts: Option<Vec<String>>,
    pub target_dirs: Option<Vec<PathBuf>>,
    pub excludes: Option<Vec<PathBuf>>,
    pub verbose: Option<bool>,
}

/// Fully resolved, validated settings. Read-only after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub interval: Duration,
    pub filter: FilterConfig,
    /// Scan roots; the working directory (`.`) is always last.
    pub roots: Vec<PathBuf>,
    /// argv of the supervised command, never empty.
    pub command: Vec<String>,
    pub verbose: bool,
}

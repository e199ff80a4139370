// src/config/mod.rs

//! Configuration loading and validation for watchrun.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and the resolved `Settings` (`model.rs`).
//! - Load an optional config file from disk (`loader.rs`).
//! - Merge CLI flags over file values over defaults, and validate (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_from_path, load_optional, load_settings};
pub use model::{RawConfigFile, Settings, WatchSection, DEFAULT_INTERVAL_SECS, DEFAULT_TARGET_EXT};
pub use validate::resolve;

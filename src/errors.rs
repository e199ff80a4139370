// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchrunError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// No command was given after the flags.
    #[error("no command given to run")]
    MissingCommand,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Walking a watched directory failed. Always fatal.
    #[error("scanning {path:?} failed: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The watch primitive reported an error other than a deleted file.
    #[error("file watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("failed to start command '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install termination signal handler: {0}")]
    Signal(#[source] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WatchrunError>;

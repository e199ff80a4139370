// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every watch option is optional here so that values from `Watchrun.toml`
//! can fill the gaps; the merge happens in [`crate::config::resolve`].

use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};

/// Command-line arguments for `watchrun`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "watchrun",
    version,
    about = "Restart a command whenever watched source files change.",
    override_usage = "watchrun [--interval] [--target-exts] [--target-dirs] [--excludes] [--verbose] <COMMAND>...",
    long_about = None
)]
pub struct CliArgs {
    /// Polling interval in seconds [default: 5].
    #[arg(short = 'i', long, value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Watch target extensions, e.g. `.go` [default: .go].
    #[arg(short = 't', long = "target-exts", value_name = "EXT", value_delimiter = ',')]
    pub target_exts: Vec<String>,

    /// Additional target directories; the working directory is always scanned.
    #[arg(long = "target-dirs", value_name = "DIR", value_delimiter = ',')]
    pub target_dirs: Vec<PathBuf>,

    /// Files to exclude from watching.
    #[arg(short = 'e', long, value_name = "FILE", value_delimiter = ',')]
    pub excludes: Vec<PathBuf>,

    /// Log every filesystem event that triggers a restart.
    #[arg(long)]
    pub verbose: bool,

    /// Path to a TOML config file. `Watchrun.toml` is picked up when present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the resolved settings and exit without watching.
    #[arg(long)]
    pub dry_run: bool,

    /// The command (and its arguments) to supervise.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Print the full help text to stdout.
pub fn print_help() {
    let mut cmd = CliArgs::command();
    // Nothing useful to do if stdout is gone.
    let _ = cmd.print_help();
}

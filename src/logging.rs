// src/logging.rs

//! Logging setup for `watchrun` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `WATCHRUN_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs go to STDERR, the same stream the supervised command writes to, so
//! diagnostics and command output interleave in order.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable consulted when `--log-level` is absent.
pub const LOG_ENV_VAR: &str = "WATCHRUN_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = resolve_level(cli_level, std::env::var(LOG_ENV_VAR).ok().as_deref());
    let filter = EnvFilter::try_new(filter_directives(level))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Directives for the global filter.
///
/// notify logs a warning of its own for every watched file that disappears.
/// Deletions are reported by the dispatcher, so notify is held at `error`
/// unless debug output was asked for.
fn filter_directives(level: tracing::Level) -> String {
    let ours = level.as_str().to_ascii_lowercase();
    if level >= tracing::Level::DEBUG {
        ours
    } else {
        format!("{ours},notify=error")
    }
}

fn resolve_level(cli_level: Option<LogLevel>, env_value: Option<&str>) -> tracing::Level {
    match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => env_value
            .and_then(parse_level_str)
            .unwrap_or(tracing::Level::INFO),
    }
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_wins_over_env() {
        let level = resolve_level(Some(LogLevel::Debug), Some("error"));
        assert_eq!(level, tracing::Level::DEBUG);
    }

    #[test]
    fn env_level_is_used_when_flag_absent() {
        assert_eq!(resolve_level(None, Some(" Warning ")), tracing::Level::WARN);
        assert_eq!(resolve_level(None, Some("bogus")), tracing::Level::INFO);
        assert_eq!(resolve_level(None, None), tracing::Level::INFO);
    }

    #[test]
    fn notify_warnings_are_muted_below_debug() {
        assert_eq!(filter_directives(tracing::Level::INFO), "info,notify=error");
        assert_eq!(filter_directives(tracing::Level::WARN), "warn,notify=error");
        assert_eq!(filter_directives(tracing::Level::DEBUG), "debug");
        assert_eq!(filter_directives(tracing::Level::TRACE), "trace");
    }

    #[test]
    fn directives_parse_as_env_filter() {
        for level in [tracing::Level::ERROR, tracing::Level::INFO, tracing::Level::TRACE] {
            let directives = filter_directives(level);
            assert!(EnvFilter::try_new(&directives).is_ok(), "{directives}");
        }
    }
}

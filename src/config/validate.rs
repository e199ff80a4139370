// src/config/validate.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CliArgs;
use crate::config::model::{Settings, WatchSection, DEFAULT_INTERVAL_SECS, DEFAULT_TARGET_EXT};
use crate::errors::{Result, WatchrunError};
use crate::watch::FilterConfig;

/// Merge CLI flags over `[watch]` values over defaults, then validate.
///
/// List flags given on the CLI replace the file's list; they are not
/// appended. `--verbose` can only switch verbosity on.
pub fn resolve(cli: &CliArgs, file: &WatchSection) -> Result<Settings> {
    ensure_has_command(&cli.command)?;

    let interval_secs = cli
        .interval
        .or(file.interval)
        .unwrap_or(DEFAULT_INTERVAL_SECS);
    validate_interval(interval_secs)?;

    let target_exts = pick_list(&cli.target_exts, file.target_exts.as_ref())
        .unwrap_or_else(|| vec![DEFAULT_TARGET_EXT.to_string()]);
    validate_extensions(&target_exts)?;

    let mut roots = pick_list(&cli.target_dirs, file.target_dirs.as_ref()).unwrap_or_default();
    roots.push(PathBuf::from("."));

    let excludes = pick_list(&cli.excludes, file.excludes.as_ref()).unwrap_or_default();

    Ok(Settings {
        interval: Duration::from_secs(interval_secs),
        filter: FilterConfig::new(target_exts, excludes),
        roots,
        command: cli.command.clone(),
        verbose: cli.verbose || file.verbose.unwrap_or(false),
    })
}

fn pick_list<T: Clone>(cli: &[T], file: Option<&Vec<T>>) -> Option<Vec<T>> {
    if !cli.is_empty() {
        Some(cli.to_vec())
    } else {
        file.cloned()
    }
}

fn ensure_has_command(command: &[String]) -> Result<()> {
    match command.first() {
        Some(program) if !program.is_empty() => Ok(()),
        _ => Err(WatchrunError::MissingCommand),
    }
}

fn validate_interval(secs: u64) -> Result<()> {
    if secs == 0 {
        return Err(WatchrunError::Config(
            "interval must be >= 1 second (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_extensions(exts: &[String]) -> Result<()> {
    if exts.is_empty() {
        return Err(WatchrunError::Config(
            "at least one target extension is required".to_string(),
        ));
    }
    if exts.iter().any(|e| e.is_empty()) {
        return Err(WatchrunError::Config(
            "target extensions must not be empty strings".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn cli(command: &[&str]) -> CliArgs {
        CliArgs {
            command: command.iter().map(|s| s.to_string()).collect(),
            ..CliArgs::default()
        }
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = resolve(&cli(&["go", "test"]), &WatchSection::default()).unwrap();

        assert_eq!(settings.interval, Duration::from_secs(5));
        assert_eq!(settings.filter.extensions(), &[".go".to_string()]);
        assert_eq!(settings.roots, vec![PathBuf::from(".")]);
        assert_eq!(settings.command, vec!["go", "test"]);
        assert!(!settings.verbose);
    }

    #[test]
    fn cli_beats_file_beats_default() {
        let file = WatchSection {
            interval: Some(9),
            target_exts: Some(vec![".py".into()]),
            target_dirs: Some(vec!["lib".into()]),
            excludes: Some(vec!["./lib/gen.py".into()]),
            verbose: Some(true),
        };

        let mut args = cli(&["pytest"]);
        args.interval = Some(2);
        let settings = resolve(&args, &file).unwrap();

        assert_eq!(settings.interval, Duration::from_secs(2));
        assert_eq!(settings.filter.extensions(), &[".py".to_string()]);
        assert_eq!(settings.roots, vec![PathBuf::from("lib"), PathBuf::from(".")]);
        assert!(settings.filter.is_excluded(Path::new("lib/gen.py")));
        assert!(settings.verbose);

        args.target_exts = vec![".pyi".into()];
        args.target_dirs = vec!["tests".into()];
        let settings = resolve(&args, &file).unwrap();
        assert_eq!(settings.filter.extensions(), &[".pyi".to_string()]);
        assert_eq!(settings.roots, vec![PathBuf::from("tests"), PathBuf::from(".")]);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut args = cli(&["make"]);
        args.interval = Some(0);
        match resolve(&args, &WatchSection::default()) {
            Err(WatchrunError::Config(msg)) => assert!(msg.contains("interval")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn empty_extension_lists_are_rejected() {
        let file = WatchSection {
            target_exts: Some(Vec::new()),
            ..WatchSection::default()
        };
        assert!(matches!(
            resolve(&cli(&["make"]), &file),
            Err(WatchrunError::Config(_))
        ));

        let mut args = cli(&["make"]);
        args.target_exts = vec![String::new()];
        assert!(matches!(
            resolve(&args, &WatchSection::default()),
            Err(WatchrunError::Config(_))
        ));
    }

    #[test]
    fn missing_command_is_reported_first() {
        let mut args = cli(&[]);
        args.interval = Some(0);
        assert!(matches!(
            resolve(&args, &WatchSection::default()),
            Err(WatchrunError::MissingCommand)
        ));
    }
}

// tests/scanner_behaviour.rs
mod common;
use crate::common::{init_tracing, scan_fixture};

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use watchrun::errors::WatchrunError;
use watchrun::fs::mock::MockFileSystem;
use watchrun::watch::{FilterConfig, ScanReport};

type TestResult = Result<(), Box<dyn Error>>;

fn project() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file("./notes.txt");
    fs.add_file("./data.txt");
    fs.add_file("./README.md");
    fs
}

/// extensions = [".txt"], excludes = ["notes.txt"]: only data.txt is watched.
#[test]
fn excluded_file_is_not_registered() -> TestResult {
    init_tracing();

    let fx = scan_fixture(
        Arc::new(project()),
        FilterConfig::new([".txt"], ["notes.txt"]),
        &["."],
        "/project",
    );

    let report = fx.scanner.scan_once()?;

    assert_eq!(
        report,
        ScanReport {
            files_seen: 3,
            excluded: 1,
            newly_watched: 1,
        }
    );
    assert_eq!(
        fx.registry.snapshot().into_iter().collect::<Vec<_>>(),
        vec![PathBuf::from("/project/data.txt")]
    );
    assert_eq!(fx.backend.watch_calls(), vec![PathBuf::from("/project/data.txt")]);

    Ok(())
}

/// Re-scans neither duplicate registrations nor let excluded files in.
#[test]
fn repeated_scans_are_idempotent() -> TestResult {
    init_tracing();

    let fs = Arc::new(MockFileSystem::new());
    fs.add_file("./main.go");
    fs.add_file("./gen/zz_generated.go");

    let fx = scan_fixture(
        fs.clone(),
        FilterConfig::new([".go"], ["./gen/zz_generated.go"]),
        &["."],
        "/src/app",
    );

    let first = fx.scanner.scan_once()?;
    let second = fx.scanner.scan_once()?;
    let third = fx.scanner.scan_once()?;

    assert_eq!(first.newly_watched, 1);
    assert_eq!(second.newly_watched, 0);
    assert_eq!(third.newly_watched, 0);
    assert_eq!(third.excluded, 1);

    assert_eq!(fx.backend.watch_calls(), vec![PathBuf::from("/src/app/main.go")]);
    assert!(!fx.registry.contains(&PathBuf::from("/src/app/gen/zz_generated.go")));

    Ok(())
}

#[test]
fn new_files_are_picked_up_on_the_next_cycle() -> TestResult {
    init_tracing();

    let fs = Arc::new(MockFileSystem::new());
    fs.add_file("./cmd/main.go");

    let fx = scan_fixture(fs.clone(), FilterConfig::new([".go"], Vec::<PathBuf>::new()), &["."], "/w");

    assert_eq!(fx.scanner.scan_once()?.newly_watched, 1);

    fs.add_file("./cmd/util.go");
    fs.add_file("./cmd/util_test.txt");
    assert_eq!(fx.scanner.scan_once()?.newly_watched, 1);

    assert_eq!(
        fx.backend.watch_calls(),
        vec![PathBuf::from("/w/cmd/main.go"), PathBuf::from("/w/cmd/util.go")]
    );

    Ok(())
}

/// Directories are walked, never registered, even when named like a target.
#[test]
fn directories_are_never_registered() -> TestResult {
    init_tracing();

    let fs = Arc::new(MockFileSystem::new());
    fs.add_dir("./pkg.go");
    fs.add_file("./pkg.go/inner.go");

    let fx = scan_fixture(fs, FilterConfig::new([".go"], Vec::<PathBuf>::new()), &["."], "/w");
    fx.scanner.scan_once()?;

    assert_eq!(fx.backend.watch_calls(), vec![PathBuf::from("/w/pkg.go/inner.go")]);
    Ok(())
}

/// Extra roots are scanned before the working directory; a file reachable
/// from two roots is still registered once.
#[test]
fn additional_roots_share_one_watch_set() -> TestResult {
    init_tracing();

    let fs = Arc::new(MockFileSystem::new());
    fs.add_file("./lib/a.rs");
    fs.add_file("./main.rs");

    let fx = scan_fixture(
        fs,
        FilterConfig::new([".rs"], Vec::<PathBuf>::new()),
        &["./lib", "."],
        "/repo",
    );
    let report = fx.scanner.scan_once()?;

    assert_eq!(report.files_seen, 3);
    assert_eq!(report.newly_watched, 2);
    assert_eq!(
        fx.backend.watch_calls(),
        vec![PathBuf::from("/repo/lib/a.rs"), PathBuf::from("/repo/main.rs")]
    );
    Ok(())
}

#[test]
fn walk_error_is_fatal() {
    init_tracing();

    let fs = Arc::new(MockFileSystem::new());
    fs.add_file("./ok.go");
    fs.add_dir("./private");
    fs.break_path("./private");

    let fx = scan_fixture(fs, FilterConfig::new([".go"], Vec::<PathBuf>::new()), &["."], "/w");

    match fx.scanner.scan_once() {
        Err(WatchrunError::Scan { path, .. }) => assert_eq!(path, PathBuf::from("./private")),
        other => panic!("expected Scan error, got {other:?}"),
    }
}

#[test]
fn missing_root_is_fatal() {
    init_tracing();

    let fx = scan_fixture(
        Arc::new(MockFileSystem::new()),
        FilterConfig::new([".go"], Vec::<PathBuf>::new()),
        &["./does-not-exist", "."],
        "/w",
    );

    assert!(matches!(
        fx.scanner.scan_once(),
        Err(WatchrunError::Scan { .. })
    ));
}

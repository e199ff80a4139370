#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use watchrun_test_utils::{
    init_tracing, with_timeout, FakeLauncher, LaunchLog, RecordingBackend,
};

use watchrun::fs::FileSystem;
use watchrun::watch::{FilterConfig, Scanner, WatchRegistry};

/// Scanner over `fs` with a recording backend behind its registry.
pub struct ScanFixture {
    pub scanner: Arc<Scanner>,
    pub registry: Arc<WatchRegistry>,
    pub backend: RecordingBackend,
}

pub fn scan_fixture(
    fs: Arc<dyn FileSystem>,
    filter: FilterConfig,
    roots: &[&str],
    base_dir: impl AsRef<Path>,
) -> ScanFixture {
    let backend = RecordingBackend::new();
    let registry = Arc::new(WatchRegistry::new(backend.clone()));
    let scanner = Arc::new(Scanner::new(
        fs,
        Arc::clone(&registry),
        Arc::new(filter),
        roots.iter().map(|root| PathBuf::from(*root)).collect(),
        base_dir.as_ref(),
    ));
    ScanFixture {
        scanner,
        registry,
        backend,
    }
}

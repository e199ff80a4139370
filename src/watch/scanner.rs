// src/watch/scanner.rs

//! Periodic directory scanner.
//!
//! Each cycle walks every root, runs each regular file through the
//! [`FilterConfig`], and registers new matches with the [`WatchRegistry`].
//! Any walk error aborts the scanner (and with it the program): watching a
//! silently incomplete set of files is worse than stopping.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::errors::{Result, WatchrunError};
use crate::fs::{EntryKind, FileSystem};
use crate::watch::filter::{FilterConfig, FilterDecision};
use crate::watch::path_utils::{absolutize, clean_path};
use crate::watch::registry::WatchRegistry;

/// Counters for a single scan cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub files_seen: usize,
    pub excluded: usize,
    pub newly_watched: usize,
}

#[derive(Debug)]
pub struct Scanner {
    fs: Arc<dyn FileSystem>,
    registry: Arc<WatchRegistry>,
    filter: Arc<FilterConfig>,
    roots: Vec<PathBuf>,
    /// Relative walk paths are made absolute against this directory.
    base_dir: PathBuf,
}

impl Scanner {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        registry: Arc<WatchRegistry>,
        filter: Arc<FilterConfig>,
        roots: Vec<PathBuf>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            registry,
            filter,
            roots,
            base_dir: base_dir.into(),
        }
    }

    /// Run one full walk over all roots.
    pub fn scan_once(&self) -> Result<ScanReport> {
        let watched = self.registry.snapshot();
        let mut report = ScanReport::default();

        for root in &self.roots {
            self.scan_root(root, &watched, &mut report)?;
        }

        Ok(report)
    }

    fn scan_root(
        &self,
        root: &Path,
        watched: &HashSet<PathBuf>,
        report: &mut ScanReport,
    ) -> Result<()> {
        let mut stack = vec![root.to_path_buf()];

        while let Some(path) = stack.pop() {
            let kind = self.fs.entry_kind(&path).map_err(|source| WatchrunError::Scan {
                path: path.clone(),
                source,
            })?;

            match kind {
                EntryKind::Dir => {
                    let children = self.fs.read_dir(&path).map_err(|source| WatchrunError::Scan {
                        path: path.clone(),
                        source,
                    })?;
                    // Reverse so the stack pops entries in name order.
                    stack.extend(children.into_iter().rev());
                }
                EntryKind::File => {
                    report.files_seen += 1;
                    self.consider_file(&path, watched, report)?;
                }
            }
        }

        Ok(())
    }

    fn consider_file(
        &self,
        path: &Path,
        watched: &HashSet<PathBuf>,
        report: &mut ScanReport,
    ) -> Result<()> {
        let cleaned = clean_path(path);

        match self.filter.decide(&cleaned) {
            FilterDecision::Excluded => {
                report.excluded += 1;
                return Ok(());
            }
            FilterDecision::WrongExtension => return Ok(()),
            FilterDecision::Watch => {}
        }

        let file = absolutize(&self.base_dir, &cleaned);
        if watched.contains(&file) {
            return Ok(());
        }

        if self.registry.add(&file)? {
            report.newly_watched += 1;
            info!(file = %file.display(), "watching file");
        }

        Ok(())
    }

    /// Scan forever, sleeping `interval` between cycles.
    ///
    /// Only returns on a scan error.
    pub async fn run(self: Arc<Self>, interval: Duration) -> Result<()> {
        info!(roots = ?self.roots, ?interval, "directory scanner started");

        loop {
            let scanner = Arc::clone(&self);
            let report = tokio::task::spawn_blocking(move || scanner.scan_once())
                .await
                .map_err(|e| WatchrunError::Other(e.into()))??;

            debug!(?report, watched = self.registry.len(), "scan cycle finished");

            tokio::time::sleep(interval).await;
        }
    }
}

// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;

/// What a directory entry is, as seen without following symlinks.
///
/// A symlink is reported as `File`: the scanner never descends into linked
/// directories, but a link whose name matches is watched like a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

/// Abstract filesystem interface used by the directory scanner.
pub trait FileSystem: Send + Sync + Debug {
    /// Kind of the entry at `path`. Fails if it does not exist.
    fn entry_kind(&self, path: &Path) -> Result<EntryKind>;

    /// Return the entries of a directory as full paths, sorted by name.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn entry_kind(&self, path: &Path) -> Result<EntryKind> {
        let meta =
            fs::symlink_metadata(path).with_context(|| format!("reading metadata of {:?}", path))?;
        if meta.is_dir() {
            Ok(EntryKind::Dir)
        } else {
            Ok(EntryKind::File)
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry.with_context(|| format!("reading entry in {:?}", path))?;
            entries.push(entry.path());
        }
        entries.sort();
        Ok(entries)
    }
}

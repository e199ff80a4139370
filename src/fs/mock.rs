// src/fs/mock.rs

use super::{EntryKind, FileSystem};
use anyhow::{anyhow, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
enum MockEntry {
    File,
    Dir(BTreeSet<String>), // child names
}

#[derive(Debug, Default)]
struct MockState {
    entries: BTreeMap<PathBuf, MockEntry>,
    /// Paths whose listing or metadata lookup fails, e.g. permission denied.
    broken: BTreeSet<PathBuf>,
}

/// In-memory tree for scanner tests. Paths are used verbatim, so tests
/// should stick to one spelling (e.g. always `./src/x.go`).
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let fs = Self::default();
        fs.lock()
            .entries
            .insert(PathBuf::from("."), MockEntry::Dir(BTreeSet::new()));
        fs
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.lock();
        state.entries.insert(path.to_path_buf(), MockEntry::File);
        link_into_parent(&mut state.entries, path);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.lock();
        ensure_dir(&mut state.entries, path);
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.lock();
        state.entries.remove(path);
        if let (Some(parent), Some(name)) = (parent_of(path), file_name(path)) {
            if let Some(MockEntry::Dir(children)) = state.entries.get_mut(&parent) {
                children.remove(&name);
            }
        }
    }

    /// Make every lookup of `path` fail from now on.
    pub fn break_path(&self, path: impl AsRef<Path>) {
        self.lock().broken.insert(path.as_ref().to_path_buf());
    }
}

fn parent_of(path: &Path) -> Option<PathBuf> {
    let parent = path.parent()?;
    if parent.as_os_str().is_empty() {
        Some(PathBuf::from("."))
    } else {
        Some(parent.to_path_buf())
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().and_then(|n| n.to_str()).map(str::to_string)
}

fn ensure_dir(entries: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
    if entries.contains_key(path) {
        return;
    }
    entries.insert(path.to_path_buf(), MockEntry::Dir(BTreeSet::new()));
    link_into_parent(entries, path);
}

fn link_into_parent(entries: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
    let (Some(parent), Some(name)) = (parent_of(path), file_name(path)) else {
        return;
    };
    if parent == path {
        return;
    }
    ensure_dir(entries, &parent);
    if let Some(MockEntry::Dir(children)) = entries.get_mut(&parent) {
        children.insert(name);
    }
}

impl FileSystem for MockFileSystem {
    fn entry_kind(&self, path: &Path) -> Result<EntryKind> {
        let state = self.lock();
        if state.broken.contains(path) {
            return Err(anyhow!("permission denied: {:?}", path));
        }
        match state.entries.get(path) {
            Some(MockEntry::File) => Ok(EntryKind::File),
            Some(MockEntry::Dir(_)) => Ok(EntryKind::Dir),
            None => Err(anyhow!("no such file or directory: {:?}", path)),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let state = self.lock();
        if state.broken.contains(path) {
            return Err(anyhow!("permission denied: {:?}", path));
        }
        match state.entries.get(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }
}

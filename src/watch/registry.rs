// src/watch/registry.rs

//! The set of files currently handed to the watch primitive.
//!
//! The scanner only asks two things of the registry: a point-in-time
//! snapshot of what is watched, and "watch this path too". Removal happens
//! only when the watch primitive reports that a watched file is gone.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

use notify::{Config, Event, PollWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::Result;

/// Raw notifications from the watch primitive: change events and errors.
pub type RawWatchEvent = notify::Result<Event>;

/// The piece of the watch primitive the registry drives.
///
/// Production uses [`PollWatcher`]; tests plug in a recorder.
pub trait WatchBackend: Send {
    fn watch(&mut self, path: &Path) -> notify::Result<()>;
    fn unwatch(&mut self, path: &Path) -> notify::Result<()>;
}

impl WatchBackend for PollWatcher {
    fn watch(&mut self, path: &Path) -> notify::Result<()> {
        Watcher::watch(self, path, RecursiveMode::NonRecursive)
    }

    fn unwatch(&mut self, path: &Path) -> notify::Result<()> {
        Watcher::unwatch(self, path)
    }
}

struct RegistryInner {
    backend: Box<dyn WatchBackend>,
    /// Absolute path -> when it was first watched.
    files: HashMap<PathBuf, SystemTime>,
}

pub struct WatchRegistry {
    inner: Mutex<RegistryInner>,
}

impl std::fmt::Debug for WatchRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchRegistry")
            .field("watched", &self.len())
            .finish_non_exhaustive()
    }
}

impl WatchRegistry {
    pub fn new(backend: impl WatchBackend + 'static) -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                backend: Box::new(backend),
                files: HashMap::new(),
            }),
        }
    }

    /// Registry backed by a notify [`PollWatcher`] polling every `interval`.
    ///
    /// Every event and error the watcher produces is forwarded, unfiltered,
    /// to `events`.
    pub fn poll(interval: Duration, events: mpsc::UnboundedSender<RawWatchEvent>) -> Result<Self> {
        let watcher = PollWatcher::new(
            move |res: RawWatchEvent| {
                // Send only fails once the dispatcher is gone, i.e. during shutdown.
                let _ = events.send(res);
            },
            Config::default().with_poll_interval(interval),
        )?;
        Ok(Self::new(watcher))
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy of the currently watched paths.
    pub fn snapshot(&self) -> HashSet<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lock().files.contains_key(path)
    }

    pub fn watched_since(&self, path: &Path) -> Option<SystemTime> {
        self.lock().files.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start watching `path`.
    ///
    /// Returns `Ok(false)` if it was already watched; the backend is not
    /// touched in that case.
    pub fn add(&self, path: &Path) -> Result<bool> {
        let mut inner = self.lock();
        if inner.files.contains_key(path) {
            return Ok(false);
        }
        inner.backend.watch(path)?;
        inner.files.insert(path.to_path_buf(), SystemTime::now());
        Ok(true)
    }

    /// Drop a path the watch primitive reported as deleted.
    ///
    /// Returns `true` if it was being watched.
    pub fn forget(&self, path: &Path) -> bool {
        let mut inner = self.lock();
        if inner.files.remove(path).is_none() {
            return false;
        }
        if let Err(err) = inner.backend.unwatch(path) {
            debug!(?path, error = %err, "unwatch of deleted file failed");
        }
        true
    }
}

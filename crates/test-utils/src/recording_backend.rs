use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use watchrun::watch::WatchBackend;

/// Watch backend that only remembers what it was asked to watch.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    watched: Arc<Mutex<Vec<PathBuf>>>,
    unwatched: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `watch` call, in order, duplicates included.
    pub fn watch_calls(&self) -> Vec<PathBuf> {
        self.watched.lock().unwrap().clone()
    }

    pub fn unwatch_calls(&self) -> Vec<PathBuf> {
        self.unwatched.lock().unwrap().clone()
    }
}

impl WatchBackend for RecordingBackend {
    fn watch(&mut self, path: &Path) -> notify::Result<()> {
        self.watched.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn unwatch(&mut self, path: &Path) -> notify::Result<()> {
        self.unwatched.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

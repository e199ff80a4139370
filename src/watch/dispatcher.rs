// src/watch/dispatcher.rs

//! Turns raw watch-primitive notifications into restart requests.
//!
//! - Attribute-only changes (permissions, ownership, access) are noise.
//! - Everything else requests a restart through the single-slot channel.
//! - A "watched file is gone" error is benign; the path is dropped from the
//!   registry so a recreated file is picked up by the next scan.
//! - Any other watch error is fatal.

use std::sync::Arc;

use notify::event::{EventKind, MetadataKind, ModifyKind};
use notify::{ErrorKind, Event};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::restart::{RestartRequest, RestartSender};
use crate::errors::{Result, WatchrunError};
use crate::watch::registry::{RawWatchEvent, WatchRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    Noise,
    Relevant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    WatchedFileDeleted,
    Fatal,
}

/// Classify a change event by kind.
///
/// The poll watcher reports content changes as a write-time metadata
/// change, so `Metadata(WriteTime)` counts as a write.
pub fn classify_event(kind: &EventKind) -> EventClass {
    match kind {
        EventKind::Access(_) => EventClass::Noise,
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::WriteTime)) => EventClass::Relevant,
        EventKind::Modify(ModifyKind::Metadata(_)) => EventClass::Noise,
        _ => EventClass::Relevant,
    }
}

pub fn classify_error(err: &notify::Error) -> ErrorClass {
    match &err.kind {
        ErrorKind::PathNotFound => ErrorClass::WatchedFileDeleted,
        ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            ErrorClass::WatchedFileDeleted
        }
        _ => ErrorClass::Fatal,
    }
}

pub struct Dispatcher {
    events: mpsc::UnboundedReceiver<RawWatchEvent>,
    registry: Arc<WatchRegistry>,
    restart: RestartSender,
    verbose: bool,
}

impl Dispatcher {
    pub fn new(
        events: mpsc::UnboundedReceiver<RawWatchEvent>,
        registry: Arc<WatchRegistry>,
        restart: RestartSender,
        verbose: bool,
    ) -> Self {
        Self {
            events,
            registry,
            restart,
            verbose,
        }
    }

    /// Relay events until the watch primitive closes its channel or the
    /// supervisor goes away. Returns an error on the first fatal watch error.
    pub async fn run(mut self) -> Result<()> {
        while let Some(raw) = self.events.recv().await {
            match raw {
                Ok(event) => {
                    if !self.handle_event(event) {
                        debug!("restart channel closed; dispatcher stopping");
                        return Ok(());
                    }
                }
                Err(err) => self.handle_error(err)?,
            }
        }

        debug!("watch event channel closed; dispatcher stopping");
        Ok(())
    }

    /// Returns `false` once nobody is listening for restarts.
    fn handle_event(&self, event: Event) -> bool {
        if event.kind.is_remove() {
            for path in &event.paths {
                self.registry.forget(path);
            }
        }

        if classify_event(&event.kind) == EventClass::Noise {
            debug!(kind = ?event.kind, paths = ?event.paths, "ignoring attribute-only event");
            return true;
        }

        if self.verbose {
            info!(kind = ?event.kind, paths = ?event.paths, "received event");
        } else {
            debug!(kind = ?event.kind, paths = ?event.paths, "received event");
        }

        match self.restart.request() {
            RestartRequest::Queued => true,
            RestartRequest::Coalesced => {
                debug!("restart already pending; coalescing");
                true
            }
            RestartRequest::Closed => false,
        }
    }

    fn handle_error(&self, err: notify::Error) -> Result<()> {
        match classify_error(&err) {
            ErrorClass::WatchedFileDeleted => {
                for path in &err.paths {
                    self.registry.forget(path);
                }
                debug!(paths = ?err.paths, "watched file deleted");
                Ok(())
            }
            ErrorClass::Fatal => Err(WatchrunError::Watch(err)),
        }
    }
}

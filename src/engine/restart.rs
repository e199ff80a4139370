// src/engine/restart.rs

//! Single-slot restart channel between the dispatcher and the supervisor.
//!
//! The channel holds at most one pending request. A request made while the
//! slot is full is folded into the pending one, so a burst of changes
//! collapses into a single restart. The supervisor empties the slot when it
//! acts on a request, which re-opens it for the next burst.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Result of asking for a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartRequest {
    /// The slot was empty; a restart is now pending.
    Queued,
    /// A restart was already pending; this request rides along with it.
    Coalesced,
    /// The supervisor is gone.
    Closed,
}

#[derive(Debug, Clone)]
pub struct RestartSender {
    tx: mpsc::Sender<()>,
}

impl RestartSender {
    /// Never blocks.
    pub fn request(&self) -> RestartRequest {
        match self.tx.try_send(()) {
            Ok(()) => RestartRequest::Queued,
            Err(TrySendError::Full(())) => RestartRequest::Coalesced,
            Err(TrySendError::Closed(())) => RestartRequest::Closed,
        }
    }
}

#[derive(Debug)]
pub struct RestartReceiver {
    rx: mpsc::Receiver<()>,
}

impl RestartReceiver {
    /// Wait for the next pending restart. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    /// Take the pending restart, if any, without waiting.
    pub fn try_take(&mut self) -> bool {
        self.rx.try_recv().is_ok()
    }
}

pub fn restart_channel() -> (RestartSender, RestartReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (RestartSender { tx }, RestartReceiver { rx })
}

// src/engine/signals.rs

//! Operator termination signals (SIGHUP, SIGINT, SIGTERM).
//!
//! Handlers are installed once, before any command is started, and stay
//! installed for the life of the process.

use crate::errors::{Result, WatchrunError};

#[cfg(unix)]
pub struct TerminationSignals {
    hangup: tokio::signal::unix::Signal,
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl TerminationSignals {
    pub fn register() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            hangup: signal(SignalKind::hangup()).map_err(WatchrunError::Signal)?,
            interrupt: signal(SignalKind::interrupt()).map_err(WatchrunError::Signal)?,
            terminate: signal(SignalKind::terminate()).map_err(WatchrunError::Signal)?,
        })
    }

    /// Wait for the next termination signal and return its name.
    pub async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.hangup.recv() => "SIGHUP",
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
        }
    }
}

#[cfg(not(unix))]
pub struct TerminationSignals {
    _private: (),
}

#[cfg(not(unix))]
impl TerminationSignals {
    pub fn register() -> Result<Self> {
        Ok(Self { _private: () })
    }

    pub async fn recv(&mut self) -> &'static str {
        if let Err(e) = tokio::signal::ctrl_c().await {
            // Without a handler we can never shut down cleanly; wait forever.
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        "Ctrl+C"
    }
}

impl std::fmt::Debug for TerminationSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminationSignals").finish_non_exhaustive()
    }
}

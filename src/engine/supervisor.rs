// src/engine/supervisor.rs

use std::future::Future;

use tracing::{debug, info, warn};

use crate::engine::restart::RestartReceiver;
use crate::errors::Result;
use crate::exec::{ChildGroup, ChildLauncher};

/// Why the supervisor loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorExit {
    /// The shutdown future resolved (operator signal).
    Terminated,
    /// Every restart sender was dropped.
    RestartChannelClosed,
}

/// What woke the supervisor while a child was running.
enum Wake {
    Shutdown,
    Restart,
    RestartChannelClosed,
}

/// Owns the supervised command: start it, wait, kill its group, start again.
///
/// At most one child is owned at a time. The old group is always killed
/// before the next one is launched.
pub struct Supervisor<L: ChildLauncher> {
    launcher: L,
    restarts: RestartReceiver,
    generation: u64,
}

impl<L: ChildLauncher> std::fmt::Debug for Supervisor<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<L: ChildLauncher> Supervisor<L> {
    pub fn new(launcher: L, restarts: RestartReceiver) -> Self {
        Self {
            launcher,
            restarts,
            generation: 0,
        }
    }

    /// Supervise until `shutdown` resolves or the restart channel closes.
    ///
    /// A launch failure is returned immediately; there is no retry.
    pub async fn run<S>(mut self, shutdown: S) -> Result<SupervisorExit>
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let mut child = self.launcher.launch()?;
            self.generation += 1;
            info!(pid = ?child.id(), generation = self.generation, "started command");

            let wake = wait_for_wake(&mut child, &mut self.restarts, shutdown.as_mut()).await;

            match wake {
                Wake::Shutdown => {
                    info!(pid = ?child.id(), "stopping command and exiting");
                    stop(&mut child);
                    return Ok(SupervisorExit::Terminated);
                }
                Wake::Restart => {
                    info!(pid = ?child.id(), "change detected; restarting command");
                    stop(&mut child);
                }
                Wake::RestartChannelClosed => {
                    debug!("restart channel closed; stopping command");
                    stop(&mut child);
                    return Ok(SupervisorExit::RestartChannelClosed);
                }
            }
        }
    }
}

/// Block until shutdown or a restart request. A child that exits on its own
/// is logged and left alone; it is only relaunched on the next restart.
async fn wait_for_wake<C, S>(
    child: &mut C,
    restarts: &mut RestartReceiver,
    mut shutdown: std::pin::Pin<&mut S>,
) -> Wake
where
    C: ChildGroup,
    S: Future<Output = ()>,
{
    let mut running = true;

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => return Wake::Shutdown,

            msg = restarts.recv() => {
                return match msg {
                    Some(()) => Wake::Restart,
                    None => Wake::RestartChannelClosed,
                };
            }

            code = child.wait_exit(), if running => {
                running = false;
                info!(pid = ?child.id(), exit_code = ?code, "command exited; waiting for changes");
            }
        }
    }
}

fn stop<C: ChildGroup>(child: &mut C) {
    if let Err(err) = child.terminate_group() {
        warn!(pid = ?child.id(), error = %err, "failed to kill command process group");
    }
}

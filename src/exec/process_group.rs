// src/exec/process_group.rs

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::errors::{Result, WatchrunError};
use crate::exec::backend::{ChildGroup, ChildLauncher};

/// Launches the configured argv with inherited environment, stdin closed,
/// and both stdout and stderr sent to our stderr.
#[derive(Debug, Clone)]
pub struct CommandLauncher {
    argv: Vec<String>,
}

impl CommandLauncher {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl ChildLauncher for CommandLauncher {
    type Child = ProcessGroup;

    fn launch(&mut self) -> Result<ProcessGroup> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or(WatchrunError::MissingCommand)?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(io::stderr()))
            .stderr(Stdio::from(io::stderr()));

        #[cfg(unix)]
        cmd.process_group(0);

        let child = cmd.spawn().map_err(|source| WatchrunError::Spawn {
            program: program.clone(),
            source,
        })?;

        Ok(ProcessGroup::new(child))
    }
}

/// A child started as the leader of its own process group.
///
/// Dropping a group that was never terminated kills it, so an error that
/// unwinds the supervisor cannot leave the command running.
#[derive(Debug)]
pub struct ProcessGroup {
    child: Child,
    /// Kept separately: `Child::id` is gone once the leader has been reaped,
    /// but its group can outlive it.
    pid: Option<u32>,
    terminated: bool,
}

impl ProcessGroup {
    fn new(child: Child) -> Self {
        let pid = child.id();
        Self {
            child,
            pid,
            terminated: false,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    #[cfg(unix)]
    fn kill_group(&mut self, pid: u32) -> Result<()> {
        use nix::errno::Errno;
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        match killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
            Ok(()) => Ok(()),
            Err(Errno::ESRCH) => {
                debug!(pid, "process group already gone");
                Ok(())
            }
            Err(errno) => Err(WatchrunError::Io(io::Error::from(errno))),
        }
    }

    #[cfg(not(unix))]
    fn kill_group(&mut self, _pid: u32) -> Result<()> {
        self.child.start_kill().or_else(|err| match err.kind() {
            io::ErrorKind::InvalidInput => Ok(()),
            _ => Err(WatchrunError::Io(err)),
        })
    }
}

impl ChildGroup for ProcessGroup {
    fn id(&self) -> Option<u32> {
        self.pid
    }

    fn terminate_group(&mut self) -> Result<()> {
        if self.terminated {
            return Ok(());
        }
        self.terminated = true;

        match self.pid {
            Some(pid) => self.kill_group(pid),
            None => Ok(()),
        }
    }

    fn wait_exit(&mut self) -> Pin<Box<dyn Future<Output = Option<i32>> + Send + '_>> {
        Box::pin(async move {
            match self.child.wait().await {
                Ok(status) => status.code(),
                Err(err) => {
                    warn!(pid = ?self.pid, error = %err, "failed to wait for command");
                    None
                }
            }
        })
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        if self.terminated {
            return;
        }
        if let Err(err) = self.terminate_group() {
            warn!(pid = ?self.pid, error = %err, "failed to kill command on drop");
        }
    }
}

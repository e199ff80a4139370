use std::collections::BTreeSet;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use watchrun::errors::{Result, WatchrunError};
use watchrun::exec::{ChildGroup, ChildLauncher};

/// Something that happened to a fake child, identified by launch number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchEvent {
    Launched(u32),
    Terminated(u32),
}

#[derive(Debug, Default)]
struct LogState {
    events: Vec<LaunchEvent>,
    live: BTreeSet<u32>,
    max_live: usize,
}

/// Shared record of everything a [`FakeLauncher`] and its children did.
#[derive(Debug, Clone)]
pub struct LaunchLog {
    state: Arc<Mutex<LogState>>,
    launches: Arc<watch::Sender<u32>>,
}

impl Default for LaunchLog {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            state: Arc::new(Mutex::new(LogState::default())),
            launches: Arc::new(tx),
        }
    }
}

impl LaunchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LaunchEvent> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn launch_count(&self) -> u32 {
        *self.launches.borrow()
    }

    pub fn terminated(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                LaunchEvent::Terminated(id) => Some(id),
                LaunchEvent::Launched(_) => None,
            })
            .collect()
    }

    /// Children launched but not yet terminated.
    pub fn live(&self) -> Vec<u32> {
        self.state.lock().unwrap().live.iter().copied().collect()
    }

    /// Largest number of un-terminated children ever seen at once.
    pub fn max_live(&self) -> usize {
        self.state.lock().unwrap().max_live
    }

    /// Wait until at least `n` children have been launched.
    pub async fn wait_for_launches(&self, n: u32) {
        let mut rx = self.launches.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|count| *count >= n).await;
    }

    fn record_launch(&self, id: u32) {
        {
            let mut state = self.state.lock().unwrap();
            state.events.push(LaunchEvent::Launched(id));
            state.live.insert(id);
            state.max_live = state.max_live.max(state.live.len());
        }
        self.launches.send_replace(id);
    }

    fn record_termination(&self, id: u32) {
        let mut state = self.state.lock().unwrap();
        state.events.push(LaunchEvent::Terminated(id));
        state.live.remove(&id);
    }
}

/// Launcher that spawns nothing and records what the supervisor asks for.
#[derive(Debug, Clone)]
pub struct FakeLauncher {
    log: LaunchLog,
    exit_code: Option<i32>,
    fail_on: Option<u32>,
}

impl FakeLauncher {
    pub fn new(log: LaunchLog) -> Self {
        Self {
            log,
            exit_code: None,
            fail_on: None,
        }
    }

    /// Children exit on their own right after launch with `code`.
    pub fn exiting_with(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    /// The `n`-th launch (1-based) fails like a missing executable.
    pub fn failing_on_launch(mut self, n: u32) -> Self {
        self.fail_on = Some(n);
        self
    }
}

impl ChildLauncher for FakeLauncher {
    type Child = FakeChild;

    fn launch(&mut self) -> Result<FakeChild> {
        let id = self.log.launch_count() + 1;
        if self.fail_on == Some(id) {
            return Err(WatchrunError::Spawn {
                program: "fake-command".to_string(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }

        self.log.record_launch(id);
        Ok(FakeChild {
            id,
            log: self.log.clone(),
            exit_code: self.exit_code,
            terminated: false,
        })
    }
}

#[derive(Debug)]
pub struct FakeChild {
    id: u32,
    log: LaunchLog,
    exit_code: Option<i32>,
    terminated: bool,
}

impl ChildGroup for FakeChild {
    fn id(&self) -> Option<u32> {
        Some(self.id)
    }

    fn terminate_group(&mut self) -> Result<()> {
        if !self.terminated {
            self.terminated = true;
            self.log.record_termination(self.id);
        }
        Ok(())
    }

    fn wait_exit(&mut self) -> Pin<Box<dyn Future<Output = Option<i32>> + Send + '_>> {
        let code = self.exit_code;
        Box::pin(async move {
            match code {
                Some(code) => Some(code),
                None => std::future::pending().await,
            }
        })
    }
}

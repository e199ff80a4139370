// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod watch;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{debug, info};

use crate::config::Settings;
use crate::engine::{restart_channel, Supervisor, TerminationSignals};
use crate::errors::{Result, WatchrunError};
use crate::exec::CommandLauncher;
use crate::fs::RealFileSystem;
use crate::watch::{Dispatcher, RawWatchEvent, Scanner, WatchRegistry};

/// High-level entry point used by `main.rs`.
///
/// This wires together four concurrent activities:
/// - the notify `PollWatcher` thread behind the [`WatchRegistry`]
/// - the dispatcher relaying its events into the restart channel
/// - the directory scanner registering new files
/// - the supervisor owning the child process group
///
/// Returns `Ok(())` after an operator termination signal. Any fatal error
/// from the scanner, dispatcher or supervisor is returned as-is; the current
/// child group is killed on the way out.
pub async fn run(settings: Settings) -> Result<()> {
    // Installed before anything is spawned so no signal slips through.
    let mut signals = TerminationSignals::register()?;

    let (event_tx, event_rx) = mpsc::unbounded_channel::<RawWatchEvent>();
    let registry = Arc::new(WatchRegistry::poll(settings.interval, event_tx)?);

    let (restart_tx, restart_rx) = restart_channel();

    let dispatcher = Dispatcher::new(event_rx, Arc::clone(&registry), restart_tx, settings.verbose);
    let mut dispatch_task = tokio::spawn(dispatcher.run());

    let base_dir = std::env::current_dir()?;
    let scanner = Arc::new(Scanner::new(
        Arc::new(RealFileSystem),
        Arc::clone(&registry),
        Arc::new(settings.filter),
        settings.roots,
        base_dir,
    ));
    let mut scan_task = tokio::spawn(scanner.run(settings.interval));

    let supervisor = Supervisor::new(CommandLauncher::new(settings.command), restart_rx);
    let shutdown = async move {
        let name = signals.recv().await;
        info!(signal = name, "received termination signal");
    };

    let result = tokio::select! {
        exit = supervisor.run(shutdown) => exit.map(|exit| debug!(?exit, "supervisor finished")),
        res = &mut dispatch_task => flatten(res),
        res = &mut scan_task => flatten(res),
    };

    dispatch_task.abort();
    scan_task.abort();

    result
}

fn flatten(res: std::result::Result<Result<()>, JoinError>) -> Result<()> {
    match res {
        Ok(inner) => inner,
        Err(e) => Err(WatchrunError::Other(e.into())),
    }
}

/// `--dry-run` output: the resolved settings.
pub fn print_dry_run(settings: &Settings) {
    println!("watchrun dry-run");
    println!("  interval: {}s", settings.interval.as_secs());
    println!("  target_exts: {:?}", settings.filter.extensions());
    println!("  roots:");
    for root in &settings.roots {
        println!("    - {}", root.display());
    }
    let excludes: Vec<_> = settings.filter.excludes().collect();
    if !excludes.is_empty() {
        println!("  excludes:");
        for path in excludes {
            println!("    - {}", path.display());
        }
    }
    println!("  verbose: {}", settings.verbose);
    println!("  command: {:?}", settings.command);

    debug!("dry-run complete (nothing started)");
}

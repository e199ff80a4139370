// tests/dispatcher_behaviour.rs
mod common;
use crate::common::{init_tracing, with_timeout, RecordingBackend};

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use notify::event::{CreateKind, DataChange, MetadataKind, ModifyKind, RemoveKind};
use notify::{Event, EventKind};
use tokio::sync::mpsc;

use watchrun::engine::{restart_channel, RestartReceiver};
use watchrun::errors::WatchrunError;
use watchrun::watch::{Dispatcher, RawWatchEvent, WatchRegistry};

type TestResult = Result<(), Box<dyn Error>>;

struct Harness {
    events: mpsc::UnboundedSender<RawWatchEvent>,
    restarts: RestartReceiver,
    registry: Arc<WatchRegistry>,
    backend: RecordingBackend,
    dispatcher: Dispatcher,
}

fn harness(verbose: bool) -> Harness {
    let (events, event_rx) = mpsc::unbounded_channel();
    let (restart_tx, restarts) = restart_channel();
    let backend = RecordingBackend::new();
    let registry = Arc::new(WatchRegistry::new(backend.clone()));
    let dispatcher = Dispatcher::new(event_rx, Arc::clone(&registry), restart_tx, verbose);
    Harness {
        events,
        restarts,
        registry,
        backend,
        dispatcher,
    }
}

fn event(kind: EventKind, path: &str) -> RawWatchEvent {
    Ok(Event::new(kind).add_path(PathBuf::from(path)))
}

fn write(path: &str) -> RawWatchEvent {
    event(EventKind::Modify(ModifyKind::Data(DataChange::Content)), path)
}

/// A burst of K relevant events leaves exactly one pending restart.
#[tokio::test]
async fn burst_of_changes_yields_one_restart() -> TestResult {
    init_tracing();
    let mut h = harness(false);

    h.events.send(event(EventKind::Create(CreateKind::File), "/p/a.go"))?;
    for _ in 0..25 {
        h.events.send(write("/p/a.go"))?;
    }
    h.events.send(event(
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::WriteTime)),
        "/p/b.go",
    ))?;
    drop(h.events);

    with_timeout(h.dispatcher.run()).await?;

    assert!(h.restarts.try_take(), "one restart should be pending");
    assert!(!h.restarts.try_take(), "burst must not queue a second restart");
    Ok(())
}

#[tokio::test]
async fn chmod_only_events_never_restart() -> TestResult {
    init_tracing();
    let mut h = harness(true);

    h.events.send(event(
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)),
        "/p/a.go",
    ))?;
    h.events.send(event(
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::Ownership)),
        "/p/a.go",
    ))?;
    drop(h.events);

    with_timeout(h.dispatcher.run()).await?;
    assert!(!h.restarts.try_take());
    Ok(())
}

/// "Watched file deleted" is swallowed and the path leaves the watch set.
#[tokio::test]
async fn deleted_file_error_is_benign() -> TestResult {
    init_tracing();
    let mut h = harness(false);
    h.registry.add(&PathBuf::from("/p/gone.go"))?;

    h.events.send(Err(
        notify::Error::path_not_found().add_path(PathBuf::from("/p/gone.go"))
    ))?;
    drop(h.events);

    with_timeout(h.dispatcher.run()).await?;

    assert!(!h.restarts.try_take());
    assert!(!h.registry.contains(&PathBuf::from("/p/gone.go")));
    assert_eq!(h.backend.unwatch_calls(), vec![PathBuf::from("/p/gone.go")]);
    Ok(())
}

/// A remove event restarts and lets the next scan re-register the path.
#[tokio::test]
async fn remove_event_restarts_and_forgets_path() -> TestResult {
    init_tracing();
    let mut h = harness(false);
    h.registry.add(&PathBuf::from("/p/old.go"))?;

    h.events.send(event(EventKind::Remove(RemoveKind::Any), "/p/old.go"))?;
    drop(h.events);

    with_timeout(h.dispatcher.run()).await?;

    assert!(h.restarts.try_take());
    assert!(h.registry.is_empty());
    Ok(())
}

#[tokio::test]
async fn other_watch_errors_are_fatal() -> TestResult {
    init_tracing();
    let mut h = harness(false);

    h.events.send(write("/p/a.go"))?;
    h.events.send(Err(notify::Error::io(std::io::Error::from(
        std::io::ErrorKind::PermissionDenied,
    ))))?;
    // Anything after the fatal error is never looked at.
    h.events.send(write("/p/b.go"))?;

    let result = with_timeout(h.dispatcher.run()).await;
    assert!(matches!(result, Err(WatchrunError::Watch(_))), "got {result:?}");

    assert!(h.restarts.try_take());
    assert!(!h.restarts.try_take());
    Ok(())
}

/// Once the supervisor side is gone the dispatcher stops on the next
/// relevant event.
#[tokio::test]
async fn dispatcher_stops_when_restart_receiver_is_dropped() -> TestResult {
    init_tracing();
    let h = harness(false);
    drop(h.restarts);

    h.events.send(write("/p/a.go"))?;
    // Sender stays alive: only the closed restart channel can end the loop.
    with_timeout(h.dispatcher.run()).await?;
    Ok(())
}

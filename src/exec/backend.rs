// src/exec/backend.rs

//! Pluggable launcher abstraction used by the supervisor.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

/// A running command together with everything it spawned.
pub trait ChildGroup: Send {
    /// OS identifier of the group leader, if known.
    fn id(&self) -> Option<u32>;

    /// Forcefully kill the whole group. Killing an already dead group is
    /// not an error.
    fn terminate_group(&mut self) -> Result<()>;

    /// Resolves when the group leader exits, with its exit code if it has
    /// one (`None` when it died from a signal).
    ///
    /// Dropping the future before it resolves must be harmless.
    fn wait_exit(&mut self) -> Pin<Box<dyn Future<Output = Option<i32>> + Send + '_>>;
}

/// Starts a fresh instance of the supervised command.
pub trait ChildLauncher: Send {
    type Child: ChildGroup;

    fn launch(&mut self) -> Result<Self::Child>;
}

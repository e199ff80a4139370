// src/engine/mod.rs

//! Restart orchestration for watchrun.
//!
//! This module ties together:
//! - the single-slot restart channel fed by the dispatcher ([`restart`]),
//! - operator termination signals ([`signals`]),
//! - the supervisor loop that owns the child process group ([`supervisor`]).

pub mod restart;
pub mod signals;
pub mod supervisor;

pub use restart::{restart_channel, RestartReceiver, RestartRequest, RestartSender};
pub use signals::TerminationSignals;
pub use supervisor::{Supervisor, SupervisorExit};

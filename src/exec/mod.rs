// src/exec/mod.rs

//! Process execution layer.
//!
//! The supervisor never touches OS processes directly. It talks to a
//! [`ChildLauncher`] that starts the command and hands back a
//! [`ChildGroup`], which knows how to kill everything the command spawned.
//!
//! - [`backend`] defines both traits.
//! - [`process_group`] is the real implementation: the command runs as the
//!   leader of its own process group and is killed group-wide with SIGKILL.
//!
//! Tests provide their own launcher that records launches and kills
//! without spawning anything.

pub mod backend;
pub mod process_group;

pub use backend::{ChildGroup, ChildLauncher};
pub use process_group::{CommandLauncher, ProcessGroup};

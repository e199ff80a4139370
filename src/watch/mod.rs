// src/watch/mod.rs

//! File discovery and change detection.
//!
//! This module is responsible for:
//! - Deciding which files are interesting ([`filter`], [`path_utils`]).
//! - Periodically walking the roots and registering new matches ([`scanner`]).
//! - Owning the set of watched files on top of notify's `PollWatcher`
//!   ([`registry`]).
//! - Turning raw notify events into restart requests ([`dispatcher`]).
//!
//! It does **not** know about processes; its only output is the restart
//! channel.

pub mod dispatcher;
pub mod filter;
pub mod path_utils;
pub mod registry;
pub mod scanner;

pub use dispatcher::{classify_error, classify_event, Dispatcher, ErrorClass, EventClass};
pub use filter::{FilterConfig, FilterDecision};
pub use registry::{RawWatchEvent, WatchBackend, WatchRegistry};
pub use scanner::{ScanReport, Scanner};

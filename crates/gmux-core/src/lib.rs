//! # gmux core
//!
//! Declarative tmux session orchestration: a YAML project file describes a
//! session, its windows, and their panes, and [`SessionManager`] turns it
//! into a sequence of tmux calls.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//!
//! ## Layers
//!
//! - [`runner`]: spawns command lines; every external effect goes through it
//! - [`tmux`]: the tmux capabilities the orchestrator needs, one call each
//! - [`session`]: start, stop, and capture
//! - [`config`]: project files on disk
//!
//! [`testing`] holds a recording runner for exercising the layers above
//! without a tmux server.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]

pub mod config;
mod error;
pub mod model;
pub mod paths;
pub mod runner;
pub mod session;
pub mod testing;
pub mod tmux;
pub mod trace;

pub use error::{Error, Result};
pub use model::{Config, Context, Layout, Options, Pane, Split, Window};
pub use paths::PathResolver;
pub use runner::{CommandLine, Runner, ShellRunner};
pub use session::SessionManager;
pub use tmux::{Multiplexer, Tmux};

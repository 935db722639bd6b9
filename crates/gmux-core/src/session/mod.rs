//! Session orchestration
//!
//! [`SessionManager`] walks a [`Config`](crate::model::Config) and drives a
//! [`Multiplexer`] and a [`Runner`] in a fixed order:
//!
//! - `start`: create the session (or reuse it) and build its windows and panes
//! - `stop`: run teardown commands and kill the session, or kill named windows
//! - `capture`: rebuild a config from the live session
//!
//! Calls are strictly sequential. The first failure aborts the operation and
//! is returned as-is; nothing is retried and nothing is rolled back here.

mod capture;
mod start;
mod stop;


use std::path::Path;

use crate::{
    paths::PathResolver,
    runner::{CommandLine, Runner},
    tmux::Multiplexer,
    Result,
};

/// Name of the window every new session is created with, killed once the
/// declared windows exist.
pub const PLACEHOLDER_WINDOW: &str = "gmux_def";

/// Orchestrates start, stop, and capture of declarative sessions.
#[derive(Debug, Clone)]
pub struct SessionManager<M, R> {
    mux: M,
    runner: R,
    paths: PathResolver,
}

impl<M: Multiplexer, R: Runner> SessionManager<M, R> {
    /// Manager resolving `~/` against the current user's home directory.
    pub fn new(mux: M, runner: R) -> Self {
        Self::with_paths(mux, runner, PathResolver::from_env())
    }

    pub const fn with_paths(mux: M, runner: R, paths: PathResolver) -> Self {
        Self { mux, runner, paths }
    }

    /// Run shell commands one by one in `cwd`, stopping at the first failure.
    fn run_shell_commands(&self, commands: &[String], cwd: &str) -> Result<()> {
        commands.iter().try_for_each(|command| {
            tracing::debug!(%command, %cwd, "running shell command");
            self.runner
                .run(&CommandLine::shell(command.as_str()), Some(Path::new(cwd)))
                .map(drop)
        })
    }

    /// Bring the operator to `target`.
    ///
    /// Inside a tmux client the client is switched only when `attach` is set;
    /// outside tmux a blocking attach takes over the terminal.
    fn switch_or_attach(&self, target: &str, attach: bool, inside_tmux_session: bool) -> Result<()> {
        match (inside_tmux_session, attach) {
            (true, true) => self.mux.switch_client(target),
            (false, _) => self.mux.attach(target),
            (true, false) => {
                tracing::debug!(client_target = %target, "inside tmux without --attach, not switching");
                Ok(())
            }
        }
    }
}

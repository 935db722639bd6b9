//! tmux gateway
//!
//! [`Multiplexer`] is the set of tmux capabilities the session orchestrator
//! drives. [`Tmux`] implements it by shelling out one `tmux` sub-command per
//! call through a [`Runner`].
//!
//! Targets follow tmux addressing: `session:`, `session:window`, and
//! `window.pane` where window and pane may be ids returned by tmux.

use crate::{
    model::{Layout, Split},
    runner::{CommandLine, Runner},
    Error, Result,
};

const TMUX: &str = "tmux";

/// Format of one `list-windows` line: id, name, layout, current path.
const WINDOW_FORMAT: &str = "#{window_id};#{window_name};#{window_layout};#{pane_current_path}";

/// A window as reported by `list-windows`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxWindow {
    pub id: String,
    pub name: String,
    pub layout: String,
    pub root: String,
}

/// A pane as reported by `list-panes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxPane {
    pub root: String,
}

/// Operations gmux performs against a terminal multiplexer.
pub trait Multiplexer {
    /// Whether `target` names a live session: the check succeeds and
    /// prints nothing.
    fn session_exists(&self, target: &str) -> bool;

    /// Create a detached session with one window; returns tmux's reply.
    fn new_session(&self, name: &str, root: &str, window_name: &str) -> Result<String>;

    fn stop_session(&self, name: &str) -> Result<()>;

    /// Create a window in `session_target`; returns the new window id.
    fn new_window(&self, session_target: &str, name: &str, root: &str) -> Result<String>;

    fn kill_window(&self, target: &str) -> Result<()>;

    /// Split `window_target`; returns the new pane id.
    fn split_window(&self, window_target: &str, split: Split, root: &str) -> Result<String>;

    /// Type `keys` into `target` followed by Enter.
    fn send_keys(&self, target: &str, keys: &str) -> Result<()>;

    fn select_layout(&self, target: &str, layout: Layout) -> Result<()>;

    fn set_env(&self, target: &str, key: &str, value: &str) -> Result<()>;

    /// Close gaps in the window indexes of `session_target`.
    fn renumber_windows(&self, session_target: &str) -> Result<()>;

    fn switch_client(&self, target: &str) -> Result<()>;

    /// Attach the operator's terminal to `target`, blocking until detach.
    fn attach(&self, target: &str) -> Result<()>;

    /// Name of the session the current client is attached to.
    fn session_name(&self) -> Result<String>;

    fn list_windows(&self, scope: &str) -> Result<Vec<TmuxWindow>>;

    fn list_panes(&self, scope: &str) -> Result<Vec<TmuxPane>>;
}

/// [`Multiplexer`] backed by the `tmux` binary.
#[derive(Debug, Clone)]
pub struct Tmux<R> {
    runner: R,
}

impl<R: Runner> Tmux<R> {
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    fn command<const N: usize>(args: [&str; N]) -> CommandLine {
        CommandLine::new(TMUX).args(args)
    }

    fn output<const N: usize>(&self, args: [&str; N]) -> Result<String> {
        let command = Self::command(args);
        tracing::debug!(%command, "tmux");
        self.runner.run(&command, None)
    }

    fn quiet<const N: usize>(&self, args: [&str; N]) -> Result<()> {
        let command = Self::command(args);
        tracing::debug!(%command, "tmux");
        self.runner.run_quiet(&command, None)
    }
}

impl<R: Runner> Multiplexer for Tmux<R> {
    fn session_exists(&self, target: &str) -> bool {
        self.output(["has-session", "-t", target])
            .is_ok_and(|output| output.is_empty())
    }

    fn new_session(&self, name: &str, root: &str, window_name: &str) -> Result<String> {
        self.output(["new", "-Pd", "-s", name, "-n", window_name, "-c", root])
    }

    fn stop_session(&self, name: &str) -> Result<()> {
        self.output(["kill-session", "-t", name]).map(drop)
    }

    fn new_window(&self, session_target: &str, name: &str, root: &str) -> Result<String> {
        self.output([
            "neww",
            "-Pd",
            "-t",
            session_target,
            "-c",
            root,
            "-F",
            "#{window_id}",
            "-n",
            name,
        ])
    }

    fn kill_window(&self, target: &str) -> Result<()> {
        self.output(["kill-window", "-t", target]).map(drop)
    }

    fn split_window(&self, window_target: &str, split: Split, root: &str) -> Result<String> {
        let command = CommandLine::new(TMUX)
            .args(["split-window", "-Pd"])
            .args(split.flag())
            .args(["-t", window_target, "-c", root, "-F", "#{pane_id}"]);
        tracing::debug!(%command, "tmux");
        self.runner.run(&command, None)
    }

    fn send_keys(&self, target: &str, keys: &str) -> Result<()> {
        self.quiet(["send-keys", "-t", target, keys, "Enter"])
    }

    fn select_layout(&self, target: &str, layout: Layout) -> Result<()> {
        self.output(["select-layout", "-t", target, layout.as_str()])
            .map(drop)
    }

    fn set_env(&self, target: &str, key: &str, value: &str) -> Result<()> {
        self.output(["setenv", "-t", target, key, value]).map(drop)
    }

    fn renumber_windows(&self, session_target: &str) -> Result<()> {
        self.output(["move-window", "-r", "-s", session_target, "-t", session_target])
            .map(drop)
    }

    fn switch_client(&self, target: &str) -> Result<()> {
        self.quiet(["switch-client", "-t", target])
    }

    fn attach(&self, target: &str) -> Result<()> {
        let command = Self::command(["attach", "-d", "-t", target]);
        tracing::debug!(%command, "tmux");
        self.runner.run_attached(&command)
    }

    fn session_name(&self) -> Result<String> {
        self.output(["display-message", "-p", "#S"])
    }

    fn list_windows(&self, scope: &str) -> Result<Vec<TmuxWindow>> {
        let args = ["list-windows", "-F", WINDOW_FORMAT, "-t", scope];
        let output = self.output(args)?;
        output
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                parse_window(line).ok_or_else(|| Error::UnexpectedOutput {
                    command: Self::command(args).to_string(),
                    output: line.to_string(),
                })
            })
            .collect()
    }

    fn list_panes(&self, scope: &str) -> Result<Vec<TmuxPane>> {
        let output = self.output(["list-panes", "-F", "#{pane_current_path}", "-t", scope])?;
        Ok(output
            .lines()
            .filter(|line| !line.is_empty())
            .map(|root| TmuxPane {
                root: root.to_string(),
            })
            .collect())
    }
}

/// Parse `id;name;layout;root`; the root keeps any further `;`.
fn parse_window(line: &str) -> Option<TmuxWindow> {
    let mut fields = line.splitn(4, ';');
    Some(TmuxWindow {
        id: fields.next()?.to_string(),
        name: fields.next()?.to_string(),
        layout: fields.next()?.to_string(),
        root: fields.next()?.to_string(),
    })
}

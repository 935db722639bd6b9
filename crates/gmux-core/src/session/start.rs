use super::{SessionManager, PLACEHOLDER_WINDOW};
use crate::{
    model::{Config, Context, Layout, Options, Window},
    runner::Runner,
    tmux::Multiplexer,
    Result,
};

impl<M: Multiplexer, R: Runner> SessionManager<M, R> {
    /// Create the session described by `config`, or add windows to it.
    ///
    /// A fresh session runs `before_start`, is created with a placeholder
    /// window, and gets its environment. An existing session is only
    /// attached to, unless a window subset was requested or the caller works
    /// inside the current session. Eligible windows are then built in
    /// declaration order, the placeholder is removed, and the operator is
    /// attached to the first declared window.
    ///
    /// # Errors
    ///
    /// Returns the first shell or tmux failure; earlier effects are kept.
    pub fn start(&self, config: &Config, options: &Options, context: Context) -> Result<()> {
        let session = format!("{}:", config.session);
        let session_root = self.paths.session_root(&config.root);
        let exists = self.mux.session_exists(&session);

        if !exists {
            tracing::info!(session = %config.session, root = %session_root, "creating session");
            self.run_shell_commands(&config.before_start, &session_root)?;
            self.mux
                .new_session(&config.session, &session_root, PLACEHOLDER_WINDOW)?;
            for (key, value) in &config.env {
                self.mux.set_env(&config.session, key, value)?;
            }
        } else if !options.has_window_subset() && !options.inside_current_session {
            tracing::info!(session = %config.session, "session exists, attaching");
            return self.switch_or_attach(&session, options.attach, context.inside_tmux_session);
        }

        let threshold = config.rebalance_threshold();
        for window in config
            .windows
            .iter()
            .filter(|window| is_selected(window, options))
        {
            self.create_window(&session, &session_root, window, threshold)?;
        }

        if !options.inside_current_session {
            self.mux
                .kill_window(&format!("{session}{PLACEHOLDER_WINDOW}"))?;
            self.mux.renumber_windows(&session)?;
        }

        match config.windows.first() {
            Some(first) if !options.has_window_subset() && !options.detach => self
                .switch_or_attach(
                    &format!("{session}{}", first.name),
                    options.attach,
                    context.inside_tmux_session,
                ),
            _ => Ok(()),
        }
    }

    fn create_window(
        &self,
        session: &str,
        session_root: &str,
        window: &Window,
        threshold: usize,
    ) -> Result<()> {
        let window_root = self.paths.window_root(&window.root, session_root);
        tracing::debug!(window = %window.name, root = %window_root, "creating window");

        let target = self.mux.new_window(session, &window.name, &window_root)?;
        for command in &window.commands {
            self.mux.send_keys(&target, command)?;
        }

        for (index, pane) in window.panes.iter().enumerate() {
            let pane_root = self.paths.pane_root(&pane.root, &window_root);
            let pane_id = self.mux.split_window(&target, pane.split, &pane_root)?;

            let pane_target = format!("{target}.{pane_id}");
            for command in &pane.commands {
                self.mux.send_keys(&pane_target, command)?;
            }

            // Keeps tmux from running out of room for further splits.
            if index + 1 >= threshold {
                self.mux.select_layout(&target, Layout::Tiled)?;
            }
        }

        self.mux
            .select_layout(&target, Layout::resolve(&window.layout))
    }
}

/// Whole-session starts skip manual windows; a requested subset ignores
/// `manual` and selects by name.
fn is_selected(window: &Window, options: &Options) -> bool {
    if options.has_window_subset() {
        options.windows.contains(&window.name)
    } else {
        !window.manual
    }
}

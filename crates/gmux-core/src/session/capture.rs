use super::SessionManager;
use crate::{
    model::{Config, Options, Pane, Window},
    runner::Runner,
    tmux::Multiplexer,
    Result,
};

impl<M: Multiplexer, R: Runner> SessionManager<M, R> {
    /// Rebuild a config from the live session.
    ///
    /// Windows are listed in the scope of `options.project`, panes per
    /// window. A pane sitting in its window's directory gets an empty root,
    /// so starting the captured config puts it back in the window root.
    ///
    /// # Errors
    ///
    /// Returns the first tmux failure, or an unparseable window listing.
    pub fn capture(&self, options: &Options) -> Result<Config> {
        let session = self.mux.session_name()?;

        let windows = self
            .mux
            .list_windows(&options.project)?
            .into_iter()
            .map(|window| {
                let panes = self
                    .mux
                    .list_panes(&format!("{}:{}", options.project, window.id))?
                    .into_iter()
                    .map(|pane| Pane {
                        root: if pane.root == window.root {
                            String::new()
                        } else {
                            pane.root
                        },
                        ..Pane::default()
                    })
                    .collect();

                Ok(Window {
                    name: window.name,
                    root: window.root,
                    layout: window.layout,
                    panes,
                    ..Window::default()
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(%session, windows = windows.len(), "captured session");
        Ok(Config {
            session,
            windows,
            ..Config::default()
        })
    }
}

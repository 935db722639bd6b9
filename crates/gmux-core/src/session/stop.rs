use super::SessionManager;
use crate::{
    model::{Config, Options},
    runner::Runner,
    tmux::Multiplexer,
    Result,
};

impl<M: Multiplexer, R: Runner> SessionManager<M, R> {
    /// Tear down the session, or only the requested windows.
    ///
    /// Without a window subset the `stop` commands run in the session root
    /// and the session is killed. With a subset each named window is killed
    /// in order and nothing else happens.
    ///
    /// # Errors
    ///
    /// Returns the first shell or tmux failure.
    pub fn stop(&self, config: &Config, options: &Options) -> Result<()> {
        if options.has_window_subset() {
            return options.windows.iter().try_for_each(|window| {
                tracing::info!(session = %config.session, %window, "killing window");
                self.mux
                    .kill_window(&format!("{}:{window}", config.session))
            });
        }

        let session_root = self.paths.session_root(&config.root);
        self.run_shell_commands(&config.stop, &session_root)?;

        tracing::info!(session = %config.session, "killing session");
        self.mux.stop_session(&config.session)
    }
}

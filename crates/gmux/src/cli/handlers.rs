//! Verb handlers that bridge parsed options and `gmux_core`

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use gmux_core::{config, Context, Multiplexer, PathResolver, Runner, SessionManager, ShellRunner, Tmux};

use crate::cli::options::{Invocation, Verb};

/// Render a failed command for stderr: the error, plus its direct cause
/// when the message does not already include it.
pub fn format_error(err: &anyhow::Error) -> String {
    let message = err.to_string();
    match err.source().map(ToString::to_string) {
        Some(cause) if !cause.is_empty() && !message.contains(&cause) => {
            format!("{message}\nCause: {cause}")
        }
        _ => message,
    }
}

/// Run the parsed command against the real tmux.
pub fn run_cli(invocation: &Invocation, paths: &PathResolver) -> Result<()> {
    let runner = ShellRunner::default();
    let manager =
        SessionManager::with_paths(Tmux::new(runner.clone()), runner.clone(), paths.clone());

    match invocation.verb {
        Verb::Start => handle_start(&manager, invocation, paths),
        Verb::Stop => handle_stop(&manager, invocation, paths),
        Verb::New => handle_new(&runner, invocation, paths),
        Verb::Edit => handle_edit(&runner, invocation, paths),
        Verb::List => handle_list(paths),
        Verb::Print => handle_print(&manager, invocation),
    }
}

/// Project file named by `--file`, or by the project in the config dir.
fn config_path(invocation: &Invocation, paths: &PathResolver) -> Result<PathBuf> {
    if let Some(file) = &invocation.file {
        return Ok(file.clone());
    }
    let project = &invocation.options.project;
    if project.is_empty() {
        anyhow::bail!("No project given. Run 'gmux list' to see available projects");
    }
    let dir = config::config_dir(paths).context("Cannot determine the home directory")?;
    Ok(config::project_path(&dir, project))
}

fn handle_start<M: Multiplexer, R: Runner>(
    manager: &SessionManager<M, R>,
    invocation: &Invocation,
    paths: &PathResolver,
) -> Result<()> {
    let options = &invocation.options;
    if options.has_window_subset() {
        println!("Starting new windows...");
    } else {
        println!("Starting a new session...");
    }

    let config = config::load_config(&config_path(invocation, paths)?, &options.settings)?;

    if let Err(err) = manager.start(&config, options, Context::from_env()) {
        println!("Oops, an error occurred! Rolling back...");
        if let Err(rollback) = manager.stop(&config, options) {
            tracing::warn!(error = %rollback, "rollback did not complete");
        }
        return Err(err.into());
    }
    Ok(())
}

fn handle_stop<M: Multiplexer, R: Runner>(
    manager: &SessionManager<M, R>,
    invocation: &Invocation,
    paths: &PathResolver,
) -> Result<()> {
    let options = &invocation.options;
    if options.has_window_subset() {
        println!("Killing windows...");
    } else {
        println!("Terminating session...");
    }

    let config = config::load_config(&config_path(invocation, paths)?, &options.settings)?;
    manager.stop(&config, options)?;
    Ok(())
}

fn handle_new<R: Runner>(runner: &R, invocation: &Invocation, paths: &PathResolver) -> Result<()> {
    let path = config_path(invocation, paths)?;
    let project = match invocation.options.project.as_str() {
        "" => path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("session")
            .to_string(),
        project => project.to_string(),
    };
    config::new_config(&path, &project)?;
    config::edit_config(runner, &path)?;
    Ok(())
}

fn handle_edit<R: Runner>(runner: &R, invocation: &Invocation, paths: &PathResolver) -> Result<()> {
    let path = config_path(invocation, paths)?;
    config::edit_config(runner, &path)?;
    Ok(())
}

fn handle_list(paths: &PathResolver) -> Result<()> {
    let projects = match config::config_dir(paths) {
        Some(dir) => config::list_configs(&dir)?,
        None => Vec::new(),
    };
    for project in projects {
        println!("{project}");
    }
    Ok(())
}

fn handle_print<M: Multiplexer, R: Runner>(
    manager: &SessionManager<M, R>,
    invocation: &Invocation,
) -> Result<()> {
    let config = manager.capture(&invocation.options)?;
    let yaml = serde_yaml::to_string(&config).map_err(gmux_core::Error::from)?;
    print!("{yaml}");
    Ok(())
}

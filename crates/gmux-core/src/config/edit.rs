//! Starter template and `$EDITOR` handoff

use std::{fs, path::Path};

use crate::{
    runner::{CommandLine, Runner},
    Result,
};

/// Editor used when `$EDITOR` is unset or empty.
pub const DEFAULT_EDITOR: &str = "vim";

/// Starter project file for `project`.
pub fn template(project: &str) -> String {
    format!(
        "session: {project}

root: ~/

windows:
  - name: code
    commands:
      - echo \"Hello from {project}\"
  - name: shell
    layout: main-vertical
    panes:
      - type: horizontal
"
    )
}

/// Write the starter template to `path` unless a file is already there.
///
/// Returns whether a file was written. Missing parent directories are
/// created.
///
/// # Errors
///
/// Returns error if the directory or the file cannot be written.
pub fn new_config(path: &Path, project: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, template(project))?;
    tracing::info!(path = %path.display(), "wrote starter project file");
    Ok(true)
}

/// The operator's editor: `$EDITOR`, or [`DEFAULT_EDITOR`].
pub fn editor() -> String {
    std::env::var("EDITOR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Open `path` in the operator's editor, blocking until it exits.
///
/// # Errors
///
/// Returns error if the editor cannot be started or exits non-zero.
pub fn edit_config<R: Runner>(runner: &R, path: &Path) -> Result<()> {
    let command = CommandLine::new(editor()).arg(path.display().to_string());
    tracing::debug!(%command, "opening editor");
    runner.run_attached(&command)
}

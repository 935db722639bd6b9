//! Locating, listing, and loading project files

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use regex::{Captures, Regex};

use crate::{model::Config, paths::PathResolver, Error, Result};

/// Config directory relative to the home directory.
pub const CONFIG_DIR: &str = ".config/gmux";

/// Command trace written by `--debug`, inside the config directory.
pub const LOG_FILE: &str = "gmux.log";

const EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// `~/.config/gmux`, or `None` without a home directory.
pub fn config_dir(paths: &PathResolver) -> Option<PathBuf> {
    paths.home().map(|home| home.join(CONFIG_DIR))
}

/// `~/.config/gmux/gmux.log`
pub fn log_path(paths: &PathResolver) -> Option<PathBuf> {
    config_dir(paths).map(|dir| dir.join(LOG_FILE))
}

/// Path of the project file for `project` in `dir`.
///
/// Prefers `<project>.yml`; `<project>.yaml` is used only when it exists and
/// the `.yml` file does not.
pub fn project_path(dir: &Path, project: &str) -> PathBuf {
    let yml = dir.join(format!("{project}.yml"));
    let yaml = dir.join(format!("{project}.yaml"));
    if !yml.exists() && yaml.exists() {
        yaml
    } else {
        yml
    }
}

/// Load a project file, filling placeholders from `settings`.
///
/// # Errors
///
/// Returns error if:
/// - The file cannot be read
/// - The YAML does not describe a session
/// - The session violates a model invariant
pub fn load_config(path: &Path, settings: &BTreeMap<String, String>) -> Result<Config> {
    let raw = fs::read_to_string(path).map_err(|e| Error::config_read(path, e))?;
    let expanded = substitute(&raw, settings);

    let config: Config =
        serde_yaml::from_str(&expanded).map_err(|e| Error::config_parse(path, e))?;
    config.validate()?;

    tracing::debug!(
        path = %path.display(),
        session = %config.session,
        windows = config.windows.len(),
        "loaded project file"
    );
    Ok(config)
}

/// Fill `$NAME` and `${NAME}` placeholders.
///
/// Each name is looked up in `settings`, then in the process environment.
/// A name found in neither is replaced by the bare name.
pub fn substitute(text: &str, settings: &BTreeMap<String, String>) -> String {
    expand(text, |name| {
        settings
            .get(name)
            .cloned()
            .or_else(|| std::env::var(name).ok())
    })
}

/// Replace every placeholder in `text` with `lookup(name)`, or the bare name.
///
/// A `$` that does not start a placeholder, an empty `${}`, and an
/// unterminated `${` are kept literally.
pub(super) fn expand(text: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    static PLACEHOLDER_RE: OnceLock<Option<Regex>> = OnceLock::new();

    let Some(placeholder_re) = PLACEHOLDER_RE
        .get_or_init(|| Regex::new(r"\$(?:\{([^}]+)\}|([A-Za-z0-9_]+))").ok())
        .as_ref()
    else {
        return text.to_string();
    };

    placeholder_re
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            lookup(name).unwrap_or_else(|| name.to_string())
        })
        .into_owned()
}

/// Project names found in `dir`, sorted.
///
/// A project present as both `.yml` and `.yaml` is listed once. A missing
/// directory has no projects.
///
/// # Errors
///
/// Returns error if the directory exists but cannot be read.
pub fn list_configs(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut projects = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| EXTENSIONS.contains(&ext))
        })
        .filter_map(|path| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .map(ToString::to_string)
        })
        .collect::<Vec<_>>();

    projects.sort();
    projects.dedup();
    Ok(projects)
}

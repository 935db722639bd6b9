//! Root resolution for sessions, windows, and panes
//!
//! Window and pane roots differ in which value decides whether to join onto
//! the parent root: windows test the home-expanded value, panes test the raw
//! value as written. A pane root of `~/src` is therefore joined onto its
//! window root literally, while a window root of `~/src` is used as-is.

use std::path::{Path, PathBuf};

/// Resolves configured roots against the operator's home directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathResolver {
    home: Option<PathBuf>,
}

impl PathResolver {
    /// Resolver using the current user's home directory.
    pub fn from_env() -> Self {
        Self {
            home: directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
        }
    }

    /// Resolver with a fixed home directory.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Substitute the home directory for a leading `~/`, once.
    ///
    /// Without a known home directory the value is returned unchanged.
    pub fn expand(&self, raw: &str) -> String {
        match (raw.strip_prefix('~'), self.home.as_deref()) {
            (Some(rest), Some(home)) if rest.starts_with('/') => {
                format!("{}{rest}", home.display())
            }
            _ => raw.to_string(),
        }
    }

    /// Session root: the expanded value, never joined.
    pub fn session_root(&self, raw: &str) -> String {
        self.expand(raw)
    }

    /// Window root: joined onto the session root unless the expanded value
    /// is a non-empty absolute path.
    pub fn window_root(&self, raw: &str, session_root: &str) -> String {
        let expanded = self.expand(raw);
        if expanded.is_empty() || !Path::new(&expanded).is_absolute() {
            join(session_root, raw)
        } else {
            expanded
        }
    }

    /// Pane root: joined onto the window root unless the raw value is a
    /// non-empty absolute path.
    pub fn pane_root(&self, raw: &str, window_root: &str) -> String {
        let expanded = self.expand(raw);
        if expanded.is_empty() || !Path::new(raw).is_absolute() {
            join(window_root, raw)
        } else {
            expanded
        }
    }
}

/// Lexically join two path fragments and clean the result.
///
/// Empty fragments are ignored; joining two empty fragments yields `""`.
pub fn join(base: &str, rel: &str) -> String {
    match (base.is_empty(), rel.is_empty()) {
        (true, true) => String::new(),
        (false, true) => clean(base),
        (true, false) => clean(rel),
        (false, false) => clean(&format!("{base}/{rel}")),
    }
}

/// Fold `.` and `..` segments and duplicate separators out of a path.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last().copied() {
                Some(last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

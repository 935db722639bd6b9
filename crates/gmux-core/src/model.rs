//! Declarative session model
//!
//! A [`Config`] describes one tmux session: its windows, their panes, and the
//! shell commands that seed them. Configs are built fresh per invocation and
//! never mutated once handed to the session orchestrator.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Pane count after which every split is followed by a `tiled` layout.
pub const DEFAULT_REBALANCE_THRESHOLD: usize = 5;

/// A complete session description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub root: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub before_start: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(
        rename = "rebalance_panes_after",
        alias = "rebalance_windows_threshold",
        skip_serializing_if = "is_zero"
    )]
    pub rebalance_threshold: usize,
    pub windows: Vec<Window>,
}

impl Config {
    /// Pane index (1-based) from which splits force a `tiled` layout.
    pub const fn rebalance_threshold(&self) -> usize {
        if self.rebalance_threshold == 0 {
            DEFAULT_REBALANCE_THRESHOLD
        } else {
            self.rebalance_threshold
        }
    }

    /// Check the model invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns error if the session name is empty, a window is unnamed,
    /// or two windows share a name.
    pub fn validate(&self) -> Result<()> {
        if self.session.trim().is_empty() {
            return Err(Error::invalid_config("session name cannot be empty"));
        }

        let mut seen = std::collections::HashSet::new();
        for window in &self.windows {
            if window.name.is_empty() {
                return Err(Error::invalid_config(format!(
                    "window without a name in session '{}'",
                    self.session
                )));
            }
            if !seen.insert(window.name.as_str()) {
                return Err(Error::invalid_config(format!(
                    "duplicate window name '{}' in session '{}'",
                    window.name, self.session
                )));
            }
        }

        Ok(())
    }
}

/// A window and the panes split inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Window {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub root: String,
    #[serde(skip_serializing_if = "is_false")]
    pub manual: bool,
    /// Layout name; captured configs may hold a raw tmux layout string.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub layout: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub panes: Vec<Pane>,
}

/// One split inside a window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pane {
    #[serde(rename = "type", skip_serializing_if = "Split::is_unspecified")]
    pub split: Split,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub root: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
}

/// Split direction token of a pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Horizontal,
    Vertical,
    /// Absent or unrecognised token; tmux picks its default direction.
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Split {
    /// `split-window` flag for this direction, if any.
    pub const fn flag(self) -> Option<&'static str> {
        match self {
            Self::Horizontal => Some("-h"),
            Self::Vertical => Some("-v"),
            Self::Unspecified => None,
        }
    }

    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

/// Layouts a window may declare, plus `tiled` used for rebalancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    EvenHorizontal,
    EvenVertical,
    MainHorizontal,
    MainVertical,
    Tiled,
}

impl Layout {
    /// Resolve a declared layout; anything outside the four declarable
    /// layouts (including empty and `tiled`) becomes `even-horizontal`.
    pub fn resolve(declared: &str) -> Self {
        match declared.parse() {
            Ok(Self::Tiled) | Err(_) => Self::EvenHorizontal,
            Ok(layout) => layout,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EvenHorizontal => "even-horizontal",
            Self::EvenVertical => "even-vertical",
            Self::MainHorizontal => "main-horizontal",
            Self::MainVertical => "main-vertical",
            Self::Tiled => "tiled",
        }
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "even-horizontal" => Ok(Self::EvenHorizontal),
            "even-vertical" => Ok(Self::EvenVertical),
            "main-horizontal" => Ok(Self::MainHorizontal),
            "main-vertical" => Ok(Self::MainVertical),
            "tiled" => Ok(Self::Tiled),
            _ => Err(Error::invalid_config(format!("unknown layout: {s}"))),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-invocation options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Requested window subset; empty means the whole session.
    pub windows: Vec<String>,
    pub attach: bool,
    pub detach: bool,
    pub inside_current_session: bool,
    pub project: String,
    /// `key=value` settings substituted into the project file.
    pub settings: BTreeMap<String, String>,
}

impl Options {
    pub fn has_window_subset(&self) -> bool {
        !self.windows.is_empty()
    }
}

/// Ambient facts about the operator's terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    pub inside_tmux_session: bool,
}

impl Context {
    /// Detect whether the controlling terminal is a tmux client.
    pub fn from_env() -> Self {
        Self {
            inside_tmux_session: std::env::var_os("TMUX").is_some(),
        }
    }
}

const fn is_zero(n: &usize) -> bool {
    *n == 0
}

const fn is_false(b: &bool) -> bool {
    !*b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_resolve_known() {
        assert_eq!(Layout::resolve("main-vertical"), Layout::MainVertical);
        assert_eq!(Layout::resolve("even-vertical"), Layout::EvenVertical);
    }

    #[test]
    fn test_layout_resolve_falls_back_to_even_horizontal() {
        assert_eq!(Layout::resolve(""), Layout::EvenHorizontal);
        assert_eq!(Layout::resolve("tiled"), Layout::EvenHorizontal);
        assert_eq!(Layout::resolve("b25d,80x24,0,0,1"), Layout::EvenHorizontal);
    }

    #[test]
    fn test_rebalance_threshold_default() {
        let config = Config::default();
        assert_eq!(config.rebalance_threshold(), DEFAULT_REBALANCE_THRESHOLD);

        let config = Config {
            rebalance_threshold: 2,
            ..Config::default()
        };
        assert_eq!(config.rebalance_threshold(), 2);
    }

    #[test]
    fn test_validate_rejects_empty_session() {
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_windows() {
        let window = Window {
            name: "code".to_string(),
            ..Window::default()
        };
        let config = Config {
            session: "work".to_string(),
            windows: vec![window.clone(), window],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_field_names() -> std::result::Result<(), serde_yaml::Error> {
        let yaml = "
session: blog
root: ~/code/blog
before_start:
  - docker compose up -d
rebalance_panes_after: 3
windows:
  - name: code
    manual: true
    layout: main-vertical
    panes:
      - type: horizontal
        root: src
        commands: [cargo watch]
      - type: diagonal
";
        let config: Config = serde_yaml::from_str(yaml)?;
        assert_eq!(config.session, "blog");
        assert_eq!(config.rebalance_threshold(), 3);
        assert_eq!(config.windows.len(), 1);
        assert!(config.windows[0].manual);
        assert_eq!(config.windows[0].panes[0].split, Split::Horizontal);
        assert_eq!(config.windows[0].panes[1].split, Split::Unspecified);
        Ok(())
    }

    #[test]
    fn test_serialize_omits_empty_fields() -> std::result::Result<(), serde_yaml::Error> {
        let config = Config {
            session: "work".to_string(),
            windows: vec![Window {
                name: "code".to_string(),
                panes: vec![Pane::default()],
                ..Window::default()
            }],
            ..Config::default()
        };
        let yaml = serde_yaml::to_string(&config)?;
        assert!(!yaml.contains("before_start"));
        assert!(!yaml.contains("manual"));
        assert!(!yaml.contains("type"));
        assert!(!yaml.contains("rebalance_panes_after"));
        Ok(())
    }
}

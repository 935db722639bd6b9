//! Project files
//!
//! Every project is one YAML file in the config directory, named after the
//! project: `~/.config/gmux/work.yml` (or `work.yaml`) describes `work`.
//!
//! # Example
//!
//! ```yaml
//! session: work
//! root: ~/src/work
//! before_start:
//!   - docker compose up -d
//! windows:
//!   - name: code
//!     commands:
//!       - vim
//!   - name: server
//!     panes:
//!       - type: horizontal
//!         commands:
//!           - cargo watch -x run
//! ```
//!
//! Placeholders `$NAME` and `${NAME}` are filled from `key=value` settings
//! given on the command line, then from the process environment.
//!
//! # Module Structure
//!
//! - `load`: locating, listing, and loading project files
//! - `edit`: starter template and `$EDITOR` handoff

mod edit;
mod load;

#[cfg(test)]
mod tests_loading;

pub use edit::{edit_config, editor, new_config, template, DEFAULT_EDITOR};
pub use load::{
    config_dir, list_configs, load_config, log_path, project_path, substitute, CONFIG_DIR,
    LOG_FILE,
};

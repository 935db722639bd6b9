//! Error types for gmux with categorization:
//!
//! - **Configuration errors**: unreadable or invalid project files (exit code 1)
//! - **System errors**: shell commands and tmux invocations (exit code 2)
//!
//! Every tmux call is itself a shell invocation, so a rejected tmux operation
//! and a missing `tmux` binary surface through the same [`Error::Shell`] variant.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Top-level error type for gmux operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A command exited non-zero or could not be spawned
    #[error("Cannot run {command:?}: {reason}")]
    Shell { command: String, reason: String },

    /// A tmux call succeeded but returned output we cannot interpret
    #[error("Unexpected output from {command:?}: {output:?}")]
    UnexpectedOutput { command: String, output: String },

    /// A project file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A project file is not valid YAML for the declarative model
    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The project file parsed but violates a model invariant
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem error outside of config loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a captured config failed
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a shell failure for the given command line.
    pub fn shell(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Shell {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a config read failure.
    pub fn config_read(path: &Path, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a config parse failure.
    pub fn config_parse(path: &Path, source: serde_yaml::Error) -> Self {
        Self::ConfigParse {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns the process exit code for this error.
    ///
    /// - 1: User error (bad or missing configuration)
    /// - 2: System error (shell, tmux, IO)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigRead { .. } | Self::ConfigParse { .. } | Self::InvalidConfig(_) => 1,
            Self::Shell { .. } | Self::UnexpectedOutput { .. } | Self::Io(_) | Self::Serialize(_) => 2,
        }
    }
}

/// Result alias used across gmux-core.
pub type Result<T> = std::result::Result<T, Error>;

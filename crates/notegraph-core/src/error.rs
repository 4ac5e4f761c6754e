//! Error types for the NoteGraph system.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! This ensures composable error handling across crates.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all NoteGraph operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File or directory not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Invalid file path (not a directory, not valid UTF-8, etc.)
    #[error("Invalid file path: {reason}")]
    InvalidPath { reason: String },

    /// A wiki-link names a file that exists in several directories
    #[error("Ambiguous reference '{label}': candidates in {candidates:?}")]
    AmbiguousReference {
        label: String,
        candidates: Vec<PathBuf>,
    },

    /// Malformed front-matter block
    #[error("Front-matter error in {path}: {reason}")]
    FrontmatterError { path: PathBuf, reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Analytics undefined for this graph shape
    #[error("Degenerate graph: {reason}")]
    DegenerateGraph { reason: String },

    /// Iterative computation ran out of iterations
    #[error("Failed to converge after {iterations} iterations")]
    Convergence { iterations: usize },

    /// No plugin registered under this name
    #[error("Plugin not found: {name}")]
    PluginNotFound { name: String },

    /// Plugin execution failed
    #[error("Plugin '{name}' failed: {reason}")]
    PluginError { name: String, reason: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create an ambiguous reference error
    pub fn ambiguous_reference(label: impl Into<String>, candidates: Vec<PathBuf>) -> Self {
        Error::AmbiguousReference {
            label: label.into(),
            candidates,
        }
    }

    /// Create a front-matter error
    pub fn frontmatter_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::FrontmatterError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a degenerate graph error
    pub fn degenerate_graph(reason: impl Into<String>) -> Self {
        Error::DegenerateGraph {
            reason: reason.into(),
        }
    }

    /// Create a plugin not found error
    pub fn plugin_not_found(name: impl Into<String>) -> Self {
        Error::PluginNotFound { name: name.into() }
    }

    /// Create a plugin execution error
    pub fn plugin_error(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::PluginError {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// True when this error is an unresolvable wiki-link ambiguity
    pub fn is_ambiguous_reference(&self) -> bool {
        matches!(self, Error::AmbiguousReference { .. })
    }
}

//! # NoteGraph Core
//!
//! Core data models, error types, and configuration for the note graph engine.
//! This crate defines the canonical types that all other crates depend on.
//!
//! ## Core Modules
//!
//! - [`models`] - Note and graph node types (Document, NoteNode, Frontmatter)
//! - [`error`] - Error enum and Result alias
//! - [`config`] - Graph building, analytics and plugin configuration
//!
//! ## Error Handling
//!
//! ```
//! use notegraph_core::prelude::*;
//! use std::path::PathBuf;
//!
//! fn check_label() -> Result<()> {
//!     Err(Error::ambiguous_reference("x", vec![PathBuf::from("a"), PathBuf::from("b")]))
//! }
//!
//! assert!(check_label().unwrap_err().is_ambiguous_reference());
//! ```
//!
//! ## Configuration
//!
//! ```
//! use notegraph_core::prelude::*;
//!
//! let config = NoteGraphConfig::builder()
//!     .exclude_dir("templates")
//!     .build()
//!     .unwrap();
//! assert!(config.is_excluded(".obsidian"));
//! assert!(config.is_excluded("templates"));
//! ```

pub mod config;
pub mod error;
pub mod models;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{NoteGraphConfig, PageRankConfig, ResolutionPolicy};
    pub use crate::error::{Error, Result};
    pub use crate::models::{Document, Frontmatter, NoteId, NoteNode};
}

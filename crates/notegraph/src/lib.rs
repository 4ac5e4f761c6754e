//! # NoteGraph CLI
//!
//! Command-line front end: vault statistics, link resolution and plugin
//! execution. The binary in `src/bin/main.rs` is a thin wrapper over the
//! helpers here.

pub mod logging;
pub mod output;
pub mod stats;

pub use logging::{LogFormat, init_logging};
pub use output::{OutputFormat, format_stats, to_json};
pub use stats::{StatsOptions, StatsReport, compute_stats, run_stats};

use anyhow::Context;
use notegraph_core::{NoteGraphConfig, Result};
use notegraph_graph::walk::canonical_root;
use notegraph_graph::{InvertedIndex, LinkResolver, ResolverOptions};
use std::path::{Path, PathBuf};

/// Configuration from `path`, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> anyhow::Result<NoteGraphConfig> {
    match path {
        Some(path) => NoteGraphConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => Ok(NoteGraphConfig::default()),
    }
}

/// Resolve one wiki-link label against the vault at `vault`
pub fn resolve_label(
    vault: &Path,
    label: &str,
    config: &NoteGraphConfig,
) -> Result<Option<PathBuf>> {
    let root = canonical_root(vault)?;
    let index = InvertedIndex::build(&root, &config.excluded_dirs)?;
    LinkResolver::with_options(&index, ResolverOptions::from(config)).resolve(label)
}

//! Vault statistics: build the graph and run every analytic over it

use anyhow::Context;
use notegraph_core::{Error, NoteGraphConfig, Result};
use notegraph_graph::{
    AmbiguousLink, GraphBuilder, GraphSummary, RankedNote, SkippedDocument, diameter, pagerank,
    top_ranked,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::instrument;

/// What to compute
#[derive(Debug, Clone, PartialEq)]
pub struct StatsOptions {
    pub directed: bool,
    /// Number of PageRank leaders to report
    pub top: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            directed: true,
            top: 10,
        }
    }
}

/// Everything `notegraph stats` reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub vault: PathBuf,
    pub summary: GraphSummary,
    /// `None` when the largest component is a single note
    pub diameter: Option<usize>,
    pub top: Vec<RankedNote>,
    pub dangling_links: usize,
    pub skipped: Vec<SkippedDocument>,
    pub ambiguous: Vec<AmbiguousLink>,
}

/// Build the graph of `vault` and compute its statistics on the calling thread
#[instrument(skip(vault, config, options), fields(vault = %vault.display()))]
pub fn compute_stats(
    vault: &Path,
    config: &NoteGraphConfig,
    options: &StatsOptions,
) -> Result<StatsReport> {
    let built = GraphBuilder::new(config.clone())
        .directed(options.directed)
        .build(vault)?;
    let graph = &built.graph;

    let scores = pagerank(graph, &config.pagerank)?;
    let top = top_ranked(graph, &built.page_ref, &scores, options.top);

    let diameter = match diameter(graph) {
        Ok(d) => Some(d),
        Err(Error::DegenerateGraph { reason }) => {
            log::info!("Diameter undefined: {}", reason);
            None
        }
        Err(e) => return Err(e),
    };

    Ok(StatsReport {
        vault: vault.to_path_buf(),
        summary: GraphSummary::of(graph),
        diameter,
        top,
        dangling_links: built.report.dangling_links,
        skipped: built.report.skipped,
        ambiguous: built.report.ambiguous_links,
    })
}

/// Compute statistics on a blocking worker, giving up after `timeout`.
///
/// On timeout the worker is detached and finishes in the background.
pub async fn run_stats(
    vault: PathBuf,
    config: NoteGraphConfig,
    options: StatsOptions,
    timeout: Option<Duration>,
) -> anyhow::Result<StatsReport> {
    let display = vault.display().to_string();
    let task = tokio::task::spawn_blocking(move || compute_stats(&vault, &config, &options));

    let joined = match timeout {
        Some(limit) => tokio::time::timeout(limit, task)
            .await
            .map_err(|_| anyhow::anyhow!("Graph build for {} timed out after {:?}", display, limit))?,
        None => task.await,
    };

    let report = joined
        .context("Graph build worker panicked")?
        .with_context(|| format!("Failed to compute statistics for {}", display))?;
    Ok(report)
}

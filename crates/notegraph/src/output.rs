//! Output formatting for command results

use crate::stats::StatsReport;
use serde::Serialize;
use std::fmt::{self, Write};
use std::str::FromStr;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned plain text for terminals
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown output format '{}'. Valid options: human, json",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Serialize any result as pretty JSON
pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render a stats report
pub fn format_stats(report: &StatsReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Human => Ok(format_stats_human(report)),
    }
}

fn format_stats_human(report: &StatsReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    let _ = writeln!(out, "Vault: {}", report.vault.display());
    let _ = writeln!(
        out,
        "Graph: {} ({} nodes, {} edges)",
        if summary.directed { "directed" } else { "undirected" },
        summary.nodes,
        summary.edges
    );
    let _ = writeln!(
        out,
        "Notes: {} scanned, {} unscanned targets, {} skipped",
        summary.documents,
        summary.unscanned,
        report.skipped.len()
    );
    let _ = writeln!(out, "Density: {:.6}", summary.density);
    let _ = writeln!(out, "Components: {}", summary.components);
    match report.diameter {
        Some(d) => {
            let _ = writeln!(out, "Diameter (largest component): {}", d);
        }
        None => {
            let _ = writeln!(out, "Diameter (largest component): undefined");
        }
    }

    if !report.top.is_empty() {
        let _ = writeln!(out, "\nTop {} by PageRank:", report.top.len());
        for (rank, note) in report.top.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {:.6}  {}  ({})",
                rank + 1,
                note.score,
                note.title,
                note.path.display()
            );
        }
    }

    for skipped in &report.skipped {
        let _ = writeln!(out, "skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    for ambiguous in &report.ambiguous {
        let _ = writeln!(
            out,
            "ambiguous [[{}]] in {}",
            ambiguous.label,
            ambiguous.source.display()
        );
    }

    out
}

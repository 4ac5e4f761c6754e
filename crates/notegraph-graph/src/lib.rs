//! # Note Link Graph
//!
//! Builds the wiki-link graph of a Markdown vault and analyses it using
//! petgraph.
//!
//! Provides:
//! - Inverted filename index over the vault
//! - Wiki-link label resolution (aliases, subpaths, folder-qualified labels)
//! - Document scanning with per-note diagnostics
//! - Graph construction with stable per-build note ids
//! - Density, PageRank, connected components and diameter
//!
//! ## Quick Start
//!
//! ```no_run
//! use notegraph_graph::prelude::*;
//!
//! let built = build_graph("/path/to/vault", true)?;
//! println!("Nodes: {}", built.graph.node_count());
//! println!("Density: {:.4}", density(&built.graph));
//!
//! let scores = pagerank(&built.graph, &PageRankConfig::default())?;
//! for note in top_ranked(&built.graph, &built.page_ref, &scores, 10) {
//!     println!("{:.4} {}", note.score, note.path.display());
//! }
//! # Ok::<(), notegraph_core::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Ids**: assigned per build in first-reference order, starting at 1.
//!   The [`PageRef`] returned with the graph maps every id to its
//!   vault-relative path.
//! - **Nodes**: scanned Markdown notes, or unscanned placeholders for link
//!   targets that exist in the vault but never became notes (attachments,
//!   notes with broken front-matter).
//! - **Edges**: unweighted and deduplicated; directed unless the graph is
//!   built with `directed = false`.
//! - **Ambiguity**: a bare name present in several directories fails the
//!   build, unless the configuration selects lenient resolution.
//!
//! ## Modules
//!
//! - [`index`] - Inverted filename index
//! - [`resolver`] - Link label resolution
//! - [`scanner`] - Document scanning
//! - [`builder`] - Graph construction
//! - [`graph`] - The NoteGraph type
//! - [`analytics`] - Read-only graph metrics

pub mod analytics;
pub mod builder;
pub mod graph;
pub mod index;
pub mod resolver;
pub mod scanner;
pub mod walk;

pub use analytics::{
    GraphSummary, RankedNote, Scores, density, diameter, pagerank, top_ranked,
    weakly_connected_components,
};
pub use builder::{
    AmbiguousLink, BuildReport, BuiltGraph, GraphBuilder, IdAssigner, PageRef, build_graph,
};
pub use graph::NoteGraph;
pub use index::InvertedIndex;
pub use resolver::{LinkResolver, ResolverOptions, resolve};
pub use scanner::{DocumentScanner, ScanOutcome, ScannedNote, SkipReason, SkippedDocument};

pub mod prelude {
    pub use crate::analytics::{
        GraphSummary, RankedNote, density, diameter, pagerank, top_ranked,
        weakly_connected_components,
    };
    pub use crate::builder::{BuildReport, BuiltGraph, GraphBuilder, PageRef, build_graph};
    pub use crate::graph::NoteGraph;
    pub use crate::index::InvertedIndex;
    pub use crate::resolver::LinkResolver;
    pub use notegraph_core::prelude::*;
}

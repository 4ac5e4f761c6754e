//! Graph builder: scans a vault, resolves wikilinks and assembles the note graph

use crate::graph::NoteGraph;
use crate::index::InvertedIndex;
use crate::resolver::{LinkResolver, ResolverOptions};
use crate::scanner::{DocumentScanner, ScanOutcome, SkippedDocument};
use crate::walk::canonical_root;
use notegraph_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Assigns note ids in first-reference order, keyed by relative path.
///
/// Owned by a single build; ids start at 1.
#[derive(Debug, Default)]
pub struct IdAssigner {
    ids: HashMap<PathBuf, NoteId>,
    paths: BTreeMap<NoteId, PathBuf>,
}

impl IdAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `path`, assigning the next one on first reference
    pub fn id_for(&mut self, path: &Path) -> NoteId {
        if let Some(&id) = self.ids.get(path) {
            return id;
        }
        let id = NoteId(self.ids.len() as u64 + 1);
        self.ids.insert(path.to_path_buf(), id);
        self.paths.insert(id, path.to_path_buf());
        id
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Finish assignment, keeping only the id to path direction
    pub fn into_page_ref(self) -> PageRef {
        PageRef { paths: self.paths }
    }
}

/// Mapping from assigned id to vault-relative path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageRef {
    paths: BTreeMap<NoteId, PathBuf>,
}

impl PageRef {
    pub fn get(&self, id: NoteId) -> Option<&Path> {
        self.paths.get(&id).map(PathBuf::as_path)
    }

    /// Reverse lookup; linear in the number of ids
    pub fn id_of(&self, path: &Path) -> Option<NoteId> {
        self.paths
            .iter()
            .find_map(|(&id, p)| (p == path).then_some(id))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Entries in id order
    pub fn iter(&self) -> impl Iterator<Item = (NoteId, &Path)> {
        self.paths.iter().map(|(&id, path)| (id, path.as_path()))
    }
}

/// A link skipped because its target name is ambiguous (lenient mode only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguousLink {
    /// Relative path of the note containing the link
    pub source: PathBuf,
    pub label: String,
    pub candidates: Vec<PathBuf>,
}

/// Per-build diagnostics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Markdown notes that became document nodes
    pub documents: usize,
    pub skipped: Vec<SkippedDocument>,
    /// Links that produced (or matched) an edge
    pub resolved_links: usize,
    /// Links whose target does not exist in the vault
    pub dangling_links: usize,
    pub ambiguous_links: Vec<AmbiguousLink>,
}

/// Output of a build: the immutable graph, its id map and diagnostics
#[derive(Debug, Clone)]
pub struct BuiltGraph {
    pub graph: NoteGraph,
    pub page_ref: PageRef,
    pub report: BuildReport,
}

impl BuiltGraph {
    /// Split into graph and id map
    pub fn into_parts(self) -> (NoteGraph, PageRef) {
        (self.graph, self.page_ref)
    }
}

/// Builds note graphs from vault directories
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    config: NoteGraphConfig,
    directed: bool,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(NoteGraphConfig::default())
    }
}

impl GraphBuilder {
    /// Create a builder producing directed graphs
    pub fn new(config: NoteGraphConfig) -> Self {
        Self {
            config,
            directed: true,
        }
    }

    /// Select directed or undirected edge semantics
    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn config(&self) -> &NoteGraphConfig {
        &self.config
    }

    /// Build the graph of the vault at `root`.
    ///
    /// Relative roots resolve against the working directory. Fails on
    /// filesystem errors and, under [`ResolutionPolicy::Strict`], on the first
    /// ambiguous link.
    #[instrument(skip(self, root), fields(root = %root.display(), directed = self.directed), name = "build_graph")]
    pub fn build(&self, root: &Path) -> Result<BuiltGraph> {
        self.config.validate()?;
        let root = canonical_root(root)?;
        log::info!("Building note graph for {}", root.display());

        let index = InvertedIndex::build(&root, &self.config.excluded_dirs)?;
        let resolver = LinkResolver::with_options(&index, ResolverOptions::from(&self.config));
        let scanner = DocumentScanner::new(&root, &self.config);

        let mut ids = IdAssigner::new();
        let mut graph = NoteGraph::new(self.directed);
        let mut report = BuildReport::default();

        for outcome in scanner.iter() {
            let note = match outcome? {
                ScanOutcome::Parsed(note) => note,
                ScanOutcome::Skipped(skipped) => {
                    log::warn!(
                        "Skipping {}: {}",
                        root.join(&skipped.path).display(),
                        skipped.reason
                    );
                    report.skipped.push(skipped);
                    continue;
                }
            };

            let id = ids.id_for(&note.path);
            graph.insert_document(Document {
                id,
                path: note.path.clone(),
                title: note.parsed.title,
                source_file: note.source_file,
                metadata: note.parsed.metadata,
            });
            report.documents += 1;

            for label in &note.parsed.links {
                match resolver.resolve(label) {
                    Ok(Some(target)) => {
                        let target_id = ids.id_for(&target);
                        graph.ensure_node(target_id, &target);
                        graph.add_edge(id, target_id);
                        report.resolved_links += 1;
                    }
                    Ok(None) => {
                        log::trace!("Dangling link [[{}]] in {}", label, note.path.display());
                        report.dangling_links += 1;
                    }
                    Err(Error::AmbiguousReference { label, candidates })
                        if self.config.resolution == ResolutionPolicy::Lenient =>
                    {
                        log::warn!(
                            "Ambiguous link [[{}]] in {}: {:?}",
                            label,
                            note.path.display(),
                            candidates
                        );
                        report.ambiguous_links.push(AmbiguousLink {
                            source: note.path.clone(),
                            label,
                            candidates,
                        });
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        log::info!(
            "Graph built: {} nodes, {} edges ({} documents, {} skipped, {} dangling links)",
            graph.node_count(),
            graph.edge_count(),
            report.documents,
            report.skipped.len(),
            report.dangling_links
        );

        Ok(BuiltGraph {
            graph,
            page_ref: ids.into_page_ref(),
            report,
        })
    }
}

/// Build the graph of `vault_root` with default configuration
pub fn build_graph(vault_root: impl AsRef<Path>, directed: bool) -> Result<BuiltGraph> {
    GraphBuilder::default()
        .directed(directed)
        .build(vault_root.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_assigner_is_stable() {
        let mut ids = IdAssigner::new();
        let a = ids.id_for(Path::new("a.md"));
        let b = ids.id_for(Path::new("b.md"));
        assert_eq!(a, NoteId(1));
        assert_eq!(b, NoteId(2));
        assert_eq!(ids.id_for(Path::new("a.md")), a);
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_page_ref_lookup() {
        let mut ids = IdAssigner::new();
        ids.id_for(Path::new("x/a.md"));
        ids.id_for(Path::new("b.md"));
        let page_ref = ids.into_page_ref();

        assert_eq!(page_ref.get(NoteId(1)), Some(Path::new("x/a.md")));
        assert_eq!(page_ref.id_of(Path::new("b.md")), Some(NoteId(2)));
        assert_eq!(page_ref.get(NoteId(3)), None);
        assert_eq!(page_ref.len(), 2);
    }

    #[test]
    fn test_page_ref_serializes_as_map() {
        let mut ids = IdAssigner::new();
        ids.id_for(Path::new("a.md"));
        let json = serde_json::to_string(&ids.into_page_ref()).unwrap();
        assert_eq!(json, r#"{"1":"a.md"}"#);
    }
}

//! Note graph using petgraph

use notegraph_core::{Document, NoteId, NoteNode};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Direction, Incoming, Outgoing};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Graph of vault notes keyed by [`NoteId`].
///
/// Edges are unweighted and deduplicated. In undirected mode an edge `a -> b`
/// also stands for `b -> a`, and only one of the two is ever stored.
///
/// Only the graph builder mutates a `NoteGraph`; callers receive it finished.
#[derive(Debug, Clone)]
pub struct NoteGraph {
    graph: DiGraph<NoteNode, ()>,
    ids: HashMap<NoteId, NodeIndex>,
    directed: bool,
}

impl NoteGraph {
    pub(crate) fn new(directed: bool) -> Self {
        Self {
            graph: DiGraph::new(),
            ids: HashMap::new(),
            directed,
        }
    }

    /// Add a scanned document, upgrading an unscanned placeholder with the same id
    pub(crate) fn insert_document(&mut self, document: Document) {
        let id = document.id;
        match self.ids.get(&id) {
            Some(&idx) => self.graph[idx] = NoteNode::Document(document),
            None => {
                let idx = self.graph.add_node(NoteNode::Document(document));
                self.ids.insert(id, idx);
            }
        }
    }

    /// Make sure a node exists for `id`, adding an unscanned placeholder if needed
    pub(crate) fn ensure_node(&mut self, id: NoteId, path: &Path) {
        if !self.ids.contains_key(&id) {
            let idx = self.graph.add_node(NoteNode::Unscanned {
                id,
                path: path.to_path_buf(),
            });
            self.ids.insert(id, idx);
        }
    }

    /// Add an edge between two existing nodes; returns false if it already exists
    pub(crate) fn add_edge(&mut self, source: NoteId, target: NoteId) -> bool {
        let (Some(&a), Some(&b)) = (self.ids.get(&source), self.ids.get(&target)) else {
            return false;
        };

        let exists = self.graph.find_edge(a, b).is_some()
            || (!self.directed && self.graph.find_edge(b, a).is_some());
        if exists {
            return false;
        }

        self.graph.add_edge(a, b, ());
        true
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.ids.contains_key(&id)
    }

    pub fn node(&self, id: NoteId) -> Option<&NoteNode> {
        self.ids.get(&id).map(|&idx| &self.graph[idx])
    }

    /// Scanned document for `id`, if the node is not a placeholder
    pub fn document(&self, id: NoteId) -> Option<&Document> {
        self.node(id).and_then(NoteNode::document)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &NoteNode> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Scanned documents in insertion order
    pub fn documents(&self) -> impl Iterator<Item = &Document> + '_ {
        self.nodes().filter_map(NoteNode::document)
    }

    /// Node ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = NoteId> + '_ {
        self.nodes().map(NoteNode::id)
    }

    /// Stored edges as `(source, target)` id pairs
    pub fn edges(&self) -> impl Iterator<Item = (NoteId, NoteId)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()].id(), self.graph[e.target()].id()))
    }

    pub fn has_edge(&self, source: NoteId, target: NoteId) -> bool {
        let (Some(&a), Some(&b)) = (self.ids.get(&source), self.ids.get(&target)) else {
            return false;
        };
        self.graph.find_edge(a, b).is_some()
            || (!self.directed && self.graph.find_edge(b, a).is_some())
    }

    /// Notes this note links to (every neighbour in undirected mode)
    pub fn successors(&self, id: NoteId) -> Vec<NoteId> {
        if self.directed {
            self.neighbors_directed(id, Outgoing)
        } else {
            self.neighbors(id)
        }
    }

    /// Notes linking to this note (every neighbour in undirected mode)
    pub fn predecessors(&self, id: NoteId) -> Vec<NoteId> {
        if self.directed {
            self.neighbors_directed(id, Incoming)
        } else {
            self.neighbors(id)
        }
    }

    /// Neighbours ignoring edge direction, without duplicates
    pub fn neighbors(&self, id: NoteId) -> Vec<NoteId> {
        let Some(&idx) = self.ids.get(&id) else {
            return vec![];
        };
        let mut out: Vec<NoteId> = self
            .graph
            .neighbors_undirected(idx)
            .map(|n| self.graph[n].id())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    fn neighbors_directed(&self, id: NoteId, direction: Direction) -> Vec<NoteId> {
        let Some(&idx) = self.ids.get(&id) else {
            return vec![];
        };
        let mut out: Vec<NoteId> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].id())
            .collect();
        out.sort();
        out
    }

    /// Relative path of a node
    pub fn path_of(&self, id: NoteId) -> Option<PathBuf> {
        self.node(id).map(|node| node.path().to_path_buf())
    }

    /// Underlying petgraph graph, for algorithms not wrapped here
    pub fn inner(&self) -> &DiGraph<NoteNode, ()> {
        &self.graph
    }
}

//! Read-only graph analytics: density, PageRank, components and diameter.
//!
//! All functions take a finished [`NoteGraph`] by shared reference and may be
//! called repeatedly, in any order, from any thread.

use crate::builder::PageRef;
use crate::graph::NoteGraph;
use notegraph_core::{Error, NoteId, PageRankConfig, Result};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::path::PathBuf;

/// PageRank score per node
pub type Scores = BTreeMap<NoteId, f64>;

/// Summary statistics about a note graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub directed: bool,
    pub nodes: usize,
    pub edges: usize,
    /// Nodes backed by a scanned note
    pub documents: usize,
    /// Link targets that were never scanned as notes
    pub unscanned: usize,
    pub density: f64,
    pub average_links_per_note: f64,
    pub components: usize,
}

impl GraphSummary {
    pub fn of(graph: &NoteGraph) -> Self {
        let nodes = graph.node_count();
        let edges = graph.edge_count();
        let documents = graph.documents().count();

        Self {
            directed: graph.is_directed(),
            nodes,
            edges,
            documents,
            unscanned: nodes - documents,
            density: density(graph),
            average_links_per_note: if nodes > 0 {
                edges as f64 / nodes as f64
            } else {
                0.0
            },
            components: weakly_connected_components(graph).len(),
        }
    }
}

/// A scored note, for ranked listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNote {
    pub id: NoteId,
    pub path: PathBuf,
    pub title: String,
    pub score: f64,
}

/// Edge count relative to the maximum possible for the node count.
///
/// Directed: `m / (n (n - 1))`; undirected: `2m / (n (n - 1))`. Graphs with
/// fewer than two nodes have density 0.
pub fn density(graph: &NoteGraph) -> f64 {
    let n = graph.node_count() as f64;
    let m = graph.edge_count() as f64;
    if graph.node_count() < 2 {
        return 0.0;
    }

    let possible = n * (n - 1.0);
    if graph.is_directed() {
        m / possible
    } else {
        2.0 * m / possible
    }
}

/// Dense adjacency by node position; undirected edges appear in both lists
fn adjacency(graph: &NoteGraph) -> Vec<Vec<usize>> {
    let inner = graph.inner();
    let mut adj = vec![Vec::new(); inner.node_count()];
    for edge in inner.edge_references() {
        let (s, t) = (edge.source().index(), edge.target().index());
        adj[s].push(t);
        if !graph.is_directed() && s != t {
            adj[t].push(s);
        }
    }
    adj
}

/// Undirected adjacency regardless of graph mode, self loops dropped
fn undirected_adjacency(graph: &NoteGraph) -> Vec<Vec<usize>> {
    let inner = graph.inner();
    let mut adj = vec![Vec::new(); inner.node_count()];
    for edge in inner.edge_references() {
        let (s, t) = (edge.source().index(), edge.target().index());
        if s != t {
            adj[s].push(t);
            adj[t].push(s);
        }
    }
    adj
}

fn ids_by_position(graph: &NoteGraph) -> Vec<NoteId> {
    let inner = graph.inner();
    inner.node_indices().map(|idx| inner[idx].id()).collect()
}

/// PageRank by power iteration.
///
/// Starts from the uniform distribution; rank held by nodes without outgoing
/// links is spread uniformly over all nodes. Converges when the L1 change of
/// an iteration drops below `n * tolerance`, otherwise fails with
/// [`Error::Convergence`]. An empty graph yields no scores.
pub fn pagerank(graph: &NoteGraph, config: &PageRankConfig) -> Result<Scores> {
    config.validate()?;

    let n = graph.node_count();
    if n == 0 {
        return Ok(Scores::new());
    }

    let adj = adjacency(graph);
    let alpha = config.damping;
    let uniform = 1.0 / n as f64;
    let mut rank = vec![uniform; n];

    for iteration in 1..=config.max_iterations {
        let dangling: f64 = adj
            .iter()
            .zip(&rank)
            .filter(|(out, _)| out.is_empty())
            .map(|(_, r)| r)
            .sum();

        let base = (1.0 - alpha) * uniform + alpha * dangling * uniform;
        let mut next = vec![base; n];
        for (node, out) in adj.iter().enumerate() {
            if out.is_empty() {
                continue;
            }
            let share = alpha * rank[node] / out.len() as f64;
            for &target in out {
                next[target] += share;
            }
        }

        let err: f64 = next.iter().zip(&rank).map(|(a, b)| (a - b).abs()).sum();
        rank = next;
        if err < n as f64 * config.tolerance {
            log::debug!("PageRank converged after {} iterations", iteration);
            return Ok(ids_by_position(graph).into_iter().zip(rank).collect());
        }
    }

    Err(Error::Convergence {
        iterations: config.max_iterations,
    })
}

/// Weakly connected components as node positions, largest first; ties keep
/// the order of their earliest node
fn component_positions(graph: &NoteGraph) -> Vec<Vec<usize>> {
    let inner = graph.inner();
    let n = inner.node_count();
    let mut sets = UnionFind::<usize>::new(n);
    for edge in inner.edge_references() {
        sets.union(edge.source().index(), edge.target().index());
    }

    let mut by_root: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for node in 0..n {
        by_root.entry(sets.find(node)).or_default().push(node);
    }

    let mut components: Vec<Vec<usize>> = by_root.into_values().collect();
    components.sort_by_key(|members| members[0]);
    components.sort_by(|a, b| b.len().cmp(&a.len()));
    components
}

/// Weakly connected components, largest first.
///
/// Ties keep the order of their earliest node; ids inside a component are
/// sorted.
pub fn weakly_connected_components(graph: &NoteGraph) -> Vec<Vec<NoteId>> {
    let ids = ids_by_position(graph);
    component_positions(graph)
        .into_iter()
        .map(|members| {
            let mut component: Vec<NoteId> = members.into_iter().map(|i| ids[i]).collect();
            component.sort();
            component
        })
        .collect()
}

/// Diameter of the largest weakly connected component.
///
/// Distances ignore edge direction. Fails with [`Error::DegenerateGraph`]
/// when the graph is empty or its largest component is a single node.
pub fn diameter(graph: &NoteGraph) -> Result<usize> {
    let n = graph.node_count();
    if n == 0 {
        return Err(Error::degenerate_graph("graph has no nodes"));
    }

    let largest = component_positions(graph)
        .into_iter()
        .next()
        .unwrap_or_default();
    if largest.len() < 2 {
        return Err(Error::degenerate_graph(
            "largest connected component has a single node",
        ));
    }

    let adj = undirected_adjacency(graph);
    let mut best = 0;
    let mut dist = vec![usize::MAX; n];
    let mut queue = VecDeque::new();

    for &start in &largest {
        for &node in &largest {
            dist[node] = usize::MAX;
        }
        dist[start] = 0;
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            let d = dist[node];
            best = best.max(d);
            for &next in &adj[node] {
                if dist[next] == usize::MAX {
                    dist[next] = d + 1;
                    queue.push_back(next);
                }
            }
        }
    }

    Ok(best)
}

/// The `limit` highest-scoring scanned notes, best first.
///
/// Unscanned link targets are left out, since they have no note yet.
pub fn top_ranked(
    graph: &NoteGraph,
    page_ref: &PageRef,
    scores: &Scores,
    limit: usize,
) -> Vec<RankedNote> {
    let mut ranked: Vec<RankedNote> = scores
        .iter()
        .filter_map(|(&id, &score)| {
            let doc = graph.document(id)?;
            let path = page_ref
                .get(id)
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| doc.path.clone());
            Some(RankedNote {
                id,
                path,
                title: doc.title.clone(),
                score,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegraph_core::{Document, Frontmatter};
    use std::path::Path;

    fn doc(id: u64) -> Document {
        let path = PathBuf::from(format!("n{id}.md"));
        Document {
            id: NoteId(id),
            title: format!("Note {id}"),
            source_file: Path::new("/vault").join(&path),
            path,
            metadata: Frontmatter::default(),
        }
    }

    fn graph(directed: bool, nodes: u64, edges: &[(u64, u64)]) -> NoteGraph {
        let mut g = NoteGraph::new(directed);
        for id in 1..=nodes {
            g.insert_document(doc(id));
        }
        for &(a, b) in edges {
            g.add_edge(NoteId(a), NoteId(b));
        }
        g
    }

    #[test]
    fn test_density_without_edges_is_zero() {
        assert_eq!(density(&graph(true, 5, &[])), 0.0);
        assert_eq!(density(&graph(true, 0, &[])), 0.0);
        assert_eq!(density(&graph(true, 1, &[])), 0.0);
    }

    #[test]
    fn test_density_complete_directed_is_one() {
        let mut edges = Vec::new();
        for a in 1..=4 {
            for b in 1..=4 {
                if a != b {
                    edges.push((a, b));
                }
            }
        }
        let g = graph(true, 4, &edges);
        assert!((density(&g) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_density_undirected() {
        let g = graph(false, 3, &[(1, 2), (2, 3), (3, 1)]);
        assert!((density(&g) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pagerank_sums_to_one() {
        let g = graph(true, 4, &[(1, 2), (2, 3), (3, 1), (4, 1)]);
        let scores = pagerank(&g, &PageRankConfig::default()).unwrap();
        let total: f64 = scores.values().sum();
        assert_eq!(scores.len(), 4);
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pagerank_hub_ranks_highest() {
        let g = graph(true, 4, &[(2, 1), (3, 1), (4, 1)]);
        let scores = pagerank(&g, &PageRankConfig::default()).unwrap();
        let hub = scores[&NoteId(1)];
        for id in 2..=4 {
            assert!(hub > scores[&NoteId(id)]);
        }
    }

    #[test]
    fn test_pagerank_symmetric_cycle_is_uniform() {
        let g = graph(true, 3, &[(1, 2), (2, 3), (3, 1)]);
        let scores = pagerank(&g, &PageRankConfig::default()).unwrap();
        for score in scores.values() {
            assert!((score - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_pagerank_empty_graph() {
        let scores = pagerank(&graph(true, 0, &[]), &PageRankConfig::default()).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn test_pagerank_iteration_budget() {
        let g = graph(true, 3, &[(1, 2), (2, 3)]);
        let config = PageRankConfig {
            max_iterations: 1,
            tolerance: 1e-12,
            ..PageRankConfig::default()
        };
        assert!(matches!(
            pagerank(&g, &config),
            Err(Error::Convergence { iterations: 1 })
        ));
    }

    #[test]
    fn test_components_largest_first() {
        let g = graph(true, 5, &[(4, 5), (1, 2), (3, 2)]);
        let components = weakly_connected_components(&g);
        assert_eq!(
            components,
            vec![
                vec![NoteId(1), NoteId(2), NoteId(3)],
                vec![NoteId(4), NoteId(5)],
            ]
        );
    }

    #[test]
    fn test_diameter_of_path() {
        let g = graph(true, 4, &[(1, 2), (2, 3), (3, 4)]);
        assert_eq!(diameter(&g).unwrap(), 3);
    }

    #[test]
    fn test_diameter_ignores_direction() {
        // 1 -> 2 <- 3: undirected distance 1..3 is 2
        let g = graph(true, 3, &[(1, 2), (3, 2)]);
        assert_eq!(diameter(&g).unwrap(), 2);
    }

    #[test]
    fn test_diameter_uses_largest_component() {
        let g = graph(true, 6, &[(1, 2), (3, 4), (4, 5), (5, 6)]);
        assert_eq!(diameter(&g).unwrap(), 3);
    }

    #[test]
    fn test_diameter_tie_uses_earliest_component() {
        // {4, 5, 6} triangle has diameter 1, {1, 2, 3} path has diameter 2
        let g = graph(true, 6, &[(4, 5), (5, 6), (6, 4), (1, 2), (2, 3)]);
        assert_eq!(diameter(&g).unwrap(), 2);
        assert_eq!(
            weakly_connected_components(&g)[0],
            vec![NoteId(1), NoteId(2), NoteId(3)]
        );
    }

    #[test]
    fn test_diameter_degenerate() {
        assert!(matches!(
            diameter(&graph(true, 0, &[])),
            Err(Error::DegenerateGraph { .. })
        ));
        assert!(matches!(
            diameter(&graph(true, 3, &[])),
            Err(Error::DegenerateGraph { .. })
        ));
    }

    #[test]
    fn test_top_ranked_skips_unscanned() {
        let mut g = graph(true, 2, &[(2, 1)]);
        g.ensure_node(NoteId(3), Path::new("missing.png"));
        g.add_edge(NoteId(1), NoteId(3));
        g.add_edge(NoteId(2), NoteId(3));

        let scores = pagerank(&g, &PageRankConfig::default()).unwrap();
        let top = top_ranked(&g, &PageRef::default(), &scores, 10);
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|r| r.id != NoteId(3)));
        assert!(top[0].score >= top[1].score);
        assert_eq!(top[0].path, PathBuf::from(format!("n{}.md", top[0].id)));
    }

    #[test]
    fn test_summary() {
        let mut g = graph(true, 3, &[(1, 2)]);
        g.ensure_node(NoteId(4), Path::new("img.png"));
        g.add_edge(NoteId(3), NoteId(4));

        let summary = GraphSummary::of(&g);
        assert_eq!(summary.nodes, 4);
        assert_eq!(summary.edges, 2);
        assert_eq!(summary.documents, 3);
        assert_eq!(summary.unscanned, 1);
        assert_eq!(summary.components, 2);
        assert!((summary.average_links_per_note - 0.5).abs() < 1e-12);
    }
}

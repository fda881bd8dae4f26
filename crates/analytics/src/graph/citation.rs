//! Citation graph representation
//!
//! In-memory directed graph over papers, rebuilt fresh from a snapshot for
//! every analytics call. Node ordering is ascending by paper ID so that
//! every downstream computation is reproducible.

use std::collections::{HashMap, HashSet};

use citescope_common::store::ResearchSnapshot;
use tracing::warn;
use uuid::Uuid;

/// Per-node paper attributes carried on the graph
#[derive(Debug, Clone)]
pub struct PaperAttrs {
    pub title: String,
    pub year: i32,
    pub citation_count: i64,
}

/// Citation records skipped during construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphAnomalies {
    /// Citations referencing a paper absent from the snapshot
    pub missing_endpoint: u64,

    /// Citations where a paper cites itself
    pub self_citation: u64,

    /// Repeated ordered (citing, cited) pairs
    pub duplicate_edge: u64,
}

impl GraphAnomalies {
    /// Total skipped citation records
    pub fn total(&self) -> u64 {
        self.missing_endpoint + self.self_citation + self.duplicate_edge
    }
}

/// In-memory directed citation graph
///
/// Nodes are dense indices into id-sorted storage; adjacency lists hold
/// node indices. The graph is simple: no self loops, no parallel edges.
pub struct CitationGraph {
    /// Paper IDs, ascending
    ids: Vec<Uuid>,

    /// Paper ID -> node index
    index: HashMap<Uuid, usize>,

    /// Node attributes, parallel to `ids`
    attrs: Vec<PaperAttrs>,

    /// node -> papers it cites
    outgoing: Vec<Vec<usize>>,

    /// node -> papers citing it
    incoming: Vec<Vec<usize>>,

    /// Ordered pairs already present
    edge_set: HashSet<(usize, usize)>,

    anomalies: GraphAnomalies,
}

impl CitationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            index: HashMap::new(),
            attrs: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
            edge_set: HashSet::new(),
            anomalies: GraphAnomalies::default(),
        }
    }

    /// Build the citation graph from a snapshot
    ///
    /// Every paper becomes a node; every citation record becomes an edge
    /// unless it violates the simple-graph invariants, in which case it is
    /// counted and skipped.
    pub fn from_snapshot(snapshot: &ResearchSnapshot) -> Self {
        let mut graph = Self::new();

        let mut papers: Vec<_> = snapshot.papers().iter().collect();
        papers.sort_unstable_by_key(|p| p.id);
        for paper in papers {
            graph.add_node(
                paper.id,
                PaperAttrs {
                    title: paper.title.clone(),
                    year: paper.year,
                    citation_count: paper.citation_count,
                },
            );
        }

        for citation in snapshot.citations() {
            graph.add_edge(citation.citing_paper_id, citation.cited_paper_id);
        }

        if graph.anomalies.total() > 0 {
            warn!(
                missing = graph.anomalies.missing_endpoint,
                self_citations = graph.anomalies.self_citation,
                duplicates = graph.anomalies.duplicate_edge,
                "skipped citation records during graph construction"
            );
        }

        graph
    }

    /// Add a node; later duplicates of the same ID are ignored
    pub fn add_node(&mut self, id: Uuid, attrs: PaperAttrs) {
        if self.index.contains_key(&id) {
            return;
        }
        self.index.insert(id, self.ids.len());
        self.ids.push(id);
        self.attrs.push(attrs);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
    }

    /// Add an edge between existing nodes
    ///
    /// Returns false (and records the anomaly) for unknown endpoints,
    /// self-citations, and duplicate ordered pairs.
    pub fn add_edge(&mut self, citing: Uuid, cited: Uuid) -> bool {
        let from = self.index.get(&citing).copied();
        let to = self.index.get(&cited).copied();
        let (Some(from), Some(to)) = (from, to) else {
            self.anomalies.missing_endpoint += 1;
            return false;
        };
        if from == to {
            self.anomalies.self_citation += 1;
            return false;
        }
        if !self.edge_set.insert((from, to)) {
            self.anomalies.duplicate_edge += 1;
            return false;
        }
        self.outgoing[from].push(to);
        self.incoming[to].push(from);
        true
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.edge_set.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Paper IDs in node order (ascending by ID)
    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    /// Node index for a paper ID
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Attributes for a node
    pub fn attrs(&self, node: usize) -> &PaperAttrs {
        &self.attrs[node]
    }

    /// Papers cited by this node
    pub fn out_neighbors(&self, node: usize) -> &[usize] {
        &self.outgoing[node]
    }

    /// Papers citing this node
    pub fn in_neighbors(&self, node: usize) -> &[usize] {
        &self.incoming[node]
    }

    /// Outgoing edge count for a node
    pub fn out_degree(&self, node: usize) -> usize {
        self.outgoing[node].len()
    }

    /// Incoming edge count for a node
    pub fn in_degree(&self, node: usize) -> usize {
        self.incoming[node].len()
    }

    /// Records skipped during construction
    pub fn anomalies(&self) -> GraphAnomalies {
        self.anomalies
    }

    /// Undirected adjacency sets (reciprocal citation pairs collapse)
    ///
    /// Used by the clustering coefficient, which is defined on the
    /// undirected projection of the citation graph.
    pub fn undirected_adjacency(&self) -> Vec<HashSet<usize>> {
        let mut adjacency: Vec<HashSet<usize>> = vec![HashSet::new(); self.ids.len()];
        for &(from, to) in &self.edge_set {
            adjacency[from].insert(to);
            adjacency[to].insert(from);
        }
        adjacency
    }
}

impl Default for CitationGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(citations: i64) -> PaperAttrs {
        PaperAttrs {
            title: "t".into(),
            year: 2020,
            citation_count: citations,
        }
    }

    #[test]
    fn test_graph_construction() {
        let mut graph = CitationGraph::new();

        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let c = Uuid::from_u128(3);

        graph.add_node(a, attrs(0));
        graph.add_node(b, attrs(0));
        graph.add_node(c, attrs(0));

        // A cites B, B cites C
        assert!(graph.add_edge(a, b));
        assert!(graph.add_edge(b, c));

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let ai = graph.index_of(a).unwrap();
        let bi = graph.index_of(b).unwrap();
        assert_eq!(graph.out_neighbors(ai), &[bi]);
        assert_eq!(graph.in_neighbors(bi), &[ai]);
    }

    #[test]
    fn test_self_citation_skipped() {
        let mut graph = CitationGraph::new();
        let a = Uuid::from_u128(1);
        graph.add_node(a, attrs(0));

        assert!(!graph.add_edge(a, a));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.anomalies().self_citation, 1);
    }

    #[test]
    fn test_missing_endpoint_skipped() {
        let mut graph = CitationGraph::new();
        let a = Uuid::from_u128(1);
        graph.add_node(a, attrs(0));

        assert!(!graph.add_edge(a, Uuid::from_u128(99)));
        assert!(!graph.add_edge(Uuid::from_u128(99), a));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.anomalies().missing_endpoint, 2);
    }

    #[test]
    fn test_duplicate_edge_collapses() {
        let mut graph = CitationGraph::new();
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        graph.add_node(a, attrs(0));
        graph.add_node(b, attrs(0));

        assert!(graph.add_edge(a, b));
        assert!(!graph.add_edge(a, b));
        // The reverse direction is a distinct edge
        assert!(graph.add_edge(b, a));

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.anomalies().duplicate_edge, 1);
    }

    #[test]
    fn test_undirected_projection_collapses_reciprocal_edges() {
        let mut graph = CitationGraph::new();
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        graph.add_node(a, attrs(0));
        graph.add_node(b, attrs(0));
        graph.add_edge(a, b);
        graph.add_edge(b, a);

        let adjacency = graph.undirected_adjacency();
        assert_eq!(adjacency[0].len(), 1);
        assert_eq!(adjacency[1].len(), 1);
    }

    #[test]
    fn test_node_order_is_sorted_by_id() {
        use citescope_common::store::{Citation, Paper, ResearchSnapshot};

        let snapshot = ResearchSnapshot::new(
            vec![
                Paper { id: Uuid::from_u128(3), title: "c".into(), year: 2020, citation_count: 0 },
                Paper { id: Uuid::from_u128(1), title: "a".into(), year: 2020, citation_count: 0 },
                Paper { id: Uuid::from_u128(2), title: "b".into(), year: 2020, citation_count: 0 },
            ],
            vec![],
            vec![],
            vec![Citation {
                citing_paper_id: Uuid::from_u128(2),
                cited_paper_id: Uuid::from_u128(1),
            }],
            vec![],
            vec![],
        );

        let graph = CitationGraph::from_snapshot(&snapshot);
        assert_eq!(
            graph.ids(),
            &[Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)]
        );
        assert_eq!(graph.edge_count(), 1);
    }
}

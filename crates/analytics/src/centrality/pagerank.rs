//! PageRank influence scoring
//!
//! Power iteration over the citation graph. Mass is conserved: dangling
//! papers (no outgoing references) redistribute their score uniformly
//! across all nodes each iteration, so converged scores sum to 1 over any
//! non-empty edge set.

use crate::graph::CitationGraph;

/// PageRank configuration
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Damping factor (typically 0.85)
    pub damping: f64,

    /// Maximum iterations
    pub max_iterations: usize,

    /// Convergence threshold on the L1 change between iterations
    pub epsilon: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            epsilon: 1e-6,
        }
    }
}

/// PageRank scorer for papers
pub struct PageRankScorer {
    config: PageRankConfig,
}

impl PageRankScorer {
    /// Create a new scorer
    pub fn new(config: PageRankConfig) -> Self {
        Self { config }
    }

    /// Compute PageRank scores, indexed by graph node
    ///
    /// A graph with nodes but no edges short-circuits to all-zero scores
    /// without iterating.
    pub fn compute(&self, graph: &CitationGraph) -> Vec<f64> {
        let n = graph.node_count();
        if n == 0 {
            return Vec::new();
        }
        if graph.edge_count() == 0 {
            return vec![0.0; n];
        }

        let n_f64 = n as f64;
        let damping = self.config.damping;
        let teleport = (1.0 - damping) / n_f64;

        let dangling: Vec<usize> = (0..n).filter(|&v| graph.out_degree(v) == 0).collect();

        let mut scores = vec![1.0 / n_f64; n];

        for _ in 0..self.config.max_iterations {
            let dangling_mass: f64 = dangling.iter().map(|&v| scores[v]).sum();
            let base = teleport + damping * dangling_mass / n_f64;

            let mut next = vec![base; n];
            for v in 0..n {
                let out_degree = graph.out_degree(v);
                if out_degree == 0 {
                    continue;
                }
                let share = damping * scores[v] / out_degree as f64;
                for &w in graph.out_neighbors(v) {
                    next[w] += share;
                }
            }

            let l1_change: f64 = next
                .iter()
                .zip(scores.iter())
                .map(|(a, b)| (a - b).abs())
                .sum();
            scores = next;

            if l1_change < self.config.epsilon {
                break;
            }
        }

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PaperAttrs;
    use uuid::Uuid;

    fn attrs() -> PaperAttrs {
        PaperAttrs {
            title: "t".into(),
            year: 2020,
            citation_count: 0,
        }
    }

    fn graph_with_edges(nodes: u128, edges: &[(u128, u128)]) -> CitationGraph {
        let mut graph = CitationGraph::new();
        for i in 1..=nodes {
            graph.add_node(Uuid::from_u128(i), attrs());
        }
        for &(from, to) in edges {
            graph.add_edge(Uuid::from_u128(from), Uuid::from_u128(to));
        }
        graph
    }

    #[test]
    fn test_pagerank_basic() {
        // A -> B <- D, B -> C: B collects two citations
        let graph = graph_with_edges(4, &[(1, 2), (2, 3), (4, 2)]);

        let scorer = PageRankScorer::new(PageRankConfig::default());
        let scores = scorer.compute(&graph);

        let a = scores[graph.index_of(Uuid::from_u128(1)).unwrap()];
        let b = scores[graph.index_of(Uuid::from_u128(2)).unwrap()];
        assert!(b > a, "B should rank higher than A");
    }

    #[test]
    fn test_pagerank_empty_graph() {
        let graph = CitationGraph::new();
        let scorer = PageRankScorer::new(PageRankConfig::default());
        assert!(scorer.compute(&graph).is_empty());
    }

    #[test]
    fn test_pagerank_zero_edges_scores_zero() {
        let graph = graph_with_edges(5, &[]);
        let scorer = PageRankScorer::new(PageRankConfig::default());
        let scores = scorer.compute(&graph);
        assert_eq!(scores, vec![0.0; 5]);
    }

    #[test]
    fn test_pagerank_mass_conservation() {
        let graph = graph_with_edges(6, &[(1, 2), (2, 3), (3, 1), (4, 1), (5, 2), (1, 6)]);
        let scorer = PageRankScorer::new(PageRankConfig::default());
        let scores = scorer.compute(&graph);

        let sum: f64 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "scores must sum to 1, got {sum}");
        assert!(scores.iter().all(|s| *s >= 0.0 && s.is_finite()));
    }

    #[test]
    fn test_pagerank_dangling_mass_recycles() {
        // 2 is dangling; its mass must keep circulating rather than leak
        let graph = graph_with_edges(3, &[(1, 2), (3, 2)]);
        let scorer = PageRankScorer::new(PageRankConfig::default());
        let scores = scorer.compute(&graph);

        let sum: f64 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        let cited = scores[graph.index_of(Uuid::from_u128(2)).unwrap()];
        let citing = scores[graph.index_of(Uuid::from_u128(1)).unwrap()];
        assert!(cited > citing);
    }
}

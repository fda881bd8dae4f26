//! Betweenness centrality via Brandes' algorithm
//!
//! One BFS per source over the directed citation graph, counting shortest
//! paths on the forward pass and accumulating pair dependencies on the
//! backward pass. O(V·E) for unweighted graphs.

use std::collections::VecDeque;

use crate::graph::CitationGraph;

/// Compute betweenness centrality, indexed by graph node
///
/// Scores are normalized by (N-1)(N-2) for N > 2, which bounds them to
/// [0, 1]; smaller graphs score 0 everywhere. A zero-edge graph
/// short-circuits to all zeros.
pub fn betweenness_centrality(graph: &CitationGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n < 3 || graph.edge_count() == 0 {
        return vec![0.0; n];
    }

    let mut betweenness = vec![0.0_f64; n];

    for source in 0..n {
        let (sigma, predecessors, order) = bfs_shortest_paths(graph, source);

        // Backward pass: accumulate dependencies, farthest nodes first
        let mut delta = vec![0.0_f64; n];
        for &w in order.iter().rev() {
            for &v in &predecessors[w] {
                let coefficient = sigma[v] / sigma[w];
                delta[v] += coefficient * (1.0 + delta[w]);
            }
            if w != source {
                betweenness[w] += delta[w];
            }
        }
    }

    let norm = ((n - 1) * (n - 2)) as f64;
    for score in &mut betweenness {
        *score /= norm;
    }

    betweenness
}

/// BFS from one source
///
/// Returns shortest-path counts, shortest-path predecessors, and visit
/// order for the backward pass.
fn bfs_shortest_paths(
    graph: &CitationGraph,
    source: usize,
) -> (Vec<f64>, Vec<Vec<usize>>, Vec<usize>) {
    let n = graph.node_count();
    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![-1_i64; n];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut order = Vec::with_capacity(n);

    sigma[source] = 1.0;
    dist[source] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let v_dist = dist[v];

        for &w in graph.out_neighbors(v) {
            if dist[w] < 0 {
                dist[w] = v_dist + 1;
                queue.push_back(w);
            }
            if dist[w] == v_dist + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    (sigma, predecessors, order)
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

    fn score(graph: &CitationGraph, scores: &[f64], id: u128) -> f64 {
        scores[graph.index_of(Uuid::from_u128(id)).unwrap()]
    }

    #[test]
    fn test_betweenness_line() {
        // 1 -> 2 -> 3 -> 4: interior nodes broker all traffic
        let graph = graph_with_edges(4, &[(1, 2), (2, 3), (3, 4)]);
        let scores = betweenness_centrality(&graph);

        assert_eq!(score(&graph, &scores, 1), 0.0);
        assert_eq!(score(&graph, &scores, 4), 0.0);
        assert!(score(&graph, &scores, 2) > 0.0);
        assert!(score(&graph, &scores, 3) > 0.0);
    }

    #[test]
    fn test_betweenness_star_is_zero() {
        // All edges originate at the hub: nothing passes *through* any node
        let graph = graph_with_edges(4, &[(1, 2), (1, 3), (1, 4)]);
        let scores = betweenness_centrality(&graph);
        assert!(scores.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_betweenness_bridge() {
        // Two reciprocal pairs joined by a one-way bridge 2 -> 3
        let graph = graph_with_edges(4, &[(1, 2), (2, 1), (2, 3), (3, 4), (4, 3)]);
        let scores = betweenness_centrality(&graph);

        let bridge_in = score(&graph, &scores, 2);
        let bridge_out = score(&graph, &scores, 3);
        let leaf = score(&graph, &scores, 1);
        assert!(bridge_in > leaf);
        assert!(bridge_out > score(&graph, &scores, 4));
        assert!(bridge_in <= 1.0 && bridge_out <= 1.0);
    }

    #[test]
    fn test_betweenness_zero_edges() {
        let graph = graph_with_edges(5, &[]);
        assert_eq!(betweenness_centrality(&graph), vec![0.0; 5]);
    }

    #[test]
    fn test_betweenness_tiny_graphs_score_zero() {
        let graph = graph_with_edges(2, &[(1, 2)]);
        assert_eq!(betweenness_centrality(&graph), vec![0.0; 2]);
    }

    #[test]
    fn test_betweenness_in_unit_range() {
        let graph = graph_with_edges(
            6,
            &[(1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (1, 3), (2, 5), (6, 1)],
        );
        let scores = betweenness_centrality(&graph);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }
}

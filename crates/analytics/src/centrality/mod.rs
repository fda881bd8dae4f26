//! Centrality and network-statistic computations
//!
//! Provides the per-node centrality measures and graph-level statistics
//! for the citation pattern report:
//! - PageRank (power iteration, mass-conserving)
//! - Betweenness (Brandes)
//! - In-degree centrality
//! - Density and average clustering coefficient
//!
//! Also owns score validation: every computed metric is checked against
//! its invariant before results leave the engine, and a violation is a
//! `ComputationFailure` that the caller resolves through the degraded
//! path.

mod betweenness;
mod pagerank;

pub use betweenness::betweenness_centrality;
pub use pagerank::{PageRankConfig, PageRankScorer};

use citescope_common::errors::{AppError, Result};

use super::graph::CitationGraph;

// Slack for floating-point comparisons in range checks
const RANGE_EPS: f64 = 1e-9;

/// Per-node centrality scores, indexed by graph node
#[derive(Debug, Clone)]
pub struct CentralityScores {
    pub pagerank: Vec<f64>,
    pub betweenness: Vec<f64>,
    pub in_degree: Vec<f64>,
}

/// Compute all per-node centrality measures for a graph
pub fn compute_scores(graph: &CitationGraph, pagerank_config: PageRankConfig) -> CentralityScores {
    let scorer = PageRankScorer::new(pagerank_config);
    CentralityScores {
        pagerank: scorer.compute(graph),
        betweenness: betweenness_centrality(graph),
        in_degree: in_degree_centrality(graph),
    }
}

/// In-degree centrality: in-degree / (N-1), indexed by graph node
///
/// Graphs with fewer than two nodes score 0.
pub fn in_degree_centrality(graph: &CitationGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n < 2 {
        return vec![0.0; n];
    }
    let denom = (n - 1) as f64;
    (0..n).map(|v| graph.in_degree(v) as f64 / denom).collect()
}

/// Directed graph density: |E| / (N·(N-1)), 0 for N < 2
pub fn density(graph: &CitationGraph) -> f64 {
    let n = graph.node_count();
    if n < 2 {
        return 0.0;
    }
    graph.edge_count() as f64 / (n * (n - 1)) as f64
}

/// Average clustering coefficient over the undirected projection
///
/// Each node's local coefficient is the fraction of its neighbor pairs
/// that are themselves connected (0 for degree < 2); the result is the
/// mean over all nodes. Edge direction is ignored for this metric only.
pub fn average_clustering(graph: &CitationGraph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }

    let adjacency = graph.undirected_adjacency();
    let mut total = 0.0_f64;

    for neighbors in &adjacency {
        let degree = neighbors.len();
        if degree < 2 {
            continue;
        }
        let neighbor_list: Vec<usize> = neighbors.iter().copied().collect();
        let mut closed = 0_usize;
        for i in 0..neighbor_list.len() {
            for j in (i + 1)..neighbor_list.len() {
                if adjacency[neighbor_list[i]].contains(&neighbor_list[j]) {
                    closed += 1;
                }
            }
        }
        let possible = degree * (degree - 1) / 2;
        total += closed as f64 / possible as f64;
    }

    total / n as f64
}

/// Check every computed metric against its invariant
///
/// Violations indicate an internal algorithm fault, never bad input, so
/// they surface as `ComputationFailure` and resolve through the degraded
/// report.
pub fn validate_scores(
    graph: &CitationGraph,
    scores: &CentralityScores,
    density: f64,
    avg_clustering: f64,
) -> Result<()> {
    let n = graph.node_count();
    for (name, values) in [
        ("pagerank", &scores.pagerank),
        ("betweenness", &scores.betweenness),
        ("in_degree", &scores.in_degree),
    ] {
        if values.len() != n {
            return Err(AppError::computation(
                name,
                format!("expected {} scores, got {}", n, values.len()),
            ));
        }
        if values.iter().any(|v| !v.is_finite() || *v < -RANGE_EPS) {
            return Err(AppError::computation(
                name,
                "scores must be finite and non-negative",
            ));
        }
    }

    if graph.edge_count() > 0 {
        let mass: f64 = scores.pagerank.iter().sum();
        if (mass - 1.0).abs() > 1e-6 {
            return Err(AppError::computation(
                "pagerank",
                format!("score mass {} diverged from 1", mass),
            ));
        }
    }

    for (name, values) in [
        ("betweenness", &scores.betweenness),
        ("in_degree", &scores.in_degree),
    ] {
        if values.iter().any(|v| *v > 1.0 + RANGE_EPS) {
            return Err(AppError::computation(name, "scores must lie within [0, 1]"));
        }
    }

    for (name, value) in [("density", density), ("clustering", avg_clustering)] {
        if !value.is_finite() || !(-RANGE_EPS..=1.0 + RANGE_EPS).contains(&value) {
            return Err(AppError::computation(
                name,
                format!("value {} outside [0, 1]", value),
            ));
        }
    }

    Ok(())
}

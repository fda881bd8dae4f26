//! Citation pattern analysis
//!
//! Composes graph construction, centrality scoring, and network statistics
//! into the influential-paper report. Owns the degradation contract: any
//! internal computation failure resolves to a reduced-feature ranking by
//! raw citation count instead of surfacing an error.

use citescope_common::config::AnalyticsConfig;
use citescope_common::errors::Result;
use citescope_common::metrics as metrics_helpers;
use citescope_common::store::ResearchSnapshot;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::centrality::{
    average_clustering, compute_scores, density, validate_scores, PageRankConfig,
};
use crate::graph::CitationGraph;

/// Paper ranked by citation influence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluentialPaper {
    pub id: Uuid,
    pub title: String,
    pub year: i32,
    pub citation_count: i64,
    pub pagerank_score: f64,
    pub betweenness_centrality: f64,
    pub in_degree_centrality: f64,
}

/// Graph-level statistics for the citation network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkStats {
    pub total_papers: usize,
    pub total_citations: usize,
    pub density: f64,
    pub avg_clustering: f64,
}

/// Citation pattern report output contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationPatternReport {
    pub influential_papers: Vec<InfluentialPaper>,
    pub network_stats: NetworkStats,

    /// True when the report came from the reduced-feature fallback
    pub degraded: bool,
}

/// Analyze citation patterns over a snapshot
///
/// Never fails: a `ComputationFailure` from any stage resolves to
/// [`degraded_report`].
pub fn analyze_citation_patterns(
    snapshot: &ResearchSnapshot,
    config: &AnalyticsConfig,
) -> CitationPatternReport {
    resolve(try_analyze(snapshot, config), snapshot, config)
}

/// Map a full-path result onto the degradation contract
fn resolve(
    result: Result<CitationPatternReport>,
    snapshot: &ResearchSnapshot,
    config: &AnalyticsConfig,
) -> CitationPatternReport {
    match result {
        Ok(report) => report,
        Err(err) => {
            warn!(error = %err, "citation pattern analysis failed, serving degraded ranking");
            metrics_helpers::record_degraded("citation_patterns");
            degraded_report(snapshot, config.influential_limit)
        }
    }
}

/// Full analysis path; every failure is a `ComputationFailure`
fn try_analyze(
    snapshot: &ResearchSnapshot,
    config: &AnalyticsConfig,
) -> Result<CitationPatternReport> {
    let graph = CitationGraph::from_snapshot(snapshot);

    let anomalies = graph.anomalies();
    metrics_helpers::record_graph_anomalies("missing_endpoint", anomalies.missing_endpoint);
    metrics_helpers::record_graph_anomalies("self_citation", anomalies.self_citation);
    metrics_helpers::record_graph_anomalies("duplicate_edge", anomalies.duplicate_edge);
    metrics_helpers::record_graph_size(graph.node_count(), graph.edge_count());

    if graph.is_empty() {
        return Ok(CitationPatternReport {
            influential_papers: Vec::new(),
            network_stats: NetworkStats {
                total_papers: 0,
                total_citations: 0,
                density: 0.0,
                avg_clustering: 0.0,
            },
            degraded: false,
        });
    }

    let scores = compute_scores(
        &graph,
        PageRankConfig {
            damping: config.pagerank_damping,
            max_iterations: config.pagerank_max_iterations,
            epsilon: config.pagerank_epsilon,
        },
    );
    let graph_density = density(&graph);
    let avg_clustering = average_clustering(&graph);

    validate_scores(&graph, &scores, graph_density, avg_clustering)?;

    // Rank by PageRank, then raw citations, then ID for stable output
    let mut order: Vec<usize> = (0..graph.node_count()).collect();
    order.sort_unstable_by(|&a, &b| {
        scores.pagerank[b]
            .partial_cmp(&scores.pagerank[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| graph.attrs(b).citation_count.cmp(&graph.attrs(a).citation_count))
            .then_with(|| graph.ids()[a].cmp(&graph.ids()[b]))
    });

    let influential_papers = order
        .into_iter()
        .take(config.influential_limit)
        .map(|node| {
            let attrs = graph.attrs(node);
            InfluentialPaper {
                id: graph.ids()[node],
                title: attrs.title.clone(),
                year: attrs.year,
                citation_count: attrs.citation_count,
                pagerank_score: scores.pagerank[node],
                betweenness_centrality: scores.betweenness[node],
                in_degree_centrality: scores.in_degree[node],
            }
        })
        .collect();

    Ok(CitationPatternReport {
        influential_papers,
        network_stats: NetworkStats {
            total_papers: graph.node_count(),
            total_citations: graph.edge_count(),
            density: graph_density,
            avg_clustering,
        },
        degraded: false,
    })
}

/// Reduced-feature report used when centrality computation fails
///
/// Papers are ranked by raw citation count (ID ascending on ties) with all
/// centrality fields zeroed; totals stay exact, density and clustering
/// report 0.
pub fn degraded_report(snapshot: &ResearchSnapshot, limit: usize) -> CitationPatternReport {
    let mut papers: Vec<_> = snapshot.papers().iter().collect();
    papers.sort_unstable_by(|a, b| {
        b.citation_count
            .cmp(&a.citation_count)
            .then_with(|| a.id.cmp(&b.id))
    });

    CitationPatternReport {
        influential_papers: papers
            .into_iter()
            .take(limit)
            .map(|paper| InfluentialPaper {
                id: paper.id,
                title: paper.title.clone(),
                year: paper.year,
                citation_count: paper.citation_count,
                pagerank_score: 0.0,
                betweenness_centrality: 0.0,
                in_degree_centrality: 0.0,
            })
            .collect(),
        network_stats: NetworkStats {
            total_papers: snapshot.total_papers(),
            total_citations: snapshot.total_citations(),
            density: 0.0,
            avg_clustering: 0.0,
        },
        degraded: true,
    }
}

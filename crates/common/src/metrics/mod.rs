//! Metrics and observability utilities
//!
//! Provides counters, histograms, and gauges for the analytics engine
//! with standardized naming conventions.

use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit,
};

/// Metrics prefix for all CiteScope metrics
pub const METRICS_PREFIX: &str = "citescope";

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_analyses_total", METRICS_PREFIX),
        Unit::Count,
        "Total analytics operations executed"
    );

    describe_histogram!(
        format!("{}_analysis_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Analytics operation latency in seconds"
    );

    describe_counter!(
        format!("{}_degraded_results_total", METRICS_PREFIX),
        Unit::Count,
        "Analytics operations that resolved through the degraded path"
    );

    describe_counter!(
        format!("{}_graph_anomalies_total", METRICS_PREFIX),
        Unit::Count,
        "Citation records skipped during graph construction"
    );

    describe_gauge!(
        format!("{}_graph_nodes", METRICS_PREFIX),
        Unit::Count,
        "Node count of the most recently built citation graph"
    );

    describe_gauge!(
        format!("{}_graph_edges", METRICS_PREFIX),
        Unit::Count,
        "Edge count of the most recently built citation graph"
    );

    tracing::info!("Metrics registered");
}

/// Record completion of an analytics operation
pub fn record_analysis(operation: &str, duration_secs: f64) {
    counter!(
        format!("{}_analyses_total", METRICS_PREFIX),
        "operation" => operation.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_analysis_duration_seconds", METRICS_PREFIX),
        "operation" => operation.to_string()
    )
    .record(duration_secs);
}

/// Record an operation falling back to its degraded result
pub fn record_degraded(operation: &str) {
    counter!(
        format!("{}_degraded_results_total", METRICS_PREFIX),
        "operation" => operation.to_string()
    )
    .increment(1);
}

/// Record citation records skipped during graph construction
pub fn record_graph_anomalies(kind: &str, count: u64) {
    if count == 0 {
        return;
    }
    counter!(
        format!("{}_graph_anomalies_total", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .increment(count);
}

/// Record the size of a freshly built citation graph
pub fn record_graph_size(nodes: usize, edges: usize) {
    gauge!(format!("{}_graph_nodes", METRICS_PREFIX)).set(nodes as f64);
    gauge!(format!("{}_graph_edges", METRICS_PREFIX)).set(edges as f64);
}

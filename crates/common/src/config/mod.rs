//! Configuration management for CiteScope
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Analytics engine configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Tunables for the analytics engine
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    /// PageRank damping factor
    #[serde(default = "default_pagerank_damping")]
    pub pagerank_damping: f64,

    /// Maximum PageRank power iterations
    #[serde(default = "default_pagerank_max_iterations")]
    pub pagerank_max_iterations: usize,

    /// PageRank convergence threshold (L1 change between iterations)
    #[serde(default = "default_pagerank_epsilon")]
    pub pagerank_epsilon: f64,

    /// Number of influential papers retained in the citation report
    #[serde(default = "default_influential_limit")]
    pub influential_limit: usize,

    /// Minimum papers for a keyword to qualify as a hotspot
    #[serde(default = "default_hotspot_min_papers")]
    pub hotspot_min_papers: usize,

    /// Default number of hotspots returned
    #[serde(default = "default_hotspot_limit")]
    pub hotspot_limit: usize,

    /// Minimum papers for an author to enter the collaboration network
    #[serde(default = "default_collaboration_min_papers")]
    pub collaboration_min_papers: usize,

    /// Default lookback window for keyword evolution, in years
    #[serde(default = "default_evolution_years_back")]
    pub evolution_years_back: u32,

    /// Fixed period width for temporal bucketing, in years
    #[serde(default = "default_evolution_period_years")]
    pub evolution_period_years: u32,

    /// Co-keywords retained per evolution period
    #[serde(default = "default_evolution_co_keyword_limit")]
    pub evolution_co_keyword_limit: usize,

    /// Minimum citation count for a research-gap candidate
    #[serde(default = "default_gap_min_citations")]
    pub gap_min_citations: i64,

    /// Years defining "recent" for gap detection
    #[serde(default = "default_gap_recent_window_years")]
    pub gap_recent_window_years: u32,

    /// Maximum average recent similar papers for a gap candidate
    #[serde(default = "default_gap_max_recent_papers")]
    pub gap_max_recent_papers: f64,

    /// Number of research gaps retained
    #[serde(default = "default_gap_limit")]
    pub gap_limit: usize,

    /// Years defining "recent" for author activity metrics
    #[serde(default = "default_recent_activity_window_years")]
    pub recent_activity_window_years: u32,

    /// Default number of keyword relationships returned
    #[serde(default = "default_relationship_limit")]
    pub relationship_limit: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_pagerank_damping() -> f64 { 0.85 }
fn default_pagerank_max_iterations() -> usize { 100 }
fn default_pagerank_epsilon() -> f64 { 1e-6 }
fn default_influential_limit() -> usize { 20 }
fn default_hotspot_min_papers() -> usize { 3 }
fn default_hotspot_limit() -> usize { 10 }
fn default_collaboration_min_papers() -> usize { 2 }
fn default_evolution_years_back() -> u32 { 10 }
fn default_evolution_period_years() -> u32 { 5 }
fn default_evolution_co_keyword_limit() -> usize { 10 }
fn default_gap_min_citations() -> i64 { 50 }
fn default_gap_recent_window_years() -> u32 { 3 }
fn default_gap_max_recent_papers() -> f64 { 5.0 }
fn default_gap_limit() -> usize { 20 }
fn default_recent_activity_window_years() -> u32 { 3 }
fn default_relationship_limit() -> usize { 10 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "citescope".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with APP__ prefix
            // e.g., APP__ANALYTICS__INFLUENTIAL_LIMIT=50
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // An empty source set deserializes entirely from serde defaults
        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            pagerank_damping: default_pagerank_damping(),
            pagerank_max_iterations: default_pagerank_max_iterations(),
            pagerank_epsilon: default_pagerank_epsilon(),
            influential_limit: default_influential_limit(),
            hotspot_min_papers: default_hotspot_min_papers(),
            hotspot_limit: default_hotspot_limit(),
            collaboration_min_papers: default_collaboration_min_papers(),
            evolution_years_back: default_evolution_years_back(),
            evolution_period_years: default_evolution_period_years(),
            evolution_co_keyword_limit: default_evolution_co_keyword_limit(),
            gap_min_citations: default_gap_min_citations(),
            gap_recent_window_years: default_gap_recent_window_years(),
            gap_max_recent_papers: default_gap_max_recent_papers(),
            gap_limit: default_gap_limit(),
            recent_activity_window_years: default_recent_activity_window_years(),
            relationship_limit: default_relationship_limit(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: default_metrics_port(),
            service_name: default_service_name(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analytics: AnalyticsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.analytics.pagerank_damping, 0.85);
        assert_eq!(config.analytics.pagerank_max_iterations, 100);
        assert_eq!(config.analytics.influential_limit, 20);
        assert_eq!(config.analytics.hotspot_min_papers, 3);
        assert_eq!(config.observability.service_name, "citescope");
    }

    #[test]
    fn test_gap_defaults_match_contract() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.gap_min_citations, 50);
        assert_eq!(config.gap_recent_window_years, 3);
        assert_eq!(config.gap_limit, 20);
    }
}

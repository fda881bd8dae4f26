//! Analytics engine and async service facade
//!
//! [`AnalyticsEngine`] holds the tunables and exposes every operation as a
//! pure function of a snapshot. [`AnalyticsService`] wraps it for async
//! callers: fetch the snapshot once, run the CPU-bound computation on a
//! blocking task, record metrics. No state survives between calls.

use std::sync::Arc;
use std::time::Instant;

use chrono::Datelike;
use citescope_common::config::AnalyticsConfig;
use citescope_common::errors::{AppError, Result};
use citescope_common::metrics as metrics_helpers;
use citescope_common::store::{ResearchSnapshot, SnapshotStore};
use tracing::warn;

use crate::graph::{
    build_collaboration_network, collaboration_strength, CollaborationNetwork,
};
use crate::patterns::{analyze_citation_patterns, degraded_report, CitationPatternReport};
use crate::scoring::{
    author_impact, keyword_relationships, research_gaps, research_hotspots, AuthorImpact, Hotspot,
    KeywordRelationship, ResearchGap,
};
use crate::temporal::{keyword_evolution, EvolutionParams, KeywordEvolution};

/// Pure analytics entry points over a research snapshot
///
/// Out-of-range inputs are clamped to configured defaults rather than
/// rejected.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
    current_year: i32,
}

impl AnalyticsEngine {
    /// Create an engine with the wall-clock year as reference
    pub fn new(config: AnalyticsConfig) -> Self {
        Self::with_current_year(config, chrono::Utc::now().year())
    }

    /// Create an engine with an explicit reference year
    pub fn with_current_year(config: AnalyticsConfig, current_year: i32) -> Self {
        Self {
            config,
            current_year,
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Reference year used by temporal windows
    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    fn limit_or(limit: usize, default: usize) -> usize {
        if limit == 0 {
            default
        } else {
            limit
        }
    }

    /// Influential-paper report over the citation graph
    ///
    /// Resolves internal computation failures to the degraded ranking;
    /// never fails.
    pub fn citation_patterns(&self, snapshot: &ResearchSnapshot) -> CitationPatternReport {
        analyze_citation_patterns(snapshot, &self.config)
    }

    /// Keyword hotspots, optionally restricted to a year range
    ///
    /// A reversed range is swapped; a zero limit falls back to the
    /// configured default.
    pub fn research_hotspots(
        &self,
        snapshot: &ResearchSnapshot,
        year_range: Option<(i32, i32)>,
        limit: usize,
    ) -> Vec<Hotspot> {
        let range = year_range.map(|(from, to)| if from <= to { (from, to) } else { (to, from) });
        research_hotspots(
            snapshot,
            range,
            self.config.hotspot_min_papers,
            Self::limit_or(limit, self.config.hotspot_limit),
        )
    }

    /// Co-authorship network for productive authors
    ///
    /// A zero threshold falls back to the configured default.
    pub fn collaboration_network(
        &self,
        snapshot: &ResearchSnapshot,
        min_papers: usize,
    ) -> CollaborationNetwork {
        build_collaboration_network(
            snapshot,
            Self::limit_or(min_papers, self.config.collaboration_min_papers),
        )
    }

    /// Number of papers two authors share; 0 for unknown authors
    pub fn collaboration_strength(
        &self,
        snapshot: &ResearchSnapshot,
        author_a: &str,
        author_b: &str,
    ) -> usize {
        collaboration_strength(snapshot, author_a, author_b)
    }

    /// Temporal evolution of a keyword
    ///
    /// A zero lookback falls back to the configured default.
    pub fn keyword_evolution(
        &self,
        snapshot: &ResearchSnapshot,
        keyword: &str,
        years_back: u32,
    ) -> KeywordEvolution {
        let years_back = if years_back == 0 {
            self.config.evolution_years_back
        } else {
            years_back
        };
        keyword_evolution(
            snapshot,
            keyword,
            EvolutionParams {
                years_back,
                period_years: self.config.evolution_period_years,
                co_keyword_limit: self.config.evolution_co_keyword_limit,
                current_year: self.current_year,
            },
        )
    }

    /// Under-revisited influential papers
    ///
    /// A non-positive citation floor or degenerate recent-paper cutoff
    /// falls back to the configured defaults.
    pub fn research_gaps(
        &self,
        snapshot: &ResearchSnapshot,
        min_citations: i64,
        max_recent_papers: f64,
    ) -> Vec<ResearchGap> {
        let min_citations = if min_citations <= 0 {
            self.config.gap_min_citations
        } else {
            min_citations
        };
        let max_recent_papers = if max_recent_papers.is_finite() && max_recent_papers > 0.0 {
            max_recent_papers
        } else {
            self.config.gap_max_recent_papers
        };
        let threshold = self.current_year - self.config.gap_recent_window_years as i32;
        research_gaps(
            snapshot,
            min_citations,
            threshold,
            max_recent_papers,
            self.config.gap_limit,
        )
    }

    /// Keywords co-occurring with the given keyword
    pub fn keyword_relationships(
        &self,
        snapshot: &ResearchSnapshot,
        keyword: &str,
        limit: usize,
    ) -> Vec<KeywordRelationship> {
        keyword_relationships(
            snapshot,
            keyword,
            Self::limit_or(limit, self.config.relationship_limit),
        )
    }

    /// Impact metrics for an author; `None` for unknown or paperless authors
    pub fn author_impact(
        &self,
        snapshot: &ResearchSnapshot,
        author_name: &str,
    ) -> Option<AuthorImpact> {
        let threshold = self.current_year - self.config.recent_activity_window_years as i32;
        author_impact(snapshot, author_name, threshold)
    }
}

/// Async facade running the engine off the request-accepting path
///
/// Each call fetches one snapshot and hands the computation to a blocking
/// task; concurrent calls share nothing mutable.
pub struct AnalyticsService {
    store: Arc<dyn SnapshotStore>,
    engine: Arc<AnalyticsEngine>,
}

impl AnalyticsService {
    /// Create a service over a snapshot store
    pub fn new(store: Arc<dyn SnapshotStore>, config: AnalyticsConfig) -> Self {
        Self {
            store,
            engine: Arc::new(AnalyticsEngine::new(config)),
        }
    }

    /// Create a service with an explicit reference year
    pub fn with_engine(store: Arc<dyn SnapshotStore>, engine: AnalyticsEngine) -> Self {
        Self {
            store,
            engine: Arc::new(engine),
        }
    }

    /// Fetch a snapshot and run one engine operation on a blocking task
    async fn run<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&AnalyticsEngine, &ResearchSnapshot) -> T + Send + 'static,
    {
        let start = Instant::now();
        let snapshot = self.store.fetch_snapshot().await?;
        let engine = Arc::clone(&self.engine);

        let result = tokio::task::spawn_blocking(move || f(&engine, &snapshot))
            .await
            .map_err(|e| AppError::Internal {
                message: format!("analytics task aborted: {}", e),
            })?;

        metrics_helpers::record_analysis(operation, start.elapsed().as_secs_f64());
        Ok(result)
    }

    /// Influential-paper report
    ///
    /// A computation that dies mid-flight (panic or cancellation) resolves
    /// through the same degraded path as an in-band failure; callers never
    /// see a partial report.
    pub async fn citation_patterns(&self) -> Result<CitationPatternReport> {
        let start = Instant::now();
        let snapshot = Arc::new(self.store.fetch_snapshot().await?);
        let engine = Arc::clone(&self.engine);
        let task_snapshot = Arc::clone(&snapshot);

        let report = match tokio::task::spawn_blocking(move || {
            engine.citation_patterns(&task_snapshot)
        })
        .await
        {
            Ok(report) => report,
            Err(err) => {
                warn!(error = %err, "citation pattern task aborted, serving degraded ranking");
                metrics_helpers::record_degraded("citation_patterns");
                degraded_report(&snapshot, self.engine.config().influential_limit)
            }
        };

        metrics_helpers::record_analysis("citation_patterns", start.elapsed().as_secs_f64());
        Ok(report)
    }

    /// Keyword hotspots
    pub async fn research_hotspots(
        &self,
        year_range: Option<(i32, i32)>,
        limit: usize,
    ) -> Result<Vec<Hotspot>> {
        self.run("research_hotspots", move |engine, snapshot| {
            engine.research_hotspots(snapshot, year_range, limit)
        })
        .await
    }

    /// Collaboration network
    pub async fn collaboration_network(&self, min_papers: usize) -> Result<CollaborationNetwork> {
        self.run("collaboration_network", move |engine, snapshot| {
            engine.collaboration_network(snapshot, min_papers)
        })
        .await
    }

    /// Collaboration strength between two authors
    pub async fn collaboration_strength(
        &self,
        author_a: String,
        author_b: String,
    ) -> Result<usize> {
        self.run("collaboration_strength", move |engine, snapshot| {
            engine.collaboration_strength(snapshot, &author_a, &author_b)
        })
        .await
    }

    /// Temporal keyword evolution
    pub async fn keyword_evolution(
        &self,
        keyword: String,
        years_back: u32,
    ) -> Result<KeywordEvolution> {
        self.run("keyword_evolution", move |engine, snapshot| {
            engine.keyword_evolution(snapshot, &keyword, years_back)
        })
        .await
    }

    /// Research gaps
    pub async fn research_gaps(
        &self,
        min_citations: i64,
        max_recent_papers: f64,
    ) -> Result<Vec<ResearchGap>> {
        self.run("research_gaps", move |engine, snapshot| {
            engine.research_gaps(snapshot, min_citations, max_recent_papers)
        })
        .await
    }

    /// Keyword relationships
    pub async fn keyword_relationships(
        &self,
        keyword: String,
        limit: usize,
    ) -> Result<Vec<KeywordRelationship>> {
        self.run("keyword_relationships", move |engine, snapshot| {
            engine.keyword_relationships(snapshot, &keyword, limit)
        })
        .await
    }

    /// Author impact metrics
    pub async fn author_impact(&self, author_name: String) -> Result<Option<AuthorImpact>> {
        self.run("author_impact", move |engine, snapshot| {
            engine.author_impact(snapshot, &author_name)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citescope_common::store::{
        Author, Authorship, Citation, Keyword, MemoryStore, Paper, PaperKeyword,
    };
    use uuid::Uuid;

    fn paper(id: u128, year: i32, citations: i64) -> Paper {
        Paper {
            id: Uuid::from_u128(id),
            title: format!("Paper {}", id),
            year,
            citation_count: citations,
        }
    }

    fn sample_store() -> MemoryStore {
        // P1 is the classic heavily-cited root: P2 and P3 both cite it
        let papers = vec![paper(1, 2015, 120), paper(2, 2021, 30), paper(3, 2024, 12)];
        let authors = vec![
            Author { id: Uuid::from_u128(10), name: "Ada".into() },
            Author { id: Uuid::from_u128(11), name: "Grace".into() },
        ];
        let keywords = vec![
            Keyword { id: Uuid::from_u128(20), name: "machine learning".into() },
            Keyword { id: Uuid::from_u128(21), name: "optimization".into() },
        ];
        let citations = vec![
            Citation {
                citing_paper_id: Uuid::from_u128(2),
                cited_paper_id: Uuid::from_u128(1),
            },
            Citation {
                citing_paper_id: Uuid::from_u128(3),
                cited_paper_id: Uuid::from_u128(1),
            },
        ];
        let authorships = vec![
            Authorship { paper_id: Uuid::from_u128(1), author_id: Uuid::from_u128(10) },
            Authorship { paper_id: Uuid::from_u128(1), author_id: Uuid::from_u128(11) },
            Authorship { paper_id: Uuid::from_u128(2), author_id: Uuid::from_u128(10) },
            Authorship { paper_id: Uuid::from_u128(3), author_id: Uuid::from_u128(11) },
        ];
        let tags = vec![
            PaperKeyword { paper_id: Uuid::from_u128(1), keyword_id: Uuid::from_u128(20) },
            PaperKeyword { paper_id: Uuid::from_u128(2), keyword_id: Uuid::from_u128(20) },
            PaperKeyword { paper_id: Uuid::from_u128(2), keyword_id: Uuid::from_u128(21) },
            PaperKeyword { paper_id: Uuid::from_u128(3), keyword_id: Uuid::from_u128(20) },
        ];
        MemoryStore::new(papers, authors, keywords, citations, authorships, tags)
    }

    fn engine() -> AnalyticsEngine {
        AnalyticsEngine::with_current_year(AnalyticsConfig::default(), 2026)
    }

    #[test]
    fn test_limit_clamping_falls_back_to_defaults() {
        let engine = engine();
        let snapshot = sample_store().snapshot();

        // Zero limit must not mean "return nothing"
        let hotspots = engine.research_hotspots(&snapshot, None, 0);
        assert!(hotspots.len() <= engine.config().hotspot_limit);

        // Reversed range behaves like the ordered range
        let reversed = engine.research_hotspots(&snapshot, Some((2024, 2015)), 5);
        let ordered = engine.research_hotspots(&snapshot, Some((2015, 2024)), 5);
        assert_eq!(reversed.len(), ordered.len());
    }

    #[test]
    fn test_gap_parameter_clamping() {
        let engine = engine();
        let snapshot = sample_store().snapshot();

        // Degenerate parameters fall back to configured defaults
        let defaulted = engine.research_gaps(&snapshot, 0, f64::NAN);
        let explicit = engine.research_gaps(&snapshot, 50, 5.0);
        assert_eq!(defaulted.len(), explicit.len());
    }

    #[test]
    fn test_engine_end_to_end_on_sample_corpus() {
        let engine = engine();
        let snapshot = sample_store().snapshot();

        let report = engine.citation_patterns(&snapshot);
        assert!(!report.degraded);
        assert_eq!(report.influential_papers[0].id, Uuid::from_u128(1));
        assert_eq!(report.influential_papers[0].in_degree_centrality, 1.0);

        assert_eq!(engine.collaboration_strength(&snapshot, "Ada", "Grace"), 1);

        let impact = engine.author_impact(&snapshot, "Ada").unwrap();
        assert_eq!(impact.total_papers, 2);
        assert_eq!(impact.unique_collaborators, 1);

        let evolution = engine.keyword_evolution(&snapshot, "machine learning", 10);
        assert_eq!(evolution.total_papers, 2);
    }

    #[tokio::test]
    async fn test_service_matches_pure_engine() {
        let store = sample_store();
        let snapshot = store.snapshot();
        let engine = engine();
        let service = AnalyticsService::with_engine(Arc::new(store), engine.clone());

        let from_service = service.citation_patterns().await.unwrap();
        let from_engine = engine.citation_patterns(&snapshot);

        assert_eq!(from_service.degraded, from_engine.degraded);
        assert_eq!(
            from_service.network_stats.total_papers,
            from_engine.network_stats.total_papers
        );
        assert_eq!(
            from_service.influential_papers.len(),
            from_engine.influential_papers.len()
        );
        assert_eq!(
            from_service.influential_papers[0].id,
            from_engine.influential_papers[0].id
        );
    }

    #[tokio::test]
    async fn test_service_neutral_results() {
        let service = AnalyticsService::with_engine(Arc::new(sample_store()), engine());

        assert_eq!(
            service
                .collaboration_strength("Ada".into(), "Nobody".into())
                .await
                .unwrap(),
            0
        );
        assert!(service.author_impact("Nobody".into()).await.unwrap().is_none());
        assert!(service
            .keyword_relationships("unknown".into(), 10)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_service_collaboration_network() {
        let service = AnalyticsService::with_engine(Arc::new(sample_store()), engine());

        // Threshold 1 retains both authors and their single shared paper
        let network = service.collaboration_network(1).await.unwrap();
        assert_eq!(network.nodes.len(), 2);
        assert_eq!(network.edges.len(), 1);
    }
}

//! CiteScope Analytics Engine
//!
//! Structural and temporal metrics over a scholarly citation corpus:
//! - Citation graph construction and influence ranking (PageRank,
//!   betweenness, in-degree centrality)
//! - Network statistics (density, average clustering)
//! - Collaboration network construction and strength
//! - Keyword hotspots, relationships, and temporal evolution
//! - Research-gap detection and author impact metrics
//!
//! Every operation is a pure function of a [`ResearchSnapshot`] fetched
//! once per call; results are rebuilt fresh and never cached here. The
//! citation report degrades to a citation-count ranking instead of
//! failing.
//!
//! [`ResearchSnapshot`]: citescope_common::store::ResearchSnapshot

pub mod centrality;
pub mod engine;
pub mod graph;
pub mod patterns;
pub mod scoring;
pub mod temporal;

pub use engine::{AnalyticsEngine, AnalyticsService};
pub use graph::{CitationGraph, CollaborationNetwork};
pub use patterns::{CitationPatternReport, InfluentialPaper, NetworkStats};
pub use scoring::{AuthorImpact, Hotspot, KeywordRelationship, ResearchGap};
pub use temporal::KeywordEvolution;

//! Store boundary for CiteScope
//!
//! Provides:
//! - Input-contract record types
//! - The materialized [`ResearchSnapshot`] with its per-call indexes
//! - The [`SnapshotStore`] read API the engine depends on
//! - An in-memory store implementation
//!
//! Persistence itself lives outside this workspace; the engine only ever
//! sees materialized collections fetched once per call.

mod records;
mod snapshot;

pub use records::{normalize_keyword, Author, Authorship, Citation, Keyword, Paper, PaperKeyword};
pub use snapshot::ResearchSnapshot;

use crate::errors::Result;

/// Explicit read API over the backing data store
///
/// One fetch per analytics call; the returned snapshot is a point-in-time
/// copy and tolerates concurrent fetches. Implementations must not require
/// cross-entity transactional consistency.
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Materialize every collection the engine reads
    async fn fetch_snapshot(&self) -> Result<ResearchSnapshot>;
}

/// In-memory store over already-materialized record collections
///
/// Backs tests and embedders that hold their corpus in memory. A relational
/// implementation would run the equivalent queries and feed the same
/// constructor.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    papers: Vec<Paper>,
    authors: Vec<Author>,
    keywords: Vec<Keyword>,
    citations: Vec<Citation>,
    authorships: Vec<Authorship>,
    paper_keywords: Vec<PaperKeyword>,
}

impl MemoryStore {
    /// Create a store over the given record collections
    pub fn new(
        papers: Vec<Paper>,
        authors: Vec<Author>,
        keywords: Vec<Keyword>,
        citations: Vec<Citation>,
        authorships: Vec<Authorship>,
        paper_keywords: Vec<PaperKeyword>,
    ) -> Self {
        Self {
            papers,
            authors,
            keywords,
            citations,
            authorships,
            paper_keywords,
        }
    }

    /// Build a snapshot synchronously, without going through the trait
    pub fn snapshot(&self) -> ResearchSnapshot {
        ResearchSnapshot::new(
            self.papers.clone(),
            self.authors.clone(),
            self.keywords.clone(),
            self.citations.clone(),
            self.authorships.clone(),
            self.paper_keywords.clone(),
        )
    }
}

#[async_trait::async_trait]
impl SnapshotStore for MemoryStore {
    async fn fetch_snapshot(&self) -> Result<ResearchSnapshot> {
        Ok(self.snapshot())
    }
}

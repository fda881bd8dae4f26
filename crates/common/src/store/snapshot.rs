//! Point-in-time research snapshot
//!
//! A fully materialized, read-only view of the store: every collection the
//! engine needs plus the lookup indexes built once per call. No I/O happens
//! after construction, so graph traversal and scoring never reach back into
//! the store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use super::records::{normalize_keyword, Author, Authorship, Citation, Keyword, Paper, PaperKeyword};

/// Read-only snapshot handle passed into each engine entry point
#[derive(Clone, Debug)]
pub struct ResearchSnapshot {
    /// When this snapshot was materialized
    fetched_at: DateTime<Utc>,

    papers: Vec<Paper>,
    authors: Vec<Author>,
    keywords: Vec<Keyword>,
    citations: Vec<Citation>,

    // Identity indexes
    papers_by_id: HashMap<Uuid, usize>,
    authors_by_id: HashMap<Uuid, usize>,
    keywords_by_id: HashMap<Uuid, usize>,
    authors_by_name: HashMap<String, usize>,
    keywords_by_name: HashMap<String, usize>,

    // Membership indexes, each list sorted and deduplicated
    author_papers: HashMap<Uuid, Vec<Uuid>>,
    paper_authors: HashMap<Uuid, Vec<Uuid>>,
    paper_keywords: HashMap<Uuid, Vec<Uuid>>,
    // Inverted keyword -> papers index; keeps co-occurrence and
    // similarity scans linear instead of quadratic
    keyword_papers: HashMap<Uuid, Vec<Uuid>>,
}

impl ResearchSnapshot {
    /// Build a snapshot from materialized store collections
    ///
    /// Membership rows referencing unknown papers, authors, or keywords are
    /// skipped and logged; they never fail the build.
    pub fn new(
        papers: Vec<Paper>,
        authors: Vec<Author>,
        keywords: Vec<Keyword>,
        citations: Vec<Citation>,
        authorships: Vec<Authorship>,
        paper_keyword_rows: Vec<PaperKeyword>,
    ) -> Self {
        let papers_by_id: HashMap<Uuid, usize> = papers
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();
        let authors_by_id: HashMap<Uuid, usize> = authors
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id, i))
            .collect();
        let keywords_by_id: HashMap<Uuid, usize> = keywords
            .iter()
            .enumerate()
            .map(|(i, k)| (k.id, i))
            .collect();

        let authors_by_name: HashMap<String, usize> = authors
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name.clone(), i))
            .collect();
        let keywords_by_name: HashMap<String, usize> = keywords
            .iter()
            .enumerate()
            .map(|(i, k)| (normalize_keyword(&k.name), i))
            .collect();

        let mut author_papers: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        let mut paper_authors: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in &authorships {
            if !papers_by_id.contains_key(&row.paper_id) {
                warn!(paper_id = %row.paper_id, "authorship row references unknown paper, skipping");
                continue;
            }
            if !authors_by_id.contains_key(&row.author_id) {
                warn!(author_id = %row.author_id, "authorship row references unknown author, skipping");
                continue;
            }
            author_papers.entry(row.author_id).or_default().push(row.paper_id);
            paper_authors.entry(row.paper_id).or_default().push(row.author_id);
        }

        let mut paper_keywords: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        let mut keyword_papers: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in &paper_keyword_rows {
            if !papers_by_id.contains_key(&row.paper_id) {
                warn!(paper_id = %row.paper_id, "keyword row references unknown paper, skipping");
                continue;
            }
            if !keywords_by_id.contains_key(&row.keyword_id) {
                warn!(keyword_id = %row.keyword_id, "keyword row references unknown keyword, skipping");
                continue;
            }
            paper_keywords.entry(row.paper_id).or_default().push(row.keyword_id);
            keyword_papers.entry(row.keyword_id).or_default().push(row.paper_id);
        }

        // Deterministic iteration order for every membership list
        for list in author_papers
            .values_mut()
            .chain(paper_authors.values_mut())
            .chain(paper_keywords.values_mut())
            .chain(keyword_papers.values_mut())
        {
            list.sort_unstable();
            list.dedup();
        }

        Self {
            fetched_at: Utc::now(),
            papers,
            authors,
            keywords,
            citations,
            papers_by_id,
            authors_by_id,
            keywords_by_id,
            authors_by_name,
            keywords_by_name,
            author_papers,
            paper_authors,
            paper_keywords,
            keyword_papers,
        }
    }

    /// When this snapshot was materialized
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// All papers in the snapshot
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    /// All authors in the snapshot
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// All keywords in the snapshot
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    /// All citation records in the snapshot
    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    /// Exact paper count as held by the store
    pub fn total_papers(&self) -> usize {
        self.papers.len()
    }

    /// Exact citation-record count as held by the store
    pub fn total_citations(&self) -> usize {
        self.citations.len()
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Find a paper by ID
    pub fn paper(&self, id: Uuid) -> Option<&Paper> {
        self.papers_by_id.get(&id).map(|&i| &self.papers[i])
    }

    /// Find an author by ID
    pub fn author(&self, id: Uuid) -> Option<&Author> {
        self.authors_by_id.get(&id).map(|&i| &self.authors[i])
    }

    /// Find an author by exact name
    pub fn author_by_name(&self, name: &str) -> Option<&Author> {
        self.authors_by_name.get(name).map(|&i| &self.authors[i])
    }

    /// Find a keyword by ID
    pub fn keyword(&self, id: Uuid) -> Option<&Keyword> {
        self.keywords_by_id.get(&id).map(|&i| &self.keywords[i])
    }

    /// Find a keyword by case-normalized name
    pub fn keyword_by_name(&self, name: &str) -> Option<&Keyword> {
        self.keywords_by_name
            .get(&normalize_keyword(name))
            .map(|&i| &self.keywords[i])
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Papers written by an author, sorted by ID
    pub fn papers_of_author(&self, author_id: Uuid) -> &[Uuid] {
        self.author_papers
            .get(&author_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Authors of a paper, sorted by ID
    pub fn authors_of_paper(&self, paper_id: Uuid) -> &[Uuid] {
        self.paper_authors
            .get(&paper_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Keywords tagged on a paper, sorted by ID
    pub fn keywords_of_paper(&self, paper_id: Uuid) -> &[Uuid] {
        self.paper_keywords
            .get(&paper_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Papers tagged with a keyword, sorted by ID
    pub fn papers_with_keyword(&self, keyword_id: Uuid) -> &[Uuid] {
        self.keyword_papers
            .get(&keyword_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for ResearchSnapshot {
    fn default() -> Self {
        Self::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: u128, year: i32, citations: i64) -> Paper {
        Paper {
            id: Uuid::from_u128(id),
            title: format!("Paper {}", id),
            year,
            citation_count: citations,
        }
    }

    #[test]
    fn test_snapshot_indexes() {
        let p1 = paper(1, 2020, 10);
        let p2 = paper(2, 2021, 5);
        let author = Author {
            id: Uuid::from_u128(10),
            name: "Ada".into(),
        };
        let keyword = Keyword {
            id: Uuid::from_u128(20),
            name: "machine learning".into(),
        };

        let snapshot = ResearchSnapshot::new(
            vec![p1.clone(), p2.clone()],
            vec![author.clone()],
            vec![keyword.clone()],
            vec![Citation {
                citing_paper_id: p2.id,
                cited_paper_id: p1.id,
            }],
            vec![
                Authorship { paper_id: p1.id, author_id: author.id },
                Authorship { paper_id: p2.id, author_id: author.id },
            ],
            vec![PaperKeyword { paper_id: p1.id, keyword_id: keyword.id }],
        );

        assert_eq!(snapshot.total_papers(), 2);
        assert_eq!(snapshot.total_citations(), 1);
        assert_eq!(snapshot.papers_of_author(author.id).len(), 2);
        assert_eq!(snapshot.papers_with_keyword(keyword.id), &[p1.id]);
        assert_eq!(snapshot.author_by_name("Ada").unwrap().id, author.id);
        assert!(snapshot.author_by_name("Grace").is_none());
    }

    #[test]
    fn test_keyword_lookup_is_case_insensitive() {
        let keyword = Keyword {
            id: Uuid::from_u128(20),
            name: "neural networks".into(),
        };
        let snapshot = ResearchSnapshot::new(
            vec![],
            vec![],
            vec![keyword.clone()],
            vec![],
            vec![],
            vec![],
        );

        assert_eq!(
            snapshot.keyword_by_name("Neural Networks").unwrap().id,
            keyword.id
        );
    }

    #[test]
    fn test_dangling_membership_rows_are_skipped() {
        let p1 = paper(1, 2020, 10);
        let snapshot = ResearchSnapshot::new(
            vec![p1.clone()],
            vec![],
            vec![],
            vec![],
            vec![Authorship {
                paper_id: p1.id,
                author_id: Uuid::from_u128(99),
            }],
            vec![PaperKeyword {
                paper_id: Uuid::from_u128(98),
                keyword_id: Uuid::from_u128(97),
            }],
        );

        assert!(snapshot.authors_of_paper(p1.id).is_empty());
        assert!(snapshot.keywords_of_paper(p1.id).is_empty());
    }

    #[test]
    fn test_duplicate_membership_rows_collapse() {
        let p1 = paper(1, 2020, 10);
        let author = Author {
            id: Uuid::from_u128(10),
            name: "Ada".into(),
        };
        let row = Authorship {
            paper_id: p1.id,
            author_id: author.id,
        };
        let snapshot = ResearchSnapshot::new(
            vec![p1.clone()],
            vec![author.clone()],
            vec![],
            vec![],
            vec![row.clone(), row],
            vec![],
        );

        assert_eq!(snapshot.papers_of_author(author.id), &[p1.id]);
    }
}

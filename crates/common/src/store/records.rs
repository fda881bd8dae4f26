//! Input-contract record types
//!
//! Materialized rows as handed over by the backing data store. The engine
//! only ever reads these; ownership of the authoritative data stays with
//! the store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scholarly paper
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub id: Uuid,

    pub title: String,

    /// Publication year
    pub year: i32,

    /// Accumulated citation count, never negative
    pub citation_count: i64,
}

/// An author, many-to-many with papers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,

    pub name: String,
}

/// A keyword tag, many-to-many with papers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: Uuid,

    /// Case-normalized keyword name
    pub name: String,
}

/// A directed citation between two papers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Paper that contains the citation
    pub citing_paper_id: Uuid,

    /// Paper that is being cited
    pub cited_paper_id: Uuid,
}

/// Paper-author membership row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorship {
    pub paper_id: Uuid,
    pub author_id: Uuid,
}

/// Paper-keyword membership row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperKeyword {
    pub paper_id: Uuid,
    pub keyword_id: Uuid,
}

/// Normalize a keyword name for lookup and storage
pub fn normalize_keyword(name: &str) -> String {
    name.trim().to_lowercase()
}

//! Scoring and ranking
//!
//! Keyword hotspots, research-gap detection, keyword relationships, and
//! author impact metrics. All lookups run over the snapshot indexes; a
//! miss is a neutral result, never an error.

use std::collections::{BTreeSet, HashMap, HashSet};

use citescope_common::store::{normalize_keyword, Paper, ResearchSnapshot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Keyword ranked by research activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotspot {
    pub keyword: String,
    pub paper_count: usize,
    pub avg_citations: f64,
    pub hotspot_score: f64,
}

/// Compact paper projection used inside result objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperSummary {
    pub id: Uuid,
    pub title: String,
    pub year: i32,
    pub citation_count: i64,
}

impl From<&Paper> for PaperSummary {
    fn from(paper: &Paper) -> Self {
        Self {
            id: paper.id,
            title: paper.title.clone(),
            year: paper.year,
            citation_count: paper.citation_count,
        }
    }
}

/// Influential paper whose topic has gone quiet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchGap {
    pub paper: PaperSummary,

    /// Average number of recent papers sharing the candidate's keywords
    pub recent_similar_papers: f64,

    pub keywords: Vec<String>,

    pub gap_score: f64,
}

/// Keyword related to a queried keyword by co-occurrence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRelationship {
    pub keyword: String,
    pub co_occurrence_count: usize,
    pub strength: f64,
}

/// Impact metrics for a single author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorImpact {
    pub author: String,
    pub total_papers: usize,
    pub total_citations: i64,
    pub avg_citations: f64,
    pub h_index: usize,
    pub recent_papers_count: usize,
    pub unique_collaborators: usize,
    pub most_cited_paper: PaperSummary,
    pub active_years: Vec<i32>,
}

/// Rank keywords by research activity
///
/// Keywords below `min_papers` are dropped; the rest sort by average
/// citations descending (name ascending on ties), truncated to `limit`.
pub fn research_hotspots(
    snapshot: &ResearchSnapshot,
    year_range: Option<(i32, i32)>,
    min_papers: usize,
    limit: usize,
) -> Vec<Hotspot> {
    let mut hotspots: Vec<Hotspot> = snapshot
        .keywords()
        .iter()
        .filter_map(|keyword| {
            let mut paper_count = 0_usize;
            let mut total_citations = 0_i64;
            for &paper_id in snapshot.papers_with_keyword(keyword.id) {
                let Some(paper) = snapshot.paper(paper_id) else {
                    continue;
                };
                if let Some((from, to)) = year_range {
                    if paper.year < from || paper.year > to {
                        continue;
                    }
                }
                paper_count += 1;
                total_citations += paper.citation_count;
            }
            if paper_count == 0 || paper_count < min_papers {
                return None;
            }
            let avg_citations = total_citations as f64 / paper_count as f64;
            Some(Hotspot {
                keyword: keyword.name.clone(),
                paper_count,
                avg_citations,
                hotspot_score: paper_count as f64 * avg_citations,
            })
        })
        .collect();

    hotspots.sort_unstable_by(|a, b| {
        b.avg_citations
            .partial_cmp(&a.avg_citations)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    hotspots.truncate(limit);
    hotspots
}

/// Detect under-revisited influential papers
///
/// Candidates carry at least `min_citations` and predate
/// `recent_year_threshold`. A candidate qualifies as a gap when, averaged
/// over its keywords, at most `max_recent_papers` recent papers share
/// each keyword. Candidates without keywords average 1.0.
pub fn research_gaps(
    snapshot: &ResearchSnapshot,
    min_citations: i64,
    recent_year_threshold: i32,
    max_recent_papers: f64,
    limit: usize,
) -> Vec<ResearchGap> {
    // Recent-paper counts per keyword, computed once over the inverted index
    let mut recent_counts: HashMap<Uuid, usize> = HashMap::new();

    let mut gaps: Vec<ResearchGap> = Vec::new();
    for paper in snapshot.papers() {
        if paper.citation_count < min_citations || paper.year >= recent_year_threshold {
            continue;
        }

        let keyword_ids = snapshot.keywords_of_paper(paper.id);
        let avg_recent_similar = if keyword_ids.is_empty() {
            1.0
        } else {
            let total: usize = keyword_ids
                .iter()
                .map(|&id| {
                    recent_papers_with_keyword(
                        snapshot,
                        &mut recent_counts,
                        id,
                        recent_year_threshold,
                    )
                })
                .sum();
            total as f64 / keyword_ids.len() as f64
        };

        if avg_recent_similar > max_recent_papers {
            continue;
        }

        gaps.push(ResearchGap {
            paper: PaperSummary::from(paper),
            recent_similar_papers: avg_recent_similar,
            keywords: keyword_ids
                .iter()
                .filter_map(|&id| snapshot.keyword(id).map(|k| k.name.clone()))
                .collect(),
            gap_score: paper.citation_count as f64 / avg_recent_similar.max(1.0),
        });
    }

    gaps.sort_unstable_by(|a, b| {
        b.gap_score
            .partial_cmp(&a.gap_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.paper.citation_count.cmp(&a.paper.citation_count))
            .then_with(|| a.paper.id.cmp(&b.paper.id))
    });
    gaps.truncate(limit);
    gaps
}

/// Papers with the keyword published at or after the threshold, memoized
fn recent_papers_with_keyword(
    snapshot: &ResearchSnapshot,
    cache: &mut HashMap<Uuid, usize>,
    keyword_id: Uuid,
    recent_year_threshold: i32,
) -> usize {
    if let Some(&count) = cache.get(&keyword_id) {
        return count;
    }
    let count = snapshot
        .papers_with_keyword(keyword_id)
        .iter()
        .filter(|id| {
            snapshot
                .paper(**id)
                .is_some_and(|p| p.year >= recent_year_threshold)
        })
        .count();
    cache.insert(keyword_id, count);
    count
}

/// Keywords co-occurring with the given keyword
///
/// Strength is the fraction of the keyword's papers that also carry the
/// related keyword. Unknown keywords yield an empty list.
pub fn keyword_relationships(
    snapshot: &ResearchSnapshot,
    keyword_name: &str,
    limit: usize,
) -> Vec<KeywordRelationship> {
    let Some(keyword) = snapshot.keyword_by_name(keyword_name) else {
        return Vec::new();
    };
    let target_name = normalize_keyword(&keyword.name);

    let papers = snapshot.papers_with_keyword(keyword.id);
    if papers.is_empty() {
        return Vec::new();
    }

    let mut co_occurrence: HashMap<String, usize> = HashMap::new();
    for &paper_id in papers {
        for &other_id in snapshot.keywords_of_paper(paper_id) {
            let Some(other) = snapshot.keyword(other_id) else {
                continue;
            };
            let name = normalize_keyword(&other.name);
            if name != target_name {
                *co_occurrence.entry(name).or_insert(0) += 1;
            }
        }
    }

    let total = papers.len() as f64;
    let mut relationships: Vec<KeywordRelationship> = co_occurrence
        .into_iter()
        .map(|(keyword, count)| KeywordRelationship {
            keyword,
            co_occurrence_count: count,
            strength: count as f64 / total,
        })
        .collect();
    relationships.sort_unstable_by(|a, b| {
        b.co_occurrence_count
            .cmp(&a.co_occurrence_count)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    relationships.truncate(limit);
    relationships
}

/// Largest h such that the h-th highest citation count is at least h
pub fn h_index(citation_counts: &[i64]) -> usize {
    let mut sorted: Vec<i64> = citation_counts.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut h = 0;
    for (i, &citations) in sorted.iter().enumerate() {
        if citations >= (i + 1) as i64 {
            h = i + 1;
        } else {
            break;
        }
    }
    h
}

/// Impact metrics for an author
///
/// Unknown authors and authors without papers yield `None`.
pub fn author_impact(
    snapshot: &ResearchSnapshot,
    author_name: &str,
    recent_year_threshold: i32,
) -> Option<AuthorImpact> {
    let author = snapshot.author_by_name(author_name)?;
    let paper_ids = snapshot.papers_of_author(author.id);
    if paper_ids.is_empty() {
        return None;
    }

    let papers: Vec<&Paper> = paper_ids
        .iter()
        .filter_map(|&id| snapshot.paper(id))
        .collect();
    if papers.is_empty() {
        return None;
    }

    let total_papers = papers.len();
    let total_citations: i64 = papers.iter().map(|p| p.citation_count).sum();
    let citation_counts: Vec<i64> = papers.iter().map(|p| p.citation_count).collect();

    let recent_papers_count = papers
        .iter()
        .filter(|p| p.year >= recent_year_threshold)
        .count();

    let mut collaborators: HashSet<&str> = HashSet::new();
    for paper in &papers {
        for &co_author_id in snapshot.authors_of_paper(paper.id) {
            if co_author_id == author.id {
                continue;
            }
            if let Some(co_author) = snapshot.author(co_author_id) {
                if co_author.name != author.name {
                    collaborators.insert(co_author.name.as_str());
                }
            }
        }
    }

    let most_cited = papers
        .iter()
        .max_by(|a, b| {
            a.citation_count
                .cmp(&b.citation_count)
                .then_with(|| b.id.cmp(&a.id))
        })
        .copied()?;

    let active_years: BTreeSet<i32> = papers.iter().map(|p| p.year).collect();

    Some(AuthorImpact {
        author: author.name.clone(),
        total_papers,
        total_citations,
        avg_citations: total_citations as f64 / total_papers as f64,
        h_index: h_index(&citation_counts),
        recent_papers_count,
        unique_collaborators: collaborators.len(),
        most_cited_paper: PaperSummary::from(most_cited),
        active_years: active_years.into_iter().collect(),
    })
}

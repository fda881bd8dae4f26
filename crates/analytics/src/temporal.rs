//! Temporal keyword evolution
//!
//! Buckets keyword-matching papers into fixed-width year periods and
//! reports per-period volume, citation averages, and co-occurring
//! keywords.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use citescope_common::store::{normalize_keyword, ResearchSnapshot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Co-occurring keyword with its frequency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoKeyword {
    pub keyword: String,
    pub count: usize,
}

/// One fixed-width period of the evolution timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionPeriod {
    /// Period label, e.g. "2020-2024"
    pub period: String,

    pub paper_count: usize,

    pub avg_citations: f64,

    pub top_co_keywords: Vec<CoKeyword>,
}

/// Keyword evolution output contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordEvolution {
    pub keyword: String,
    pub evolution: Vec<EvolutionPeriod>,
    pub total_papers: usize,
}

/// Parameters for one evolution query
#[derive(Debug, Clone, Copy)]
pub struct EvolutionParams {
    /// Lookback window in years
    pub years_back: u32,

    /// Fixed period width in years
    pub period_years: u32,

    /// Co-keywords retained per period
    pub co_keyword_limit: usize,

    /// Reference year for the lookback window
    pub current_year: i32,
}

/// Compute the temporal evolution of a keyword
///
/// Matching is case-insensitive substring containment against normalized
/// keyword names; papers older than the lookback window are excluded.
/// Periods come out ascending by start year.
pub fn keyword_evolution(
    snapshot: &ResearchSnapshot,
    target: &str,
    params: EvolutionParams,
) -> KeywordEvolution {
    let normalized_target = normalize_keyword(target);
    let start_year = params.current_year - params.years_back as i32;
    let width = params.period_years.max(1) as i32;

    // Every keyword whose name contains the target contributes its papers
    let mut matching_papers: BTreeSet<Uuid> = BTreeSet::new();
    for keyword in snapshot.keywords() {
        if normalize_keyword(&keyword.name).contains(&normalized_target) {
            matching_papers.extend(snapshot.papers_with_keyword(keyword.id));
        }
    }

    let mut periods: BTreeMap<i32, Vec<Uuid>> = BTreeMap::new();
    let mut total_papers = 0_usize;
    for &paper_id in &matching_papers {
        let Some(paper) = snapshot.paper(paper_id) else {
            continue;
        };
        if paper.year < start_year {
            continue;
        }
        total_papers += 1;
        let bucket = paper.year.div_euclid(width) * width;
        periods.entry(bucket).or_default().push(paper_id);
    }

    let evolution = periods
        .into_iter()
        .map(|(bucket, paper_ids)| {
            let mut total_citations = 0_i64;
            let mut co_keywords: HashMap<String, usize> = HashMap::new();

            for &paper_id in &paper_ids {
                if let Some(paper) = snapshot.paper(paper_id) {
                    total_citations += paper.citation_count;
                }
                for &keyword_id in snapshot.keywords_of_paper(paper_id) {
                    let Some(keyword) = snapshot.keyword(keyword_id) else {
                        continue;
                    };
                    let name = normalize_keyword(&keyword.name);
                    if name != normalized_target {
                        *co_keywords.entry(name).or_insert(0) += 1;
                    }
                }
            }

            let paper_count = paper_ids.len();
            let avg_citations = if paper_count > 0 {
                total_citations as f64 / paper_count as f64
            } else {
                0.0
            };

            let mut ranked: Vec<CoKeyword> = co_keywords
                .into_iter()
                .map(|(keyword, count)| CoKeyword { keyword, count })
                .collect();
            ranked.sort_unstable_by(|a, b| {
                b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword))
            });
            ranked.truncate(params.co_keyword_limit);

            EvolutionPeriod {
                period: format!("{}-{}", bucket, bucket + width - 1),
                paper_count,
                avg_citations,
                top_co_keywords: ranked,
            }
        })
        .collect();

    KeywordEvolution {
        keyword: target.to_string(),
        evolution,
        total_papers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citescope_common::store::{Keyword, Paper, PaperKeyword};

    fn params(current_year: i32) -> EvolutionParams {
        EvolutionParams {
            years_back: 10,
            period_years: 5,
            co_keyword_limit: 10,
            current_year,
        }
    }

    fn snapshot() -> ResearchSnapshot {
        let papers = vec![
            Paper { id: Uuid::from_u128(1), title: "p1".into(), year: 2021, citation_count: 10 },
            Paper { id: Uuid::from_u128(2), title: "p2".into(), year: 2024, citation_count: 20 },
            Paper { id: Uuid::from_u128(3), title: "p3".into(), year: 2018, citation_count: 6 },
            Paper { id: Uuid::from_u128(4), title: "p4".into(), year: 1999, citation_count: 90 },
        ];
        let keywords = vec![
            Keyword { id: Uuid::from_u128(10), name: "machine learning".into() },
            Keyword { id: Uuid::from_u128(11), name: "neural networks".into() },
            Keyword { id: Uuid::from_u128(12), name: "optimization".into() },
        ];
        let tag = |paper: u128, keyword: u128| PaperKeyword {
            paper_id: Uuid::from_u128(paper),
            keyword_id: Uuid::from_u128(keyword),
        };
        ResearchSnapshot::new(
            papers,
            vec![],
            keywords,
            vec![],
            vec![],
            vec![
                tag(1, 10),
                tag(1, 11),
                tag(2, 10),
                tag(2, 11),
                tag(2, 12),
                tag(3, 10),
                tag(4, 10),
            ],
        )
    }

    #[test]
    fn test_same_period_bucketing() {
        // 2021 and 2024 share the "2020-2024" bucket
        let result = keyword_evolution(&snapshot(), "machine learning", params(2025));

        let bucket = result
            .evolution
            .iter()
            .find(|p| p.period == "2020-2024")
            .unwrap();
        assert_eq!(bucket.paper_count, 2);
        assert!((bucket.avg_citations - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_periods_ascend_and_lookback_applies() {
        let result = keyword_evolution(&snapshot(), "machine learning", params(2025));

        // 1999 falls outside the 10-year window
        assert_eq!(result.total_papers, 3);
        let labels: Vec<&str> = result.evolution.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(labels, vec!["2015-2019", "2020-2024"]);
    }

    #[test]
    fn test_co_keywords_exclude_target_and_rank_by_count() {
        let result = keyword_evolution(&snapshot(), "machine learning", params(2025));
        let bucket = result
            .evolution
            .iter()
            .find(|p| p.period == "2020-2024")
            .unwrap();

        assert_eq!(bucket.top_co_keywords[0].keyword, "neural networks");
        assert_eq!(bucket.top_co_keywords[0].count, 2);
        assert_eq!(bucket.top_co_keywords[1].keyword, "optimization");
        assert!(bucket
            .top_co_keywords
            .iter()
            .all(|ck| ck.keyword != "machine learning"));
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let result = keyword_evolution(&snapshot(), "Machine", params(2025));
        assert_eq!(result.total_papers, 3);
    }

    #[test]
    fn test_unknown_keyword_yields_empty_timeline() {
        let result = keyword_evolution(&snapshot(), "quantum", params(2025));
        assert!(result.evolution.is_empty());
        assert_eq!(result.total_papers, 0);
    }
}

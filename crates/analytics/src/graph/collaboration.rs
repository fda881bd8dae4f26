//! Collaboration network construction
//!
//! Derives an undirected co-authorship graph from the snapshot: nodes are
//! authors meeting the productivity threshold, edges are canonicalized
//! name pairs deduplicated across however many papers a pair shared.

use std::collections::{BTreeSet, HashSet};

use citescope_common::store::ResearchSnapshot;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author node in the collaboration network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationNode {
    /// Author name; names are the wire identity of this network
    pub id: String,

    #[serde(rename = "type")]
    pub node_type: String,

    pub paper_count: usize,
}

/// Undirected co-authorship edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationEdge {
    pub source: String,

    pub target: String,

    #[serde(rename = "type")]
    pub edge_type: String,
}

/// Collaboration network output contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationNetwork {
    pub nodes: Vec<CollaborationNode>,
    pub edges: Vec<CollaborationEdge>,
}

/// Build the collaboration network for authors with at least `min_papers`
///
/// Both endpoints of every edge must independently meet the threshold; a
/// pair sharing multiple papers still yields exactly one edge. Nodes and
/// edges come out name-sorted for reproducibility.
pub fn build_collaboration_network(
    snapshot: &ResearchSnapshot,
    min_papers: usize,
) -> CollaborationNetwork {
    let mut retained: Vec<_> = snapshot
        .authors()
        .iter()
        .filter(|a| snapshot.papers_of_author(a.id).len() >= min_papers)
        .collect();
    retained.sort_unstable_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    let retained_ids: HashSet<Uuid> = retained.iter().map(|a| a.id).collect();

    // Canonical sorted-name pairs; the BTreeSet both deduplicates and
    // fixes the output order
    let mut pairs: BTreeSet<(String, String)> = BTreeSet::new();
    for author in &retained {
        for &paper_id in snapshot.papers_of_author(author.id) {
            for &co_author_id in snapshot.authors_of_paper(paper_id) {
                if co_author_id == author.id || !retained_ids.contains(&co_author_id) {
                    continue;
                }
                let Some(co_author) = snapshot.author(co_author_id) else {
                    continue;
                };
                let (source, target) = if author.name <= co_author.name {
                    (author.name.clone(), co_author.name.clone())
                } else {
                    (co_author.name.clone(), author.name.clone())
                };
                if source == target {
                    continue;
                }
                pairs.insert((source, target));
            }
        }
    }

    CollaborationNetwork {
        nodes: retained
            .iter()
            .map(|a| CollaborationNode {
                id: a.name.clone(),
                node_type: "author".to_string(),
                paper_count: snapshot.papers_of_author(a.id).len(),
            })
            .collect(),
        edges: pairs
            .into_iter()
            .map(|(source, target)| CollaborationEdge {
                source,
                target,
                edge_type: "collaboration".to_string(),
            })
            .collect(),
    }
}

/// Number of papers two authors wrote together
///
/// Unknown authors and identical endpoints score 0; a collaboration needs
/// two distinct authors.
pub fn collaboration_strength(snapshot: &ResearchSnapshot, author_a: &str, author_b: &str) -> usize {
    let (Some(a), Some(b)) = (
        snapshot.author_by_name(author_a),
        snapshot.author_by_name(author_b),
    ) else {
        return 0;
    };
    if a.id == b.id {
        return 0;
    }

    let papers_a = snapshot.papers_of_author(a.id);
    let papers_b: HashSet<&Uuid> = snapshot.papers_of_author(b.id).iter().collect();
    papers_a.iter().filter(|id| papers_b.contains(id)).count()
}

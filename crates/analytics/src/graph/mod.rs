//! Derived graph builders
//!
//! Constructs the two ephemeral graphs the engine works on:
//! - The directed citation graph (papers, citations)
//! - The undirected collaboration graph (authors, co-authorships)

mod citation;
mod collaboration;

pub use citation::{CitationGraph, GraphAnomalies, PaperAttrs};
pub use collaboration::{
    build_collaboration_network, collaboration_strength, CollaborationEdge, CollaborationNetwork,
    CollaborationNode,
};

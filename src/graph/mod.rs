// src/graph/mod.rs
//! Coauthorship graph built from the collaboration records of a batch.

pub mod layout;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::profile::{CollaborationRecord, Profile};

#[allow(unused_imports)]
pub use layout::{ForceLayout, LayoutConfig, LayoutState, NodePosition};

/// An author string and the number of collaboration records it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub weight: usize,
}

/// Unordered author pair; `source`/`target` keep the orientation of the first record seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub weight: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Number of collaboration records the graph was built from.
    pub record_count: usize,
}

impl CollaborationGraph {
    /// Builds the graph over every profile's collaborations, in profile order.
    /// Author strings are identities: no merging across spellings or documents.
    pub fn from_profiles(profiles: &[Profile]) -> Self {
        Self::from_records(profiles.iter().flat_map(|p| p.collaborations.iter()))
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CollaborationRecord>,
    {
        let mut graph = CollaborationGraph::default();
        let mut node_index: HashMap<String, usize> = HashMap::new();
        let mut edge_index: HashMap<(String, String), usize> = HashMap::new();

        for record in records {
            graph.record_count += 1;

            // A name repeated inside one record still counts once.
            let mut authors: Vec<&str> = Vec::with_capacity(record.authors.len());
            for author in &record.authors {
                if !authors.contains(&author.as_str()) {
                    authors.push(author);
                }
            }

            for author in &authors {
                let index = *node_index.entry(author.to_string()).or_insert_with(|| {
                    graph.nodes.push(GraphNode {
                        id: author.to_string(),
                        weight: 0,
                    });
                    graph.nodes.len() - 1
                });
                graph.nodes[index].weight += 1;
            }

            for (i, first) in authors.iter().enumerate() {
                for second in &authors[i + 1..] {
                    let key = if first <= second {
                        (first.to_string(), second.to_string())
                    } else {
                        (second.to_string(), first.to_string())
                    };
                    let index = *edge_index.entry(key).or_insert_with(|| {
                        graph.edges.push(GraphEdge {
                            source: first.to_string(),
                            target: second.to_string(),
                            weight: 0,
                        });
                        graph.edges.len() - 1
                    });
                    graph.edges[index].weight += 1;
                }
            }
        }

        tracing::info!(
            "Collaboration graph: {} authors, {} connections, {} records",
            graph.nodes.len(),
            graph.edges.len(),
            graph.record_count
        );
        graph
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_node_weight(&self) -> usize {
        self.nodes.iter().map(|n| n.weight).max().unwrap_or(0)
    }
}

#[cfg(test)]
impl CollaborationGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edge between two authors, in either orientation.
    pub fn edge(&self, a: &str, b: &str) -> Option<&GraphEdge> {
        self.edges
            .iter()
            .find(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
    }
}

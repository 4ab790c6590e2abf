// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use indexmap::IndexMap;

use crate::graph::WeaveGraph;

/// Newtype wrapper for the forward adjacency of a weave graph.
///
/// Maps every node id to the ids that consume one of its outputs. Every
/// declared node has an entry (possibly empty). Dependents are deduplicated
/// and kept in connection declaration order, so traversals are deterministic.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph(pub IndexMap<String, Vec<String>>);

impl DependencyGraph {
    pub fn from_graph(graph: &WeaveGraph) -> Self {
        let mut adjacency: IndexMap<String, Vec<String>> = graph
            .nodes
            .keys()
            .map(|id| (id.clone(), Vec::new()))
            .collect();

        for connection in &graph.connections {
            let dependents = adjacency.entry(connection.from.node.clone()).or_default();
            if !dependents.contains(&connection.to.node) {
                dependents.push(connection.to.node.clone());
            }
        }

        Self(adjacency)
    }

    /// Get dependents for a node
    pub fn get_dependents(&self, node_id: &str) -> Option<&Vec<String>> {
        self.0.get(node_id)
    }

    /// Get all node ids in the graph
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

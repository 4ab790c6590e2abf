// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Parsed weave graphs: node instances wired together by port connections.
//!
//! A [`WeaveGraph`] is produced per parse of a `.weave` file and is immutable
//! input to one execution.

mod dependency_graph;
mod entry_points;
mod validation;

pub use dependency_graph::DependencyGraph;
pub use entry_points::EntryPoints;
pub use validation::{validate_graph, wiring_warnings, WiringWarning};

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::Value;

/// An instantiated node inside a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaveNode {
    /// Unique within the graph.
    pub id: String,
    /// Bare node name declared by the plugin.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Owning plugin name.
    pub plugin: String,
    /// Static inputs; these win over connection-supplied values for the same port.
    #[serde(default)]
    pub parameters: IndexMap<String, Value>,
}

impl WeaveNode {
    pub fn new(id: impl Into<String>, plugin: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            plugin: plugin.into(),
            parameters: IndexMap::new(),
        }
    }

    pub fn with_parameter(mut self, port: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(port.into(), value);
        self
    }
}

/// One side of a connection: a port on a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    pub node: String,
    pub port: String,
}

impl PortRef {
    pub fn new(node: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.port)
    }
}

/// Which section of the weave file declared a connection.
///
/// Both kinds wire values identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    #[default]
    Data,
    Control,
}

/// `from`'s output port feeds `to`'s input port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaveConnection {
    pub from: PortRef,
    pub to: PortRef,
    #[serde(default)]
    pub kind: ConnectionKind,
}

impl WeaveConnection {
    pub fn data(from: PortRef, to: PortRef) -> Self {
        Self {
            from,
            to,
            kind: ConnectionKind::Data,
        }
    }

    pub fn control(from: PortRef, to: PortRef) -> Self {
        Self {
            from,
            to,
            kind: ConnectionKind::Control,
        }
    }
}

impl fmt::Display for WeaveConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphMetadata {
    pub name: String,
    /// Ids that seed the scheduler, in listed order.
    #[serde(default)]
    pub entry_points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaveGraph {
    /// Node instances keyed by id, in declaration order.
    pub nodes: IndexMap<String, WeaveNode>,
    pub connections: Vec<WeaveConnection>,
    /// Imported plugin names (file suffix already stripped).
    pub imports: Vec<String>,
    pub metadata: GraphMetadata,
}

impl WeaveGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: GraphMetadata {
                name: name.into(),
                entry_points: Vec::new(),
            },
            ..Self::default()
        }
    }

    pub fn add_node(&mut self, node: WeaveNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn connect(&mut self, connection: WeaveConnection) {
        self.connections.push(connection);
    }

    /// Forward adjacency: producer id to the ids consuming any of its outputs.
    pub fn dependency_graph(&self) -> DependencyGraph {
        DependencyGraph::from_graph(self)
    }

    /// Declared entry points, or every node without an incoming connection
    /// (declaration order) when none are declared.
    pub fn entry_points(&self) -> EntryPoints {
        if !self.metadata.entry_points.is_empty() {
            return EntryPoints::from(self.metadata.entry_points.clone());
        }
        let consumers: HashSet<&str> = self.connections.iter().map(|c| c.to.node.as_str()).collect();
        self.nodes
            .keys()
            .filter(|id| !consumers.contains(id.as_str()))
            .cloned()
            .collect::<Vec<_>>()
            .into()
    }

    /// Distinct plugin names referenced by node instances, in first-use order.
    pub fn referenced_plugins(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.nodes
            .values()
            .filter(|n| seen.insert(n.plugin.as_str()))
            .map(|n| n.plugin.clone())
            .collect()
    }

    /// Connections feeding `node_id`, in declaration order.
    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a WeaveConnection> + 'a {
        self.connections.iter().filter(move |c| c.to.node == node_id)
    }

    /// True when some connection reads `node_id`'s `output`.
    pub fn is_consumed(&self, node_id: &str, output: &str) -> bool {
        self.connections
            .iter()
            .any(|c| c.from.node == node_id && c.from.port == output)
    }
}

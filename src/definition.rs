// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Plugin and node declarations.
//!
//! A [`PluginDefinition`] is produced once when a plugin is constructed and is
//! read-only afterwards. It is the authoritative description of the plugin;
//! `.anima` text is only ever rendered from it.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::TypeDefinition;

/// Scheduling hint carried by node declarations.
///
/// Parsed and rendered, never consulted by the scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeMode {
    #[default]
    Concurrent,
    Sequential,
}

impl fmt::Display for NodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeMode::Concurrent => write!(f, "Concurrent"),
            NodeMode::Sequential => write!(f, "Sequential"),
        }
    }
}

impl FromStr for NodeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Concurrent" => Ok(NodeMode::Concurrent),
            "Sequential" => Ok(NodeMode::Sequential),
            other => Err(format!("unknown node mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub name: String,
    /// Input port name to type name, in declaration order.
    pub inputs: IndexMap<String, String>,
    /// Output port name to type name, in declaration order.
    pub outputs: IndexMap<String, String>,
    #[serde(default)]
    pub mode: NodeMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NodeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
            mode: NodeMode::default(),
            description: None,
        }
    }

    pub fn input(mut self, port: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.inputs.insert(port.into(), type_name.into());
        self
    }

    pub fn output(mut self, port: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.outputs.insert(port.into(), type_name.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
}

/// Everything a plugin declares: its metadata, types and nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDefinition {
    pub metadata: PluginMetadata,
    pub types: IndexMap<String, TypeDefinition>,
    pub nodes: IndexMap<String, NodeDefinition>,
}

impl PluginDefinition {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            metadata: PluginMetadata {
                name: name.into(),
                version: version.into(),
                description: description.into(),
            },
            types: IndexMap::new(),
            nodes: IndexMap::new(),
        }
    }

    pub fn with_type(mut self, definition: TypeDefinition) -> Self {
        self.types.insert(definition.name.clone(), definition);
        self
    }

    pub fn with_node(mut self, definition: NodeDefinition) -> Self {
        self.nodes.insert(definition.name.clone(), definition);
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveType;

    #[test]
    fn test_node_mode_round_trips_through_text() {
        assert_eq!("Concurrent".parse::<NodeMode>().unwrap(), NodeMode::Concurrent);
        assert_eq!(NodeMode::Sequential.to_string(), "Sequential");
        assert!("Parallel".parse::<NodeMode>().is_err());
    }

    #[test]
    fn test_builder_preserves_declaration_order() {
        let definition = PluginDefinition::new("demo", "0.1.0", "demo plugin")
            .with_type(TypeDefinition::primitive("Int", PrimitiveType::Integer))
            .with_node(
                NodeDefinition::new("Add")
                    .input("b", "Int")
                    .input("a", "Int")
                    .output("sum", "Int"),
            );

        let add = &definition.nodes["Add"];
        let ports: Vec<&String> = add.inputs.keys().collect();
        assert_eq!(ports, vec!["b", "a"]);
        assert_eq!(add.mode, NodeMode::Concurrent);
        assert_eq!(definition.name(), "demo");
    }
}

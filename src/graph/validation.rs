// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation of weave graphs.
//!
//! Two passes run before scheduling:
//!
//! 1. [`validate_graph`] - fatal checks. Every connection endpoint and every
//!    entry point must name a declared node. All problems are accumulated so a
//!    single run reports them together.
//! 2. [`wiring_warnings`] - advisory checks against plugin declarations.
//!    Connections naming undeclared ports, or joining ports whose declared
//!    types differ, are reported but do not stop execution. Node
//!    implementations remain responsible for checking the values they receive.

use std::collections::HashSet;
use std::fmt;

use crate::errors::ValidationError;
use crate::graph::WeaveGraph;
use crate::registry::PluginRegistry;
use crate::types::split_qualified;

/// Validates that every node reference in `graph` resolves.
pub fn validate_graph(graph: &WeaveGraph) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for connection in &graph.connections {
        for endpoint in [&connection.from.node, &connection.to.node] {
            if !graph.nodes.contains_key(endpoint) {
                errors.push(ValidationError::UnknownConnectionEndpoint {
                    connection: connection.to_string(),
                    missing_node: endpoint.clone(),
                });
            }
        }
    }

    let mut seen = HashSet::new();
    for entry in &graph.metadata.entry_points {
        if !graph.nodes.contains_key(entry) && seen.insert(entry) {
            errors.push(ValidationError::UnknownEntryPoint {
                node_id: entry.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Advisory mismatch between a connection and the plugin declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WiringWarning {
    /// The producing node does not declare the output port.
    UndeclaredOutput { connection: String, node_type: String },
    /// The consuming node does not declare the input port.
    UndeclaredInput { connection: String, node_type: String },
    /// Both ports are declared but with different types.
    TypeMismatch {
        connection: String,
        output_type: String,
        input_type: String,
    },
}

impl fmt::Display for WiringWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WiringWarning::UndeclaredOutput { connection, node_type } => write!(
                f,
                "Connection '{}' reads an output not declared by node type '{}'",
                connection, node_type
            ),
            WiringWarning::UndeclaredInput { connection, node_type } => write!(
                f,
                "Connection '{}' feeds an input not declared by node type '{}'",
                connection, node_type
            ),
            WiringWarning::TypeMismatch {
                connection,
                output_type,
                input_type,
            } => write!(
                f,
                "Connection '{}' joins output type '{}' to input type '{}'",
                connection, output_type, input_type
            ),
        }
    }
}

/// Compares each connection against the registered node declarations.
///
/// Connections whose nodes belong to unregistered plugins, or whose node types
/// are not declared, are skipped; those fail later with a precise error.
pub fn wiring_warnings(graph: &WeaveGraph, registry: &PluginRegistry) -> Vec<WiringWarning> {
    let mut warnings = Vec::new();

    for connection in &graph.connections {
        let (Some(producer), Some(consumer)) = (
            graph.nodes.get(&connection.from.node),
            graph.nodes.get(&connection.to.node),
        ) else {
            continue;
        };
        let (Some(out_decl), Some(in_decl)) = (
            registry.node_definition(&producer.plugin, &producer.node_type),
            registry.node_definition(&consumer.plugin, &consumer.node_type),
        ) else {
            continue;
        };

        let output_type = out_decl.outputs.get(&connection.from.port);
        let input_type = in_decl.inputs.get(&connection.to.port);

        match (output_type, input_type) {
            (None, _) => warnings.push(WiringWarning::UndeclaredOutput {
                connection: connection.to_string(),
                node_type: producer.node_type.clone(),
            }),
            (_, None) => warnings.push(WiringWarning::UndeclaredInput {
                connection: connection.to_string(),
                node_type: consumer.node_type.clone(),
            }),
            (Some(out_ty), Some(in_ty)) => {
                let qualified_out = qualify(&producer.plugin, out_ty);
                let qualified_in = qualify(&consumer.plugin, in_ty);
                if qualified_out != qualified_in {
                    warnings.push(WiringWarning::TypeMismatch {
                        connection: connection.to_string(),
                        output_type: qualified_out,
                        input_type: qualified_in,
                    });
                }
            }
        }
    }

    warnings
}

fn qualify(plugin: &str, type_name: &str) -> String {
    match split_qualified(type_name) {
        (Some(_), _) => type_name.to_string(),
        (None, bare) => format!("{}.{}", plugin, bare),
    }
}

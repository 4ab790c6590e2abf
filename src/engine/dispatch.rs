// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-node work shared by every executor: input assembly and the plugin call.

use std::sync::Arc;
use std::time::Instant;

use crate::errors::{ExecutionError, PluginError};
use crate::graph::{WeaveGraph, WeaveNode};
use crate::observability::messages::node::{
    NodeExecutionCompleted, NodeExecutionFailed, NodeExecutionStarted,
};
use crate::observability::messages::StructuredLog;
use crate::registry::PluginRegistry;
use crate::traits::{NodeOutputs, Plugin};
use crate::types::PortValues;

/// Builds the input map for `node`.
///
/// Every incoming connection copies the producer's output into the target
/// port, then the node's static parameters are overlaid and win on conflict.
/// An upstream output that was never produced leaves the port empty; the node
/// implementation reports it as missing.
pub fn gather_inputs(graph: &WeaveGraph, node: &WeaveNode, results: &NodeOutputs) -> PortValues {
    let mut inputs = PortValues::new();

    for connection in graph.incoming(&node.id) {
        if let Some(value) = results
            .get(&connection.from.node)
            .and_then(|outputs| outputs.get(&connection.from.port))
        {
            inputs.insert(connection.to.port.clone(), value.clone());
        }
    }

    for (port, value) in &node.parameters {
        inputs.insert(port.clone(), value.clone());
    }

    inputs
}

/// Looks up the node and its plugin before anything runs.
pub fn resolve<'g>(
    registry: &PluginRegistry,
    graph: &'g WeaveGraph,
    node_id: &str,
) -> Result<(&'g WeaveNode, Arc<dyn Plugin>), ExecutionError> {
    let node = graph
        .nodes
        .get(node_id)
        .ok_or_else(|| ExecutionError::UnknownNodeReference {
            node: node_id.to_string(),
        })?;
    let plugin = registry
        .get(&node.plugin)
        .ok_or_else(|| PluginError::UnknownPlugin(node.plugin.clone()))?;
    Ok((node, plugin))
}

/// Runs one node through its plugin with start/complete/fail events.
///
/// Plugin failures are wrapped with the instance id, so two instances of the
/// same node type stay distinguishable.
pub async fn run_node(
    plugin: &dyn Plugin,
    node: &WeaveNode,
    inputs: PortValues,
) -> Result<PortValues, ExecutionError> {
    NodeExecutionStarted {
        node_id: &node.id,
        plugin: &node.plugin,
        node_type: &node.node_type,
        input_count: inputs.len(),
    }
    .log();
    let started = Instant::now();

    match plugin.execute_node(&node.node_type, inputs).await {
        Ok(outputs) => {
            NodeExecutionCompleted {
                node_id: &node.id,
                output_count: outputs.len(),
                duration: started.elapsed(),
            }
            .log();
            Ok(outputs)
        }
        Err(err) => {
            NodeExecutionFailed {
                node_id: &node.id,
                error: &err,
            }
            .log();
            Err(ExecutionError::NodeExecution {
                node: node.id.clone(),
                source: err,
            })
        }
    }
}

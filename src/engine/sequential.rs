// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::engine::dispatch::{gather_inputs, resolve, run_node};
use crate::errors::ExecutionError;
use crate::graph::WeaveGraph;
use crate::registry::PluginRegistry;
use crate::traits::{DagExecutor, NodeOutputs};

/// Runs nodes one at a time, awaiting each before starting the next.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl SequentialExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DagExecutor for SequentialExecutor {
    async fn execute(
        &self,
        registry: &PluginRegistry,
        graph: &WeaveGraph,
        order: &[String],
    ) -> Result<NodeOutputs, ExecutionError> {
        let mut results = NodeOutputs::with_capacity(order.len());

        for node_id in order {
            let (node, plugin) = resolve(registry, graph, node_id)?;
            let inputs = gather_inputs(graph, node, &results);
            let outputs = run_node(plugin.as_ref(), node, inputs).await?;
            results.insert(node_id.clone(), outputs);
        }

        Ok(results)
    }

    fn strategy_name(&self) -> &'static str {
        "sequential"
    }
}

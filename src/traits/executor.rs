// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::errors::ExecutionError;
use crate::graph::WeaveGraph;
use crate::registry::PluginRegistry;
use crate::types::PortValues;

/// Outputs of every executed node, keyed by node id in execution order.
pub type NodeOutputs = IndexMap<String, PortValues>;

/// A strategy for running a scheduled graph.
///
/// Implementations receive an order that already respects every connection
/// and must produce the same outputs (and the same error for a failing
/// graph) as running that order one node at a time.
#[async_trait]
pub trait DagExecutor: Send + Sync {
    /// Runs every node in `order`, stopping at the first failure.
    async fn execute(
        &self,
        registry: &PluginRegistry,
        graph: &WeaveGraph,
        order: &[String],
    ) -> Result<NodeOutputs, ExecutionError>;

    /// Name reported in logs.
    fn strategy_name(&self) -> &'static str;
}

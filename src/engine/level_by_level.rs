// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::engine::dispatch::{gather_inputs, resolve, run_node};
use crate::engine::scheduler::compute_levels;
use crate::errors::ExecutionError;
use crate::graph::WeaveGraph;
use crate::registry::PluginRegistry;
use crate::traits::{DagExecutor, NodeOutputs};
use crate::types::PortValues;

/// Level-by-Level executor that runs a scheduled graph one tier at a time.
///
/// The execution order is split into tiers with [`compute_levels`]: a node's
/// tier is one past the deepest node feeding it. Nodes in the same tier never
/// feed one another, so every node of a tier is spawned concurrently once the
/// previous tier has finished.
///
/// ## Concurrency Control
/// - A `tokio::sync::Semaphore` caps concurrently running nodes at `max_concurrency`
/// - Inputs are assembled before a node is spawned, from results of earlier tiers only
/// - Tier completion waits for every spawned node, even after a failure
///
/// ## Determinism
/// Results are merged in execution order, so the outputs match a sequential
/// run. After a failure, later tiers still run the nodes that precede it in
/// execution order and skip the rest. The reported error is the one of the
/// earliest failed node in execution order, the same one a sequential run
/// stops at.
pub struct LevelByLevelExecutor {
    /// Maximum number of concurrent node executions within a tier
    max_concurrency: usize,
}

impl LevelByLevelExecutor {
    /// Create a new Level-by-Level executor with the specified concurrency limit
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1), // Ensure at least 1
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Spawns every listed node of one tier and waits for all of them.
    ///
    /// Returns each node's outcome beside its id; a node that cannot be
    /// resolved fails without being spawned.
    async fn execute_level(
        &self,
        level: &[&String],
        registry: &PluginRegistry,
        graph: &WeaveGraph,
        results: &NodeOutputs,
        semaphore: &Arc<Semaphore>,
    ) -> Vec<(String, Result<PortValues, ExecutionError>)> {
        let mut outcomes = Vec::with_capacity(level.len());
        let mut tasks = Vec::with_capacity(level.len());

        for node_id in level {
            let (node, plugin) = match resolve(registry, graph, node_id) {
                Ok(resolved) => resolved,
                Err(e) => {
                    outcomes.push(((*node_id).clone(), Err(e)));
                    continue;
                }
            };
            let inputs = gather_inputs(graph, node, results);
            let node = node.clone();
            let semaphore = semaphore.clone();

            let task = tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| ExecutionError::JoinFailed {
                        node: node.id.clone(),
                        reason: format!("failed to acquire semaphore permit: {}", e),
                    })?;
                run_node(plugin.as_ref(), &node, inputs).await
            });
            tasks.push(((*node_id).clone(), task));
        }

        for (node_id, task) in tasks {
            let outcome = task.await.unwrap_or_else(|join_error| {
                Err(ExecutionError::JoinFailed {
                    node: node_id.clone(),
                    reason: join_error.to_string(),
                })
            });
            outcomes.push((node_id, outcome));
        }
        outcomes
    }
}

impl Default for LevelByLevelExecutor {
    /// Concurrency defaults to the number of CPU cores
    fn default() -> Self {
        let concurrency = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self::new(concurrency)
    }
}

#[async_trait]
impl DagExecutor for LevelByLevelExecutor {
    async fn execute(
        &self,
        registry: &PluginRegistry,
        graph: &WeaveGraph,
        order: &[String],
    ) -> Result<NodeOutputs, ExecutionError> {
        let levels = compute_levels(graph, order);
        let position: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut results = NodeOutputs::with_capacity(order.len());
        // Earliest failure by execution-order position
        let mut failure: Option<(usize, ExecutionError)> = None;

        for level in &levels {
            // A sequential run stops at its first failure, so nodes after it never run
            let cutoff = failure.as_ref().map_or(usize::MAX, |(at, _)| *at);
            let runnable: Vec<&String> = level
                .iter()
                .filter(|id| position.get(id.as_str()).is_some_and(|at| *at < cutoff))
                .collect();
            if runnable.is_empty() {
                continue;
            }

            let outcomes = self
                .execute_level(&runnable, registry, graph, &results, &semaphore)
                .await;
            for (node_id, outcome) in outcomes {
                match outcome {
                    Ok(outputs) => {
                        results.insert(node_id, outputs);
                    }
                    Err(e) => {
                        let at = position.get(node_id.as_str()).copied().unwrap_or(usize::MAX);
                        if failure.as_ref().map_or(true, |(earliest, _)| at < *earliest) {
                            failure = Some((at, e));
                        }
                    }
                }
            }
        }

        if let Some((_, e)) = failure {
            return Err(e);
        }

        // Merge back into execution order
        let mut ordered = NodeOutputs::with_capacity(results.len());
        for node_id in order {
            if let Some(outputs) = results.swap_remove(node_id) {
                ordered.insert(node_id.clone(), outputs);
            }
        }
        Ok(ordered)
    }

    fn strategy_name(&self) -> &'static str {
        "level_by_level"
    }
}

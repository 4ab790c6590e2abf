// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::PluginError;
use crate::types::PortValues;

/// Executable implementation of one declared node.
///
/// Implementations validate their own inputs and fail with
/// [`PluginError::MissingOrInvalidInput`] naming the port rather than
/// returning a partially populated output map.
#[async_trait]
pub trait NodeExecutor: Send + Sync {
    async fn execute(&self, inputs: PortValues) -> Result<PortValues, PluginError>;

    fn name(&self) -> &'static str;
}

/// Node-name to implementation table owned by a plugin.
#[derive(Clone, Default)]
pub struct NodeTable(HashMap<String, Arc<dyn NodeExecutor>>);

impl NodeTable {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Registers `node` under its own name.
    pub fn with(mut self, node: Arc<dyn NodeExecutor>) -> Self {
        self.0.insert(node.name().to_string(), node);
        self
    }

    pub fn get(&self, node_name: &str) -> Option<&Arc<dyn NodeExecutor>> {
        self.0.get(node_name)
    }

    pub fn contains(&self, node_name: &str) -> bool {
        self.0.contains_key(node_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Looks up and runs `node_name`, failing with [`PluginError::UnknownNode`] when unmapped.
    pub async fn dispatch(
        &self,
        plugin_name: &str,
        node_name: &str,
        inputs: PortValues,
    ) -> Result<PortValues, PluginError> {
        let node = self.get(node_name).ok_or_else(|| PluginError::UnknownNode {
            plugin: plugin_name.to_string(),
            node: node_name.to_string(),
        })?;
        node.execute(inputs).await
    }
}

impl std::fmt::Debug for NodeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.0.keys().collect();
        names.sort();
        f.debug_struct("NodeTable")
            .field("node_count", &self.0.len())
            .field("node_names", &names)
            .finish()
    }
}

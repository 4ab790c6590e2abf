// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Plugin registry: name-keyed plugin instances and node dispatch.
//!
//! The registry is shared, read-mostly state. It is populated at startup
//! (`Engine::initialize`) and topped up with any plugin a graph references
//! before that graph's first node runs. It never holds per-run graph state.

mod scope;

pub use scope::RegistryScope;

use std::collections::HashMap;
use std::sync::Arc;

use crate::definition::NodeDefinition;
use crate::errors::PluginError;
use crate::observability::messages::plugin::{PluginLoaded, PluginRegistered};
use crate::observability::messages::StructuredLog;
use crate::traits::{Plugin, PluginLoader};
use crate::types::PortValues;

/// A type-safe registry mapping plugin names to their implementations.
///
/// Plugins are held as `Arc<dyn Plugin>` so executors can hand them to
/// concurrent node tasks without cloning the plugin itself.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin under the name its definition declares.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> Result<(), PluginError> {
        let name = plugin.name().to_string();
        if self.plugins.contains_key(&name) {
            return Err(PluginError::DuplicatePlugin(name));
        }

        let definition = plugin.definition();
        PluginRegistered {
            plugin: &name,
            version: &definition.metadata.version,
            type_count: definition.types.len(),
            node_count: definition.nodes.len(),
        }
        .log();

        self.plugins.insert(name, plugin);
        Ok(())
    }

    /// Get a plugin by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Registered plugin names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.plugins.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Declaration of `node` in `plugin`, if both are known.
    pub fn node_definition(&self, plugin: &str, node: &str) -> Option<&NodeDefinition> {
        self.plugins
            .get(plugin)
            .and_then(|p| p.definition().nodes.get(node))
    }

    /// Type resolution across every registered plugin, preferring `home` for bare names.
    pub fn type_scope<'a>(&'a self, home: &'a str) -> RegistryScope<'a> {
        RegistryScope::new(self, home)
    }

    /// Dispatches one node execution to its plugin.
    pub async fn execute_node(
        &self,
        plugin: &str,
        node: &str,
        inputs: PortValues,
    ) -> Result<PortValues, PluginError> {
        let instance = self
            .plugins
            .get(plugin)
            .ok_or_else(|| PluginError::UnknownPlugin(plugin.to_string()))?;
        instance.execute_node(node, inputs).await
    }

    /// Loads every name in `required` that is not yet registered.
    ///
    /// Stops at the first name the loader cannot provide. Returns the names
    /// that were newly loaded.
    pub fn ensure_loaded(
        &mut self,
        required: &[String],
        loader: &dyn PluginLoader,
    ) -> Result<Vec<String>, PluginError> {
        let mut loaded = Vec::new();
        for name in required {
            if self.contains(name) {
                continue;
            }
            let plugin = loader
                .load(name)
                .filter(|p| p.name() == name.as_str())
                .ok_or_else(|| PluginError::UnknownPlugin(name.clone()))?;
            self.register(plugin)?;
            PluginLoaded { plugin: name }.log();
            loaded.push(name.clone());
        }
        Ok(loaded)
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugin_count", &self.plugins.len())
            .field("plugin_names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{BasicPlugin, BuiltinLoader};
    use serde_json::json;

    #[test]
    fn test_register_and_get() {
        let mut registry = PluginRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(BasicPlugin::new())).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("basic"));
        assert_eq!(registry.get("basic").unwrap().name(), "basic");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(BasicPlugin::new())).unwrap();
        let err = registry.register(Arc::new(BasicPlugin::new())).unwrap_err();
        assert_eq!(err, PluginError::DuplicatePlugin("basic".into()));
    }

    #[test]
    fn test_node_definition_lookup() {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(BasicPlugin::new())).unwrap();

        let start = registry.node_definition("basic", "Start").unwrap();
        assert!(start.inputs.is_empty());
        assert!(registry.node_definition("basic", "Nope").is_none());
        assert!(registry.node_definition("nope", "Start").is_none());
    }

    #[tokio::test]
    async fn test_execute_node_dispatches_to_plugin() {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(BasicPlugin::new())).unwrap();

        let inputs = PortValues::from([("number".to_string(), json!(7))]);
        let outputs = registry.execute_node("basic", "FormatNumber", inputs).await.unwrap();
        assert_eq!(outputs["formatted"], json!("Number: 7"));
    }

    #[tokio::test]
    async fn test_execute_node_unknown_plugin_and_node() {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(BasicPlugin::new())).unwrap();

        let err = registry
            .execute_node("ghost", "Start", PortValues::new())
            .await
            .unwrap_err();
        assert_eq!(err, PluginError::UnknownPlugin("ghost".into()));

        let err = registry
            .execute_node("basic", "Teleport", PortValues::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PluginError::UnknownNode {
                plugin: "basic".into(),
                node: "Teleport".into()
            }
        );
    }

    #[test]
    fn test_ensure_loaded_skips_registered_and_fails_on_unknown() {
        let mut registry = PluginRegistry::new();
        let loader = BuiltinLoader;

        let loaded = registry.ensure_loaded(&["basic".to_string()], &loader).unwrap();
        assert_eq!(loaded, vec!["basic".to_string()]);

        let loaded = registry.ensure_loaded(&["basic".to_string()], &loader).unwrap();
        assert!(loaded.is_empty());

        let err = registry
            .ensure_loaded(&["basic".to_string(), "missing".to_string()], &loader)
            .unwrap_err();
        assert_eq!(err, PluginError::UnknownPlugin("missing".into()));
        assert_eq!(registry.len(), 1);
    }
}

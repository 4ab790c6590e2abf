// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::errors::TypeError;
use crate::registry::PluginRegistry;
use crate::traits::Plugin;
use crate::types::{split_qualified, TypeDefinition, TypeScope, Value};

/// Type resolution across all registered plugins.
///
/// `plugin.Type` names resolve in the named plugin only. Bare names resolve in
/// the home plugin first, then in the other plugins by name order, so a
/// composite declared by one plugin can use another plugin's type unqualified
/// as long as the name is unambiguous. Hooks go to the plugin owning the type.
#[derive(Clone, Copy)]
pub struct RegistryScope<'a> {
    registry: &'a PluginRegistry,
    home: &'a str,
}

impl<'a> RegistryScope<'a> {
    pub fn new(registry: &'a PluginRegistry, home: &'a str) -> Self {
        Self { registry, home }
    }

    fn resolve(&self, type_name: &str) -> Option<(&'a Arc<dyn Plugin>, &'a TypeDefinition)> {
        let plugins = &self.registry.plugins;
        let find = |plugin_name: &str, bare: &str| {
            plugins
                .get(plugin_name)
                .and_then(|p| p.definition().types.get(bare).map(|t| (p, t)))
        };

        match split_qualified(type_name) {
            (Some(plugin_name), bare) => find(plugin_name, bare),
            (None, bare) => find(self.home, bare).or_else(|| {
                self.registry
                    .names()
                    .iter()
                    .filter(|name| name.as_str() != self.home)
                    .find_map(|name| find(name.as_str(), bare))
            }),
        }
    }
}

impl TypeScope for RegistryScope<'_> {
    fn lookup(&self, type_name: &str) -> Option<&TypeDefinition> {
        self.resolve(type_name).map(|(_, definition)| definition)
    }

    fn check_rule(&self, type_name: &str, rule: &str, value: &Value) -> bool {
        self.resolve(type_name)
            .is_some_and(|(plugin, def)| plugin.check_validation_rule(&def.name, rule, value))
    }

    fn refine_default(&self, type_name: &str, base_default: Value) -> Value {
        match self.resolve(type_name) {
            Some((plugin, def)) => plugin.adjust_default(&def.name, base_default),
            None => base_default,
        }
    }

    fn convert_semantic(&self, value: Value, from: &str, to: &str) -> Result<Value, TypeError> {
        let (from_plugin, from_def) = self
            .resolve(from)
            .ok_or_else(|| TypeError::UnknownType(from.to_string()))?;
        let (to_plugin, to_def) = self
            .resolve(to)
            .ok_or_else(|| TypeError::UnknownType(to.to_string()))?;

        // The source type's owner converts; a foreign target keeps its qualifier.
        if from_plugin.name() == to_plugin.name() {
            from_plugin.convert_between(value, &from_def.name, &to_def.name)
        } else {
            let qualified_to = format!("{}.{}", to_plugin.name(), to_def.name);
            from_plugin.convert_between(value, &from_def.name, &qualified_to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::PluginDefinition;
    use crate::errors::PluginError;
    use crate::plugins::BasicPlugin;
    use crate::types::{self, PortValues};
    use async_trait::async_trait;
    use serde_json::json;

    /// Declares a composite whose fields live in the `basic` plugin.
    struct NotesPlugin {
        definition: PluginDefinition,
    }

    impl NotesPlugin {
        fn new() -> Self {
            Self {
                definition: PluginDefinition::new("notes", "0.1.0", "notes")
                    .with_type(TypeDefinition::composite(
                        "Note",
                        [("id", "basic.UUID"), ("title", "Label")],
                    )),
            }
        }
    }

    #[async_trait]
    impl Plugin for NotesPlugin {
        fn definition(&self) -> &PluginDefinition {
            &self.definition
        }

        async fn execute_node(&self, node_name: &str, _inputs: PortValues) -> Result<PortValues, PluginError> {
            Err(PluginError::UnknownNode {
                plugin: "notes".into(),
                node: node_name.into(),
            })
        }
    }

    fn registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(BasicPlugin::new())).unwrap();
        registry.register(Arc::new(NotesPlugin::new())).unwrap();
        registry
    }

    #[test]
    fn test_composite_fields_resolve_across_plugins() {
        let registry = registry();
        let scope = registry.type_scope("notes");

        let note = json!({"id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "title": "groceries"});
        assert!(types::validate(&scope, &note, "Note"));

        let bad_id = json!({"id": "not-a-uuid", "title": "groceries"});
        assert!(!types::validate(&scope, &bad_id, "Note"));

        let empty_title = json!({"id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "title": ""});
        assert!(!types::validate(&scope, &empty_title, "notes.Note"));
    }

    #[test]
    fn test_composite_default_mints_foreign_identifier() {
        let registry = registry();
        let scope = registry.type_scope("notes");

        let note = types::create_default(&scope, "Note").unwrap();
        assert!(uuid::Uuid::parse_str(note["id"].as_str().unwrap()).is_ok());
        assert_eq!(note["title"], json!(""));
    }

    #[test]
    fn test_qualified_name_in_wrong_plugin_is_unknown() {
        let registry = registry();
        let scope = registry.type_scope("basic");
        assert!(scope.lookup("notes.UUID").is_none());
        assert!(scope.lookup("basic.UUID").is_some());
    }

    #[test]
    fn test_cast_through_registry_scope() {
        let registry = registry();
        let scope = registry.type_scope("basic");

        let label = types::cast(&scope, json!("67e55044-10b1-426f-9247-bb680e5fe0c8"), "UUID", "Label").unwrap();
        assert_eq!(label, json!("67e55044-10b1-426f-9247-bb680e5fe0c8"));

        let err = types::cast(&scope, json!(true), "Signal", "UUID").unwrap_err();
        assert_eq!(
            err,
            TypeError::UnsupportedCast {
                from: "Signal".into(),
                to: "UUID".into()
            }
        );
    }
}

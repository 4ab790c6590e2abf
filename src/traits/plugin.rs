// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::definition::PluginDefinition;
use crate::errors::{PluginError, TypeError};
use crate::types::{self, split_qualified, PortValues, TypeDefinition, TypeScope, Value};

/// A self-describing unit of types, node declarations and node implementations.
///
/// Plugins own no graph state. One instance is shared (read-only) by every
/// run that uses it, so any internal state must tolerate sequential reuse.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// The plugin's declarations, independent of any `.anima` file.
    fn definition(&self) -> &PluginDefinition;

    /// Interprets one opaque validation rule of a semantic type.
    ///
    /// Rules the plugin does not recognise fail.
    fn check_validation_rule(&self, _type_name: &str, _rule: &str, _value: &Value) -> bool {
        false
    }

    /// Adjusts the default of a semantic type after its base default is built.
    fn adjust_default(&self, _type_name: &str, base_default: Value) -> Value {
        base_default
    }

    /// Semantic-to-semantic conversion between types sharing a base type.
    fn convert_between(&self, value: Value, _from: &str, _to: &str) -> Result<Value, TypeError> {
        Ok(value)
    }

    fn validate_value(&self, value: &Value, type_name: &str) -> bool {
        types::validate(self, value, type_name)
    }

    fn create_default_value(&self, type_name: &str) -> Result<Value, TypeError> {
        types::create_default(self, type_name)
    }

    fn cast_value(&self, value: Value, from: &str, to: &str) -> Result<Value, TypeError> {
        types::cast(self, value, from, to)
    }

    /// Runs the named node with inputs keyed by declared input port.
    async fn execute_node(&self, node_name: &str, inputs: PortValues)
        -> Result<PortValues, PluginError>;

    fn name(&self) -> &str {
        self.definition().name()
    }
}

/// A plugin on its own resolves bare names and names qualified with its own name.
impl<P: Plugin + ?Sized> TypeScope for P {
    fn lookup(&self, type_name: &str) -> Option<&TypeDefinition> {
        let definition = self.definition();
        match split_qualified(type_name) {
            (Some(plugin), bare) if plugin == definition.name() => definition.types.get(bare),
            (Some(_), _) => None,
            (None, bare) => definition.types.get(bare),
        }
    }

    fn check_rule(&self, type_name: &str, rule: &str, value: &Value) -> bool {
        self.check_validation_rule(split_qualified(type_name).1, rule, value)
    }

    fn refine_default(&self, type_name: &str, base_default: Value) -> Value {
        self.adjust_default(split_qualified(type_name).1, base_default)
    }

    fn convert_semantic(&self, value: Value, from: &str, to: &str) -> Result<Value, TypeError> {
        self.convert_between(value, split_qualified(from).1, split_qualified(to).1)
    }
}
